// src/services/user_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::Pagination, upload::UploadedFile},
    db::UserStore,
    models::{
        auth::{Principal, Role},
        user::{CreateUserPayload, NewUser, UpdateUserPayload, UserChanges, UserSummary},
    },
    services::{
        authorization::{ensure_allowed, Action, FieldChanges, ResourceKind, ResourceRef},
        client_service::AVATAR_FOLDER,
        hashing::PasswordHasher,
        storage::ObjectStorage,
        validators::{EmailOwner, EntityValidator},
    },
};

const STAFF_ROLE_ONLY: &str = "role must be one of the following values: ADMIN, COLLABORATOR";

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    validator: EntityValidator,
    hasher: PasswordHasher,
    storage: Arc<dyn ObjectStorage>,
}

// Usuários da equipe nunca têm papel CLIENT
fn ensure_staff_role(role: Option<Role>) -> Result<(), AppError> {
    match role {
        Some(Role::Client) => Err(AppError::BadRequest(STAFF_ROLE_ONLY.into())),
        _ => Ok(()),
    }
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        validator: EntityValidator,
        hasher: PasswordHasher,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            users,
            validator,
            hasher,
            storage,
        }
    }

    pub async fn list(&self, page: Pagination) -> Result<Vec<UserSummary>, AppError> {
        let users = self.users.list(page).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<UserSummary, AppError> {
        ensure_allowed(
            principal,
            Action::Read,
            ResourceRef::new(ResourceKind::User, id),
            &FieldChanges::none(),
        )?;
        Ok(self.validator.ensure_user_exists(id).await?.into())
    }

    pub async fn create(&self, principal: &Principal, payload: CreateUserPayload) -> Result<UserSummary, AppError> {
        ensure_staff_role(payload.role)?;
        ensure_allowed(
            principal,
            Action::Create,
            ResourceRef::unowned(ResourceKind::User),
            &FieldChanges::role(payload.role, Role::Collaborator),
        )?;

        self.validator
            .ensure_email_available(&payload.email, EmailOwner::User, None)
            .await?;

        let password_hash = self.hasher.hash(&payload.password).await?;
        let user = self
            .users
            .create(NewUser {
                name: payload.name,
                email: payload.email,
                password_hash,
                avatar: payload.avatar,
                role: payload.role.unwrap_or(Role::Collaborator),
                status: payload.status.unwrap_or(true),
            })
            .await?;

        tracing::info!("🧑‍💼 Usuário criado: {} ({:?})", user.id, user.role);
        Ok(user.into())
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: UpdateUserPayload,
    ) -> Result<UserSummary, AppError> {
        ensure_staff_role(payload.role)?;
        let current = self.validator.ensure_user_exists(id).await?;

        ensure_allowed(
            principal,
            Action::Update,
            ResourceRef::new(ResourceKind::User, id),
            &FieldChanges::role(payload.role, current.role),
        )?;

        if let Some(email) = payload.email.as_deref() {
            self.validator
                .ensure_email_available(email, EmailOwner::User, Some(id))
                .await?;
        }

        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let user = self
            .users
            .update(
                id,
                UserChanges {
                    name: payload.name,
                    email: payload.email,
                    password_hash,
                    role: payload.role,
                    status: payload.status,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_USER.into()))?;
        Ok(user.into())
    }

    pub async fn update_avatar(
        &self,
        principal: &Principal,
        id: Uuid,
        file: UploadedFile,
    ) -> Result<UserSummary, AppError> {
        ensure_allowed(
            principal,
            Action::Update,
            ResourceRef::new(ResourceKind::User, id),
            &FieldChanges::none(),
        )?;
        let current = self.validator.ensure_user_exists(id).await?;

        let stored = self.storage.upload(&file, AVATAR_FOLDER).await?;
        let user = self
            .users
            .set_avatar(id, &stored.url)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_USER.into()))?;

        if let Some(old_key) = current
            .avatar
            .as_deref()
            .and_then(|url| self.storage.extract_key_from_url(url))
        {
            if let Err(e) = self.storage.delete(&old_key).await {
                tracing::warn!("⚠️ Avatar antigo não removido ({}): {}", old_key, e);
            }
        }

        Ok(user.into())
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_allowed(
            principal,
            Action::Delete,
            ResourceRef::new(ResourceKind::User, id),
            &FieldChanges::none(),
        )?;
        self.validator.ensure_user_exists(id).await?;
        self.users.delete(id).await?;
        tracing::info!("🗑️ Usuário removido: {}", id);
        Ok(())
    }
}
