// src/services/client_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages, pagination::ClientListQuery, upload::UploadedFile},
    db::ClientStore,
    models::{
        auth::{Principal, Role},
        client::{ClientChanges, ClientSummary, CreateClientPayload, NewClient, UpdateClientPayload},
    },
    services::{
        authorization::{ensure_allowed, Action, FieldChanges, ResourceKind, ResourceRef},
        hashing::PasswordHasher,
        storage::ObjectStorage,
        validators::{EmailOwner, EntityValidator},
    },
};

pub const AVATAR_FOLDER: &str = "avatars";

#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientStore>,
    validator: EntityValidator,
    hasher: PasswordHasher,
    storage: Arc<dyn ObjectStorage>,
}

impl ClientService {
    pub fn new(
        clients: Arc<dyn ClientStore>,
        validator: EntityValidator,
        hasher: PasswordHasher,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            clients,
            validator,
            hasher,
            storage,
        }
    }

    pub async fn list(&self, query: &ClientListQuery) -> Result<Vec<ClientSummary>, AppError> {
        let clients = self
            .clients
            .list(query.pagination(), query.search_term())
            .await?;
        Ok(clients.into_iter().map(ClientSummary::from).collect())
    }

    pub async fn find_one(&self, principal: &Principal, id: Uuid) -> Result<ClientSummary, AppError> {
        // O dono é o próprio id: a regra de acesso vem antes da busca
        ensure_allowed(
            principal,
            Action::Read,
            ResourceRef::new(ResourceKind::Client, id),
            &FieldChanges::none(),
        )?;
        let client = self.validator.ensure_client_exists(id).await?;
        Ok(client.into())
    }

    pub async fn create(&self, principal: &Principal, payload: CreateClientPayload) -> Result<ClientSummary, AppError> {
        ensure_allowed(
            principal,
            Action::Create,
            ResourceRef::unowned(ResourceKind::Client),
            &FieldChanges::role(payload.role, Role::Client),
        )?;

        self.validator
            .ensure_email_available(&payload.email, EmailOwner::Client, None)
            .await?;
        self.validator.ensure_cpf_available(&payload.cpf, None).await?;

        let password_hash = self.hasher.hash(&payload.password).await?;

        let client = self
            .clients
            .create(NewClient {
                name: payload.name,
                email: payload.email,
                password_hash,
                avatar: payload.avatar,
                cpf: payload.cpf,
                phone: payload.phone,
                birth_date: payload.birth_date,
                sex: payload.sex,
                role: payload.role.unwrap_or(Role::Client),
                status: payload.status.unwrap_or(true),
            })
            .await?;

        tracing::info!("👤 Cliente criado: {}", client.id);
        Ok(client.into())
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: Uuid,
        payload: UpdateClientPayload,
    ) -> Result<ClientSummary, AppError> {
        let target = ResourceRef::new(ResourceKind::Client, id);
        ensure_allowed(principal, Action::Update, target, &FieldChanges::none())?;

        let current = self.validator.ensure_client_exists(id).await?;
        ensure_allowed(
            principal,
            Action::Update,
            target,
            &FieldChanges::role(payload.role, current.role),
        )?;

        if let Some(email) = payload.email.as_deref() {
            self.validator
                .ensure_email_available(email, EmailOwner::Client, Some(id))
                .await?;
        }
        if let Some(cpf) = payload.cpf.as_deref() {
            self.validator.ensure_cpf_available(cpf, Some(id)).await?;
        }

        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        let changes = ClientChanges {
            name: payload.name,
            email: payload.email,
            password_hash,
            cpf: payload.cpf,
            phone: payload.phone,
            birth_date: payload.birth_date,
            sex: payload.sex,
            role: payload.role,
            status: payload.status,
        };

        let client = self
            .clients
            .update(id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_CLIENT.into()))?;
        Ok(client.into())
    }

    pub async fn update_avatar(
        &self,
        principal: &Principal,
        id: Uuid,
        file: UploadedFile,
    ) -> Result<ClientSummary, AppError> {
        ensure_allowed(
            principal,
            Action::Update,
            ResourceRef::new(ResourceKind::Client, id),
            &FieldChanges::none(),
        )?;
        let current = self.validator.ensure_client_exists(id).await?;

        let stored = self.storage.upload(&file, AVATAR_FOLDER).await?;
        let client = self
            .clients
            .set_avatar(id, &stored.url)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_CLIENT.into()))?;

        if let Some(old_key) = current
            .avatar
            .as_deref()
            .and_then(|url| self.storage.extract_key_from_url(url))
        {
            if let Err(e) = self.storage.delete(&old_key).await {
                tracing::warn!("⚠️ Avatar antigo não removido ({}): {}", old_key, e);
            }
        }

        Ok(client.into())
    }

    pub async fn delete(&self, principal: &Principal, id: Uuid) -> Result<(), AppError> {
        ensure_allowed(
            principal,
            Action::Delete,
            ResourceRef::new(ResourceKind::Client, id),
            &FieldChanges::none(),
        )?;
        self.validator.ensure_client_exists(id).await?;
        self.clients.delete(id).await?;
        tracing::info!("🗑️ Cliente removido: {}", id);
        Ok(())
    }
}
