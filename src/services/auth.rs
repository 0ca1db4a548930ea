// src/services/auth.rs

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    db::{ClientStore, UserStore},
    models::auth::{Claims, Principal, Profile, Role},
    services::hashing::PasswordHasher,
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    clients: Arc<dyn ClientStore>,
    hasher: PasswordHasher,
    jwt_secret: String,
    expiration_hours: i64,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        clients: Arc<dyn ClientStore>,
        hasher: PasswordHasher,
        jwt_secret: String,
        expiration_hours: i64,
    ) -> Self {
        Self {
            users,
            clients,
            hasher,
            jwt_secret,
            expiration_hours,
        }
    }

    /// Login único para equipe e clientes: procura primeiro em `users`, depois em `clients`.
    /// Conta inativa se comporta como inexistente.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let (subject_id, role, password_hash) =
            if let Some(user) = self.users.find_by_email(email).await?.filter(|u| u.status) {
                (user.id, user.role, user.password)
            } else if let Some(client) = self.clients.find_by_email(email).await?.filter(|c| c.status) {
                (client.id, client.role, client.password)
            } else {
                tracing::debug!("Login recusado: conta inexistente ou inativa");
                return Err(AppError::InvalidCredentials);
            };

        if !self.hasher.verify(password, &password_hash).await? {
            tracing::debug!("Login recusado: senha incorreta");
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(subject_id, email, role)
    }

    /// Valida assinatura e expiração. Não consulta o banco: o token carrega id, e-mail e papel.
    pub fn verify_token(&self, token: &str) -> Result<Principal, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(Principal::from(token_data.claims))
    }

    /// Perfil de quem está logado (usuário da equipe ou cliente, conforme o papel).
    pub async fn me(&self, principal: &Principal) -> Result<Profile, AppError> {
        if principal.role.is_staff() {
            let user = self
                .users
                .find_by_id(principal.subject_id)
                .await?
                .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_USER.into()))?;
            Ok(Profile::User(user.into()))
        } else {
            let client = self
                .clients
                .find_by_id(principal.subject_id)
                .await?
                .ok_or_else(|| AppError::NotFound(messages::NOT_FOUND_CLIENT.into()))?;
            Ok(Profile::Client(client.into()))
        }
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    pub fn create_token(&self, subject_id: Uuid, email: &str, role: Role) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::hours(self.expiration_hours);

        let claims = Claims {
            sub: subject_id,
            email: email.to_owned(),
            role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
