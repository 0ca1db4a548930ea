// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{client::ClientSummary, user::UserSummary};

// Mapeia o CREATE TYPE user_role do banco (compartilhado por users e clients)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Collaborator,
    Client,
}

impl Role {
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Collaborator)
    }
}

// Payload do JWT. `sub` é o id do usuário OU do cliente, conforme o `role`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// Quem está fazendo a requisição. Montado a partir de um token válido e imutável durante a requisição.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    pub subject_id: Uuid,
    pub role: Role,
    pub email: String,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            subject_id: claims.sub,
            role: claims.role,
            email: claims.email,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "email must be an email"))]
    #[schema(example = "advogado@escritorio.com")]
    pub email: String,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    #[schema(example = "senha123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
}

/// Resposta de `GET /auth/me`: o perfil de quem está logado.
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Profile {
    User(UserSummary),
    Client(ClientSummary),
}
