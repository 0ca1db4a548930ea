// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::Role;

// Usuário da equipe (ADMIN ou COLLABORATOR)
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            avatar: u.avatar,
            role: u.role,
            status: u.status,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "name should not be empty"))]
    #[schema(example = "Dr. João Souza")]
    pub name: String,

    #[validate(email(message = "email must be an email"))]
    #[schema(example = "joao@escritorio.com")]
    pub email: String,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    pub password: String,

    pub avatar: Option<String>,

    /// ADMIN ou COLLABORATOR (padrão COLLABORATOR)
    pub role: Option<Role>,

    #[serde(alias = "isActive")]
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "email must be an email"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    pub password: Option<String>,

    pub role: Option<Role>,

    #[serde(alias = "isActive")]
    pub status: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub role: Role,
    pub status: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    pub status: Option<bool>,
}
