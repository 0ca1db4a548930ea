// src/models/password_reset.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: Uuid,
    pub email: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RequestResetClientPayload {
    #[validate(length(min = 1, message = "cpf should not be empty"))]
    #[schema(example = "12345678900")]
    pub cpf: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RequestResetUserPayload {
    #[validate(email(message = "email must be an email"))]
    #[schema(example = "joao@escritorio.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordPayload {
    #[validate(length(min = 1, message = "token should not be empty"))]
    pub token: String,

    #[validate(length(min = 6, message = "newPassword must be longer than or equal to 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
