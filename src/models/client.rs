// src/models/client.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::auth::Role;

// Linha completa da tabela `clients` (inclui o hash da senha; nunca serializada)
#[derive(Debug, Clone, FromRow)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: Option<String>,
    pub cpf: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub sex: String,
    pub role: Role,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// O que sai na API
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub cpf: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub sex: String,
    pub role: Role,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Client> for ClientSummary {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            avatar: c.avatar,
            cpf: c.cpf,
            phone: c.phone,
            birth_date: c.birth_date,
            sex: c.sex,
            role: c.role,
            status: c.status,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    #[validate(length(min = 1, message = "name should not be empty"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[validate(email(message = "email must be an email"))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    pub avatar: Option<String>,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "cpf should not be empty"))]
    #[schema(example = "12345678900")]
    pub cpf: String,

    #[validate(length(min = 1, message = "phone should not be empty"))]
    #[schema(example = "51999998888")]
    pub phone: String,

    #[schema(example = "1990-05-20")]
    pub birth_date: NaiveDate,

    #[validate(length(min = 1, message = "sex should not be empty"))]
    #[schema(example = "F")]
    pub sex: String,

    pub role: Option<Role>,

    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientPayload {
    #[validate(length(min = 1, message = "name should not be empty"))]
    pub name: Option<String>,

    #[validate(email(message = "email must be an email"))]
    pub email: Option<String>,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    pub password: Option<String>,

    #[validate(length(min = 1, message = "cpf should not be empty"))]
    pub cpf: Option<String>,

    #[validate(length(min = 1, message = "phone should not be empty"))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "sex should not be empty"))]
    pub sex: Option<String>,

    pub role: Option<Role>,

    pub status: Option<bool>,
}

// Entrada do repositório: senha já com hash
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub cpf: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub sex: String,
    pub role: Role,
    pub status: bool,
}

// Atualização parcial; `None` mantém o valor atual
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub role: Option<Role>,
    pub status: Option<bool>,
}
