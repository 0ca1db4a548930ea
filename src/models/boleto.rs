// src/models/boleto.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Boleto {
    pub id: Uuid,
    pub client_id: Uuid,
    pub titulo: String,
    pub observacao: Option<String>,
    pub status: bool,
    pub data_vencimento: DateTime<Utc>,
    pub file_url: String,
    pub file_key: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBoleto {
    pub client_id: Uuid,
    pub titulo: String,
    pub observacao: Option<String>,
    pub data_vencimento: DateTime<Utc>,
    pub file_url: String,
    pub file_key: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoletoPayload {
    #[validate(length(min = 1, message = "titulo should not be empty"))]
    pub titulo: Option<String>,

    pub observacao: Option<String>,

    pub data_vencimento: Option<DateTime<Utc>>,

    /// `false` marca o boleto como quitado/inativo
    pub status: Option<bool>,
}
