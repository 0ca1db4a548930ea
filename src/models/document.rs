// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Documento do cliente (RG, comprovantes, contratos...)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub client_id: Uuid,
    pub name: String,
    pub file_url: String,
    pub file_key: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub client_id: Uuid,
    pub name: String,
    pub file_url: String,
    pub file_key: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentPayload {
    #[validate(length(min = 1, message = "name should not be empty"))]
    #[schema(example = "RG frente e verso")]
    pub name: Option<String>,
}
