// src/models/documento_processo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Peça anexada a um processo. `tipo` é texto livre (PETICAO, SENTENCA, DESPACHO, CONTRATO, PROCURACAO, OUTRO).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentoProcesso {
    pub id: Uuid,
    pub processo_id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub tipo: Option<String>,
    pub file_url: String,
    pub file_key: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDocumentoProcesso {
    pub processo_id: Uuid,
    pub nome: String,
    pub descricao: Option<String>,
    pub tipo: Option<String>,
    pub file_url: String,
    pub file_key: String,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentoProcessoPayload {
    #[validate(length(min = 1, message = "nome should not be empty"))]
    pub nome: Option<String>,

    pub descricao: Option<String>,

    #[schema(example = "PETICAO")]
    pub tipo: Option<String>,
}
