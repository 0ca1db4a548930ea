// src/models/agendamento.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Compromisso de um cliente. Duração implícita de 2 horas a partir de `data_hora`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Agendamento {
    pub id: Uuid,
    pub client_id: Uuid,
    pub titulo: String,
    pub descricao: Option<String>,
    pub data_hora: DateTime<Utc>,
    pub local: Option<String>,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgendamentoPayload {
    pub client_id: Uuid,

    #[validate(length(min = 1, message = "titulo should not be empty"))]
    #[schema(example = "Reunião inicial")]
    pub titulo: String,

    pub descricao: Option<String>,

    #[schema(example = "2025-10-25T14:00:00Z")]
    pub data_hora: DateTime<Utc>,

    pub local: Option<String>,

    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgendamentoPayload {
    #[validate(length(min = 1, message = "titulo should not be empty"))]
    pub titulo: Option<String>,

    pub descricao: Option<String>,

    pub data_hora: Option<DateTime<Utc>>,

    pub local: Option<String>,

    pub link: Option<String>,
}
