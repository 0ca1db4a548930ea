// src/models/processo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "tipo_processo", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoProcesso {
    Civel,
    Criminal,
    Trabalhista,
    Tributario,
    Familia,
    Previdenciario,
    Administrativo,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "processo_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessoStatus {
    #[default]
    Ativo,
    Suspenso,
    Arquivado,
    Encerrado,
}

// Também é o formato guardado no cache, por isso `Deserialize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Processo {
    pub id: Uuid,
    pub numero_processo: i64,
    pub tipo: TipoProcesso,
    pub status: ProcessoStatus,
    pub tribunal: Option<String>,
    pub data_abertura: DateTime<Utc>,
    pub data_encerramento: Option<DateTime<Utc>>,
    pub client_id: Uuid,
    pub responsavel_id: Uuid,
    pub parte_contraria: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProcessoPayload {
    #[validate(range(min = 1, message = "numeroProcesso must be a positive number"))]
    #[schema(example = 50012345)]
    pub numero_processo: i64,

    pub tipo: TipoProcesso,

    #[schema(example = "TJRS")]
    pub tribunal: Option<String>,

    pub status: Option<ProcessoStatus>,

    pub data_abertura: Option<DateTime<Utc>>,

    pub data_encerramento: Option<DateTime<Utc>>,

    pub client_id: Uuid,

    pub responsavel_id: Uuid,

    #[validate(length(min = 1, message = "parteContraria should not be empty"))]
    #[schema(example = "Empresa X Ltda.")]
    pub parte_contraria: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProcessoPayload {
    #[validate(range(min = 1, message = "numeroProcesso must be a positive number"))]
    pub numero_processo: Option<i64>,

    pub tipo: Option<TipoProcesso>,

    pub tribunal: Option<String>,

    pub status: Option<ProcessoStatus>,

    pub data_abertura: Option<DateTime<Utc>>,

    pub data_encerramento: Option<DateTime<Utc>>,

    pub client_id: Option<Uuid>,

    pub responsavel_id: Option<Uuid>,

    #[validate(length(min = 1, message = "parteContraria should not be empty"))]
    pub parte_contraria: Option<String>,
}
