// src/models/endereco.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endereco {
    pub id: Uuid,
    pub client_id: Uuid,
    pub cep: String,
    pub endereco: Option<String>,
    pub numero: String,
    pub complemento: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Campos derivados do CEP pela consulta externa
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CepLookup {
    pub endereco: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
}

/// Mantém só os dígitos ("91450-345" -> "91450345")
pub fn normalize_cep(cep: &str) -> String {
    cep.chars().filter(char::is_ascii_digit).collect()
}

fn validate_cep(cep: &str) -> Result<(), ValidationError> {
    if normalize_cep(cep).len() == 8 {
        Ok(())
    } else {
        Err(ValidationError::new("cep").with_message("CEP must have 8 digits".into()))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnderecoPayload {
    #[validate(custom(function = "validate_cep"))]
    #[schema(example = "91450345")]
    pub cep: String,

    #[validate(length(min = 1, message = "numero should not be empty"))]
    #[schema(example = "123")]
    pub numero: String,

    #[schema(example = "Apto 101")]
    pub complemento: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnderecoPayload {
    #[validate(custom(function = "validate_cep"))]
    pub cep: Option<String>,

    #[validate(length(min = 1, message = "numero should not be empty"))]
    pub numero: Option<String>,

    pub complemento: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEndereco {
    pub client_id: Uuid,
    pub cep: String,
    pub numero: String,
    pub complemento: Option<String>,
    pub lookup: CepLookup,
}

#[derive(Debug, Clone, Default)]
pub struct EnderecoChanges {
    pub cep: Option<String>,
    pub numero: Option<String>,
    pub complemento: Option<String>,
    pub lookup: Option<CepLookup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cep_accepts_dash_and_rejects_short_codes() {
        assert_eq!(normalize_cep("91450-345"), "91450345");
        assert!(validate_cep("91450-345").is_ok());
        assert!(validate_cep("9145034").is_err());
    }
}
