use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

use crate::common::messages;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Regras de negócio carregam a mensagem específica; falhas inesperadas viram 500 genérico.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Limite de requisições excedido")]
    TooManyRequests,

    // --- Redefinição de senha ---
    #[error("Token de redefinição inválido")]
    InvalidResetToken,

    #[error("Token de redefinição já utilizado")]
    ResetTokenAlreadyUsed,

    #[error("Token de redefinição expirado")]
    ResetTokenExpired,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado (storage, e-mail, ViaCEP...)
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::InvalidResetToken
            | AppError::ResetTokenExpired => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::ResetTokenAlreadyUsed => StatusCode::CONFLICT,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensagem que pode ser devolvida ao cliente. Nunca expõe detalhes internos.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .map(|(field, field_errors)| {
                        let reasons: Vec<String> = field_errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        format!("{}: {}", field, reasons.join(", "))
                    })
                    .collect();
                fields.sort();
                format!("Invalid data provided ({})", fields.join("; "))
            }
            AppError::BadRequest(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::InvalidCredentials => messages::INVALID_CREDENTIALS.to_string(),
            AppError::InvalidToken => messages::INVALID_SESSION_TOKEN.to_string(),
            AppError::TooManyRequests => messages::TOO_MANY_REQUESTS.to_string(),
            AppError::InvalidResetToken => messages::RESET_INVALID_TOKEN.to_string(),
            AppError::ResetTokenAlreadyUsed => messages::RESET_TOKEN_USED.to_string(),
            AppError::ResetTokenExpired => messages::RESET_TOKEN_EXPIRED.to_string(),
            _ => messages::INTERNAL_ERROR.to_string(),
        }
    }
}

/// Dados do erro anexados à resposta; o middleware `error_envelope` completa com o `path`.
#[derive(Debug, Clone)]
pub struct ErrorEnvelope {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn into_body(self, path: Option<&str>) -> serde_json::Value {
        json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
            "timestamp": Utc::now().to_rfc3339(),
            "path": path,
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // O `tracing` loga a mensagem detalhada que `thiserror` nos deu; o cliente só vê a genérica.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro Interno do Servidor: {} ({:?})", self, self);
        }

        let envelope = ErrorEnvelope {
            status,
            message: self.public_message(),
        };

        let mut response = (status, Json(envelope.clone().into_body(None))).into_response();
        response.extensions_mut().insert(envelope);
        response
    }
}

/// Converte violações de UNIQUE do Postgres em `Conflict` com a mensagem de negócio.
pub(crate) fn map_unique_violation(e: sqlx::Error, conflict_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::Conflict(conflict_message.to_string());
        }
    }
    e.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn business_errors_map_to_their_status_family() {
        assert_eq!(AppError::NotFound("x".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::Forbidden("x".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::ResetTokenAlreadyUsed.status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::ResetTokenExpired.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::TooManyRequests.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let err = AppError::InternalServerError(anyhow::anyhow!("senha do banco: hunter2"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["message"], messages::INTERNAL_ERROR);
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn response_carries_envelope_extension() {
        let response = AppError::NotFound(messages::NOT_FOUND_CLIENT.into()).into_response();
        let envelope = response.extensions().get::<ErrorEnvelope>().cloned().unwrap();
        assert_eq!(envelope.status, StatusCode::NOT_FOUND);
        assert_eq!(envelope.message, "Client not found");
    }
}
