// src/handlers/password_reset.rs
// Rotas públicas: a resposta do pedido é a mesma exista ou não a conta.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson},
    config::AppState,
    models::password_reset::{
        MessageResponse, RequestResetClientPayload, RequestResetUserPayload, ResetPasswordPayload,
    },
};

// POST /password-reset/request-client
#[utoipa::path(
    post,
    path = "/password-reset/request-client",
    tag = "Password Reset",
    request_body = RequestResetClientPayload,
    responses(
        (status = 200, description = "Mensagem genérica", body = MessageResponse),
        (status = 400, description = "CPF ausente")
    )
)]
pub async fn request_client_reset(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<RequestResetClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let message = app_state
        .password_reset_service
        .request_for_client(payload.cpf.trim())
        .await?;
    Ok((StatusCode::OK, Json(MessageResponse { message })))
}

// POST /password-reset/request-user
#[utoipa::path(
    post,
    path = "/password-reset/request-user",
    tag = "Password Reset",
    request_body = RequestResetUserPayload,
    responses(
        (status = 200, description = "Mensagem genérica", body = MessageResponse),
        (status = 400, description = "E-mail inválido")
    )
)]
pub async fn request_user_reset(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<RequestResetUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let message = app_state
        .password_reset_service
        .request_for_user(&payload.email)
        .await?;
    Ok((StatusCode::OK, Json(MessageResponse { message })))
}

// POST /password-reset/reset
#[utoipa::path(
    post,
    path = "/password-reset/reset",
    tag = "Password Reset",
    request_body = ResetPasswordPayload,
    responses(
        (status = 200, description = "Senha redefinida", body = MessageResponse),
        (status = 400, description = "Token inválido ou expirado"),
        (status = 409, description = "Token já utilizado")
    )
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<ResetPasswordPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let message = app_state
        .password_reset_service
        .reset_password(&payload.token, &payload.new_password)
        .await?;
    Ok((StatusCode::OK, Json(MessageResponse { message })))
}
