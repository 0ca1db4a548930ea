// src/handlers/endereco.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        json::{AppJson, AppPath},
        messages,
    },
    config::AppState,
    middleware::rbac::{AnyRole, RequireRole, StaffOnly},
    models::endereco::{CreateEnderecoPayload, Endereco, UpdateEnderecoPayload},
};

// GET /endereco
#[utoipa::path(
    get,
    path = "/endereco",
    tag = "Endereços",
    responses(
        (status = 200, description = "{ message, enderecos }", body = Vec<Endereco>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_enderecos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
) -> Result<impl IntoResponse, AppError> {
    let enderecos = app_state.endereco_service.list(guard.principal()).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Enderecos"), "enderecos": enderecos })),
    ))
}

// GET /endereco/{id}
#[utoipa::path(
    get,
    path = "/endereco/{id}",
    tag = "Endereços",
    params(("id" = Uuid, Path, description = "ID do endereço")),
    responses(
        (status = 200, description = "{ message, endereco }", body = Endereco),
        (status = 403, description = "Cliente tentando ver endereço de outro"),
        (status = 404, description = "Endereço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_endereco(
    State(app_state): State<AppState>,
    guard: RequireRole<AnyRole>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let endereco = app_state.endereco_service.find_one(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Endereco"), "endereco": endereco })),
    ))
}

// POST /endereco/{id} (id = cliente)
#[utoipa::path(
    post,
    path = "/endereco/{id}",
    tag = "Endereços",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = CreateEnderecoPayload,
    responses(
        (status = 201, description = "{ message, endereco }", body = Endereco),
        (status = 400, description = "CEP inválido"),
        (status = 404, description = "Cliente ou CEP não encontrado"),
        (status = 409, description = "Cliente já possui endereço")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_endereco(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(client_id): AppPath<Uuid>,
    AppJson(payload): AppJson<CreateEnderecoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let endereco = app_state
        .endereco_service
        .create(guard.principal(), client_id, payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("Endereco"), "endereco": endereco })),
    ))
}

// PATCH /endereco/{id}
#[utoipa::path(
    patch,
    path = "/endereco/{id}",
    tag = "Endereços",
    params(("id" = Uuid, Path, description = "ID do endereço")),
    request_body = UpdateEnderecoPayload,
    responses(
        (status = 200, description = "{ message, endereco }", body = Endereco),
        (status = 403, description = "Cliente tentando alterar endereço de outro"),
        (status = 404, description = "Endereço ou CEP não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_endereco(
    State(app_state): State<AppState>,
    guard: RequireRole<AnyRole>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateEnderecoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let endereco = app_state
        .endereco_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Endereco"), "endereco": endereco })),
    ))
}

// DELETE /endereco/{id}
#[utoipa::path(
    delete,
    path = "/endereco/{id}",
    tag = "Endereços",
    params(("id" = Uuid, Path, description = "ID do endereço")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 404, description = "Endereço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_endereco(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.endereco_service.delete(guard.principal(), id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": messages::deleted("Endereco") }))))
}
