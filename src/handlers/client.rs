// src/handlers/client.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        json::{AppJson, AppPath, AppQuery},
        messages,
        pagination::ClientListQuery,
        upload::{MultipartForm, IMAGE_MIME_TYPES},
    },
    config::AppState,
    middleware::rbac::{AnyRole, RequireRole, StaffOnly},
    models::client::{ClientSummary, CreateClientPayload, UpdateClientPayload},
};

/// Formulário `multipart/form-data` para troca de avatar.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct AvatarUploadForm {
    /// jpeg, jpg, png ou webp (máx. 5 MB)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

// GET /client
#[utoipa::path(
    get,
    path = "/client",
    tag = "Clients",
    params(ClientListQuery),
    responses(
        (status = 200, description = "{ message, clients }", body = Vec<ClientSummary>),
        (status = 403, description = "Apenas ADMIN/COLLABORATOR")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_clients(
    State(app_state): State<AppState>,
    _guard: RequireRole<StaffOnly>,
    AppQuery(query): AppQuery<ClientListQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;
    let clients = app_state.client_service.list(&query).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Clients"), "clients": clients })),
    ))
}

// GET /client/{id}
#[utoipa::path(
    get,
    path = "/client/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "{ message, client }", body = ClientSummary),
        (status = 403, description = "Cliente tentando ver dados de outro"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_client(
    State(app_state): State<AppState>,
    guard: RequireRole<AnyRole>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state.client_service.find_one(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Client"), "client": client })),
    ))
}

// POST /client
#[utoipa::path(
    post,
    path = "/client",
    tag = "Clients",
    request_body = CreateClientPayload,
    responses(
        (status = 201, description = "{ message, client }", body = ClientSummary),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail ou CPF já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_client(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppJson(payload): AppJson<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let client = app_state.client_service.create(guard.principal(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("Client"), "client": client })),
    ))
}

// PATCH /client/{id}
#[utoipa::path(
    patch,
    path = "/client/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateClientPayload,
    responses(
        (status = 200, description = "{ message, client }", body = ClientSummary),
        (status = 403, description = "Sem permissão ou troca de papel"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "E-mail ou CPF já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_client(
    State(app_state): State<AppState>,
    guard: RequireRole<AnyRole>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let client = app_state
        .client_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Client"), "client": client })),
    ))
}

// PATCH /client/{id}/avatar
#[utoipa::path(
    patch,
    path = "/client/{id}/avatar",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body(content = AvatarUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "{ message, client }", body = ClientSummary),
        (status = 400, description = "Arquivo ausente, tipo inválido ou maior que 5 MB"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_client_avatar(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let file = form.take_file(IMAGE_MIME_TYPES)?;
    let client = app_state
        .client_service
        .update_avatar(guard.principal(), id, file)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Avatar"), "client": client })),
    ))
}

// DELETE /client/{id}
#[utoipa::path(
    delete,
    path = "/client/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_client(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.client_service.delete(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::deleted("Client") })),
    ))
}
