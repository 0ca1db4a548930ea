// src/handlers/processo.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        json::{AppJson, AppPath, AppQuery},
        messages,
        pagination::Pagination,
    },
    config::AppState,
    middleware::rbac::{RequireRole, StaffOnly},
    models::processo::{CreateProcessoPayload, Processo, UpdateProcessoPayload},
};

// GET /processo
#[utoipa::path(
    get,
    path = "/processo",
    tag = "Processos",
    params(Pagination),
    responses(
        (status = 200, description = "{ message, processos }", body = Vec<Processo>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_processos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let processos = app_state.processo_service.list(guard.principal(), page).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Processos"), "processos": processos })),
    ))
}

// GET /processo/{id}
#[utoipa::path(
    get,
    path = "/processo/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "{ message, processo }", body = Processo),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_processo(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let processo = app_state.processo_service.find_one(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Processo"), "processo": processo })),
    ))
}

// POST /processo
#[utoipa::path(
    post,
    path = "/processo",
    tag = "Processos",
    request_body = CreateProcessoPayload,
    responses(
        (status = 201, description = "{ message, processo }", body = Processo),
        (status = 404, description = "Cliente ou responsável não encontrado"),
        (status = 409, description = "Número de processo já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_processo(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppJson(payload): AppJson<CreateProcessoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let processo = app_state.processo_service.create(guard.principal(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("Processo"), "processo": processo })),
    ))
}

// PATCH /processo/{id}
#[utoipa::path(
    patch,
    path = "/processo/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body = UpdateProcessoPayload,
    responses(
        (status = 200, description = "{ message, processo }", body = Processo),
        (status = 404, description = "Processo não encontrado"),
        (status = 409, description = "Número de processo já existe")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_processo(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateProcessoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let processo = app_state
        .processo_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Processo"), "processo": processo })),
    ))
}

// DELETE /processo/{id}
#[utoipa::path(
    delete,
    path = "/processo/{id}",
    tag = "Processos",
    params(("id" = Uuid, Path, description = "ID do processo")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_processo(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.processo_service.delete(guard.principal(), id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": messages::deleted("Processo") }))))
}
