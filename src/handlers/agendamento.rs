// src/handlers/agendamento.rs

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
    models::agendamento::{Agendamento, CreateAgendamentoPayload, UpdateAgendamentoPayload},
};

// GET /agendamento
#[utoipa::path(
    get,
    path = "/agendamento",
    tag = "Agendamentos",
    params(Pagination),
    responses(
        (status = 200, description = "{ message, agendamentos }", body = Vec<Agendamento>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_agendamentos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let agendamentos = app_state.agendamento_service.list(guard.principal(), page).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Agendamentos"), "agendamentos": agendamentos })),
    ))
}

// GET /agendamento/client/{id}
#[utoipa::path(
    get,
    path = "/agendamento/client/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do cliente"), Pagination),
    responses(
        (status = 200, description = "{ message, agendamentos }", body = Vec<Agendamento>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_client_agendamentos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(client_id): AppPath<Uuid>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let agendamentos = app_state
        .agendamento_service
        .list_by_client(guard.principal(), client_id, page)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Agendamentos"), "agendamentos": agendamentos })),
    ))
}

// GET /agendamento/{id}
#[utoipa::path(
    get,
    path = "/agendamento/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "{ message, agendamento }", body = Agendamento),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_agendamento(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let agendamento = app_state.agendamento_service.find_one(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Agendamento"), "agendamento": agendamento })),
    ))
}

// POST /agendamento
#[utoipa::path(
    post,
    path = "/agendamento",
    tag = "Agendamentos",
    request_body = CreateAgendamentoPayload,
    responses(
        (status = 201, description = "{ message, agendamento }", body = Agendamento),
        (status = 400, description = "Dados inválidos ou data no passado"),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Cliente já tem agendamento nesse horário")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_agendamento(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppJson(payload): AppJson<CreateAgendamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let agendamento = app_state
        .agendamento_service
        .create(guard.principal(), payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("Agendamento"), "agendamento": agendamento })),
    ))
}

// PATCH /agendamento/{id}
#[utoipa::path(
    patch,
    path = "/agendamento/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    request_body = UpdateAgendamentoPayload,
    responses(
        (status = 200, description = "{ message, agendamento }", body = Agendamento),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Cliente já tem agendamento nesse horário")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_agendamento(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateAgendamentoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let agendamento = app_state
        .agendamento_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Agendamento"), "agendamento": agendamento })),
    ))
}

// DELETE /agendamento/{id}
#[utoipa::path(
    delete,
    path = "/agendamento/{id}",
    tag = "Agendamentos",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_agendamento(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.agendamento_service.delete(guard.principal(), id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": messages::deleted("Agendamento") }))))
}
