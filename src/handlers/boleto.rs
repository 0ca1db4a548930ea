// src/handlers/boleto.rs

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
        pagination::Pagination,
        upload::{MultipartForm, BOLETO_MIME_TYPES},
    },
    config::AppState,
    middleware::rbac::{RequireRole, StaffOnly},
    models::boleto::{Boleto, UpdateBoletoPayload},
    services::boleto_service::{parse_due_date, BoletoUpload},
};

#[derive(ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct BoletoUploadForm {
    /// PDF ou imagem (máx. 5 MB)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "Honorários - parcela 1/3")]
    titulo: String,
    #[schema(example = "2025-12-31")]
    data_vencimento: String,
    observacao: Option<String>,
}

// GET /boleto
#[utoipa::path(
    get,
    path = "/boleto",
    tag = "Boletos",
    params(Pagination),
    responses(
        (status = 200, description = "{ message, boletos }", body = Vec<Boleto>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_boletos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let boletos = app_state.boleto_service.list(guard.principal(), page).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Boletos"), "boletos": boletos })),
    ))
}

// GET /boleto/client/{id}
#[utoipa::path(
    get,
    path = "/boleto/client/{id}",
    tag = "Boletos",
    params(("id" = Uuid, Path, description = "ID do cliente"), Pagination),
    responses(
        (status = 200, description = "{ message, boletos }", body = Vec<Boleto>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_client_boletos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(client_id): AppPath<Uuid>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let boletos = app_state
        .boleto_service
        .list_by_client(guard.principal(), client_id, page)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Boletos"), "boletos": boletos })),
    ))
}

// GET /boleto/{id}
#[utoipa::path(
    get,
    path = "/boleto/{id}",
    tag = "Boletos",
    params(("id" = Uuid, Path, description = "ID do boleto")),
    responses(
        (status = 200, description = "{ message, boleto }", body = Boleto),
        (status = 404, description = "Boleto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_boleto(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let boleto = app_state.boleto_service.find_one(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Boleto"), "boleto": boleto })),
    ))
}

// POST /boleto/{id} (id = cliente)
#[utoipa::path(
    post,
    path = "/boleto/{id}",
    tag = "Boletos",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body(content = BoletoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "{ message, boleto }", body = Boleto),
        (status = 400, description = "Arquivo ausente, tipo inválido, maior que 5 MB ou data inválida"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_boleto(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(client_id): AppPath<Uuid>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let file = form.take_file(BOLETO_MIME_TYPES)?;
    let fields = BoletoUpload {
        titulo: form.required_text("titulo")?,
        observacao: form.text("observacao"),
        data_vencimento: parse_due_date(&form.required_text("dataVencimento")?)?,
    };

    let boleto = app_state
        .boleto_service
        .create(guard.principal(), client_id, fields, file)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("Boleto"), "boleto": boleto })),
    ))
}

// PATCH /boleto/{id}
#[utoipa::path(
    patch,
    path = "/boleto/{id}",
    tag = "Boletos",
    params(("id" = Uuid, Path, description = "ID do boleto")),
    request_body = UpdateBoletoPayload,
    responses(
        (status = 200, description = "{ message, boleto }", body = Boleto),
        (status = 404, description = "Boleto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_boleto(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateBoletoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let boleto = app_state
        .boleto_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Boleto"), "boleto": boleto })),
    ))
}

// DELETE /boleto/{id}
#[utoipa::path(
    delete,
    path = "/boleto/{id}",
    tag = "Boletos",
    params(("id" = Uuid, Path, description = "ID do boleto")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 404, description = "Boleto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_boleto(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.boleto_service.delete(guard.principal(), id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": messages::deleted("Boleto") }))))
}
