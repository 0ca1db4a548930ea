// src/handlers/documento_processo.rs

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
        upload::{MultipartForm, DOCUMENTO_PROCESSO_MIME_TYPES},
    },
    config::AppState,
    middleware::rbac::{AdminOnly, RequireRole, StaffOnly},
    models::documento_processo::{DocumentoProcesso, UpdateDocumentoProcessoPayload},
    services::documento_processo_service::DocumentoProcessoUpload,
};

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct DocumentoProcessoUploadForm {
    /// PDF, imagem ou Word (máx. 5 MB)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "Petição inicial")]
    nome: String,
    descricao: Option<String>,
    #[schema(example = "PETICAO")]
    tipo: Option<String>,
}

// GET /documento-processo
#[utoipa::path(
    get,
    path = "/documento-processo",
    tag = "Documentos do Processo",
    params(Pagination),
    responses(
        (status = 200, description = "{ message, documentos }", body = Vec<DocumentoProcesso>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_documentos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let documentos = app_state
        .documento_processo_service
        .list(guard.principal(), page)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Documentos"), "documentos": documentos })),
    ))
}

// GET /documento-processo/processo/{id}
#[utoipa::path(
    get,
    path = "/documento-processo/processo/{id}",
    tag = "Documentos do Processo",
    params(("id" = Uuid, Path, description = "ID do processo"), Pagination),
    responses(
        (status = 200, description = "{ message, documentos }", body = Vec<DocumentoProcesso>),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_processo_documentos(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(processo_id): AppPath<Uuid>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let documentos = app_state
        .documento_processo_service
        .list_by_processo(guard.principal(), processo_id, page)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Documentos"), "documentos": documentos })),
    ))
}

// GET /documento-processo/{id}
#[utoipa::path(
    get,
    path = "/documento-processo/{id}",
    tag = "Documentos do Processo",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "{ message, documento }", body = DocumentoProcesso),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_documento(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let documento = app_state
        .documento_processo_service
        .find_one(guard.principal(), id)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Documento"), "documento": documento })),
    ))
}

// POST /documento-processo/{id} (id = processo)
#[utoipa::path(
    post,
    path = "/documento-processo/{id}",
    tag = "Documentos do Processo",
    params(("id" = Uuid, Path, description = "ID do processo")),
    request_body(content = DocumentoProcessoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "{ message, documento }", body = DocumentoProcesso),
        (status = 400, description = "Arquivo ausente, tipo inválido ou maior que 5 MB"),
        (status = 404, description = "Processo não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_documento(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(processo_id): AppPath<Uuid>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let file = form.take_file(DOCUMENTO_PROCESSO_MIME_TYPES)?;
    let fields = DocumentoProcessoUpload {
        nome: form.required_text("nome")?,
        descricao: form.text("descricao"),
        tipo: form.text("tipo"),
    };

    let documento = app_state
        .documento_processo_service
        .create(guard.principal(), processo_id, fields, file)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("Documento"), "documento": documento })),
    ))
}

// PATCH /documento-processo/{id}
#[utoipa::path(
    patch,
    path = "/documento-processo/{id}",
    tag = "Documentos do Processo",
    params(("id" = Uuid, Path, description = "ID do documento")),
    request_body = UpdateDocumentoProcessoPayload,
    responses(
        (status = 200, description = "{ message, documento }", body = DocumentoProcesso),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_documento(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateDocumentoProcessoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let documento = app_state
        .documento_processo_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Documento"), "documento": documento })),
    ))
}

// DELETE /documento-processo/{id}
#[utoipa::path(
    delete,
    path = "/documento-processo/{id}",
    tag = "Documentos do Processo",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 403, description = "Apenas ADMIN"),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_documento(
    State(app_state): State<AppState>,
    guard: RequireRole<AdminOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .documento_processo_service
        .delete(guard.principal(), id)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "message": messages::deleted("Documento") }))))
}
