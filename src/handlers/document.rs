// src/handlers/document.rs

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
        upload::{MultipartForm, DOCUMENT_MIME_TYPES},
    },
    config::AppState,
    middleware::rbac::{RequireRole, StaffOnly},
    models::document::{Document, UpdateDocumentPayload},
};

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct DocumentUploadForm {
    /// Imagem, PDF ou Word (máx. 5 MB)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "RG frente e verso")]
    name: String,
}

// GET /document
#[utoipa::path(
    get,
    path = "/document",
    tag = "Documents",
    params(Pagination),
    responses(
        (status = 200, description = "{ message, documents }", body = Vec<Document>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let documents = app_state.document_service.list(guard.principal(), page).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Documents"), "documents": documents })),
    ))
}

// GET /document/client/{id}
#[utoipa::path(
    get,
    path = "/document/client/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "{ message, documents }", body = Vec<Document>),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_client_documents(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(client_id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let documents = app_state
        .document_service
        .list_by_client(guard.principal(), client_id)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Documents"), "documents": documents })),
    ))
}

// GET /document/{id}
#[utoipa::path(
    get,
    path = "/document/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "{ message, document }", body = Document),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_document(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = app_state.document_service.find_one(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Document"), "document": document })),
    ))
}

// POST /document/{id} (id = cliente dono do documento)
#[utoipa::path(
    post,
    path = "/document/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body(content = DocumentUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "{ message, document }", body = Document),
        (status = 400, description = "Arquivo ausente, tipo inválido ou maior que 5 MB"),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_document(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(client_id): AppPath<Uuid>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let file = form.take_file(DOCUMENT_MIME_TYPES)?;
    let name = form.required_text("name")?;

    let document = app_state
        .document_service
        .create(guard.principal(), client_id, name, file)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("Document"), "document": document })),
    ))
}

// PATCH /document/{id}
#[utoipa::path(
    patch,
    path = "/document/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    request_body = UpdateDocumentPayload,
    responses(
        (status = 200, description = "{ message, document }", body = Document),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_document(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateDocumentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let document = app_state
        .document_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Document"), "document": document })),
    ))
}

// DELETE /document/{id}
#[utoipa::path(
    delete,
    path = "/document/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID do documento")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 404, description = "Documento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_document(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.document_service.delete(guard.principal(), id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": messages::deleted("Document") }))))
}
