// src/handlers/user.rs

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
        upload::{MultipartForm, IMAGE_MIME_TYPES},
    },
    config::AppState,
    handlers::client::AvatarUploadForm,
    middleware::rbac::{AdminOnly, RequireRole, StaffOnly},
    models::user::{CreateUserPayload, UpdateUserPayload, UserSummary},
};

// GET /users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(Pagination),
    responses(
        (status = 200, description = "{ message, users }", body = Vec<UserSummary>),
        (status = 403, description = "Apenas ADMIN")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    AppQuery(page): AppQuery<Pagination>,
) -> Result<impl IntoResponse, AppError> {
    page.validate()?;
    let users = app_state.user_service.list(page).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("Users"), "users": users })),
    ))
}

// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "{ message, user }", body = UserSummary),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.user_service.find_one(guard.principal(), id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::retrieved("User"), "user": user })),
    ))
}

// POST /users
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "{ message, user }", body = UserSummary),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    guard: RequireRole<AdminOnly>,
    AppJson(payload): AppJson<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let user = app_state.user_service.create(guard.principal(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": messages::created("User"), "user": user })),
    ))
}

// PATCH /users/{id}
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "{ message, user }", body = UserSummary),
        (status = 403, description = "Troca de papel sem ser ADMIN"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    AppJson(payload): AppJson<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let user = app_state
        .user_service
        .update(guard.principal(), id, payload)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("User"), "user": user })),
    ))
}

// PATCH /users/{id}/avatar
#[utoipa::path(
    patch,
    path = "/users/{id}/avatar",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    request_body(content = AvatarUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "{ message, user }", body = UserSummary),
        (status = 400, description = "Arquivo ausente, tipo inválido ou maior que 5 MB")
    ),
    security(("api_jwt" = []))
)]
pub async fn upload_user_avatar(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
    mut form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let file = form.take_file(IMAGE_MIME_TYPES)?;
    let user = app_state
        .user_service
        .update_avatar(guard.principal(), id, file)
        .await?;
    Ok((
        StatusCode::OK,
        Json(json!({ "message": messages::updated("Avatar"), "user": user })),
    ))
}

// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = Uuid, Path, description = "ID do usuário")),
    responses(
        (status = 200, description = "{ message }"),
        (status = 404, description = "Usuário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    guard: RequireRole<StaffOnly>,
    AppPath(id): AppPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_service.delete(guard.principal(), id).await?;
    Ok((StatusCode::OK, Json(json!({ "message": messages::deleted("User") }))))
}
