// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, messages},
    config::AppState,
    middleware::auth::{Authenticated, SESSION_COOKIE},
    models::auth::{AuthResponse, LoginPayload, Profile},
};

// POST /auth
#[utoipa::path(
    post,
    path = "/auth",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado; também grava o cookie `session`", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let access_token = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, access_token.clone()))
        .http_only(true)
        .secure(app_state.cookie_secure)
        .same_site(SameSite::Lax)
        .path("/")
        // O cookie expira junto com o JWT
        .max_age(time::Duration::hours(app_state.auth_service.expiration_hours()));

    tracing::info!("🔐 {}: {}", messages::LOGIN_SUCCESS, payload.email);
    Ok((StatusCode::OK, jar.add(cookie), Json(AuthResponse { access_token })))
}

// GET /auth/me
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Perfil de quem está logado", body = Profile),
        (status = 401, description = "Não autenticado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    Authenticated(principal): Authenticated,
) -> Result<impl IntoResponse, AppError> {
    let profile = app_state.auth_service.me(&principal).await?;
    Ok((StatusCode::OK, Json(profile)))
}

// POST /auth/logout
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Cookie de sessão removido")
    )
)]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (StatusCode::OK, jar, Json(json!({ "message": messages::LOGOUT_SUCCESS })))
}
