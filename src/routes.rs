// src/routes.rs

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::AppState,
    docs::ApiDoc,
    handlers,
    middleware::{
        auth::auth_guard,
        error_envelope::{error_envelope, not_found},
        rate_limit::{throttle, RateLimiter, DEFAULT_TIERS},
    },
};

// Folga sobre o limite de 5 MB por arquivo para os campos de texto do multipart
const BODY_LIMIT: usize = 6 * 1024 * 1024;

pub fn build_router(app_state: AppState) -> Router {
    let limiter = Arc::new(RateLimiter::new(&DEFAULT_TIERS));

    // Rotas públicas
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/password-reset/request-client", post(handlers::password_reset::request_client_reset))
        .route("/password-reset/request-user", post(handlers::password_reset::request_user_reset))
        .route("/password-reset/reset", post(handlers::password_reset::reset_password));

    let client_routes = Router::new()
        .route(
            "/client",
            get(handlers::client::list_clients).post(handlers::client::create_client),
        )
        .route(
            "/client/{id}",
            get(handlers::client::get_client)
                .patch(handlers::client::update_client)
                .delete(handlers::client::delete_client),
        )
        .route("/client/{id}/avatar", patch(handlers::client::upload_client_avatar));

    let user_routes = Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .patch(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route("/users/{id}/avatar", patch(handlers::user::upload_user_avatar));

    let processo_routes = Router::new()
        .route(
            "/processo",
            get(handlers::processo::list_processos).post(handlers::processo::create_processo),
        )
        .route(
            "/processo/{id}",
            get(handlers::processo::get_processo)
                .patch(handlers::processo::update_processo)
                .delete(handlers::processo::delete_processo),
        );

    // POST /{id} recebe o id do dono (cliente ou processo); os demais verbos, o do próprio registro
    let document_routes = Router::new()
        .route("/document", get(handlers::document::list_documents))
        .route("/document/client/{id}", get(handlers::document::list_client_documents))
        .route(
            "/document/{id}",
            get(handlers::document::get_document)
                .post(handlers::document::upload_document)
                .patch(handlers::document::update_document)
                .delete(handlers::document::delete_document),
        );

    let documento_processo_routes = Router::new()
        .route("/documento-processo", get(handlers::documento_processo::list_documentos))
        .route(
            "/documento-processo/processo/{id}",
            get(handlers::documento_processo::list_processo_documentos),
        )
        .route(
            "/documento-processo/{id}",
            get(handlers::documento_processo::get_documento)
                .post(handlers::documento_processo::upload_documento)
                .patch(handlers::documento_processo::update_documento)
                .delete(handlers::documento_processo::delete_documento),
        );

    let boleto_routes = Router::new()
        .route("/boleto", get(handlers::boleto::list_boletos))
        .route("/boleto/client/{id}", get(handlers::boleto::list_client_boletos))
        .route(
            "/boleto/{id}",
            get(handlers::boleto::get_boleto)
                .post(handlers::boleto::upload_boleto)
                .patch(handlers::boleto::update_boleto)
                .delete(handlers::boleto::delete_boleto),
        );

    let agendamento_routes = Router::new()
        .route(
            "/agendamento",
            get(handlers::agendamento::list_agendamentos).post(handlers::agendamento::create_agendamento),
        )
        .route(
            "/agendamento/client/{id}",
            get(handlers::agendamento::list_client_agendamentos),
        )
        .route(
            "/agendamento/{id}",
            get(handlers::agendamento::get_agendamento)
                .patch(handlers::agendamento::update_agendamento)
                .delete(handlers::agendamento::delete_agendamento),
        );

    let endereco_routes = Router::new()
        .route("/endereco", get(handlers::endereco::list_enderecos))
        .route(
            "/endereco/{id}",
            get(handlers::endereco::get_endereco)
                .post(handlers::endereco::create_endereco)
                .patch(handlers::endereco::update_endereco)
                .delete(handlers::endereco::delete_endereco),
        );

    // Tudo abaixo exige sessão válida; o papel é checado por rota via `RequireRole`
    let protected_routes = Router::new()
        .route("/auth/me", get(handlers::auth::get_me))
        .merge(client_routes)
        .merge(user_routes)
        .merge(processo_routes)
        .merge(document_routes)
        .merge(documento_processo_routes)
        .merge(boleto_routes)
        .merge(agendamento_routes)
        .merge(endereco_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        // Limite por IP em todas as rotas; o 429 passa pelo `error_envelope`
        .layer(axum_middleware::from_fn_with_state(limiter, throttle))
        .layer(axum_middleware::from_fn(error_envelope))
        .with_state(app_state)
}
