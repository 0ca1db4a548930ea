// src/middleware/error_envelope.rs

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::common::{error::AppError, error::ErrorEnvelope};

/// Completa o corpo de erro com o `path` da requisição: `{ statusCode, message, timestamp, path }`.
/// Respostas de erro geradas pelo próprio axum (405, 413...) também são convertidas para esse formato.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorEnvelope>() {
        Some(envelope) => {
            let status = envelope.status;
            (status, Json(envelope.into_body(Some(path.as_str())))).into_response()
        }
        None if response.status().is_client_error() || response.status().is_server_error() => {
            let status = response.status();
            let envelope = ErrorEnvelope {
                status,
                message: bare_error_message(status, &method, &path),
            };
            let body = envelope.into_body(Some(path.as_str())).to_string();

            // Mantém os cabeçalhos originais (ex.: `Allow` no 405)
            let (mut parts, _) = response.into_parts();
            parts.headers.remove(header::CONTENT_LENGTH);
            parts
                .headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Response::from_parts(parts, Body::from(body))
        }
        None => response,
    }
}

fn bare_error_message(status: StatusCode, method: &Method, path: &str) -> String {
    if status == StatusCode::METHOD_NOT_ALLOWED {
        return format!("Cannot {} {}", method, path);
    }
    status.canonical_reason().unwrap_or("Error").to_string()
}

/// Rota inexistente no mesmo formato de erro.
pub async fn not_found(method: Method, request: Request) -> AppError {
    AppError::NotFound(format!("Cannot {} {}", method, request.uri().path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn, routing::get, Router};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn router() -> Router {
        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/grande", get(|| async { StatusCode::PAYLOAD_TOO_LARGE }))
            .layer(from_fn(error_envelope))
    }

    async fn call(method: Method, uri: &str) -> (StatusCode, axum::http::HeaderMap, serde_json::Value) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn wrong_verb_gets_the_standard_envelope() {
        let (status, headers, body) = call(Method::DELETE, "/ping").await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["statusCode"], 405);
        assert_eq!(body["message"], "Cannot DELETE /ping");
        assert_eq!(body["path"], "/ping");
        assert!(body["timestamp"].is_string());
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert!(headers.contains_key(header::ALLOW));
    }

    #[tokio::test]
    async fn bare_status_from_a_handler_is_wrapped() {
        let (status, _, body) = call(Method::GET, "/grande").await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["statusCode"], 413);
        assert_eq!(body["message"], "Payload Too Large");
        assert_eq!(body["path"], "/grande");
    }
}
