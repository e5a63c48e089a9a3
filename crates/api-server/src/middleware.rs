//! Request logging and API-key gating

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::routes::ErrorResponse;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Emit one line per request once the response status is known
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    tracing::info!("[{}] {} - {}", method, path, response.status().as_u16());
    response
}

/// Reject the request unless `X-API-Key` matches the configured key byte for byte
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes());

    if provided != Some(state.api_key().as_bytes()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::new("unauthorized")),
        )
            .into_response();
    }

    next.run(request).await
}
