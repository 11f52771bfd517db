use axum::body::Body;
use axum::extract::State;
use axum::http::{header::AUTHORIZATION, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::state::AppState;

const EXEMPT_PATHS: &[&str] = &["/api/health"];

/// Byte comparison whose duration does not depend on where the inputs differ.
pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

pub fn is_exempt_path(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path)
}

/// Rejects requests whose `Authorization` header does not carry the
/// configured key. A `Bearer ` prefix is accepted and stripped.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let expected = match state.api_key.as_deref() {
        Some(key) if !key.is_empty() => key,
        _ => return next.run(request).await,
    };

    if is_exempt_path(request.uri().path()) {
        return next.run(request).await;
    }

    let supplied = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v))
        .unwrap_or("");

    if !timing_safe_eq(expected.as_bytes(), supplied.as_bytes()) {
        warn!(path = %request.uri().path(), "Rejected request with missing or invalid API key");
        return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
    }

    next.run(request).await
}
