use axum::{routing::get, Router};
use tracing::debug;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/health", get(health_check))
}

pub async fn health_check() -> &'static str {
    debug!("Health check requested");
    "OK"
}
