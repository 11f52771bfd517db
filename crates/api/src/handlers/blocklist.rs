use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use tracing::info;

use super::{error_response, ApiError};
use crate::{
    dto::{SupermodRequest, SupermodResponse},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/supermod", post(supermod))
}

/// Applies the requested blocklist edits (if any) and returns the overview.
async fn supermod(
    State(state): State<AppState>,
    Json(req): Json<SupermodRequest>,
) -> Result<Json<SupermodResponse>, ApiError> {
    let updates = req
        .updates()
        .map_err(|msg| (StatusCode::BAD_REQUEST, msg))?;

    let overview = state
        .update_blocklist
        .execute(&req.password, updates)
        .await
        .map_err(error_response)?;

    if overview.changed {
        info!("Blocklist updated via supermod");
    }
    Ok(Json(SupermodResponse::from(overview)))
}
