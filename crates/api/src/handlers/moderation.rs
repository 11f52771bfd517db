use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use chrono::Utc;
use memefeed_domain::{RemoveOutcome, ReviveOutcome};
use tracing::info;

use super::{error_response, ApiError};
use crate::{
    dto::{BanResponse, ModerationResponse, RemoveRequest, UnbanResponse},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/items/{id}/remove", post(remove_item))
        .route("/api/items/{id}/revive", post(revive_item))
        .route("/api/users/{user}/ban", post(ban_user).delete(unban_user))
}

async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RemoveRequest>,
) -> Result<Json<ModerationResponse>, ApiError> {
    let outcome = state
        .remove_item
        .execute(&id, &req.moderator, Utc::now())
        .await
        .map_err(error_response)?;

    match outcome {
        RemoveOutcome::Removed(record) => Ok(Json(ModerationResponse {
            id,
            status: record.status().to_string(),
            moderator: Some(record.moderator.to_string()),
            expires_at: Some(record.expires_at.to_rfc3339()),
        })),
        RemoveOutcome::AlreadyRemoved => Err((
            StatusCode::CONFLICT,
            format!("Item {} is already removed", id),
        )),
        RemoveOutcome::NotFound => Err((StatusCode::NOT_FOUND, format!("Item {} not found", id))),
    }
}

async fn revive_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ModerationResponse>, ApiError> {
    let outcome = state
        .revive_item
        .execute(&id, Utc::now())
        .await
        .map_err(error_response)?;

    match outcome {
        ReviveOutcome::Revived { item, .. } => Ok(Json(ModerationResponse {
            id,
            status: item.status.to_string(),
            moderator: None,
            expires_at: None,
        })),
        ReviveOutcome::NotFound => Err((
            StatusCode::NOT_FOUND,
            format!("No removed item with id {}", id),
        )),
    }
}

async fn ban_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<BanResponse>, ApiError> {
    let removed = state.ban_user.ban(&user).await.map_err(error_response)?;
    info!(user = %user, removed, "User banned via API");
    Ok(Json(BanResponse { user, removed }))
}

async fn unban_user(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> Result<Json<UnbanResponse>, ApiError> {
    let unbanned = state.ban_user.unban(&user).await.map_err(error_response)?;
    Ok(Json(UnbanResponse { user, unbanned }))
}
