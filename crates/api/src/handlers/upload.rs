use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use chrono::Utc;

use super::{error_response, ApiError};
use crate::{
    dto::{ItemResponse, UploadRequest},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/items", post(upload_item))
}

async fn upload_item(
    State(state): State<AppState>,
    Json(req): Json<UploadRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let item = req.into_item().map_err(error_response)?;
    let item = state
        .upload_item
        .execute(item, Utc::now())
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}
