use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::debug;

use super::{error_response, ApiError};
use crate::{
    dto::{ItemResponse, PageQuery, PageResponse},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/categories/{category}/items", get(list_category))
        .route("/api/profiles/{handle}/items", get(get_profile))
        .route("/api/items/{id}", get(get_item))
        .route("/api/removed", get(list_removed))
}

async fn list_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse>, ApiError> {
    let page = state
        .list_category
        .execute(&category, page.offset, page.limit)
        .map_err(error_response)?;

    debug!(
        category = %category,
        returned = page.items.len(),
        total = page.total,
        "Category listed"
    );
    Ok(Json(PageResponse::from(page)))
}

async fn get_profile(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    Query(page): Query<PageQuery>,
) -> Json<PageResponse> {
    let page = state.get_profile.execute(&handle, page.offset, page.limit);
    Json(PageResponse::from(page))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    match state.get_item.execute(&id) {
        Some(item) => Ok(Json(ItemResponse::from(item))),
        None => Err((StatusCode::NOT_FOUND, format!("Item {} not found", id))),
    }
}

async fn list_removed(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Json<PageResponse> {
    let page = state.list_removed.execute(page.offset, page.limit);
    Json(PageResponse::from(page))
}
