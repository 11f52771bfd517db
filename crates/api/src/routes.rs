use crate::handlers;
use crate::middleware::require_api_key;
use crate::state::AppState;
use axum::{middleware, Router};

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .merge(handlers::health::routes())
        .merge(handlers::feed::routes())
        .merge(handlers::moderation::routes())
        .merge(handlers::blocklist::routes())
        .merge(handlers::upload::routes())
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}
