use axum::http::HeaderValue;
use memefeed_api::{create_api_routes, AppState};
use memefeed_domain::config::ServerConfig;
use std::net::SocketAddr;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Serves the API until `shutdown` is cancelled, then drains in-flight
/// requests.
pub async fn start_web_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.web_port).parse()?;

    if config.api_key.is_none() {
        warn!("No API key configured; the HTTP API accepts unauthenticated requests");
    }

    let app = create_api_routes(state)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(bind_address = %addr, "Web server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Web server stopped");
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}
