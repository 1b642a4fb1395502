//! Axum application setup.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
///
/// The upload routes replace axum's 2 MiB default body limit with
/// `state.upload_limit`; larger bodies get 413.
pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.upload_limit);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/quality", post(handlers::quality))
        .route(
            "/quality-from-csv",
            post(handlers::quality_from_csv).layer(body_limit.clone()),
        )
        .route(
            "/quality-flags-from-csv",
            post(handlers::quality_flags_from_csv).layer(body_limit),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(
    state: AppState,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
