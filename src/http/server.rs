//! Demo server wiring the tracking layer into a real application.
//!
//! # Responsibilities
//! - Create Axum Router with sample handlers
//! - Wire up middleware (snippet injection, tracing)
//! - Bind server to listener and serve with graceful shutdown

use axum::{
    middleware,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::filter::eligibility::RenderMode;
use crate::filter::insertion::UnrecognizedPosition;
use crate::http::middleware::{inject_tracking, TrackingState};

const INDEX_PAGE: &str = "<html>\n<head><title>tracking-inject demo</title></head>\n<body>\n<h1>Hello</h1>\n</body>\n</html>\n";

/// HTTP server for the demo application.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &AppConfig) -> Result<Self, UnrecognizedPosition> {
        let state = TrackingState::from_config(&config.tracking)?;
        Ok(Self {
            router: build_router(state),
        })
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: TrackingState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/status", get(status))
        .route("/captured", get(captured))
        .layer(middleware::from_fn_with_state(state, inject_tracking))
        .layer(TraceLayer::new_for_http())
}

/// A plain HTML page, the normal injection target.
async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// A JSON endpoint; never receives the snippet.
async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// An HTML page whose output is captured by the application rather than
/// rendered to the client, so injection is skipped.
async fn captured() -> Response {
    let mut response = Html(INDEX_PAGE).into_response();
    response.extensions_mut().insert(RenderMode::Captured);
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
