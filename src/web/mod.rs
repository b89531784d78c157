//! Web server module.

mod handlers;

pub use handlers::*;

use crate::config::Config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

/// Web server for the DeepAgent dashboard.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            state: AppState { config },
        }
    }

    /// Build the router with all routes.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Dashboard
            .route("/", get(handlers::handle_dashboard))
            // API endpoints
            .route("/api/system/status", get(handlers::handle_system_status))
            .route("/api/deployments", get(handlers::handle_deployments))
            .route("/api/health/metrics", get(handlers::handle_health_metrics))
            .route("/api/activity", get(handlers::handle_activity))
            // Actions
            .route("/api/deploy", post(handlers::handle_deploy))
            .route("/api/restart", post(handlers::handle_restart))
            .route("/api/health/check", post(handlers::handle_health_check))
            // Static assets
            .route("/favicon.ico", get(handlers::handle_favicon))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .layer(DefaultBodyLimit::max(64 * 1024)) // 64KB, action bodies are tiny
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.router();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
