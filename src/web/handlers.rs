//! HTTP request handlers.

use super::AppState;
use crate::mock::{self, Service};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Templates (simple string replacement, no template engine)
// ============================================================================

const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.html");
const LAYOUT_TEMPLATE: &str = include_str!("templates/layout.html");

// ============================================================================
// Dashboard
// ============================================================================

pub async fn handle_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let refresh = &state.config.refresh;

    let content = DASHBOARD_TEMPLATE
        .replace("{{status_refresh_ms}}", &refresh.status.as_millis().to_string())
        .replace("{{deployments_refresh_ms}}", &refresh.deployments.as_millis().to_string())
        .replace("{{health_refresh_ms}}", &refresh.health.as_millis().to_string())
        .replace("{{activity_refresh_ms}}", &refresh.activity.as_millis().to_string());

    let page = LAYOUT_TEMPLATE
        .replace("{{title}}", "DeepAgent Dashboard")
        .replace("{{content}}", &content);

    Html(page)
}

// ============================================================================
// API: Read endpoints
// ============================================================================

pub async fn handle_system_status(State(state): State<AppState>) -> impl IntoResponse {
    // Models upstream latency so clients exercise their loading states.
    let delay = state.config.status_delay_ms;
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    Json(mock::system_status(Utc::now()))
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(default)]
    pub limit: Option<usize>,
}

pub async fn handle_deployments(Query(query): Query<FeedQuery>) -> impl IntoResponse {
    let mut deployments = mock::recent_deployments(Utc::now());

    if let Some(limit) = query.limit {
        deployments.truncate(limit);
    }

    Json(deployments)
}

pub async fn handle_health_metrics() -> impl IntoResponse {
    let mut rng = rand::thread_rng();
    Json(mock::health_metrics(&mut rng, Utc::now()))
}

pub async fn handle_activity(Query(query): Query<FeedQuery>) -> impl IntoResponse {
    let mut feed = mock::activity_feed(Utc::now());

    if let Some(limit) = query.limit {
        feed.recent.truncate(limit);
    }

    Json(feed)
}

// ============================================================================
// API: Actions
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub service: String,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub accepted: bool,
    pub service: String,
}

pub async fn handle_deploy(Json(req): Json<ActionRequest>) -> impl IntoResponse {
    let service: Service = match req.service.parse() {
        Ok(s) => s,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    match &req.version {
        Some(version) => tracing::info!("Deploy accepted for {} at {}", service, version),
        None => tracing::info!("Deploy accepted for {}", service),
    }

    (
        StatusCode::ACCEPTED,
        Json(ActionResponse {
            accepted: true,
            service: service.to_string(),
        }),
    )
        .into_response()
}

pub async fn handle_restart(Json(req): Json<ActionRequest>) -> impl IntoResponse {
    let service: Service = match req.service.parse() {
        Ok(s) => s,
        Err(e) => return (StatusCode::BAD_REQUEST, e).into_response(),
    };

    tracing::info!("Restart accepted for {}", service);

    (
        StatusCode::ACCEPTED,
        Json(ActionResponse {
            accepted: true,
            service: service.to_string(),
        }),
    )
        .into_response()
}

pub async fn handle_health_check() -> impl IntoResponse {
    tracing::info!("Manual health check accepted");
    StatusCode::ACCEPTED
}

// ============================================================================
// Static Assets
// ============================================================================

pub async fn handle_favicon() -> impl IntoResponse {
    // Return a simple SVG favicon
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <circle cx="50" cy="50" r="45" fill="#2f9e6e"/>
        <path d="M30 55 L45 40 L60 55 L75 35" stroke="white" stroke-width="6" fill="none"/>
    </svg>"##;

    ([(axum::http::header::CONTENT_TYPE, "image/svg+xml")], svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mock::{ActivityFeed, DeploymentRecord, HealthState, SystemStatus};
    use axum::body::to_bytes;

    fn test_state() -> AppState {
        let config = Config {
            status_delay_ms: 0,
            ..Config::default()
        };
        AppState { config }
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_system_status_is_static_modulo_timestamps() {
        let state = test_state();

        let first: SystemStatus =
            body_json(handle_system_status(State(state.clone())).await.into_response()).await;
        let second: SystemStatus =
            body_json(handle_system_status(State(state)).await.into_response()).await;

        assert_eq!(first.overall, HealthState::Healthy);
        assert_eq!(second.overall, HealthState::Healthy);
        assert_eq!(first.railway.status, HealthState::Healthy);
        assert_eq!(first.railway.metrics, second.railway.metrics);
    }

    #[tokio::test]
    async fn test_deployments_limit_honored() {
        let response = handle_deployments(Query(FeedQuery { limit: Some(2) }))
            .await
            .into_response();
        let deployments: Vec<DeploymentRecord> = body_json(response).await;
        assert_eq!(deployments.len(), 2);

        let response = handle_deployments(Query(FeedQuery::default())).await.into_response();
        let deployments: Vec<DeploymentRecord> = body_json(response).await;
        assert_eq!(deployments.len(), 5);
    }

    #[tokio::test]
    async fn test_activity_limit_honored() {
        let response = handle_activity(Query(FeedQuery { limit: Some(3) }))
            .await
            .into_response();
        let feed: ActivityFeed = body_json(response).await;
        assert_eq!(feed.recent.len(), 3);
    }

    #[tokio::test]
    async fn test_health_metrics_shape() {
        let response = handle_health_metrics().await.into_response();
        let metrics: crate::mock::HealthMetrics = body_json(response).await;

        assert_eq!(metrics.response_time.len(), 25);
        assert_eq!(metrics.cpu_usage.len(), 25);
        assert!(metrics.error_rate.iter().all(|s| s.value >= 0.0));
    }

    #[tokio::test]
    async fn test_deploy_accepts_known_service() {
        let response = handle_deploy(Json(ActionRequest {
            service: "railway".to_string(),
            version: Some("v1.2.4".to_string()),
        }))
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_deploy_rejects_unknown_service() {
        let response = handle_deploy(Json(ActionRequest {
            service: "heroku".to_string(),
            version: None,
        }))
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_restart_and_health_check() {
        let response = handle_restart(Json(ActionRequest {
            service: "vercel".to_string(),
            version: None,
        }))
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = handle_health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_dashboard_page_injects_intervals() {
        let response = handle_dashboard(State(test_state())).await.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(html.contains("DeepAgent Dashboard"));
        assert!(html.contains("5000"));
        assert!(!html.contains("{{status_refresh_ms}}"));
    }
}
