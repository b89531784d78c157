//! Configuration module for DeepAgent.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

/// Per-category refresh periods for the dashboard poller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshIntervals {
    /// System status poll period (default: 5s)
    pub status: Duration,
    /// Deployment history poll period (default: 10s)
    pub deployments: Duration,
    /// Health metrics poll period (default: 30s)
    pub health: Duration,
    /// Activity feed poll period (default: 15s)
    pub activity: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            status: Duration::from_secs(5),
            deployments: Duration::from_secs(10),
            health: Duration::from_secs(30),
            activity: Duration::from_secs(15),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Backend origin the API client talks to (default: "http://localhost:8000")
    pub api_base_url: String,
    /// Optional bearer token attached to outbound API requests
    pub auth_token: Option<String>,
    /// Artificial delay on the status endpoint, models network latency
    /// for client-side loading states (default: 100ms)
    pub status_delay_ms: u64,
    /// Poller refresh periods
    pub refresh: RefreshIntervals,
    /// When true, the server also polls itself and logs category refreshes
    pub self_poll: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 8080,
            api_base_url: "http://localhost:8000".to_string(),
            auth_token: None,
            status_delay_ms: 100,
            refresh: RefreshIntervals::default(),
            self_poll: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DEEPAGENT_HTTP_PORT`: HTTP port (default: 8080)
    /// - `DEEPAGENT_API_BASE_URL`: backend origin for the client
    /// - `DEEPAGENT_AUTH_TOKEN`: optional bearer token
    /// - `DEEPAGENT_STATUS_DELAY_MS`: artificial status endpoint delay
    /// - `DEEPAGENT_STATUS_REFRESH_SECS`, `DEEPAGENT_DEPLOYMENTS_REFRESH_SECS`,
    ///   `DEEPAGENT_HEALTH_REFRESH_SECS`, `DEEPAGENT_ACTIVITY_REFRESH_SECS`
    /// - `DEEPAGENT_SELF_POLL`: "1" or "true" to enable self-polling
    pub fn load() -> Self {
        let mut cfg = Self::default();

        if let Ok(port_str) = env::var("DEEPAGENT_HTTP_PORT") {
            if let Ok(port) = port_str.parse() {
                cfg.http_port = port;
            }
        }

        if let Ok(base_url) = env::var("DEEPAGENT_API_BASE_URL") {
            cfg.api_base_url = base_url;
        }

        if let Ok(token) = env::var("DEEPAGENT_AUTH_TOKEN") {
            if !token.is_empty() {
                cfg.auth_token = Some(token);
            }
        }

        if let Ok(delay_str) = env::var("DEEPAGENT_STATUS_DELAY_MS") {
            if let Ok(delay) = delay_str.parse() {
                cfg.status_delay_ms = delay;
            }
        }

        cfg.refresh.status = secs_var("DEEPAGENT_STATUS_REFRESH_SECS", cfg.refresh.status);
        cfg.refresh.deployments =
            secs_var("DEEPAGENT_DEPLOYMENTS_REFRESH_SECS", cfg.refresh.deployments);
        cfg.refresh.health = secs_var("DEEPAGENT_HEALTH_REFRESH_SECS", cfg.refresh.health);
        cfg.refresh.activity = secs_var("DEEPAGENT_ACTIVITY_REFRESH_SECS", cfg.refresh.activity);

        if let Ok(flag) = env::var("DEEPAGENT_SELF_POLL") {
            cfg.self_poll = flag == "1" || flag.eq_ignore_ascii_case("true");
        }

        cfg
    }
}

fn secs_var(name: &str, fallback: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
        .unwrap_or(fallback)
}
