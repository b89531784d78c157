//! Fire-and-forget action dispatch (deploy, restart, health check).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ApiClient, ClientError};

/// Request body for deploy and restart actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Dispatches manual actions against the backend.
///
/// Success means only that the POST was accepted; nothing waits for the
/// action's real-world completion and failures are never retried.
pub struct ActionDispatcher {
    client: Arc<ApiClient>,
    deploying: AtomicBool,
}

/// Clears the deploying flag when dropped, so the flag cannot stick no
/// matter how `deploy` exits.
struct DeployGuard<'a>(&'a AtomicBool);

impl Drop for DeployGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ActionDispatcher {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            deploying: AtomicBool::new(false),
        }
    }

    /// Whether a deploy request is currently in flight.
    pub fn is_deploying(&self) -> bool {
        self.deploying.load(Ordering::SeqCst)
    }

    /// Trigger a deployment for `service`, optionally pinning a version.
    pub async fn deploy(&self, service: &str, version: Option<&str>) -> Result<(), ClientError> {
        self.deploying.store(true, Ordering::SeqCst);
        let _guard = DeployGuard(&self.deploying);

        let body = ActionRequest {
            service: service.to_string(),
            version: version.map(str::to_string),
        };

        match self.client.post_json("/api/deploy", &body).await {
            Ok(()) => {
                tracing::info!("Deployment triggered for {}", service);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to deploy {}: {}", service, e);
                Err(e)
            }
        }
    }

    /// Restart `service`.
    pub async fn restart(&self, service: &str) -> Result<(), ClientError> {
        let body = ActionRequest {
            service: service.to_string(),
            version: None,
        };

        match self.client.post_json("/api/restart", &body).await {
            Ok(()) => {
                tracing::info!("Service {} restarted", service);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to restart {}: {}", service, e);
                Err(e)
            }
        }
    }

    /// Run an immediate health check across all services.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        match self.client.post_empty("/api/health/check").await {
            Ok(()) => {
                tracing::info!("Health check triggered");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                Err(e)
            }
        }
    }
}
