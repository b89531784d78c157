//! Periodic per-category polling of the dashboard API.
//!
//! Each data category (status, deployments, health, activity) runs its own
//! poll loop on its own period. A successful poll fully replaces the cached
//! value; a failed poll raises the category's error flag but keeps serving
//! the stale value, so one broken endpoint never blanks the others.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tokio::sync::{broadcast, RwLock};

use crate::client::ApiClient;
use crate::config::RefreshIntervals;
use crate::mock::{ActivityFeed, DeploymentRecord, HealthMetrics, SystemStatus};

/// Last known state of one data category.
#[derive(Debug, Clone)]
pub struct CategoryState<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Default for CategoryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            updated_at: None,
        }
    }
}

impl<T> CategoryState<T> {
    /// No data has arrived yet; render a skeleton.
    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }
}

/// Shared cache for one category's latest poll result.
pub struct CategoryCache<T> {
    inner: RwLock<CategoryState<T>>,
}

impl<T: Clone> CategoryCache<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CategoryState::default()),
        }
    }

    pub async fn snapshot(&self) -> CategoryState<T> {
        self.inner.read().await.clone()
    }

    async fn record_success(&self, data: T) {
        let mut state = self.inner.write().await;
        state.data = Some(data);
        state.error = None;
        state.updated_at = Some(Utc::now());
    }

    async fn record_error(&self, message: String) {
        let mut state = self.inner.write().await;
        // Keep stale data; only flag the failure.
        state.error = Some(message);
    }
}

impl<T: Clone> Default for CategoryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregated dashboard view state, one cache per category.
#[derive(Clone, Default)]
pub struct Dashboard {
    pub status: Arc<CategoryCache<SystemStatus>>,
    pub deployments: Arc<CategoryCache<Vec<DeploymentRecord>>>,
    pub health: Arc<CategoryCache<HealthMetrics>>,
    pub activity: Arc<CategoryCache<ActivityFeed>>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Drives the per-category poll loops.
pub struct Poller {
    client: Arc<ApiClient>,
    refresh: RefreshIntervals,
    dashboard: Dashboard,
    stop_tx: broadcast::Sender<()>,
    started: AtomicBool,
}

impl Poller {
    pub fn new(client: Arc<ApiClient>, refresh: RefreshIntervals) -> Self {
        let (stop_tx, _) = broadcast::channel(1);
        Self {
            client,
            refresh,
            dashboard: Dashboard::new(),
            stop_tx,
            started: AtomicBool::new(false),
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        self.dashboard.clone()
    }

    /// Spawn one poll loop per category. Idempotent.
    pub fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!("Starting dashboard poller against backend");

        self.spawn_loop("status", "/api/system/status", self.refresh.status, self.dashboard.status.clone());
        self.spawn_loop("deployments", "/api/deployments", self.refresh.deployments, self.dashboard.deployments.clone());
        self.spawn_loop("health", "/api/health/metrics", self.refresh.health, self.dashboard.health.clone());
        self.spawn_loop("activity", "/api/activity", self.refresh.activity, self.dashboard.activity.clone());
    }

    /// Stop every poll loop.
    pub fn stop(&self) {
        let _ = self.stop_tx.send(());
    }

    fn spawn_loop<T>(
        &self,
        category: &'static str,
        path: &'static str,
        period: Duration,
        cache: Arc<CategoryCache<T>>,
    ) where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let client = self.client.clone();
        let stop_rx = self.stop_tx.subscribe();

        tokio::spawn(run_poll_loop(client, category, path, period, cache, stop_rx));
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_poll_loop<T>(
    client: Arc<ApiClient>,
    category: &'static str,
    path: &'static str,
    period: Duration,
    cache: Arc<CategoryCache<T>>,
    mut stop_rx: broadcast::Receiver<()>,
) where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = stop_rx.recv() => {
                tracing::debug!("Poll loop for {} stopped", category);
                break;
            }
            _ = interval.tick() => {
                match client.get_json::<T>(path).await {
                    Ok(data) => {
                        cache.record_success(data).await;
                        tracing::debug!("Refreshed {}", category);
                    }
                    Err(e) => {
                        tracing::warn!("Poll failed for {}: {}", category, e);
                        cache.record_error(e.to_string()).await;
                    }
                }
            }
        }
    }
}
