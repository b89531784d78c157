//! Wire-format model types for the dashboard API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time health of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Warning,
    Unhealthy,
    Unknown,
}

/// Outcome of a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployState {
    Success,
    Failed,
    Pending,
    Running,
}

/// Category of an activity log entry, used by the UI for icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Deployment,
    Fix,
    Monitoring,
    Error,
}

/// One point in a time series. `value` is clamped to 0 at generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Headline metrics for a single service.
///
/// `uptime` is a percentage in [0, 100] everywhere; the health time series
/// uses the same unit so values compare directly across endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetrics {
    pub uptime: f64,
    pub response_time: f64,
    pub error_rate: f64,
}

/// The most recent deployment of a service, as shown on its status card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSummary {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub status: DeployState,
}

/// Status, metrics, and last deployment for one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSnapshot {
    pub status: HealthState,
    pub metrics: ServiceMetrics,
    pub last_deployment: DeploymentSummary,
}

/// Full system snapshot returned by `/api/system/status`.
///
/// Always carries exactly the three managed services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub overall: HealthState,
    pub railway: ServiceSnapshot,
    pub github: ServiceSnapshot,
    pub vercel: ServiceSnapshot,
}

/// One historical deployment event. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub id: String,
    pub service: String,
    pub version: String,
    pub status: DeployState,
    pub timestamp: DateTime<Utc>,
    /// Wall-clock duration of the deployment in seconds.
    pub duration: u64,
    pub author: String,
    pub commit_message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// A free-text activity log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response envelope for `/api/activity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFeed {
    pub recent: Vec<ActivityEntry>,
}

/// 24-hour metric series returned by `/api/health/metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub response_time: Vec<MetricSample>,
    pub error_rate: Vec<MetricSample>,
    pub uptime: Vec<MetricSample>,
    pub memory_usage: Vec<MetricSample>,
    pub cpu_usage: Vec<MetricSample>,
}

/// The closed set of services that deploy/restart actions may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Railway,
    Github,
    Vercel,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Railway => "railway",
            Service::Github => "github",
            Service::Vercel => "vercel",
        }
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "railway" => Ok(Service::Railway),
            "github" => Ok(Service::Github),
            "vercel" => Ok(Service::Vercel),
            other => Err(format!("unknown service: {}", other)),
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
