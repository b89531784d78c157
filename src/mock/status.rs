//! System status snapshot generation.

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use super::models::{
    DeployState, DeploymentSummary, HealthState, ServiceMetrics, ServiceSnapshot, SystemStatus,
};

/// Build the fixed status snapshot for the three managed services.
///
/// Pure function of `now`; only the deployment timestamps move with the clock.
pub fn system_status(now: DateTime<Utc>) -> SystemStatus {
    SystemStatus {
        overall: HealthState::Healthy,
        railway: ServiceSnapshot {
            status: HealthState::Healthy,
            metrics: ServiceMetrics {
                uptime: 99.98,
                response_time: 245.0,
                error_rate: 0.001,
            },
            last_deployment: DeploymentSummary {
                timestamp: now - ChronoDuration::hours(2),
                version: "v1.2.3".to_string(),
                status: DeployState::Success,
            },
        },
        github: ServiceSnapshot {
            status: HealthState::Healthy,
            metrics: ServiceMetrics {
                uptime: 100.0,
                response_time: 156.0,
                error_rate: 0.0,
            },
            last_deployment: DeploymentSummary {
                timestamp: now - ChronoDuration::hours(1),
                version: "v1.2.4".to_string(),
                status: DeployState::Success,
            },
        },
        vercel: ServiceSnapshot {
            status: HealthState::Healthy,
            metrics: ServiceMetrics {
                uptime: 99.95,
                response_time: 89.0,
                error_rate: 0.002,
            },
            last_deployment: DeploymentSummary {
                timestamp: now - ChronoDuration::minutes(30),
                version: "v1.2.4".to_string(),
                status: DeployState::Success,
            },
        },
    }
}
