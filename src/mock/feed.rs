//! Deployment history and activity feed generation.

use chrono::{DateTime, Duration as ChronoDuration, Utc};

use super::models::{ActivityEntry, ActivityFeed, ActivityKind, DeployState, DeploymentRecord};

fn record(
    id: &str,
    service: &str,
    version: &str,
    status: DeployState,
    timestamp: DateTime<Utc>,
    duration: u64,
    commit_message: &str,
) -> DeploymentRecord {
    DeploymentRecord {
        id: id.to_string(),
        service: service.to_string(),
        version: version.to_string(),
        status,
        timestamp,
        duration,
        author: "DeepAgent".to_string(),
        commit_message: commit_message.to_string(),
        branch: None,
        commit: None,
    }
}

/// Recent deployment events, newest first.
pub fn recent_deployments(now: DateTime<Utc>) -> Vec<DeploymentRecord> {
    vec![
        record(
            "1",
            "Railway Backend",
            "v1.2.4",
            DeployState::Success,
            now - ChronoDuration::minutes(30),
            45,
            "Fix database connection pooling issue",
        ),
        record(
            "2",
            "Vercel Frontend",
            "v1.2.4",
            DeployState::Success,
            now - ChronoDuration::hours(1),
            32,
            "Update dashboard interface with new monitoring features",
        ),
        record(
            "3",
            "Railway Worker",
            "v1.2.3",
            DeployState::Success,
            now - ChronoDuration::hours(2),
            28,
            "Optimize Celery worker performance",
        ),
        record(
            "4",
            "Railway Database",
            "v1.2.2",
            DeployState::Failed,
            now - ChronoDuration::hours(4),
            15,
            "Database migration rollback due to constraint violation",
        ),
        record(
            "5",
            "Vercel Frontend",
            "v1.2.3",
            DeployState::Success,
            now - ChronoDuration::hours(6),
            41,
            "Add real-time notifications for deployment status",
        ),
    ]
}

fn entry(
    id: &str,
    kind: ActivityKind,
    message: &str,
    timestamp: DateTime<Utc>,
    service: Option<&str>,
    details: &str,
) -> ActivityEntry {
    ActivityEntry {
        id: id.to_string(),
        kind,
        message: message.to_string(),
        timestamp,
        service: service.map(str::to_string),
        details: Some(details.to_string()),
    }
}

/// Recent agent activity, newest first.
pub fn activity_feed(now: DateTime<Utc>) -> ActivityFeed {
    ActivityFeed {
        recent: vec![
            entry(
                "1",
                ActivityKind::Deployment,
                "Successfully deployed Railway backend v1.2.4",
                now - ChronoDuration::minutes(30),
                Some("Railway"),
                "Fixed database connection pooling issue",
            ),
            entry(
                "2",
                ActivityKind::Fix,
                "Automatically resolved Redis connection timeout",
                now - ChronoDuration::minutes(45),
                Some("Redis"),
                "Increased connection timeout and retry attempts",
            ),
            entry(
                "3",
                ActivityKind::Monitoring,
                "Health check completed - all services operational",
                now - ChronoDuration::hours(1),
                None,
                "Response times within acceptable thresholds",
            ),
            entry(
                "4",
                ActivityKind::Deployment,
                "Deployed Vercel frontend v1.2.4",
                now - ChronoDuration::minutes(90),
                Some("Vercel"),
                "Updated dashboard interface with new monitoring features",
            ),
            entry(
                "5",
                ActivityKind::Fix,
                "Scaled up Celery workers due to high queue length",
                now - ChronoDuration::hours(2),
                Some("Celery"),
                "Increased worker count from 2 to 4 instances",
            ),
            entry(
                "6",
                ActivityKind::Error,
                "Database migration failed - rolled back to previous version",
                now - ChronoDuration::hours(4),
                Some("PostgreSQL"),
                "Constraint violation detected, automatic rollback initiated",
            ),
        ],
    }
}
