//! DeepAgent - Deployment Monitoring Dashboard
//!
//! Simulated status, metrics, and activity generation for a set of managed
//! services, the axum server that exposes them as JSON, and the polling
//! client that aggregates them into dashboard view state.

pub mod client;
pub mod config;
pub mod mock;
pub mod poller;
pub mod web;
