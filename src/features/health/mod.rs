//! Liveness and readiness probes.

pub mod handlers;
pub mod routes;
pub mod service;

pub use service::{HealthService, ReadinessDto};
