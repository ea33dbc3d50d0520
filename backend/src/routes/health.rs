//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe, pings the profile database
//! - /health/live - Liveness probe, OK whenever the process is serving

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Probe outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Healthy,
    Alive,
    Ready,
    NotReady,
    Unhealthy,
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: ProbeStatus,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseCheck>,
}

/// Result of pinging the database
#[derive(Serialize)]
pub struct DatabaseCheck {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    fn new(status: ProbeStatus) -> Self {
        Self {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(ProbeStatus::Healthy))
}

/// Readiness probe, 503 while the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (ready, database) = match db::ping(state.db()).await {
        Ok(latency) => (
            true,
            DatabaseCheck {
                status: ProbeStatus::Healthy,
                latency_ms: Some(latency.as_millis()),
                message: None,
            },
        ),
        Err(e) => (
            false,
            DatabaseCheck {
                status: ProbeStatus::Unhealthy,
                latency_ms: None,
                message: Some(e.to_string()),
            },
        ),
    };

    let mut response = HealthResponse::new(if ready {
        ProbeStatus::Ready
    } else {
        ProbeStatus::NotReady
    });
    response.database = Some(database);

    if ready {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Liveness probe
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(ProbeStatus::Alive))
}
