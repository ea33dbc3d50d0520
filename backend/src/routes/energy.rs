//! Energy calculator API routes

use crate::error::ApiError;
use crate::services::EnergyService;
use crate::state::AppState;
use axum::{extract::Query, routing::get, Json, Router};
use fitplan_shared::energy::EnergyReport;
use fitplan_shared::types::EnergyRequest;

/// Create energy calculator routes
pub fn energy_routes() -> Router<AppState> {
    Router::new().route("/", get(calculate_from_query).post(calculate))
}

/// POST /api/v1/energy - Calculate BMR, TDEE, target calories and macros
async fn calculate(Json(req): Json<EnergyRequest>) -> Result<Json<EnergyReport>, ApiError> {
    let result = EnergyService::calculate(&req)?;
    Ok(Json(result.report()))
}

/// GET /api/v1/energy - Same calculation from query parameters
async fn calculate_from_query(
    Query(req): Query<EnergyRequest>,
) -> Result<Json<EnergyReport>, ApiError> {
    let result = EnergyService::calculate(&req)?;
    Ok(Json(result.report()))
}
