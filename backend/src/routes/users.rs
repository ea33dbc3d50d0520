//! Per-user energy routes backed by the stored profile

use crate::error::ApiError;
use crate::services::EnergyService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use fitplan_shared::energy::EnergyReport;
use fitplan_shared::types::NutritionPlan;
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/energy", get(get_user_energy))
        .route("/:id/nutrition-plan", get(get_nutrition_plan))
}

/// GET /api/v1/users/:id/energy - Energy targets for a stored profile
async fn get_user_energy(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<EnergyReport>, ApiError> {
    let result =
        EnergyService::calculate_for_user(state.db(), user_id, &state.config().calculator).await?;
    Ok(Json(result.report()))
}

/// GET /api/v1/users/:id/nutrition-plan - Daily plan built from the calculator
async fn get_nutrition_plan(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<NutritionPlan>, ApiError> {
    let result =
        EnergyService::calculate_for_user(state.db(), user_id, &state.config().calculator).await?;
    Ok(Json(NutritionPlan::from_result(&result)))
}
