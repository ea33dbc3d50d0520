//! FitPlan WASM Module
//!
//! Browser bindings for the energy calculator, so the calculator form can
//! show the same numbers the API returns without a round trip.

use fitplan_shared::{
    calculate_energy, ActivityLevel, Biometrics, EnergyError, EnergyReport, EnergyRequest, Sex,
};
use fitplan_shared::validation::validate_measurements;
use wasm_bindgen::prelude::*;

/// Calculate BMR (kcal/day) with the Mifflin-St Jeor equation
///
/// Throws when weight, height or age is zero, negative or not a number.
#[wasm_bindgen]
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    is_male: bool,
) -> Result<f64, JsValue> {
    bmr(weight_kg, height_cm, age_years, is_male).map_err(to_js_error)
}

/// Calculate TDEE from a BMR and an activity level name
///
/// Accepts `sedentary`, `light`, `moderate`, `active` or `very_active`.
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity_level: &str) -> Result<f64, JsValue> {
    tdee(bmr, activity_level).map_err(to_js_error)
}

/// Run the full calculator on a JSON request and return the report as JSON
///
/// The input has the same shape as the `POST /api/v1/energy` body.
#[wasm_bindgen]
pub fn calculate_energy_report(request_json: &str) -> Result<String, JsValue> {
    energy_report_json(request_json).map_err(|e| JsValue::from_str(&e))
}

fn bmr(weight_kg: f64, height_cm: f64, age_years: i32, is_male: bool) -> Result<f64, EnergyError> {
    let sex = if is_male { Sex::Male } else { Sex::Female };
    fitplan_shared::calculate_bmr(&Biometrics::new(weight_kg, height_cm, age_years), sex)
}

fn tdee(bmr: f64, activity_level: &str) -> Result<f64, EnergyError> {
    Ok(fitplan_shared::calculate_tdee(bmr, activity_level.parse::<ActivityLevel>()?))
}

fn energy_report(request: &EnergyRequest) -> Result<EnergyReport, String> {
    let profile = request.to_profile().map_err(|e| e.to_string())?;
    let measurements = profile
        .biometrics
        .measurements()
        .map_err(|e| e.to_string())?;
    validate_measurements(&measurements).map_err(|e| e.user_message())?;
    calculate_energy(&profile)
        .map(|result| result.report())
        .map_err(|e| e.to_string())
}

fn energy_report_json(request_json: &str) -> Result<String, String> {
    let request: EnergyRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request: {}", e))?;
    let report = energy_report(&request)?;
    serde_json::to_string(&report).map_err(|e| e.to_string())
}

fn to_js_error(err: EnergyError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bmr_male_and_female() {
        let male = bmr(70.0, 175.0, 25, true).unwrap();
        let female = bmr(70.0, 175.0, 25, false).unwrap();
        assert!((male - 1673.75).abs() < 1e-9);
        assert!((male - female - 166.0).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_rejects_zero_weight() {
        let err = bmr(0.0, 175.0, 25, true).unwrap_err();
        assert!(matches!(err, EnergyError::MissingData { .. }));
    }

    #[test]
    fn test_tdee_by_name() {
        let value = tdee(1673.75, "moderate").unwrap();
        assert!((value - 2594.3125).abs() < 1e-9);
    }

    #[test]
    fn test_tdee_unknown_level() {
        let err = tdee(1673.75, "extreme").unwrap_err();
        assert_eq!(err, EnergyError::UnknownActivityLevel("extreme".to_string()));
    }

    #[test]
    fn test_energy_report_json() {
        let request = json!({
            "weight_kg": 70,
            "height_cm": 175,
            "age_years": 25,
            "sex": "male",
            "activity_level": "moderate",
            "goal": "lose_weight"
        });
        let json = energy_report_json(&request.to_string()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["target_calories"], 2094);
        assert_eq!(value["carbs"], 239);
    }

    #[test]
    fn test_energy_report_json_reports_missing_fields() {
        let request = json!({"sex": "female", "activity_level": "light", "goal": "maintain"});
        let err = energy_report_json(&request.to_string()).unwrap_err();
        assert!(err.contains("weight_kg"));
    }

    #[test]
    fn test_energy_report_json_rejects_implausible_height() {
        let request = json!({
            "weight_kg": 70,
            "height_cm": 400,
            "age_years": 25,
            "activity_level": "light",
            "goal": "maintain"
        });
        let err = energy_report_json(&request.to_string()).unwrap_err();
        assert!(err.starts_with("Height"));
    }

    #[test]
    fn test_energy_report_json_rejects_non_positive_target() {
        let request = json!({
            "weight_kg": 20,
            "height_cm": 100,
            "age_years": 90,
            "sex": "female",
            "activity_level": "sedentary",
            "goal": "lose_weight"
        });
        let err = energy_report_json(&request.to_string()).unwrap_err();
        assert!(err.contains("target_calories"));
    }

    #[test]
    fn test_energy_report_json_rejects_malformed_input() {
        let err = energy_report_json("{").unwrap_err();
        assert!(err.starts_with("Invalid request"));
    }
}
