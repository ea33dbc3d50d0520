//! API request and response types

use crate::energy::{ActivityLevel, Biometrics, BmrBasis, EnergyResult, Goal, Profile, Sex};
use crate::errors::EnergyError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Energy Calculator Types
// ============================================================================

/// Calculator input, accepted as a JSON body or as query parameters
///
/// Enum fields stay strings so unknown values surface as calculator errors
/// rather than deserialization rejections.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EnergyRequest {
    // Range literals must match the MIN_/MAX_ bounds in `crate::validation`
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    pub height_cm: Option<f64>,
    #[validate(range(min = 1, max = 150, message = "Age must be between 1 and 150 years"))]
    pub age_years: Option<i32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub goal: Option<String>,
}

impl EnergyRequest {
    /// Parse the request into a calculator profile
    ///
    /// Unknown enum values are reported first. Absent `activity_level` or
    /// `goal` is reported together with any unusable biometric field.
    pub fn to_profile(&self) -> Result<Profile, EnergyError> {
        let sex = self.sex.as_deref().map(str::parse::<Sex>).transpose()?;
        let activity_level = self
            .activity_level
            .as_deref()
            .map(str::parse::<ActivityLevel>)
            .transpose()?;
        let goal = self.goal.as_deref().map(str::parse::<Goal>).transpose()?;

        let biometrics = Biometrics {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age_years,
        };

        match (activity_level, goal) {
            (Some(activity_level), Some(goal)) => Ok(Profile {
                biometrics,
                sex,
                activity_level,
                goal,
            }),
            (activity_level, goal) => {
                let mut missing = biometrics.missing_fields();
                if activity_level.is_none() {
                    missing.push("activity_level");
                }
                if goal.is_none() {
                    missing.push("goal");
                }
                Err(EnergyError::missing(missing))
            }
        }
    }
}

/// Daily nutrition plan built without a completion provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub daily_calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
    pub bmr_basis: BmrBasis,
    pub is_ai_generated: bool,
}

impl NutritionPlan {
    pub fn from_result(result: &EnergyResult) -> Self {
        let report = result.report();
        Self {
            daily_calories: report.target_calories,
            protein: report.protein,
            carbs: report.carbs,
            fats: report.fats,
            bmr_basis: report.bmr_basis,
            is_ai_generated: false,
        }
    }
}
