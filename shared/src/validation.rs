//! Input validation functions
//!
//! Plausibility checks applied after the calculator's own presence check.
//! Request types use `validator` derive rules for the same ranges; the
//! functions here serve callers holding plain numbers (persisted profiles).

use crate::energy::Measurements;

pub const MIN_WEIGHT_KG: f64 = 20.0;
pub const MAX_WEIGHT_KG: f64 = 500.0;
pub const MIN_HEIGHT_CM: f64 = 50.0;
pub const MAX_HEIGHT_CM: f64 = 300.0;
pub const MIN_AGE_YEARS: i32 = 1;
pub const MAX_AGE_YEARS: i32 = 150;

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < MIN_WEIGHT_KG {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm (covers infants to tallest recorded humans)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < MIN_HEIGHT_CM {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > MAX_HEIGHT_CM {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age_years(age_years: i32) -> Result<(), String> {
    if age_years < MIN_AGE_YEARS {
        return Err("Age must be at least 1 year".to_string());
    }
    if age_years > MAX_AGE_YEARS {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate all measurements, reporting the first implausible field
pub fn validate_measurements(m: &Measurements) -> Result<(), ValidationError> {
    validate_weight(m.weight_kg).map_err(|msg| ValidationError::new("weight_kg", &msg))?;
    validate_height_cm(m.height_cm).map_err(|msg| ValidationError::new("height_cm", &msg))?;
    validate_age_years(m.age_years).map_err(|msg| ValidationError::new("age_years", &msg))?;
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "age" | "age_years" => "Age",
        "sex" => "Sex",
        "activity_level" => "Activity Level",
        "goal" => "Goal",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
