//! Error types for the FitPlan energy calculator

use thiserror::Error;

/// Errors raised by the energy calculation pipeline
///
/// Every variant is an input error: the calculator performs no I/O, so
/// nothing here is retryable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnergyError {
    /// One or more required biometric inputs are absent or not positive
    #[error("Missing required data for energy calculation: {}", fields.join(", "))]
    MissingData { fields: Vec<String> },

    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(String),

    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    #[error("Unknown sex: {0}")]
    UnknownSex(String),

    /// The inputs are individually plausible but the equation yields a
    /// non-positive energy figure (very light, short and old profiles)
    #[error("Calculated {quantity} is not positive ({kcal:.0} kcal)")]
    NonPositiveEnergy { quantity: &'static str, kcal: f64 },
}

impl EnergyError {
    /// Build a missing-data error from technical field names
    pub fn missing<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnergyError::MissingData {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            EnergyError::MissingData { .. } => "MISSING_DATA",
            EnergyError::UnknownActivityLevel(_) => "UNKNOWN_ACTIVITY_LEVEL",
            EnergyError::UnknownGoal(_) => "UNKNOWN_GOAL",
            EnergyError::UnknownSex(_) => "UNKNOWN_SEX",
            EnergyError::NonPositiveEnergy { .. } => "NON_POSITIVE_ENERGY",
        }
    }

    /// The offending field, when the error concerns exactly one
    pub fn field(&self) -> Option<&str> {
        match self {
            EnergyError::MissingData { fields } if fields.len() == 1 => Some(&fields[0]),
            EnergyError::MissingData { .. } => None,
            EnergyError::UnknownActivityLevel(_) => Some("activity_level"),
            EnergyError::UnknownGoal(_) => Some("goal"),
            EnergyError::UnknownSex(_) => Some("sex"),
            EnergyError::NonPositiveEnergy { quantity, .. } => Some(*quantity),
        }
    }
}
