//! Energy service - runs the calculator for ad-hoc and stored profiles

use crate::config::CalculatorConfig;
use crate::error::ApiError;
use crate::repositories::{UserProfileRecord, UserRepository};
use fitplan_shared::energy::{
    calculate_energy, ActivityLevel, Biometrics, BmrBasis, EnergyResult, Goal, Profile, Sex,
};
use fitplan_shared::types::EnergyRequest;
use fitplan_shared::validation::validate_measurements;
use fitplan_shared::EnergyError;
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;
use validator::Validate;

/// Energy service for calculator operations
pub struct EnergyService;

impl EnergyService {
    /// Calculate energy targets for a profile supplied by the caller
    ///
    /// Order of checks: unknown enum values, missing data, then plausible
    /// ranges. Nothing is computed unless all three pass.
    pub fn calculate(req: &EnergyRequest) -> Result<EnergyResult, ApiError> {
        let profile = req.to_profile()?;
        profile.biometrics.measurements()?;
        req.validate()?;

        Self::run(&profile)
    }

    /// Calculate energy targets from a user's stored profile
    pub async fn calculate_for_user(
        db: &PgPool,
        user_id: Uuid,
        config: &CalculatorConfig,
    ) -> Result<EnergyResult, ApiError> {
        let record = UserRepository::find_profile(db, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let profile = Self::profile_from_record(&record, config)?;
        let measurements = profile.biometrics.measurements()?;
        validate_measurements(&measurements)?;

        debug!(user_id = %user_id, "Calculating energy targets from stored profile");
        Self::run(&profile)
    }

    /// Convert a stored user record into a calculator profile
    ///
    /// A record without sex is accepted only when goal approximation is
    /// enabled; otherwise `sex` is reported alongside any missing biometrics.
    pub fn profile_from_record(
        record: &UserProfileRecord,
        config: &CalculatorConfig,
    ) -> Result<Profile, EnergyError> {
        let sex = record.sex.as_deref().map(str::parse::<Sex>).transpose()?;
        let activity_level: ActivityLevel = record.activity_level.parse()?;
        let goal: Goal = record.goal.parse()?;

        let biometrics = Biometrics {
            weight_kg: record.weight,
            height_cm: record.height,
            age_years: record.age,
        };

        if sex.is_none() && !config.allow_goal_approximation {
            let mut missing = biometrics.missing_fields();
            missing.push("sex");
            return Err(EnergyError::missing(missing));
        }

        Ok(Profile {
            biometrics,
            sex,
            activity_level,
            goal,
        })
    }

    fn run(profile: &Profile) -> Result<EnergyResult, ApiError> {
        let result = calculate_energy(profile)?;

        debug!(
            bmr = result.bmr,
            tdee = result.tdee,
            target_calories = result.target_calories,
            activity_level = %profile.activity_level,
            goal = %profile.goal,
            "Energy targets calculated"
        );

        if result.bmr_basis == BmrBasis::GoalApproximation {
            warn!(goal = %profile.goal, "No sex on profile, BMR approximated from goal");
        }
        if let Some(shortfall) = result.macros.carb_shortfall_kcal {
            warn!(
                shortfall_kcal = shortfall,
                "Protein and fat exceed calorie target, carbs clamped to zero"
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn request() -> EnergyRequest {
        EnergyRequest {
            weight_kg: Some(70.0),
            height_cm: Some(175.0),
            age_years: Some(25),
            sex: Some("male".to_string()),
            activity_level: Some("moderate".to_string()),
            goal: Some("lose_weight".to_string()),
        }
    }

    fn record() -> UserProfileRecord {
        UserProfileRecord {
            id: Uuid::new_v4(),
            email: "ana@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Ruiz".to_string(),
            age: Some(25),
            weight: Some(70.0),
            height: Some(175.0),
            sex: None,
            goal: "gain_muscle".to_string(),
            activity_level: "moderate".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_calculate_reference_profile() {
        let report = EnergyService::calculate(&request()).unwrap().report();
        assert_eq!(report.bmr, 1674);
        assert_eq!(report.tdee, 2594);
        assert_eq!(report.target_calories, 2094);
    }

    #[test]
    fn test_missing_data_reported_before_range_checks() {
        let req = EnergyRequest {
            weight_kg: Some(0.0),
            ..request()
        };
        let err = EnergyService::calculate(&req).unwrap_err();
        assert!(matches!(
            err,
            ApiError::Energy(EnergyError::MissingData { ref fields }) if fields == &["weight_kg"]
        ));
    }

    #[rstest]
    #[case(EnergyRequest { weight_kg: Some(700.0), ..request() }, "weight_kg")]
    #[case(EnergyRequest { height_cm: Some(20.0), ..request() }, "height_cm")]
    #[case(EnergyRequest { age_years: Some(200), ..request() }, "age_years")]
    fn test_implausible_values_rejected(#[case] req: EnergyRequest, #[case] expected: &str) {
        match EnergyService::calculate(&req).unwrap_err() {
            ApiError::Validation { field, .. } => assert_eq!(field.as_deref(), Some(expected)),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_goal_rejected() {
        let req = EnergyRequest {
            goal: Some("bulk".to_string()),
            ..request()
        };
        assert!(matches!(
            EnergyService::calculate(&req).unwrap_err(),
            ApiError::Energy(EnergyError::UnknownGoal(_))
        ));
    }

    #[test]
    fn test_record_without_sex_uses_goal_approximation() {
        let profile =
            EnergyService::profile_from_record(&record(), &CalculatorConfig::default()).unwrap();
        assert_eq!(profile.sex, None);
        assert_eq!(profile.goal, Goal::GainMuscle);

        let result = calculate_energy(&profile).unwrap();
        assert_eq!(result.bmr_basis, BmrBasis::GoalApproximation);
        assert_eq!(result.bmr, 1673.75);
    }

    #[test]
    fn test_record_without_sex_rejected_when_approximation_disabled() {
        let config = CalculatorConfig {
            allow_goal_approximation: false,
        };
        let record = UserProfileRecord {
            height: None,
            ..record()
        };
        assert_eq!(
            EnergyService::profile_from_record(&record, &config).unwrap_err(),
            EnergyError::missing(["height_cm", "sex"])
        );
    }

    #[test]
    fn test_record_with_sex_uses_recorded_sex() {
        let record = UserProfileRecord {
            sex: Some("female".to_string()),
            ..record()
        };
        let profile =
            EnergyService::profile_from_record(&record, &CalculatorConfig::default()).unwrap();
        assert_eq!(profile.sex, Some(Sex::Female));
    }

    #[test]
    fn test_record_with_unknown_activity_level() {
        let record = UserProfileRecord {
            activity_level: "extreme".to_string(),
            ..record()
        };
        assert_eq!(
            EnergyService::profile_from_record(&record, &CalculatorConfig::default()).unwrap_err(),
            EnergyError::UnknownActivityLevel("extreme".to_string())
        );
    }
}
