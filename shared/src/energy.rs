//! Energy expenditure calculations
//!
//! Computes Basal Metabolic Rate (Mifflin-St Jeor), Total Daily Energy
//! Expenditure, a goal-adjusted calorie target and the protein/carbs/fat
//! split derived from it.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no I/O and no shared state, safe to call from any thread
//! 2. **Closed Tables**: multipliers and adjustments are exhaustive `match`es
//! 3. **Round Late**: values stay unrounded until [`EnergyResult::report`]
//!
//! # Pipeline
//!
//! ```text
//! Profile -> BMR -> TDEE -> target calories -> macro split
//! ```

use crate::errors::EnergyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grams of protein per kilogram of body weight
pub const PROTEIN_G_PER_KG: f64 = 2.2;
/// Share of target calories assigned to fat
pub const FAT_CALORIE_SHARE: f64 = 0.25;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex, used for the constant term of the BMR equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Mifflin-St Jeor constant for this sex
    pub fn bmr_constant(&self) -> f64 {
        match self {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        }
    }
}

impl FromStr for Sex {
    type Err = EnergyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(EnergyError::UnknownSex(s.to_string())),
        }
    }
}

impl TryFrom<String> for Sex {
    type Error = EnergyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::Light => "Light exercise 1-3 days/week",
            ActivityLevel::Moderate => "Moderate exercise 3-5 days/week",
            ActivityLevel::Active => "Hard exercise 6-7 days/week",
            ActivityLevel::VeryActive => "Very hard exercise or physical job",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = EnergyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            _ => Err(EnergyError::UnknownActivityLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for ActivityLevel {
    type Error = EnergyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fitness goal driving the calorie adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Goal {
    LoseWeight,
    Maintain,
    GainMuscle,
    ImproveEndurance,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::LoseWeight,
        Goal::Maintain,
        Goal::GainMuscle,
        Goal::ImproveEndurance,
    ];

    /// Calories added to TDEE for this goal (negative = deficit)
    pub fn calorie_adjustment(&self) -> f64 {
        match self {
            Goal::LoseWeight => -500.0,
            Goal::Maintain => 0.0,
            Goal::GainMuscle => 300.0,
            Goal::ImproveEndurance => 200.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::Maintain => "maintain",
            Goal::GainMuscle => "gain_muscle",
            Goal::ImproveEndurance => "improve_endurance",
        }
    }
}

impl FromStr for Goal {
    type Err = EnergyError;

    /// Accepts the canonical names plus the calculator form's short
    /// `lose` / `gain` values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose_weight" | "lose" => Ok(Goal::LoseWeight),
            "maintain" => Ok(Goal::Maintain),
            "gain_muscle" | "gain" => Ok(Goal::GainMuscle),
            "improve_endurance" => Ok(Goal::ImproveEndurance),
            _ => Err(EnergyError::UnknownGoal(s.to_string())),
        }
    }
}

impl TryFrom<String> for Goal {
    type Error = EnergyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw biometric inputs; any of them may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age_years: Option<i32>,
}

/// Biometric inputs that passed the presence check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age_years: i32,
}

impl Biometrics {
    pub fn new(weight_kg: f64, height_cm: f64, age_years: i32) -> Self {
        Self {
            weight_kg: Some(weight_kg),
            height_cm: Some(height_cm),
            age_years: Some(age_years),
        }
    }

    /// Names of the fields that are absent, zero, negative or not finite
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !is_usable(self.weight_kg) {
            missing.push("weight_kg");
        }
        if !is_usable(self.height_cm) {
            missing.push("height_cm");
        }
        if !self.age_years.is_some_and(|a| a > 0) {
            missing.push("age_years");
        }
        missing
    }

    /// Require every field to be present and positive
    ///
    /// # Errors
    ///
    /// Returns [`EnergyError::MissingData`] naming every unusable field.
    pub fn measurements(&self) -> Result<Measurements, EnergyError> {
        match (self.weight_kg, self.height_cm, self.age_years) {
            (Some(weight_kg), Some(height_cm), Some(age_years))
                if self.missing_fields().is_empty() =>
            {
                Ok(Measurements {
                    weight_kg,
                    height_cm,
                    age_years,
                })
            }
            _ => Err(EnergyError::missing(self.missing_fields())),
        }
    }
}

fn is_usable(value: Option<f64>) -> bool {
    value.is_some_and(|v| v.is_finite() && v > 0.0)
}

/// Everything the calculator needs about a person
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(flatten)]
    pub biometrics: Biometrics,
    /// When absent, BMR falls back to the goal-based approximation
    pub sex: Option<Sex>,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

// ============================================================================
// BMR and TDEE
// ============================================================================

/// Which constant term fed the BMR equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmrBasis {
    /// Constant taken from the recorded sex
    RecordedSex,
    /// Constant approximated from the goal because no sex was recorded
    GoalApproximation,
}

/// Mifflin-St Jeor with an explicit constant term
///
/// BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + constant
pub fn mifflin_st_jeor(m: &Measurements, constant: f64) -> f64 {
    10.0 * m.weight_kg + 6.25 * m.height_cm - 5.0 * m.age_years as f64 + constant
}

/// Calculate BMR from recorded sex (+5 male, -161 female)
///
/// # Errors
///
/// Returns [`EnergyError::MissingData`] if weight, height or age is unusable.
pub fn calculate_bmr(biometrics: &Biometrics, sex: Sex) -> Result<f64, EnergyError> {
    let m = biometrics.measurements()?;
    Ok(mifflin_st_jeor(&m, sex.bmr_constant()))
}

/// Approximate BMR when no sex is recorded
///
/// Uses the male constant for `gain_muscle` and the female constant for
/// every other goal. Only use this when the caller has no sex on file.
///
/// # Errors
///
/// Returns [`EnergyError::MissingData`] if weight, height or age is unusable.
pub fn calculate_bmr_from_goal(biometrics: &Biometrics, goal: Goal) -> Result<f64, EnergyError> {
    let m = biometrics.measurements()?;
    Ok(mifflin_st_jeor(&m, goal_bmr_constant(goal)))
}

fn goal_bmr_constant(goal: Goal) -> f64 {
    match goal {
        Goal::GainMuscle => Sex::Male.bmr_constant(),
        Goal::LoseWeight | Goal::Maintain | Goal::ImproveEndurance => Sex::Female.bmr_constant(),
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Goal-adjusted daily calorie target
pub fn target_calories(tdee: f64, goal: Goal) -> f64 {
    tdee + goal.calorie_adjustment()
}

// ============================================================================
// Macro Split
// ============================================================================

/// Protein/carbs/fat grams derived from a calorie target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fats_g: f64,
    /// Calories by which protein and fat alone exceed the target.
    /// Set only when carbs were clamped to zero.
    pub carb_shortfall_kcal: Option<f64>,
}

impl MacroSplit {
    /// Split `target_calories` using the remainder-of-calories method
    ///
    /// Protein is fixed per kg of body weight, fat takes a fixed share of the
    /// target and carbs receive what is left. Neither fat nor carbs go below
    /// zero.
    pub fn from_target(weight_kg: f64, target_calories: f64) -> Self {
        let protein_g = weight_kg * PROTEIN_G_PER_KG;
        let fats_g = (target_calories * FAT_CALORIE_SHARE / KCAL_PER_G_FAT).max(0.0);
        let remainder_kcal =
            target_calories - protein_g * KCAL_PER_G_PROTEIN - fats_g * KCAL_PER_G_FAT;

        if remainder_kcal < 0.0 {
            Self {
                protein_g,
                carbs_g: 0.0,
                fats_g,
                carb_shortfall_kcal: Some(-remainder_kcal),
            }
        } else {
            Self {
                protein_g,
                carbs_g: remainder_kcal / KCAL_PER_G_CARBS,
                fats_g,
                carb_shortfall_kcal: None,
            }
        }
    }
}

// ============================================================================
// Full Pipeline
// ============================================================================

/// Unrounded calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergyResult {
    pub bmr: f64,
    pub tdee: f64,
    pub target_calories: f64,
    pub macros: MacroSplit,
    pub bmr_basis: BmrBasis,
}

/// Calculate BMR, TDEE, target calories and macros for a profile
///
/// Uses the recorded sex when present, otherwise the goal approximation;
/// [`EnergyResult::bmr_basis`] says which.
///
/// # Errors
///
/// Returns [`EnergyError::MissingData`] before computing anything if a
/// biometric input is unusable, and [`EnergyError::NonPositiveEnergy`] when
/// the BMR or the goal-adjusted target comes out at or below zero.
pub fn calculate_energy(profile: &Profile) -> Result<EnergyResult, EnergyError> {
    let m = profile.biometrics.measurements()?;

    let (constant, bmr_basis) = match profile.sex {
        Some(sex) => (sex.bmr_constant(), BmrBasis::RecordedSex),
        None => (goal_bmr_constant(profile.goal), BmrBasis::GoalApproximation),
    };

    let bmr = require_positive("bmr", mifflin_st_jeor(&m, constant))?;
    let tdee = calculate_tdee(bmr, profile.activity_level);
    let target = require_positive("target_calories", target_calories(tdee, profile.goal))?;
    let macros = MacroSplit::from_target(m.weight_kg, target);

    Ok(EnergyResult {
        bmr,
        tdee,
        target_calories: target,
        macros,
        bmr_basis,
    })
}

fn require_positive(quantity: &'static str, kcal: f64) -> Result<f64, EnergyError> {
    if kcal > 0.0 {
        Ok(kcal)
    } else {
        Err(EnergyError::NonPositiveEnergy { quantity, kcal })
    }
}

/// Warnings attached to a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnergyWarning {
    /// Protein and fat exceed the target; carbs were clamped to zero
    CarbohydrateDeficit { shortfall_kcal: i64 },
    /// BMR used the goal-based approximation instead of recorded sex
    SexApproximatedFromGoal,
}

/// Rounded result returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fats: i64,
    pub bmr_basis: BmrBasis,
    pub warnings: Vec<EnergyWarning>,
}

impl EnergyResult {
    /// Round every value to the nearest integer for presentation
    pub fn report(&self) -> EnergyReport {
        let mut warnings = Vec::new();
        if self.bmr_basis == BmrBasis::GoalApproximation {
            warnings.push(EnergyWarning::SexApproximatedFromGoal);
        }
        if let Some(shortfall) = self.macros.carb_shortfall_kcal {
            warnings.push(EnergyWarning::CarbohydrateDeficit {
                shortfall_kcal: round(shortfall),
            });
        }

        EnergyReport {
            bmr: round(self.bmr),
            tdee: round(self.tdee),
            target_calories: round(self.target_calories),
            protein: round(self.macros.protein_g),
            carbs: round(self.macros.carbs_g),
            fats: round(self.macros.fats_g),
            bmr_basis: self.bmr_basis,
            warnings,
        }
    }
}

fn round(value: f64) -> i64 {
    value.round() as i64
}
