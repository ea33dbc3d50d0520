//! FitPlan Shared Library
//!
//! This crate contains the energy calculator and the types shared by the
//! backend and WASM modules.

pub mod energy;
pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use energy::*;
pub use errors::*;
pub use types::{EnergyRequest, NutritionPlan};
