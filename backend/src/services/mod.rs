//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and the shared calculator.

pub mod energy;

pub use energy::EnergyService;
