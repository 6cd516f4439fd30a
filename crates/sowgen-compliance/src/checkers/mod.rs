//! The five rule checkers, one per regulatory domain

pub mod fire;
pub mod health_safety;
pub mod heritage;
pub mod structural;
pub mod thermal;

pub use fire::FireSafetyChecker;
pub use health_safety::HealthSafetyChecker;
pub use heritage::HeritageChecker;
pub use structural::StructuralChecker;
pub use thermal::ThermalChecker;
