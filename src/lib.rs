//! Demographic Projection - population projection engine for overlapping-generations models
//!
//! This library provides:
//! - Loading of population, mortality, and fertility tables
//! - Polynomial-smoothed survival, immigration, and fertility rates by cohort
//! - Projection of the T x S x J omega tensor of population shares
//! - Batch runs over many projection dimensions

pub mod data;
pub mod error;
pub mod projection;
pub mod rates;
pub mod scenario;

#[cfg(test)]
mod test_fixtures;

// Re-export commonly used types
pub use data::DemographicData;
pub use error::{DemographicsError, Result};
pub use projection::{get_omega, OmegaProjector, OmegaTensor, ProjectionConfig};
pub use rates::{get_fert, get_immigration, get_survival, CohortRateArray};
pub use scenario::ScenarioRunner;
