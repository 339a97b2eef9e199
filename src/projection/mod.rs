//! Omega projection: population share by period, cohort, and ability type

mod config;
mod engine;
mod output;
mod state;

pub use config::ProjectionConfig;
pub use engine::{OmegaProjector, COHORT_AGE_LIMIT, FIRST_COHORT_AGE, INITIAL_YEAR};
pub use output::{OmegaSummary, OmegaTensor};
pub use state::{ProjectionRates, ProjectionState};

use crate::data::DemographicData;
use crate::error::Result;

/// T x S x J omega tensor for the given dimensions
pub fn get_omega(
    data: &DemographicData,
    cohorts: usize,
    ability_types: usize,
    periods: usize,
) -> Result<OmegaTensor> {
    OmegaProjector::new(data, ProjectionConfig::new(cohorts, ability_types, periods)).project()
}
