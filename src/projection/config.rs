//! Projection dimensions

use serde::{Deserialize, Serialize};

use crate::error::{DemographicsError, Result};
use crate::rates::cohort;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Number of age cohorts (S); must divide 60
    pub cohorts: usize,

    /// Number of ability types (J)
    pub ability_types: usize,

    /// Number of time periods to project (T), including the initial period
    pub periods: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            cohorts: 60,
            ability_types: 1,
            periods: 60,
        }
    }
}

impl ProjectionConfig {
    pub fn new(cohorts: usize, ability_types: usize, periods: usize) -> Self {
        Self {
            cohorts,
            ability_types,
            periods,
        }
    }

    /// Check every dimension before any fitting happens
    pub fn validate(&self) -> Result<()> {
        cohort::group_width(self.cohorts)?;
        if self.cohorts < 2 {
            return Err(DemographicsError::InvalidDimension {
                name: "cohorts",
                value: self.cohorts,
                min: 2,
            });
        }
        cohort::require_ability_types(self.ability_types)?;
        if self.periods == 0 {
            return Err(DemographicsError::InvalidDimension {
                name: "periods",
                value: self.periods,
                min: 1,
            });
        }
        Ok(())
    }
}
