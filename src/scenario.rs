//! Scenario runner for batch projections
//!
//! Loads the demographic tables once, then runs many projections with
//! different dimensions without re-reading CSV files.

use std::path::Path;

use rayon::prelude::*;

use crate::data::DemographicData;
use crate::error::Result;
use crate::projection::{OmegaProjector, OmegaTensor, ProjectionConfig};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for cohorts in [10, 20, 60] {
///     let omega = runner.run(ProjectionConfig::new(cohorts, 1, 50))?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    data: DemographicData,
}

impl ScenarioRunner {
    pub fn new(data: DemographicData) -> Self {
        Self { data }
    }

    /// Create runner by loading tables from the default data directory
    pub fn from_csv() -> Result<Self> {
        Ok(Self::new(DemographicData::load_default()?))
    }

    /// Create runner from a specific data directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::new(DemographicData::load_from(path)?))
    }

    pub fn data(&self) -> &DemographicData {
        &self.data
    }

    /// Run a single projection
    pub fn run(&self, config: ProjectionConfig) -> Result<OmegaTensor> {
        OmegaProjector::new(&self.data, config).project()
    }

    /// Run independent projections in parallel, one per config
    ///
    /// Each projection is itself sequential; results keep the input order.
    pub fn run_batch(&self, configs: &[ProjectionConfig]) -> Result<Vec<OmegaTensor>> {
        configs
            .par_iter()
            .map(|config| self.run(*config))
            .collect()
    }
}
