//! Omega projector: rolls the observed cohort distribution forward in time

use ndarray::{Array2, Array3, Axis};

use super::config::ProjectionConfig;
use super::output::OmegaTensor;
use super::state::{ProjectionRates, ProjectionState};
use crate::data::DemographicData;
use crate::error::{DemographicsError, Result};
use crate::rates::polyfit::linspace;
use crate::rates::{FertilityRateModel, ImmigrationRateModel, SurvivalRateModel};

/// Observation year whose distribution seeds period 0
pub const INITIAL_YEAR: usize = 0;

/// Ages [16, 76) hold the modeled adult population
pub const FIRST_COHORT_AGE: f64 = 16.0;
pub const COHORT_AGE_LIMIT: f64 = 76.0;

/// Main projection engine
pub struct OmegaProjector<'a> {
    data: &'a DemographicData,
    config: ProjectionConfig,
}

impl<'a> OmegaProjector<'a> {
    pub fn new(data: &'a DemographicData, config: ProjectionConfig) -> Self {
        Self { data, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Fit every rate model and re-bin it to the configured dimensions
    pub fn rates(&self) -> Result<ProjectionRates> {
        let ProjectionConfig {
            cohorts,
            ability_types,
            ..
        } = self.config;

        let immigration = ImmigrationRateModel::fit(self.data)?;
        Ok(ProjectionRates {
            survival: SurvivalRateModel::fit(&self.data.mortality)?.cohort_rates(cohorts, ability_types)?,
            immigration: immigration.cohort_rates(cohorts, ability_types)?,
            fertility: FertilityRateModel::fit(&self.data.fertility)?.cohort_rates(cohorts, ability_types)?,
            child_survival: self.data.mortality.child_survival()?,
            child_immigration: immigration.child_factors(),
        })
    }

    /// Observed period-0 distribution, S x J
    ///
    /// Shares are of the initial year's full-range total, summed into S
    /// buckets delimited by S + 1 evenly spaced breakpoints over [16, 76), and
    /// split evenly across the J ability types.
    pub fn initial_cohorts(&self) -> Result<Array2<f64>> {
        let ProjectionConfig {
            cohorts,
            ability_types,
            ..
        } = self.config;

        let distribution = self.data.population.normalized(INITIAL_YEAR)?;
        let breakpoints = linspace(FIRST_COHORT_AGE, COHORT_AGE_LIMIT, cohorts + 1);
        let shares: Vec<f64> = breakpoints
            .windows(2)
            .map(|bounds| distribution.sum_between(bounds[0], bounds[1]) / ability_types as f64)
            .collect();

        Ok(Array2::from_shape_fn((cohorts, ability_types), |(s, _)| shares[s]))
    }

    /// Project `periods` periods; period 0 is the observed distribution
    pub fn project(&self) -> Result<OmegaTensor> {
        self.config.validate()?;
        let rates = self.rates()?;
        self.project_with(&rates)
    }

    /// Project with rates already fitted by [`OmegaProjector::rates`]
    pub fn project_with(&self, rates: &ProjectionRates) -> Result<OmegaTensor> {
        self.config.validate()?;
        let ProjectionConfig {
            cohorts,
            ability_types,
            periods,
        } = self.config;

        // Immigration has no entry for the youngest cohort
        let checks = [
            (rates.survival.dim(), (cohorts, ability_types)),
            (rates.immigration.dim(), (cohorts - 1, ability_types)),
            (rates.fertility.dim(), (cohorts, ability_types)),
        ];
        for (found, expected) in checks {
            if found != expected {
                return Err(DemographicsError::RateShape { expected, found });
            }
        }

        let mut state = ProjectionState::initial(self.initial_cohorts()?, rates);

        let mut omega = Array3::zeros((periods, cohorts, ability_types));
        omega.index_axis_mut(Axis(0), 0).assign(&state.cohorts);
        for t in 1..periods {
            state.advance(rates);
            omega.index_axis_mut(Axis(0), t).assign(&state.cohorts);
        }

        let omega = OmegaTensor::new(omega);
        let totals = omega.period_totals();
        log::info!(
            "Projected {} periods x {} cohorts x {} ability types; population share {:.6} -> {:.6}",
            periods,
            cohorts,
            ability_types,
            totals.first().copied().unwrap_or(0.0),
            totals.last().copied().unwrap_or(0.0)
        );
        Ok(omega)
    }
}
