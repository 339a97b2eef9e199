//! Net immigration factors inferred from the first two observation years
//!
//! The first year's population is aged forward one year using survival alone.
//! Whatever the second year holds beyond (or short of) those survivors is
//! attributed to net migration and expressed as a multiplicative factor.

use ndarray::Array1;

use super::cohort::{self, CohortRateArray, SINGLE_YEAR_POINTS};
use super::polyfit::{linspace, Polynomial};
use super::survival::SurvivalRateModel;
use crate::data::{DemographicData, CHILD_AGES};
use crate::error::{DemographicsError, Result};

/// Degree of the polynomial fitted to the observed factors
pub const IMMIGRATION_FIT_DEGREE: usize = 10;

/// Number of single-year child immigration factors (ages 0..=13 of the fitted curve)
pub const CHILD_IMMIGRATION_AGES: usize = CHILD_AGES - 1;

const FIRST_OBSERVED_AGE: u32 = 1;
const LAST_OBSERVED_AGE: u32 = 75;

/// Smoothed immigration factors by single year of age
#[derive(Debug, Clone)]
pub struct ImmigrationRateModel {
    /// Observed factors: 1 + percent change between predicted survivors and year-two counts
    observed: Vec<f64>,
    polynomial: Polynomial,
    /// Fitted factors at the observation abscissae
    fitted: Vec<f64>,
}

impl ImmigrationRateModel {
    /// Compare year-two counts against year-one survivors and smooth the ratio
    pub fn fit(data: &DemographicData) -> Result<Self> {
        let child_survival = data.mortality.child_survival()?;
        let adult_survival = SurvivalRateModel::fit(&data.mortality)?.cohort_rates(SINGLE_YEAR_POINTS, 1)?;

        // 15 child rates followed by 60 adult rates, aligned with ages 1..=75
        let survival: Vec<f64> = child_survival
            .iter()
            .chain(adult_survival.column(0).iter())
            .copied()
            .collect();

        let first_year = data
            .population
            .counts_for_ages(0, FIRST_OBSERVED_AGE, LAST_OBSERVED_AGE)?;
        let second_year = data
            .population
            .counts_for_ages(1, FIRST_OBSERVED_AGE + 1, LAST_OBSERVED_AGE + 1)?;

        let mut observed: Vec<f64> = first_year
            .iter()
            .zip(&survival)
            .zip(&second_year)
            .map(|((count, rate), next)| {
                let survivors = count * rate;
                (next - survivors) / survivors + 1.0
            })
            .collect();
        // The terminal adult rate is 0, so the last age has no survivors to compare against
        observed.pop();

        let abscissae = linspace(
            FIRST_OBSERVED_AGE as f64,
            LAST_OBSERVED_AGE as f64,
            observed.len(),
        );
        let polynomial = Polynomial::fit(&abscissae, &observed, IMMIGRATION_FIT_DEGREE)?;
        let fitted = polynomial.eval_many(&abscissae);

        log::debug!(
            "Fitted immigration factors over {} ages: min {:.6}, max {:.6}",
            fitted.len(),
            fitted.iter().copied().fold(f64::INFINITY, f64::min),
            fitted.iter().copied().fold(f64::NEG_INFINITY, f64::max)
        );

        Ok(Self {
            observed,
            polynomial,
            fitted,
        })
    }

    pub fn observed_factors(&self) -> &[f64] {
        &self.observed
    }

    pub fn fitted_factors(&self) -> &[f64] {
        &self.fitted
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Immigration by cohort step, (S-1) x J
    ///
    /// Row `s` scales the move from cohort `s` into cohort `s + 1`; factors
    /// compound across a multi-year group the same way survival does.
    pub fn cohort_rates(&self, cohorts: usize, ability_types: usize) -> Result<CohortRateArray> {
        let width = cohort::group_width(cohorts)?;
        if cohorts < 2 {
            return Err(DemographicsError::InvalidDimension {
                name: "cohorts",
                value: cohorts,
                min: 2,
            });
        }
        cohort::require_ability_types(ability_types)?;

        let adult = &self.fitted[CHILD_AGES.min(self.fitted.len())..];
        let condensed = cohort::group_product(adult, cohorts - 1, width);
        Ok(cohort::broadcast(&condensed, ability_types))
    }

    /// Single-year factors for the pre-adult ages, unaggregated
    pub fn child_factors(&self) -> Array1<f64> {
        self.fitted
            .iter()
            .take(CHILD_IMMIGRATION_AGES)
            .copied()
            .collect()
    }
}
