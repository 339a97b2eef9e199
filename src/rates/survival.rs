//! Survival rates by cohort, fitted from the sex-averaged mortality curve

use super::cohort::{self, CohortRateArray, SINGLE_YEAR_POINTS};
use super::polyfit::{linspace, Polynomial};
use crate::data::MortalityCurve;
use crate::error::Result;

/// Degree of the polynomial fitted to the mortality curve
pub const SURVIVAL_FIT_DEGREE: usize = 10;

/// First and last ages of the adult evaluation grid
pub const ADULT_FIRST_AGE: f64 = 15.0;
pub const ADULT_LAST_AGE: f64 = 75.0;

/// Smoothed one-year survival probabilities over the adult ages
#[derive(Debug, Clone)]
pub struct SurvivalRateModel {
    polynomial: Polynomial,
    /// Fitted values at the 60 grid points, clamped above at 1.0
    single_year: Vec<f64>,
}

impl SurvivalRateModel {
    /// Fit the mortality curve and evaluate it on the 60-point adult grid
    ///
    /// Values above 1.0 are clamped to 1.0. Values below 0.0 are kept as
    /// fitted and only reported.
    pub fn fit(mortality: &MortalityCurve) -> Result<Self> {
        let polynomial = Polynomial::fit(&mortality.ages(), mortality.survival(), SURVIVAL_FIT_DEGREE)?;

        let grid = linspace(ADULT_FIRST_AGE, ADULT_LAST_AGE, SINGLE_YEAR_POINTS);
        let mut clamped = 0;
        let single_year: Vec<f64> = polynomial
            .eval_many(&grid)
            .into_iter()
            .map(|p| {
                if p > 1.0 {
                    clamped += 1;
                    1.0
                } else {
                    p
                }
            })
            .collect();

        if clamped > 0 {
            log::debug!("Clamped {} fitted survival probabilities to 1.0", clamped);
        }
        for (age, p) in grid.iter().zip(&single_year).filter(|(_, p)| **p < 0.0) {
            log::warn!("Fitted survival probability at age {:.2} is negative: {:.6}", age, p);
        }

        Ok(Self {
            polynomial,
            single_year,
        })
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// The 60 clamped single-year survival probabilities
    pub fn single_year_rates(&self) -> &[f64] {
        &self.single_year
    }

    /// Survival by cohort group, broadcast across `ability_types` columns
    ///
    /// Each group's rate is the product of its single-year rates. The last
    /// group's rate is 0: everyone reaching the terminal cohort dies.
    pub fn cohort_rates(&self, cohorts: usize, ability_types: usize) -> Result<CohortRateArray> {
        let width = cohort::group_width(cohorts)?;
        cohort::require_ability_types(ability_types)?;

        let mut condensed = cohort::group_product(&self.single_year, cohorts, width);
        if let Some(last) = condensed.last_mut() {
            *last = 0.0;
        }
        Ok(cohort::broadcast(&condensed, ability_types))
    }
}
