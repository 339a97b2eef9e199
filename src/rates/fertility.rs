//! Births per person per year by cohort

use ndarray::Array2;

use super::cohort::{self, CohortRateArray, SINGLE_YEAR_POINTS};
use super::polyfit::{linspace, Polynomial};
use super::survival::{ADULT_FIRST_AGE, ADULT_LAST_AGE};
use crate::data::{FertilityTable, CHILD_AGES};
use crate::error::Result;

/// Degree of the polynomial fitted to the fertility table
pub const FERTILITY_FIT_DEGREE: usize = 4;

/// Fertility is zero strictly below this age
pub const FERTILITY_MIN_AGE: f64 = 10.0;

/// Fertility is zero strictly above this age
pub const FERTILITY_MAX_AGE: f64 = 50.0;

/// Smoothed fertility over the adult grid
#[derive(Debug, Clone)]
pub struct FertilityRateModel {
    polynomial: Polynomial,
    grid: Vec<f64>,
    /// Births per woman at each grid point, zero outside reproductive ages
    single_year: Vec<f64>,
}

impl FertilityRateModel {
    /// Fit the fertility table and evaluate it on the 60-point adult grid
    pub fn fit(table: &FertilityTable) -> Result<Self> {
        let polynomial = Polynomial::fit(table.midpoints(), table.rates(), FERTILITY_FIT_DEGREE)?;

        let grid = linspace(ADULT_FIRST_AGE, ADULT_LAST_AGE, SINGLE_YEAR_POINTS);
        let single_year = grid
            .iter()
            .map(|&age| {
                let rate = polynomial.eval(age);
                if age > FERTILITY_MAX_AGE || age < FERTILITY_MIN_AGE || rate < 0.0 {
                    0.0
                } else {
                    rate
                }
            })
            .collect();

        Ok(Self {
            polynomial,
            grid,
            single_year,
        })
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Ages of the 60 evaluation points
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    pub fn single_year_rates(&self) -> &[f64] {
        &self.single_year
    }

    /// Fertility by cohort group, S x J
    ///
    /// Groups average their single-year rates, and the result is halved so
    /// the same per-capita rate applies to both sexes within a cohort.
    pub fn cohort_rates(&self, cohorts: usize, ability_types: usize) -> Result<CohortRateArray> {
        let width = cohort::group_width(cohorts)?;
        cohort::require_ability_types(ability_types)?;

        let condensed: Vec<f64> = cohort::group_mean(&self.single_year, cohorts, width)
            .into_iter()
            .map(|rate| rate / 2.0)
            .collect();
        Ok(cohort::broadcast(&condensed, ability_types))
    }

    /// Zeroed 15 x J children matrix for seeding a projection
    pub fn children_placeholder(&self, ability_types: usize) -> Result<Array2<f64>> {
        cohort::require_ability_types(ability_types)?;
        Ok(Array2::zeros((CHILD_AGES, ability_types)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_outside_reproductive_ages() {
        let model = FertilityRateModel::fit(&FertilityTable::us_2012()).unwrap();
        for (age, rate) in model.grid().iter().zip(model.single_year_rates()) {
            assert!(*rate >= 0.0);
            if *age > FERTILITY_MAX_AGE {
                assert_eq!(*rate, 0.0, "age {}", age);
            }
        }
    }

    #[test]
    fn test_peak_fertility_in_late_twenties() {
        let model = FertilityRateModel::fit(&FertilityTable::us_2012()).unwrap();
        let rate_at_28 = model.polynomial().eval(28.0);
        assert!(rate_at_28 > 0.08 && rate_at_28 < 0.13, "rate {}", rate_at_28);
    }

    #[test]
    fn test_cohort_rates_are_halved_means() {
        let model = FertilityRateModel::fit(&FertilityTable::us_2012()).unwrap();
        let rates = model.cohort_rates(12, 2).unwrap();
        assert_eq!(rates.dim(), (12, 2));

        let expected = model.single_year_rates()[5..10].iter().sum::<f64>() / 5.0 / 2.0;
        assert_relative_eq!(rates[[1, 0]], expected, epsilon = 1e-15);
        assert_eq!(rates[[1, 0]], rates[[1, 1]]);
    }

    #[test]
    fn test_children_placeholder_is_zero() {
        let model = FertilityRateModel::fit(&FertilityTable::us_2012()).unwrap();
        let children = model.children_placeholder(3).unwrap();
        assert_eq!(children.dim(), (15, 3));
        assert!(children.iter().all(|v| *v == 0.0));
    }
}
