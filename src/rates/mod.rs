//! Survival, immigration, and fertility rates by cohort
//!
//! Each model fits a polynomial to an empirical table, evaluates it on a
//! fine age grid, and re-bins the result into S cohort groups broadcast
//! across J ability types.

pub mod cohort;
pub mod polyfit;
mod fertility;
mod immigration;
mod survival;

pub use cohort::{CohortRateArray, SINGLE_YEAR_POINTS};
pub use fertility::{FertilityRateModel, FERTILITY_FIT_DEGREE, FERTILITY_MAX_AGE, FERTILITY_MIN_AGE};
pub use immigration::{ImmigrationRateModel, CHILD_IMMIGRATION_AGES, IMMIGRATION_FIT_DEGREE};
pub use polyfit::{FitError, Polynomial};
pub use survival::{SurvivalRateModel, ADULT_FIRST_AGE, ADULT_LAST_AGE, SURVIVAL_FIT_DEGREE};

use ndarray::{Array1, Array2};

use crate::data::DemographicData;
use crate::error::Result;

/// S x J survival rates; the last cohort's rate is 0
pub fn get_survival(data: &DemographicData, cohorts: usize, ability_types: usize) -> Result<CohortRateArray> {
    SurvivalRateModel::fit(&data.mortality)?.cohort_rates(cohorts, ability_types)
}

/// (S-1) x J cohort immigration factors and the 14 child immigration factors
pub fn get_immigration(
    data: &DemographicData,
    cohorts: usize,
    ability_types: usize,
) -> Result<(CohortRateArray, Array1<f64>)> {
    let model = ImmigrationRateModel::fit(data)?;
    Ok((model.cohort_rates(cohorts, ability_types)?, model.child_factors()))
}

/// S x J fertility rates and a zeroed 15 x J children matrix
pub fn get_fert(
    data: &DemographicData,
    cohorts: usize,
    ability_types: usize,
) -> Result<(CohortRateArray, Array2<f64>)> {
    let model = FertilityRateModel::fit(&data.fertility)?;
    Ok((
        model.cohort_rates(cohorts, ability_types)?,
        model.children_placeholder(ability_types)?,
    ))
}
