//! Re-binning single-year values into cohort groups and broadcasting across ability types

use ndarray::Array2;

use crate::error::{DemographicsError, Result};

/// Single-year points spanning the modeled adult ages 15..75
pub const SINGLE_YEAR_POINTS: usize = 60;

/// S x J matrix of per-cohort rates; every column in a row is identical
pub type CohortRateArray = Array2<f64>;

/// Width of each cohort group when `cohorts` groups partition the 60 single-year points
///
/// Cohort counts that leave a remainder are rejected rather than truncated.
pub fn group_width(cohorts: usize) -> Result<usize> {
    if cohorts == 0 {
        return Err(DemographicsError::InvalidDimension {
            name: "cohorts",
            value: cohorts,
            min: 1,
        });
    }
    if SINGLE_YEAR_POINTS % cohorts != 0 {
        return Err(DemographicsError::UnevenCohorts {
            cohorts,
            points: SINGLE_YEAR_POINTS,
        });
    }
    Ok(SINGLE_YEAR_POINTS / cohorts)
}

/// Fail unless `ability_types` is positive
pub fn require_ability_types(ability_types: usize) -> Result<()> {
    if ability_types == 0 {
        return Err(DemographicsError::InvalidDimension {
            name: "ability_types",
            value: ability_types,
            min: 1,
        });
    }
    Ok(())
}

/// Product of each run of `width` consecutive values, for the first `groups` runs
///
/// Surviving a multi-year span requires surviving every year in it.
pub fn group_product(values: &[f64], groups: usize, width: usize) -> Vec<f64> {
    (0..groups)
        .map(|g| group_slice(values, g, width).iter().product())
        .collect()
}

/// Mean of each run of `width` consecutive values, for the first `groups` runs
pub fn group_mean(values: &[f64], groups: usize, width: usize) -> Vec<f64> {
    (0..groups)
        .map(|g| {
            let slice = group_slice(values, g, width);
            if slice.is_empty() {
                0.0
            } else {
                slice.iter().sum::<f64>() / slice.len() as f64
            }
        })
        .collect()
}

/// Repeat a per-cohort vector across `ability_types` identical columns
pub fn broadcast(values: &[f64], ability_types: usize) -> CohortRateArray {
    Array2::from_shape_fn((values.len(), ability_types), |(s, _)| values[s])
}

fn group_slice(values: &[f64], group: usize, width: usize) -> &[f64] {
    let start = (group * width).min(values.len());
    let end = ((group + 1) * width).min(values.len());
    &values[start..end]
}
