//! Projection output: the T x S x J omega tensor

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ndarray::{Array3, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Population share by period, cohort, and ability type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmegaTensor {
    values: Array3<f64>,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmegaSummary {
    pub periods: usize,
    pub cohorts: usize,
    pub ability_types: usize,
    pub initial_total: f64,
    pub final_total: f64,
    pub min_total: f64,
    pub max_total: f64,
}

/// A single row of CSV output
#[derive(Debug, Clone, Serialize)]
struct OmegaRow {
    #[serde(rename = "Period")]
    period: usize,
    #[serde(rename = "Cohort")]
    cohort: usize,
    #[serde(rename = "Ability")]
    ability: usize,
    #[serde(rename = "Share")]
    share: f64,
}

impl OmegaTensor {
    pub fn new(values: Array3<f64>) -> Self {
        Self { values }
    }

    /// (T, S, J)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.values.dim()
    }

    pub fn periods(&self) -> usize {
        self.values.len_of(Axis(0))
    }

    /// The S x J slice for period `t`
    pub fn period(&self, t: usize) -> Option<ArrayView2<'_, f64>> {
        (t < self.periods()).then(|| self.values.index_axis(Axis(0), t))
    }

    pub fn as_array(&self) -> &Array3<f64> {
        &self.values
    }

    /// Total population share in each period
    pub fn period_totals(&self) -> Vec<f64> {
        self.values
            .outer_iter()
            .map(|slice| slice.sum())
            .collect()
    }

    /// Share of each cohort in period `t`, summed over ability types
    pub fn cohort_totals(&self, t: usize) -> Option<Vec<f64>> {
        self.period(t)
            .map(|slice| slice.sum_axis(Axis(1)).to_vec())
    }

    pub fn summary(&self) -> OmegaSummary {
        let (periods, cohorts, ability_types) = self.shape();
        let totals = self.period_totals();
        OmegaSummary {
            periods,
            cohorts,
            ability_types,
            initial_total: totals.first().copied().unwrap_or(0.0),
            final_total: totals.last().copied().unwrap_or(0.0),
            min_total: totals.iter().copied().fold(f64::INFINITY, f64::min),
            max_total: totals.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }

    /// Write one `Period,Cohort,Ability,Share` row per tensor entry
    pub fn write_csv_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        for ((period, cohort, ability), &share) in self.values.indexed_iter() {
            csv.serialize(OmegaRow {
                period,
                cohort,
                ability,
                share,
            })?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        self.write_csv_to(File::create(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn small_tensor() -> OmegaTensor {
        OmegaTensor::new(Array3::from_shape_fn((3, 2, 2), |(t, s, j)| {
            0.1 * (t + 1) as f64 + 0.01 * s as f64 + 0.001 * j as f64
        }))
    }

    #[test]
    fn test_shape_and_period_access() {
        let omega = small_tensor();
        assert_eq!(omega.shape(), (3, 2, 2));
        assert_eq!(omega.periods(), 3);
        assert_relative_eq!(omega.period(1).unwrap()[[1, 1]], 0.211, epsilon = 1e-15);
        assert!(omega.period(3).is_none());
    }

    #[test]
    fn test_totals_and_summary() {
        let omega = small_tensor();
        let totals = omega.period_totals();
        assert_relative_eq!(totals[0], 0.4 + 0.02 + 0.002, epsilon = 1e-12);

        let cohorts = omega.cohort_totals(0).unwrap();
        assert_relative_eq!(cohorts[1], 0.2 + 0.02 + 0.001, epsilon = 1e-12);

        let summary = omega.summary();
        assert_eq!(summary.periods, 3);
        assert_relative_eq!(summary.max_total, totals[2], epsilon = 1e-15);
        assert_relative_eq!(summary.min_total, totals[0], epsilon = 1e-15);
    }

    #[test]
    fn test_csv_output() {
        let omega = small_tensor();
        let mut buffer = Vec::new();
        omega.write_csv_to(&mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Period,Cohort,Ability,Share");
        assert_eq!(lines.len(), 1 + 12);
        assert!(lines[12].starts_with("2,1,1,"));
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let json = serde_json::to_string(&small_tensor().summary()).unwrap();
        assert!(json.contains("\"periods\":3"));
    }
}
