//! One-year survival probabilities by single year of age, averaged across sexes

use ndarray::Array1;

use crate::error::{DemographicsError, Result};

/// Number of pre-adult single-year ages (0..=14) tracked outside the cohort system
pub const CHILD_AGES: usize = 15;

/// Sex-averaged one-year survival curve
///
/// Index `i` holds the probability that a person aged `first_age + i`
/// survives to the next birthday.
#[derive(Debug, Clone, PartialEq)]
pub struct MortalityCurve {
    first_age: u32,
    survival: Vec<f64>,
}

impl MortalityCurve {
    /// Build from per-sex one-year death probabilities
    ///
    /// Survival is `1 - (male + female) / 2`.
    pub fn from_death_probabilities(first_age: u32, male: &[f64], female: &[f64]) -> Result<Self> {
        if male.len() != female.len() {
            return Err(DemographicsError::ColumnCount {
                table: "mortality",
                expected: male.len(),
                found: female.len(),
            });
        }
        let survival = male
            .iter()
            .zip(female)
            .map(|(m, f)| 1.0 - (m + f) / 2.0)
            .collect();
        Self::from_survival(first_age, survival)
    }

    /// Build directly from survival probabilities
    pub fn from_survival(first_age: u32, survival: Vec<f64>) -> Result<Self> {
        if survival.is_empty() {
            return Err(DemographicsError::EmptyTable("mortality"));
        }
        if let Some(i) = survival.iter().position(|p| !p.is_finite()) {
            return Err(DemographicsError::NonFiniteValue {
                table: "mortality",
                age: first_age + i as u32,
            });
        }
        Ok(Self {
            first_age,
            survival,
        })
    }

    pub fn first_age(&self) -> u32 {
        self.first_age
    }

    pub fn last_age(&self) -> u32 {
        self.first_age + self.survival.len() as u32 - 1
    }

    /// Ages covered by the curve, as fit abscissae
    pub fn ages(&self) -> Vec<f64> {
        (0..self.survival.len())
            .map(|i| (self.first_age + i as u32) as f64)
            .collect()
    }

    pub fn survival(&self) -> &[f64] {
        &self.survival
    }

    pub fn survival_at(&self, age: u32) -> Option<f64> {
        if age < self.first_age {
            return None;
        }
        self.survival.get((age - self.first_age) as usize).copied()
    }

    /// Fail unless every age in `first..=last` is covered
    pub fn require_ages(&self, first: u32, last: u32) -> Result<()> {
        if self.first_age > first || self.last_age() < last {
            return Err(DemographicsError::InsufficientAgeCoverage {
                table: "mortality",
                first: self.first_age,
                last: self.last_age(),
                required_first: first,
                required_last: last,
            });
        }
        Ok(())
    }

    /// Survival for ages 0..=14, taken straight from the table without fitting
    pub fn child_survival(&self) -> Result<Array1<f64>> {
        self.require_ages(0, CHILD_AGES as u32 - 1)?;
        Ok((0..CHILD_AGES as u32)
            .filter_map(|age| self.survival_at(age))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sexes_are_averaged() {
        let curve = MortalityCurve::from_death_probabilities(0, &[0.02, 0.004], &[0.01, 0.002]).unwrap();
        assert_relative_eq!(curve.survival_at(0).unwrap(), 0.985, epsilon = 1e-12);
        assert_relative_eq!(curve.survival_at(1).unwrap(), 0.997, epsilon = 1e-12);
        assert_eq!(curve.survival_at(2), None);
        assert_eq!(curve.ages(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_child_survival_covers_fifteen_ages() {
        let survival: Vec<f64> = (0..20).map(|age| 1.0 - 0.001 * age as f64).collect();
        let curve = MortalityCurve::from_survival(0, survival).unwrap();

        let children = curve.child_survival().unwrap();
        assert_eq!(children.len(), CHILD_AGES);
        assert_relative_eq!(children[14], 0.986, epsilon = 1e-12);
    }

    #[test]
    fn test_short_table_has_no_child_survival() {
        let curve = MortalityCurve::from_survival(0, vec![0.99; 10]).unwrap();
        assert!(matches!(
            curve.child_survival(),
            Err(DemographicsError::InsufficientAgeCoverage { last: 9, .. })
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = MortalityCurve::from_survival(0, vec![0.99, f64::NAN]);
        assert!(matches!(
            result,
            Err(DemographicsError::NonFiniteValue { age: 1, .. })
        ));
    }
}
