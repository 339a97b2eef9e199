//! Births by age of mother
//!
//! Source: Births and birth rates, by age of mother, US, 2012 (National Vital
//! Statistics Reports, CDC). Rates are published per 1000 women in five-year
//! age groups and are stored here per woman, keyed by group midpoint.

/// Group midpoints paired with the published rates
const US_2012_MIDPOINTS: [f64; 10] = [12.0, 17.0, 16.0, 18.5, 22.0, 27.0, 32.0, 37.0, 42.0, 49.5];

/// Births per 1000 women
const US_2012_RATES_PER_THOUSAND: [f64; 10] =
    [0.3, 26.6, 12.3, 47.3, 81.2, 106.2, 98.7, 49.6, 10.5, 0.8];

/// Discrete (age-midpoint, births-per-woman) pairs
#[derive(Debug, Clone, PartialEq)]
pub struct FertilityTable {
    midpoints: Vec<f64>,
    rates: Vec<f64>,
}

impl FertilityTable {
    /// The embedded US 2012 table
    pub fn us_2012() -> Self {
        Self::from_per_thousand(&US_2012_MIDPOINTS, &US_2012_RATES_PER_THOUSAND)
    }

    /// Build from rates quoted per 1000 women
    pub fn from_per_thousand(midpoints: &[f64], rates_per_thousand: &[f64]) -> Self {
        Self {
            midpoints: midpoints.to_vec(),
            rates: rates_per_thousand.iter().map(|r| r / 1000.0).collect(),
        }
    }

    pub fn midpoints(&self) -> &[f64] {
        &self.midpoints
    }

    /// Births per woman per year
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}

impl Default for FertilityTable {
    fn default() -> Self {
        Self::us_2012()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_us_2012_rates_are_per_woman() {
        let table = FertilityTable::us_2012();
        assert_eq!(table.midpoints().len(), 10);
        assert_eq!(table.rates().len(), 10);
        assert_relative_eq!(table.rates()[5], 0.1062, epsilon = 1e-12);
        assert_relative_eq!(table.midpoints()[9], 49.5, epsilon = 1e-12);
    }
}
