//! Input tables: population counts, mortality, and fertility

mod fertility;
mod mortality;
mod population;
pub mod loader;

pub use fertility::FertilityTable;
pub use mortality::{MortalityCurve, CHILD_AGES};
pub use population::{AgeDistribution, PopulationTable, OBSERVATION_YEARS};

use std::path::Path;

use crate::error::Result;

/// Oldest single year of age the rate models and projector read from the tables
pub const REQUIRED_LAST_AGE: u32 = 76;

/// Immutable bundle of every input table
///
/// Loaded once and passed by reference into each rate model and projection.
#[derive(Debug, Clone)]
pub struct DemographicData {
    pub population: PopulationTable,
    pub mortality: MortalityCurve,
    pub fertility: FertilityTable,
}

impl DemographicData {
    /// Bundle already-built tables, checking they cover ages 0..=76
    pub fn new(
        population: PopulationTable,
        mortality: MortalityCurve,
        fertility: FertilityTable,
    ) -> Result<Self> {
        population.require_ages(0, REQUIRED_LAST_AGE)?;
        mortality.require_ages(0, REQUIRED_LAST_AGE)?;
        Ok(Self {
            population,
            mortality,
            fertility,
        })
    }

    /// Load tables from CSV files in the default location (data/demographic/)
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(loader::DEFAULT_DATA_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::new(
            loader::load_population(path)?,
            loader::load_mortality(path)?,
            FertilityTable::us_2012(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DemographicsError;

    #[test]
    fn test_load_default_data() {
        let data = DemographicData::load_default();
        assert!(data.is_ok(), "Failed to load data: {:?}", data.err());
    }

    #[test]
    fn test_short_tables_fail_fast() {
        let population =
            PopulationTable::new(0, [2010, 2011, 2012, 2013], vec![[100, 100, 100, 100]; 50]).unwrap();
        let mortality = MortalityCurve::from_survival(0, vec![0.99; 101]).unwrap();

        let result = DemographicData::new(population, mortality, FertilityTable::us_2012());
        assert!(matches!(
            result,
            Err(DemographicsError::InsufficientAgeCoverage {
                table: "population",
                last: 49,
                ..
            })
        ));
    }
}
