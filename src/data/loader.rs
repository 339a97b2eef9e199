//! CSV-based table loader
//!
//! Loads the population and mortality tables from CSV files in data/demographic/

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{Reader, StringRecord};

use super::mortality::MortalityCurve;
use super::population::{PopulationTable, OBSERVATION_YEARS};
use crate::error::{DemographicsError, Result};

/// Default path to the demographic data directory
///
/// The bundled tables are synthetic: smooth population counts and a
/// Gompertz-Makeham mortality curve laid out like the Census and SSA
/// extracts. Point the loader at another directory for real data.
pub const DEFAULT_DATA_PATH: &str = "data/demographic";

/// Population counts by single year of age: `Age,<year>,<year>,<year>,<year>`
pub const POPULATION_FILE: &str = "demographic_data.csv";

/// Per-sex one-year death probabilities: `age,prob_live_next_male,prob_live_next_female`
pub const MORTALITY_FILE: &str = "mortality_rates.csv";

/// Raw CSV row matching mortality_rates.csv columns
///
/// The `prob_live_next_*` columns hold death probabilities despite their names.
#[derive(Debug, serde::Deserialize)]
struct MortalityRow {
    age: u32,
    prob_live_next_male: f64,
    prob_live_next_female: f64,
}

/// Load the population table from `path/demographic_data.csv`
pub fn load_population(path: &Path) -> Result<PopulationTable> {
    let file = File::open(path.join(POPULATION_FILE))?;
    read_population(file)
}

/// Load the mortality curve from `path/mortality_rates.csv`
pub fn load_mortality(path: &Path) -> Result<MortalityCurve> {
    let file = File::open(path.join(MORTALITY_FILE))?;
    read_mortality(file)
}

/// Parse a population table from any CSV source
pub fn read_population<R: Read>(source: R) -> Result<PopulationTable> {
    let mut reader = Reader::from_reader(source);

    let headers = reader.headers()?.clone();
    if headers.len() != OBSERVATION_YEARS + 1 {
        return Err(DemographicsError::ColumnCount {
            table: "population",
            expected: OBSERVATION_YEARS + 1,
            found: headers.len(),
        });
    }
    let mut years = [0i32; OBSERVATION_YEARS];
    for (slot, label) in years.iter_mut().zip(headers.iter().skip(1)) {
        *slot = label.trim().parse().map_err(|_| DemographicsError::Parse {
            field: "year".to_string(),
            value: label.to_string(),
            line: 1,
        })?;
    }

    let mut first_age = None;
    let mut counts = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = line_of(&record);
        let age = parse_age(&record[0], line)?;

        match first_age {
            None => first_age = Some(age),
            Some(first) => {
                let expected = first + counts.len() as u32;
                if age != expected {
                    return Err(DemographicsError::NonContiguousAges {
                        table: "population",
                        expected,
                        found: age,
                    });
                }
            }
        }

        let mut row = [0u64; OBSERVATION_YEARS];
        for (year, slot) in row.iter_mut().enumerate() {
            *slot = parse_count(&record[year + 1], line)?;
        }
        counts.push(row);
    }

    let table = PopulationTable::new(first_age.unwrap_or(0), years, counts)?;
    log::info!(
        "Loaded population table: ages {}..={}, years {:?}",
        table.first_age(),
        table.last_age(),
        table.years()
    );
    Ok(table)
}

/// Parse a mortality curve from any CSV source
pub fn read_mortality<R: Read>(source: R) -> Result<MortalityCurve> {
    let mut reader = Reader::from_reader(source);

    let mut first_age = None;
    let mut male = Vec::new();
    let mut female = Vec::new();

    for result in reader.deserialize() {
        let row: MortalityRow = result?;
        match first_age {
            None => first_age = Some(row.age),
            Some(first) => {
                let expected = first + male.len() as u32;
                if row.age != expected {
                    return Err(DemographicsError::NonContiguousAges {
                        table: "mortality",
                        expected,
                        found: row.age,
                    });
                }
            }
        }
        male.push(row.prob_live_next_male);
        female.push(row.prob_live_next_female);
    }

    let curve = MortalityCurve::from_death_probabilities(first_age.unwrap_or(0), &male, &female)?;
    log::info!(
        "Loaded mortality table: ages {}..={}",
        curve.first_age(),
        curve.last_age()
    );
    Ok(curve)
}

/// Parse a population count, dropping thousands separators ("4,079,669")
pub fn parse_count(raw: &str, line: u64) -> Result<u64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    cleaned.parse().map_err(|_| DemographicsError::Parse {
        field: "population count".to_string(),
        value: raw.to_string(),
        line,
    })
}

/// Parse an age label; a trailing '+' on the open-ended last age is ignored
fn parse_age(raw: &str, line: u64) -> Result<u32> {
    raw.trim()
        .trim_end_matches('+')
        .parse()
        .map_err(|_| DemographicsError::Parse {
            field: "age".to_string(),
            value: raw.to_string(),
            line,
        })
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_tables() {
        let path = Path::new(DEFAULT_DATA_PATH);

        let population = load_population(path);
        assert!(population.is_ok(), "Failed to load population: {:?}", population.err());
        let population = population.unwrap();
        assert_eq!(population.first_age(), 0);
        assert!(population.last_age() >= 76);
        assert_eq!(population.years(), [2010, 2011, 2012, 2013]);
        assert!(population.count(30, 0).unwrap() > 1_000_000);

        let mortality = load_mortality(path);
        assert!(mortality.is_ok(), "Failed to load mortality: {:?}", mortality.err());
        let mortality = mortality.unwrap();
        assert!(mortality.last_age() >= 100);
        let survival_at_40 = mortality.survival_at(40).unwrap();
        assert!(survival_at_40 > 0.99 && survival_at_40 < 1.0);
    }

    #[test]
    fn test_thousands_separators_removed() {
        assert_eq!(parse_count("4,079,669", 2).unwrap(), 4_079_669);
        assert_eq!(parse_count(" 812 ", 2).unwrap(), 812);
        assert!(matches!(
            parse_count("n/a", 7),
            Err(DemographicsError::Parse { line: 7, .. })
        ));
    }

    #[test]
    fn test_read_population_from_csv() {
        let csv = "Age,2010,2011,2012,2013\n\
                   0,\"1,000\",\"1,010\",\"1,020\",\"1,030\"\n\
                   1,990,\"1,000\",\"1,005\",\"1,015\"\n\
                   2+,50,60,70,80\n";
        let table = read_population(csv.as_bytes()).unwrap();
        assert_eq!(table.last_age(), 2);
        assert_eq!(table.count(0, 3), Some(1030));
        assert_eq!(table.count(1, 1), Some(1000));
        assert_eq!(table.count(2, 0), Some(50));
    }

    #[test]
    fn test_gap_in_ages_rejected() {
        let csv = "Age,2010,2011,2012,2013\n0,1,1,1,1\n2,1,1,1,1\n";
        assert!(matches!(
            read_population(csv.as_bytes()),
            Err(DemographicsError::NonContiguousAges { expected: 1, found: 2, .. })
        ));

        let csv = "age,prob_live_next_male,prob_live_next_female\n0,0.01,0.01\n1,0.001,0.001\n3,0.001,0.001\n";
        assert!(matches!(
            read_mortality(csv.as_bytes()),
            Err(DemographicsError::NonContiguousAges { table: "mortality", .. })
        ));
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let csv = "Age,2010,2011\n0,1,1\n";
        assert!(matches!(
            read_population(csv.as_bytes()),
            Err(DemographicsError::ColumnCount { expected: 5, found: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_population(dir.path()),
            Err(DemographicsError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_mortality_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MORTALITY_FILE),
            "age,prob_live_next_male,prob_live_next_female\n0,abc,0.01\n",
        )
        .unwrap();
        assert!(matches!(
            load_mortality(dir.path()),
            Err(DemographicsError::Csv(_))
        ));
    }
}
