//! In-memory demographic tables for unit tests
//!
//! Mortality follows a Gompertz-Makeham curve; the population is a smooth
//! age profile aged forward three years with that mortality plus a small
//! migration bump around age 27.

use crate::data::{DemographicData, FertilityTable, MortalityCurve, PopulationTable, OBSERVATION_YEARS};

const OLDEST_AGE: usize = 100;

fn death_probability(age: usize) -> f64 {
    if age == 0 {
        return 0.0062;
    }
    (0.00018 + 0.000025 * (0.092 * age as f64).exp()).min(1.0)
}

fn initial_population(age: usize) -> f64 {
    let a = age as f64;
    if age < 60 {
        4.0e6 + 8000.0 * (a / 7.0).sin() - 3000.0 * a
    } else {
        (4.0e6 - 180_000.0) * (-0.045 * (a - 60.0).powf(1.15)).exp()
    }
}

pub fn synthetic_population() -> PopulationTable {
    let mut years: Vec<Vec<f64>> = vec![(0..=OLDEST_AGE).map(initial_population).collect()];
    for _ in 1..OBSERVATION_YEARS {
        let prev = &years[years.len() - 1];
        let mut next = vec![prev[0] * 1.001];
        for age in 1..=OLDEST_AGE {
            let migration = 1.0 + 0.004 * (-((age as f64 - 27.0) / 9.0).powi(2)).exp();
            next.push(prev[age - 1] * (1.0 - death_probability(age - 1)) * migration);
        }
        years.push(next);
    }

    let counts = (0..=OLDEST_AGE)
        .map(|age| {
            let mut row = [0u64; OBSERVATION_YEARS];
            for (year, slot) in row.iter_mut().enumerate() {
                *slot = years[year][age].round() as u64;
            }
            row
        })
        .collect();
    PopulationTable::new(0, [2010, 2011, 2012, 2013], counts).unwrap()
}

pub fn synthetic_mortality() -> MortalityCurve {
    let male: Vec<f64> = (0..120).map(|age| (death_probability(age) * 1.2).min(1.0)).collect();
    let female: Vec<f64> = (0..120).map(|age| death_probability(age) * 0.8).collect();
    MortalityCurve::from_death_probabilities(0, &male, &female).unwrap()
}

pub fn synthetic_data() -> DemographicData {
    DemographicData::new(
        synthetic_population(),
        synthetic_mortality(),
        FertilityTable::us_2012(),
    )
    .unwrap()
}
