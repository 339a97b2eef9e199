//! Population counts by single year of age for four consecutive observation years

use crate::error::{DemographicsError, Result};

/// Number of consecutive observation years held by a population table
pub const OBSERVATION_YEARS: usize = 4;

/// Population counts by single year of age
///
/// Row `i` holds the counts for age `first_age + i`, one column per
/// observation year. Ages are contiguous by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationTable {
    first_age: u32,
    years: [i32; OBSERVATION_YEARS],
    counts: Vec<[u64; OBSERVATION_YEARS]>,
}

/// One observation year's population expressed as shares of that year's total
#[derive(Debug, Clone, PartialEq)]
pub struct AgeDistribution {
    first_age: u32,
    shares: Vec<f64>,
}

impl PopulationTable {
    /// Build a table whose first row is `first_age`
    pub fn new(
        first_age: u32,
        years: [i32; OBSERVATION_YEARS],
        counts: Vec<[u64; OBSERVATION_YEARS]>,
    ) -> Result<Self> {
        if counts.is_empty() {
            return Err(DemographicsError::EmptyTable("population"));
        }
        Ok(Self {
            first_age,
            years,
            counts,
        })
    }

    pub fn first_age(&self) -> u32 {
        self.first_age
    }

    pub fn last_age(&self) -> u32 {
        self.first_age + self.counts.len() as u32 - 1
    }

    /// Calendar labels of the observation years (e.g. 2010..=2013)
    pub fn years(&self) -> [i32; OBSERVATION_YEARS] {
        self.years
    }

    /// Population count at `age` in observation year `year` (0-based)
    pub fn count(&self, age: u32, year: usize) -> Option<u64> {
        if year >= OBSERVATION_YEARS || age < self.first_age {
            return None;
        }
        self.counts
            .get((age - self.first_age) as usize)
            .map(|row| row[year])
    }

    /// Fail unless every age in `first..=last` has a row
    pub fn require_ages(&self, first: u32, last: u32) -> Result<()> {
        if self.first_age > first || self.last_age() < last {
            return Err(DemographicsError::InsufficientAgeCoverage {
                table: "population",
                first: self.first_age,
                last: self.last_age(),
                required_first: first,
                required_last: last,
            });
        }
        Ok(())
    }

    /// Counts for the ages `first..=last` in observation year `year`, as floats
    pub fn counts_for_ages(&self, year: usize, first: u32, last: u32) -> Result<Vec<f64>> {
        if year >= OBSERVATION_YEARS {
            return Err(DemographicsError::UnknownYear(year));
        }
        self.require_ages(first, last)?;
        Ok((first..=last)
            .filter_map(|age| self.count(age, year))
            .map(|count| count as f64)
            .collect())
    }

    /// Total population over every age in the table for one observation year
    pub fn total(&self, year: usize) -> Result<f64> {
        if year >= OBSERVATION_YEARS {
            return Err(DemographicsError::UnknownYear(year));
        }
        Ok(self.counts.iter().map(|row| row[year] as f64).sum())
    }

    /// Shares of the full-range total for one observation year
    ///
    /// Returns a new distribution; the table itself is never modified.
    pub fn normalized(&self, year: usize) -> Result<AgeDistribution> {
        let total = self.total(year)?;
        let shares = self
            .counts
            .iter()
            .map(|row| {
                if total > 0.0 {
                    row[year] as f64 / total
                } else {
                    0.0
                }
            })
            .collect();
        Ok(AgeDistribution {
            first_age: self.first_age,
            shares,
        })
    }
}

impl AgeDistribution {
    pub fn shares(&self) -> &[f64] {
        &self.shares
    }

    /// Share of the population at a single age
    pub fn share(&self, age: u32) -> f64 {
        if age < self.first_age {
            return 0.0;
        }
        self.shares
            .get((age - self.first_age) as usize)
            .copied()
            .unwrap_or(0.0)
    }

    /// Sum of shares over ages `a` with `lower <= a < upper`
    pub fn sum_between(&self, lower: f64, upper: f64) -> f64 {
        self.shares
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let age = (self.first_age + *i as u32) as f64;
                lower <= age && age < upper
            })
            .map(|(_, share)| share)
            .sum()
    }
}
