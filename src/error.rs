//! Error type shared by the loaders, rate models and projector

use thiserror::Error;

use crate::rates::polyfit::FitError;

/// Every fallible operation in the crate returns this error.
#[derive(Error, Debug)]
pub enum DemographicsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not parse {field} value '{value}' on line {line}")]
    Parse {
        field: String,
        value: String,
        line: u64,
    },

    #[error("The {table} table must have {expected} columns, found {found}")]
    ColumnCount {
        table: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("The {0} table has no rows")]
    EmptyTable(&'static str),

    #[error("Ages in the {table} table are not contiguous: expected age {expected}, found {found}")]
    NonContiguousAges {
        table: &'static str,
        expected: u32,
        found: u32,
    },

    #[error("The {table} table covers ages {first}..={last}, but ages {required_first}..={required_last} are required")]
    InsufficientAgeCoverage {
        table: &'static str,
        first: u32,
        last: u32,
        required_first: u32,
        required_last: u32,
    },

    #[error("Observation year index {0} is out of range (the population table holds 4 years)")]
    UnknownYear(usize),

    #[error("The {table} table holds a non-finite value at age {age}")]
    NonFiniteValue { table: &'static str, age: u32 },

    #[error("{name} must be at least {min}, but was {value}")]
    InvalidDimension {
        name: &'static str,
        value: usize,
        min: usize,
    },

    #[error("{cohorts} cohorts do not evenly divide the {points} single-year points")]
    UnevenCohorts { cohorts: usize, points: usize },

    #[error("Rate arrays are {found:?} but the projection needs {expected:?}")]
    RateShape {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Polynomial fit failed: {0}")]
    Fit(#[from] FitError),
}

pub type Result<T> = std::result::Result<T, DemographicsError>;
