/// Error types for formwork planning
use chrono::NaiveDate;
use thiserror::Error;

/// Main error type for kitting, ingestion and simulation
#[derive(Error, Debug)]
pub enum FormflowError {
    /// A wall dimension is zero, negative, NaN or infinite
    #[error("Invalid geometry: {dimension} of {value_mm} mm must be a finite positive number")]
    InvalidGeometry {
        dimension: &'static str,
        value_mm: f64,
    },

    /// An event is released on or before the day it was poured
    #[error("Invalid date range for {area_id}: release {release_date} is not after pour {pour_date}")]
    InvalidDateRange {
        area_id: String,
        pour_date: NaiveDate,
        release_date: NaiveDate,
    },

    /// A required input column or cell is absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The caller asked for a non-empty project and got none
    #[error("Project contains no pour events")]
    EmptyProject,

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two rows share the same area identifier
    #[error("Duplicate area id: {0}")]
    DuplicateAreaId(String),

    /// Date parsing failed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// A numeric cell did not parse
    #[error("Invalid number in {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Failed to read or write CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to parse a JSON configuration file
    #[error("Failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using FormflowError
pub type Result<T> = std::result::Result<T, FormflowError>;
