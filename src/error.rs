use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalesInsightError {
    #[error("CSV schema mismatch: missing required column(s) {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Data file not found: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("No sales rows found for product: {0}")]
    EmptySelection(String),

    #[error("Invalid record on line {line}: {details}")]
    InvalidRecord { line: u64, details: String },

    #[error("Unrecognized month label '{0}'")]
    InvalidMonth(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SalesInsightError>;
