use std::path::PathBuf;
use thiserror::Error;

use crate::models::{Bound, Field};

pub type Result<T> = std::result::Result<T, ExplorerError>;

#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to load {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no header row", path.display())]
    MissingHeader { path: PathBuf },

    #[error(
        "Malformed row {row} in {}: expected {expected} columns, found {found}",
        path.display()
    )]
    MalformedRow {
        path: PathBuf,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{field} {bound} bound {value} is outside the valid range {domain}")]
    RangeOutOfDomain {
        field: Field,
        bound: Bound,
        value: String,
        domain: String,
    },

    #[error("Invalid range input: {0}")]
    InvalidRange(String),

    #[error("No records left after the {stage} stage")]
    EmptySelection { stage: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Input closed by user")]
    Cancelled,
}
