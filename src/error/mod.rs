//! Error handling for the preparation pipeline.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

use crate::schema::SchemaReport;

/// Errors that can abort a pipeline run
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    /// Error opening, reading or writing a file
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error reading, converting or writing Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// A column needed by an operation is absent
    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    /// A table needed by an operation was never loaded
    #[error("Table '{0}' is not loaded")]
    MissingTable(String),

    /// Schema validation failed after loading
    #[error("Schema validation failed: {0}")]
    Schema(SchemaReport),

    /// A configuration value cannot be used
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Profile report generation failed
    #[error("Report error: {0}")]
    Report(String),

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(String),
}

impl PrepError {
    /// Wrap an IO error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(table: &str, column: &str) -> Self {
        Self::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PrepError>;
