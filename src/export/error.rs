/// Errors that can occur while writing or reading a long-form export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// JSON serialization error for footer metadata
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A required column is missing from an export being read back
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A column has an unexpected type
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
