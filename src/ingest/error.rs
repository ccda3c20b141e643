/// Errors that can occur while reading an instrument table
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error reading the table
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// The table has no header row, so there is no identifier column
    #[error("Missing identifier column (empty header row)")]
    MissingIdentifierColumn,
}
