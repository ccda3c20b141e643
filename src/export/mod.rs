//! # Long-Table Export
//!
//! The session's current records can be written as comma-delimited text or as
//! a Parquet file. Both formats share the column layout below and can be read
//! back, so an export can serve as the source of a later run.
//!
//! | Column | CSV | Parquet | Nullable |
//! |--------|-----|---------|----------|
//! | Sample_ID | text | Utf8 | no |
//! | Time | number | Float64 | yes |
//! | Sample_Type | text | Utf8 | no |
//! | Group | text | Utf8 | yes |
//! | Sample_Number | text | Utf8 | yes |
//! | Sample_Combo | text | Utf8 | yes |
//! | Shale_ID | text | Utf8 | yes |
//! | Experiment | text | Utf8 | no |
//! | Element | text | Utf8 | no |
//! | Concentration | number | Float64 | no |
//! | O2 | `True`/`False` | Boolean | yes |
//! | CO2 | `True`/`False` | Boolean | yes |
//! | Condition | text | Utf8 | yes |
//!
//! The last three columns are present only when conditions were derived.

pub mod columns;
mod csv_io;
mod error;
mod parquet_io;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::record::MeasurementRecord;

pub use csv_io::{read_long_csv, write_long_csv};
pub use parquet_io::{
    create_record_schema, read_footer_metadata, read_long_parquet, write_long_parquet,
    CompressionType, ParquetExportConfig,
};
pub use error::ExportError;

/// Records read back from an export
#[derive(Debug, Clone, Default)]
pub struct LongTable {
    /// Records in file order
    pub records: Vec<MeasurementRecord>,
    /// Whether the condition columns were present
    pub has_conditions: bool,
    /// Rows dropped because their concentration was not numeric
    pub rows_dropped: usize,
}

/// Output format of an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-delimited text
    #[default]
    Csv,
    /// Apache Parquet
    Parquet,
}

impl ExportFormat {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "parquet" | "pq" => Ok(ExportFormat::Parquet),
            _ => Err(format!("Unknown export format '{}'. Valid options: csv, parquet", s)),
        }
    }
}

/// Footer metadata for a Parquet export: format version, timestamp and the source list
pub fn export_metadata(sources_json: Option<String>) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert(
        columns::KEY_FORMAT_VERSION.to_string(),
        columns::EXPORT_FORMAT_VERSION.to_string(),
    );
    metadata.insert(
        columns::KEY_EXPORT_TIMESTAMP.to_string(),
        chrono::Utc::now().to_rfc3339(),
    );
    if let Some(json) = sources_json {
        metadata.insert(columns::KEY_SOURCES.to_string(), json);
    }
    metadata
}

/// Serialize records in the requested format
pub fn export_records(
    records: &[MeasurementRecord],
    include_conditions: bool,
    format: ExportFormat,
    metadata: &HashMap<String, String>,
) -> Result<Vec<u8>, ExportError> {
    match format {
        ExportFormat::Csv => {
            let mut buffer = Vec::new();
            write_long_csv(records, include_conditions, &mut buffer)?;
            Ok(buffer)
        }
        ExportFormat::Parquet => write_long_parquet(
            records,
            include_conditions,
            metadata,
            &ParquetExportConfig::default(),
        ),
    }
}

#[cfg(test)]
mod tests;
