use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::ingest::ReshapeStats;
use crate::normalize::ScaleMode;

use super::SourceFormat;

/// Counters for one loaded source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceStats {
    /// Experiment label
    pub label: String,
    /// Path the source was read from
    pub path: PathBuf,
    /// File layout
    pub format: SourceFormat,
    /// Scale applied
    pub scale: ScaleMode,
    /// Data rows read
    pub rows_read: usize,
    /// Blank rows skipped
    pub blank_rows: usize,
    /// Cells (or long rows) dropped for a non-numeric concentration
    pub cells_dropped: usize,
    /// Columns without an element symbol
    pub columns_skipped: usize,
    /// Records contributed to the baseline
    pub records: usize,
}

impl SourceStats {
    pub(super) fn from_reshape(
        label: &str,
        path: PathBuf,
        format: SourceFormat,
        scale: ScaleMode,
        reshape: ReshapeStats,
    ) -> Self {
        Self {
            label: label.to_string(),
            path,
            format,
            scale,
            rows_read: reshape.rows_read,
            blank_rows: reshape.blank_rows,
            cells_dropped: reshape.cells_dropped,
            columns_skipped: reshape.columns_skipped,
            records: reshape.records,
        }
    }
}

impl fmt::Display for SourceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}): {} rows, {} blanks, {} dropped cells -> {} records",
            self.label,
            self.format,
            self.scale,
            self.rows_read,
            self.blank_rows,
            self.cells_dropped,
            self.records
        )
    }
}

/// Statistics from building a baseline
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadStats {
    /// One entry per source, in load order
    pub sources: Vec<SourceStats>,
}

impl LoadStats {
    /// Total records across all sources
    pub fn total_records(&self) -> usize {
        self.sources.iter().map(|s| s.records).sum()
    }

    /// Total dropped cells across all sources
    pub fn total_dropped(&self) -> usize {
        self.sources.iter().map(|s| s.cells_dropped).sum()
    }
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Baseline: {} sources, {} records, {} dropped cells",
            self.sources.len(),
            self.total_records(),
            self.total_dropped()
        )
    }
}
