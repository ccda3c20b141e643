use log::{debug, warn};

use crate::identifier::{is_blank, SampleIdentifier};
use crate::record::MeasurementRecord;

use super::element::normalize_element;
use super::WideTable;

/// Counters collected while reshaping one table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReshapeStats {
    /// Data rows in the wide table
    pub rows_read: usize,
    /// Rows skipped because the identifier names a blank
    pub blank_rows: usize,
    /// Element cells dropped because they were empty or not numeric
    pub cells_dropped: usize,
    /// Columns whose header yields no element symbol
    pub columns_skipped: usize,
    /// Long records produced
    pub records: usize,
}

/// Output of [`reshape`]
#[derive(Debug, Clone, Default)]
pub struct Reshaped {
    /// Long records in row order, then column order
    pub records: Vec<MeasurementRecord>,
    /// Counters for logging and summaries
    pub stats: ReshapeStats,
}

/// Coerce a raw cell to a concentration. Empty, non-numeric and non-finite cells yield `None`.
pub fn parse_concentration(cell: &str) -> Option<f64> {
    let value: f64 = cell.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Melt a wide table into one record per (row, element column) with a numeric cell.
///
/// Blank rows are removed before any identifier is parsed. The experiment label
/// and shale suffix are carried onto every record unchanged.
pub fn reshape(table: &WideTable, experiment: &str, shale_suffix: &str) -> Reshaped {
    let mut stats = ReshapeStats {
        rows_read: table.len(),
        ..Default::default()
    };

    let symbols: Vec<Option<String>> = table
        .element_columns
        .iter()
        .map(|column| {
            let symbol = normalize_element(column);
            if symbol.is_none() {
                warn!(
                    "[{}] column '{}' has no element symbol, skipping",
                    experiment, column
                );
            }
            symbol
        })
        .collect();
    stats.columns_skipped = symbols.iter().filter(|s| s.is_none()).count();

    let mut records = Vec::with_capacity(table.len() * symbols.len());

    for row in table.rows.iter().filter(|row| {
        let blank = is_blank(&row.identifier);
        if blank {
            debug!("[{}] skipping blank row '{}'", experiment, row.identifier);
        }
        !blank
    }) {
        let identifier = SampleIdentifier::parse(&row.identifier);

        for (cell, symbol) in row.cells.iter().zip(&symbols) {
            let Some(element) = symbol else {
                continue;
            };
            match parse_concentration(cell) {
                Some(concentration) => records.push(MeasurementRecord::from_identifier(
                    &identifier,
                    shale_suffix,
                    experiment,
                    element,
                    concentration,
                )),
                None => stats.cells_dropped += 1,
            }
        }
    }

    stats.blank_rows = table.rows.iter().filter(|r| is_blank(&r.identifier)).count();
    stats.records = records.len();

    Reshaped { records, stats }
}
