//! Supplementary per-sample readings (pH, dissolved O2, ...)
//!
//! Field measurements are kept in a small side table keyed by the raw sample
//! identifier:
//!
//! ```text
//! Sample_ID , pH  , DO
//! 64Dt7.5   , 7.9 , 6.1
//! ```
//!
//! The table is read with the same wide reader as the instrument exports.
//! Non-numeric cells are dropped. A record whose identifier has no row simply
//! carries no readings.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::Serialize;

use crate::ingest::{parse_concentration, IngestError, WideTable};
use crate::record::MeasurementRecord;

/// One named reading of a sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Column header, e.g. `pH`
    pub name: String,
    /// Measured value
    pub value: f64,
}

/// A record paired with the auxiliary readings of its sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedRecord<'a> {
    /// The ICP record
    pub record: &'a MeasurementRecord,
    /// Readings of the same sample identifier, in column order
    pub readings: &'a [Reading],
}

impl AnnotatedRecord<'_> {
    /// Look up one reading by column name
    pub fn reading(&self, name: &str) -> Option<f64> {
        self.readings
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.value)
    }
}

/// Readings by sample identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuxiliaryTable {
    columns: Vec<String>,
    rows: HashMap<String, Vec<Reading>>,
}

impl AuxiliaryTable {
    /// Read the table from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let table = WideTable::from_csv_path(path.as_ref())?;
        let aux = Self::from_wide(table);
        info!(
            "Loaded {} auxiliary rows ({}) from {}",
            aux.len(),
            aux.columns.join(", "),
            path.as_ref().display()
        );
        Ok(aux)
    }

    /// Read the table from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        Ok(Self::from_wide(WideTable::from_reader(reader)?))
    }

    fn from_wide(table: WideTable) -> Self {
        let mut rows: HashMap<String, Vec<Reading>> = HashMap::new();

        for row in table.rows {
            let readings: Vec<Reading> = table
                .element_columns
                .iter()
                .zip(row.cells.iter())
                .filter_map(|(name, cell)| {
                    parse_concentration(cell).map(|value| Reading {
                        name: name.clone(),
                        value,
                    })
                })
                .collect();

            // a repeated identifier keeps its first row
            if rows.contains_key(&row.identifier) {
                debug!("duplicate auxiliary row for '{}' ignored", row.identifier);
                continue;
            }
            rows.insert(row.identifier, readings);
        }

        Self {
            columns: table.element_columns,
            rows,
        }
    }

    /// Reading column headers
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of sample rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Readings of one sample. Empty for identifiers not in the table.
    pub fn readings(&self, sample_id: &str) -> &[Reading] {
        self.rows.get(sample_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pair every record with the readings of its sample
    pub fn annotate<'a>(&'a self, records: &'a [MeasurementRecord]) -> Vec<AnnotatedRecord<'a>> {
        records
            .iter()
            .map(|record| AnnotatedRecord {
                record,
                readings: self.readings(&record.sample_id),
            })
            .collect()
    }
}
