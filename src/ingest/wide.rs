use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::IngestError;

/// One row of an instrument export: the identifier plus one raw cell per element column
#[derive(Debug, Clone, PartialEq)]
pub struct WideRow {
    /// Value of the first column
    pub identifier: String,
    /// Remaining cells, aligned with [`WideTable::element_columns`]
    pub cells: Vec<String>,
}

/// A wide instrument table: one row per sample, one column per analyte
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    /// Header of the identifier column as found in the file
    pub identifier_column: String,
    /// Headers of every other column
    pub element_columns: Vec<String>,
    /// Data rows in file order
    pub rows: Vec<WideRow>,
}

impl WideTable {
    /// Read a comma-delimited table from disk
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Read a comma-delimited table from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let (identifier_column, element_columns) = match headers.split_first() {
            Some((first, rest)) => (first.clone(), rest.to_vec()),
            None => return Err(IngestError::MissingIdentifierColumn),
        };

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut fields = record.iter();
            let identifier = match fields.next() {
                Some(value) => value.to_string(),
                None => continue,
            };

            // Short rows are padded so that cells stay aligned with the headers
            let mut cells: Vec<String> = fields
                .take(element_columns.len())
                .map(|v| v.to_string())
                .collect();
            cells.resize(element_columns.len(), String::new());

            rows.push(WideRow { identifier, cells });
        }

        Ok(Self {
            identifier_column,
            element_columns,
            rows,
        })
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
