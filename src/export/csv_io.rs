use std::collections::HashMap;
use std::io::{Read, Write};

use log::debug;

use crate::condition::{Condition, ConditionLabel};
use crate::identifier::{Group, SampleType};
use crate::ingest::parse_concentration;
use crate::record::MeasurementRecord;

use super::columns;
use super::{ExportError, LongTable};

fn optional_text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Write records as comma-delimited text with a header row.
///
/// Absent values become empty cells. The `O2`, `CO2` and `Condition` columns are
/// written only when `include_conditions` is set.
pub fn write_long_csv<W: Write>(
    records: &[MeasurementRecord],
    include_conditions: bool,
    writer: W,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = columns::RECORD_COLUMNS.to_vec();
    if include_conditions {
        header.extend_from_slice(&columns::CONDITION_COLUMNS);
    }
    csv_writer.write_record(&header)?;

    for record in records {
        let mut row = vec![
            record.sample_id.clone(),
            record.time.map(|t| t.to_string()).unwrap_or_default(),
            record.sample_type.as_str().to_string(),
            optional_text(record.group.as_ref().map(Group::as_str)),
            optional_text(record.sample_number.as_deref()),
            optional_text(record.sample_combo.as_deref()),
            optional_text(record.shale_id.as_deref()),
            record.experiment.clone(),
            record.element.clone(),
            record.concentration.to_string(),
        ];
        if include_conditions {
            match &record.condition {
                Some(condition) => {
                    row.push(bool_text(condition.o2).to_string());
                    row.push(bool_text(condition.co2).to_string());
                    row.push(condition.label.as_str().to_string());
                }
                None => row.extend([String::new(), String::new(), String::new()]),
            }
        }
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Read a long-form CSV export back into records.
///
/// Columns are located by name, so extra columns (such as a leading index) and
/// reordered columns are tolerated. Rows whose concentration is not numeric are
/// dropped.
pub fn read_long_csv<R: Read>(reader: R) -> Result<LongTable, ExportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let positions: HashMap<String, usize> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();

    let required = |name: &str| {
        positions
            .get(name)
            .copied()
            .ok_or_else(|| ExportError::ColumnNotFound(name.to_string()))
    };
    let sample_id_idx = required(columns::SAMPLE_ID)?;
    let element_idx = required(columns::ELEMENT)?;
    let concentration_idx = required(columns::CONCENTRATION)?;
    let optional = |name: &str| positions.get(name).copied();

    let has_conditions = columns::CONDITION_COLUMNS
        .iter()
        .all(|name| positions.contains_key(*name));

    let mut records = Vec::new();
    let mut rows_dropped = 0;

    for row in csv_reader.records() {
        let row = row?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");
        let present = |idx: Option<usize>| {
            let value = cell(idx);
            (!value.is_empty()).then(|| value.to_string())
        };

        let Some(concentration) = parse_concentration(cell(Some(concentration_idx))) else {
            rows_dropped += 1;
            continue;
        };

        let condition = if has_conditions {
            let o2 = parse_bool(cell(optional(columns::O2)));
            let co2 = parse_bool(cell(optional(columns::CO2)));
            let label = present(optional(columns::CONDITION));
            match (o2, co2, label) {
                (Some(o2), Some(co2), Some(label)) => Some(Condition {
                    o2,
                    co2,
                    label: ConditionLabel::from_label(&label),
                }),
                _ => None,
            }
        } else {
            None
        };

        records.push(MeasurementRecord {
            sample_id: cell(Some(sample_id_idx)).to_string(),
            time: cell(optional(columns::TIME))
                .parse::<f64>()
                .ok()
                .filter(|t| t.is_finite()),
            sample_type: SampleType::from_label(cell(optional(columns::SAMPLE_TYPE))),
            group: present(optional(columns::GROUP)).map(|g| Group::from_code(&g)),
            sample_number: present(optional(columns::SAMPLE_NUMBER)),
            sample_combo: present(optional(columns::SAMPLE_COMBO)),
            shale_id: present(optional(columns::SHALE_ID)),
            experiment: cell(optional(columns::EXPERIMENT)).to_string(),
            element: cell(Some(element_idx)).to_string(),
            concentration,
            condition,
        });
    }

    if rows_dropped > 0 {
        debug!("dropped {} rows without a numeric concentration", rows_dropped);
    }

    Ok(LongTable {
        records,
        has_conditions,
        rows_dropped,
    })
}
