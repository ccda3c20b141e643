use std::collections::HashMap;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, BooleanArray, BooleanBuilder, Float64Array, Float64Builder, StringArray,
    StringBuilder,
};
use arrow::datatypes::{DataType, Field, Schema, SchemaBuilder};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use log::debug;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::{EnabledStatistics, WriterProperties};
use parquet::format::KeyValue;
use parquet::schema::types::ColumnPath;

use crate::condition::{Condition, ConditionLabel};
use crate::identifier::{Group, SampleType};
use crate::record::MeasurementRecord;

use super::columns;
use super::{ExportError, LongTable};

/// Compression options for Parquet exports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// ZSTD compression
    Zstd(i32),
    /// Snappy compression
    Snappy,
    /// No compression
    Uncompressed,
}

impl Default for CompressionType {
    fn default() -> Self {
        Self::Zstd(3)
    }
}

/// Configuration for Parquet exports
#[derive(Debug, Clone)]
pub struct ParquetExportConfig {
    /// Compression codec
    pub compression: CompressionType,
    /// Rows per row group
    pub row_group_size: usize,
    /// Whether to write column statistics
    pub write_statistics: bool,
}

impl Default for ParquetExportConfig {
    fn default() -> Self {
        Self {
            compression: CompressionType::default(),
            row_group_size: 100_000,
            write_statistics: true,
        }
    }
}

impl ParquetExportConfig {
    fn to_writer_properties(&self, metadata: &HashMap<String, String>) -> WriterProperties {
        let compression = match self.compression {
            CompressionType::Zstd(level) => {
                Compression::ZSTD(ZstdLevel::try_new(level).unwrap_or_default())
            }
            CompressionType::Snappy => Compression::SNAPPY,
            CompressionType::Uncompressed => Compression::UNCOMPRESSED,
        };

        let statistics = if self.write_statistics {
            EnabledStatistics::Chunk
        } else {
            EnabledStatistics::None
        };

        let mut builder = WriterProperties::builder()
            .set_compression(compression)
            .set_statistics_enabled(statistics)
            .set_max_row_group_size(self.row_group_size);

        // Sample metadata repeats for every element of a sample
        let dict_columns = [
            columns::SAMPLE_ID,
            columns::SAMPLE_TYPE,
            columns::GROUP,
            columns::SAMPLE_NUMBER,
            columns::SAMPLE_COMBO,
            columns::SHALE_ID,
            columns::EXPERIMENT,
            columns::ELEMENT,
            columns::CONDITION,
        ];
        for col in dict_columns {
            builder = builder
                .set_column_dictionary_enabled(ColumnPath::new(vec![col.to_string()]), true);
        }
        builder = builder.set_column_dictionary_enabled(
            ColumnPath::new(vec![columns::CONCENTRATION.to_string()]),
            false,
        );

        let kv_metadata: Vec<KeyValue> = metadata
            .iter()
            .map(|(k, v)| KeyValue {
                key: k.clone(),
                value: Some(v.clone()),
            })
            .collect();

        builder.set_key_value_metadata(Some(kv_metadata)).build()
    }
}

/// Creates a Field carrying a human-readable description
fn field_with_description(
    name: &str,
    data_type: DataType,
    nullable: bool,
    description: &str,
) -> Field {
    let mut metadata = HashMap::new();
    metadata.insert("description".to_string(), description.to_string());
    Field::new(name, data_type, nullable).with_metadata(metadata)
}

/// Arrow schema of the long measurement table
pub fn create_record_schema(include_conditions: bool) -> Schema {
    let mut builder = SchemaBuilder::new();

    builder.push(field_with_description(
        columns::SAMPLE_ID,
        DataType::Utf8,
        false,
        "raw sample identifier",
    ));
    builder.push(field_with_description(
        columns::TIME,
        DataType::Float64,
        true,
        "incubation time (days)",
    ));
    builder.push(field_with_description(
        columns::SAMPLE_TYPE,
        DataType::Utf8,
        false,
        "Disk, Dust or Unknown",
    ));
    builder.push(field_with_description(
        columns::GROUP,
        DataType::Utf8,
        true,
        "treatment group",
    ));
    builder.push(field_with_description(
        columns::SAMPLE_NUMBER,
        DataType::Utf8,
        true,
        "two-digit sample number",
    ));
    builder.push(field_with_description(
        columns::SAMPLE_COMBO,
        DataType::Utf8,
        true,
        "sample number + group",
    ));
    builder.push(field_with_description(
        columns::SHALE_ID,
        DataType::Utf8,
        true,
        "shale specimen / batch",
    ));
    builder.push(field_with_description(
        columns::EXPERIMENT,
        DataType::Utf8,
        false,
        "source batch label",
    ));
    builder.push(field_with_description(
        columns::ELEMENT,
        DataType::Utf8,
        false,
        "element symbol",
    ));
    builder.push(field_with_description(
        columns::CONCENTRATION,
        DataType::Float64,
        false,
        "concentration",
    ));

    if include_conditions {
        builder.push(field_with_description(
            columns::O2,
            DataType::Boolean,
            true,
            "O2 present",
        ));
        builder.push(field_with_description(
            columns::CO2,
            DataType::Boolean,
            true,
            "CO2 present",
        ));
        builder.push(field_with_description(
            columns::CONDITION,
            DataType::Utf8,
            true,
            "exposure condition",
        ));
    }

    builder.finish()
}

fn records_to_batch(
    records: &[MeasurementRecord],
    include_conditions: bool,
    schema: Arc<Schema>,
) -> Result<RecordBatch, ExportError> {
    let len = records.len();
    let mut sample_id = StringBuilder::with_capacity(len, len * 16);
    let mut time = Float64Builder::with_capacity(len);
    let mut sample_type = StringBuilder::with_capacity(len, len * 4);
    let mut group = StringBuilder::with_capacity(len, len);
    let mut sample_number = StringBuilder::with_capacity(len, len * 2);
    let mut sample_combo = StringBuilder::with_capacity(len, len * 3);
    let mut shale_id = StringBuilder::with_capacity(len, len * 4);
    let mut experiment = StringBuilder::with_capacity(len, len * 4);
    let mut element = StringBuilder::with_capacity(len, len * 2);
    let mut concentration = Float64Builder::with_capacity(len);
    let mut o2 = BooleanBuilder::with_capacity(len);
    let mut co2 = BooleanBuilder::with_capacity(len);
    let mut condition = StringBuilder::with_capacity(len, len * 4);

    for record in records {
        sample_id.append_value(&record.sample_id);
        time.append_option(record.time);
        sample_type.append_value(record.sample_type.as_str());
        group.append_option(record.group.as_ref().map(Group::as_str));
        sample_number.append_option(record.sample_number.as_deref());
        sample_combo.append_option(record.sample_combo.as_deref());
        shale_id.append_option(record.shale_id.as_deref());
        experiment.append_value(&record.experiment);
        element.append_value(&record.element);
        concentration.append_value(record.concentration);
        if include_conditions {
            o2.append_option(record.condition.map(|c| c.o2));
            co2.append_option(record.condition.map(|c| c.co2));
            condition.append_option(record.condition.map(|c| c.label.as_str()));
        }
    }

    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(sample_id.finish()),
        Arc::new(time.finish()),
        Arc::new(sample_type.finish()),
        Arc::new(group.finish()),
        Arc::new(sample_number.finish()),
        Arc::new(sample_combo.finish()),
        Arc::new(shale_id.finish()),
        Arc::new(experiment.finish()),
        Arc::new(element.finish()),
        Arc::new(concentration.finish()),
    ];
    if include_conditions {
        arrays.push(Arc::new(o2.finish()));
        arrays.push(Arc::new(co2.finish()));
        arrays.push(Arc::new(condition.finish()));
    }

    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Write records to an in-memory Parquet file with the given footer metadata
pub fn write_long_parquet(
    records: &[MeasurementRecord],
    include_conditions: bool,
    metadata: &HashMap<String, String>,
    config: &ParquetExportConfig,
) -> Result<Vec<u8>, ExportError> {
    let schema = Arc::new(create_record_schema(include_conditions));
    let props = config.to_writer_properties(metadata);
    let mut writer = ArrowWriter::try_new(Vec::new(), schema.clone(), Some(props))?;

    if !records.is_empty() {
        let batch = records_to_batch(records, include_conditions, schema)?;
        writer.write(&batch)?;
    }

    Ok(writer.into_inner()?)
}

fn get_string_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a StringArray, ExportError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ExportError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| ExportError::InvalidFormat(format!("{} is not Utf8", name)))
}

fn get_float64_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a Float64Array, ExportError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ExportError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| ExportError::InvalidFormat(format!("{} is not Float64", name)))
}

fn get_boolean_column<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a BooleanArray, ExportError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| ExportError::ColumnNotFound(name.to_string()))?
        .as_any()
        .downcast_ref::<BooleanArray>()
        .ok_or_else(|| ExportError::InvalidFormat(format!("{} is not Boolean", name)))
}

fn string_at(array: &StringArray, idx: usize) -> Option<String> {
    (!array.is_null(idx)).then(|| array.value(idx).to_string())
}

/// Append the rows of one batch. Returns the number of rows dropped because a
/// required cell was null or the concentration was not finite.
fn batch_to_records(
    batch: &RecordBatch,
    has_conditions: bool,
    records: &mut Vec<MeasurementRecord>,
) -> Result<usize, ExportError> {
    let sample_id = get_string_column(batch, columns::SAMPLE_ID)?;
    let time = get_float64_column(batch, columns::TIME)?;
    let sample_type = get_string_column(batch, columns::SAMPLE_TYPE)?;
    let group = get_string_column(batch, columns::GROUP)?;
    let sample_number = get_string_column(batch, columns::SAMPLE_NUMBER)?;
    let sample_combo = get_string_column(batch, columns::SAMPLE_COMBO)?;
    let shale_id = get_string_column(batch, columns::SHALE_ID)?;
    let experiment = get_string_column(batch, columns::EXPERIMENT)?;
    let element = get_string_column(batch, columns::ELEMENT)?;
    let concentration = get_float64_column(batch, columns::CONCENTRATION)?;

    let conditions = if has_conditions {
        Some((
            get_boolean_column(batch, columns::O2)?,
            get_boolean_column(batch, columns::CO2)?,
            get_string_column(batch, columns::CONDITION)?,
        ))
    } else {
        None
    };

    let mut dropped = 0;
    for i in 0..batch.num_rows() {
        let required_null = [sample_id, sample_type, experiment, element]
            .iter()
            .any(|column| column.is_null(i));
        if required_null || concentration.is_null(i) || !concentration.value(i).is_finite() {
            dropped += 1;
            continue;
        }

        let condition = conditions.and_then(|(o2, co2, label)| {
            if o2.is_null(i) || co2.is_null(i) || label.is_null(i) {
                return None;
            }
            Some(Condition {
                o2: o2.value(i),
                co2: co2.value(i),
                label: ConditionLabel::from_label(label.value(i)),
            })
        });

        records.push(MeasurementRecord {
            sample_id: sample_id.value(i).to_string(),
            time: (!time.is_null(i)).then(|| time.value(i)),
            sample_type: SampleType::from_label(sample_type.value(i)),
            group: string_at(group, i).map(|g| Group::from_code(&g)),
            sample_number: string_at(sample_number, i),
            sample_combo: string_at(sample_combo, i),
            shale_id: string_at(shale_id, i),
            experiment: experiment.value(i).to_string(),
            element: element.value(i).to_string(),
            concentration: concentration.value(i),
            condition,
        });
    }

    Ok(dropped)
}

/// Read a Parquet export back into records
pub fn read_long_parquet(data: Bytes) -> Result<LongTable, ExportError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(data)?;
    let has_conditions = columns::CONDITION_COLUMNS
        .iter()
        .all(|name| builder.schema().field_with_name(name).is_ok());
    let reader = builder.build()?;

    let mut records = Vec::new();
    let mut rows_dropped = 0;
    for batch in reader {
        rows_dropped += batch_to_records(&batch?, has_conditions, &mut records)?;
    }

    if rows_dropped > 0 {
        debug!("dropped {} rows with a null or non-finite required cell", rows_dropped);
    }

    Ok(LongTable {
        records,
        has_conditions,
        rows_dropped,
    })
}

/// Footer metadata of a Parquet export
pub fn read_footer_metadata(data: Bytes) -> Result<HashMap<String, String>, ExportError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(data)?;
    let footer = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .map(|kv| {
            kv.iter()
                .filter_map(|entry| entry.value.clone().map(|v| (entry.key.clone(), v)))
                .collect()
        })
        .unwrap_or_default();
    Ok(footer)
}
