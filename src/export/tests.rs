use super::*;
use bytes::Bytes;

use crate::condition::Condition;
use crate::identifier::{Group, SampleIdentifier, SampleType};

fn sample_records() -> Vec<MeasurementRecord> {
    let mut with_condition = MeasurementRecord::from_identifier(
        &SampleIdentifier::parse("Disk 64D t7.5"),
        "",
        "Exp1",
        "Fe",
        12.25,
    );
    with_condition.condition = Some(Condition::for_group(Group::D));

    let mut partial = MeasurementRecord::from_identifier(
        &SampleIdentifier::parse("standard"),
        "",
        "Exp2",
        "Mg",
        0.004,
    );
    partial.condition = Some(Condition::unknown());

    vec![with_condition, partial]
}

#[test]
fn test_csv_header_and_rows() {
    let records = sample_records();
    let bytes = export_records(&records, true, ExportFormat::Csv, &HashMap::new()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "Sample_ID,Time,Sample_Type,Group,Sample_Number,Sample_Combo,Shale_ID,Experiment,Element,Concentration,O2,CO2,Condition"
    );
    assert_eq!(lines[1], "Disk 64D t7.5,7.5,Disk,D,64,64D,64,Exp1,Fe,12.25,True,False,O2");
    assert_eq!(lines[2], "standard,,Unknown,,,,,Exp2,Mg,0.004,False,False,Unknown");
}

#[test]
fn test_csv_without_conditions() {
    let records = sample_records();
    let bytes = export_records(&records, false, ExportFormat::Csv, &HashMap::new()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.lines().next().unwrap().ends_with("Element,Concentration"));

    let table = read_long_csv(text.as_bytes()).unwrap();
    assert!(!table.has_conditions);
    assert!(table.records.iter().all(|r| r.condition.is_none()));
}

#[test]
fn test_csv_read_back() {
    let records = sample_records();
    let bytes = export_records(&records, true, ExportFormat::Csv, &HashMap::new()).unwrap();
    let table = read_long_csv(bytes.as_slice()).unwrap();

    assert!(table.has_conditions);
    assert_eq!(table.rows_dropped, 0);
    assert_eq!(table.records, records);
}

#[test]
fn test_csv_read_tolerates_index_column_and_bad_rows() {
    let text = "\
,Sample_ID,Time,Sample_Type,Group,Element,Concentration
0,64Dt7.5,7.5,Disk,D,Fe,1.5
1,64Dt14,14.0,Dust,E,Fe,
2,60At0,0,dust,A,Mg,3
";
    let table = read_long_csv(text.as_bytes()).unwrap();

    assert_eq!(table.records.len(), 2);
    assert_eq!(table.rows_dropped, 1);
    assert_eq!(table.records[1].sample_type, SampleType::Dust);
    assert_eq!(table.records[1].group, Some(Group::A));
    assert_eq!(table.records[1].shale_id, None);
    assert_eq!(table.records[1].experiment, "");
}

#[test]
fn test_csv_read_missing_column() {
    let result = read_long_csv("Sample_ID,Element\n64At1,Fe\n".as_bytes());
    assert!(matches!(result, Err(ExportError::ColumnNotFound(c)) if c == "Concentration"));
}

#[test]
fn test_parquet_roundtrip_with_metadata() {
    let records = sample_records();
    let metadata = export_metadata(Some("[]".to_string()));
    let bytes = export_records(&records, true, ExportFormat::Parquet, &metadata).unwrap();
    let data = Bytes::from(bytes);

    let table = read_long_parquet(data.clone()).unwrap();
    assert!(table.has_conditions);
    assert_eq!(table.records, records);

    let footer = read_footer_metadata(data).unwrap();
    assert_eq!(
        footer.get(columns::KEY_FORMAT_VERSION).map(String::as_str),
        Some(columns::EXPORT_FORMAT_VERSION)
    );
    assert!(footer.contains_key(columns::KEY_EXPORT_TIMESTAMP));
    assert_eq!(footer.get(columns::KEY_SOURCES).map(String::as_str), Some("[]"));
}

#[test]
fn test_parquet_empty_export() {
    let bytes = write_long_parquet(&[], false, &HashMap::new(), &ParquetExportConfig::default())
        .unwrap();
    let table = read_long_parquet(Bytes::from(bytes)).unwrap();
    assert!(table.records.is_empty());
    assert!(!table.has_conditions);
}

#[test]
fn test_schema_columns() {
    assert_eq!(create_record_schema(false).fields().len(), 10);
    let schema = create_record_schema(true);
    assert_eq!(schema.fields().len(), 13);
    assert!(schema.field_with_name(columns::TIME).unwrap().is_nullable());
    assert!(!schema.field_with_name(columns::CONCENTRATION).unwrap().is_nullable());
}

#[test]
fn test_format_from_str() {
    assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
    assert_eq!("parquet".parse::<ExportFormat>().unwrap(), ExportFormat::Parquet);
    assert!("xlsx".parse::<ExportFormat>().is_err());
}

/// Ten-column long table where every column is nullable, as written by other tools
fn nullable_long_parquet(
    sample_ids: Vec<Option<&str>>,
    elements: Vec<Option<&str>>,
    concentrations: Vec<Option<f64>>,
) -> Bytes {
    use arrow::array::{ArrayRef, Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::sync::Arc;

    let rows = sample_ids.len();
    let text = |value: &str| -> ArrayRef { Arc::new(StringArray::from(vec![Some(value); rows])) };
    let nulls = || -> ArrayRef { Arc::new(StringArray::from(vec![None::<&str>; rows])) };

    let schema = Arc::new(Schema::new(vec![
        Field::new(columns::SAMPLE_ID, DataType::Utf8, true),
        Field::new(columns::TIME, DataType::Float64, true),
        Field::new(columns::SAMPLE_TYPE, DataType::Utf8, true),
        Field::new(columns::GROUP, DataType::Utf8, true),
        Field::new(columns::SAMPLE_NUMBER, DataType::Utf8, true),
        Field::new(columns::SAMPLE_COMBO, DataType::Utf8, true),
        Field::new(columns::SHALE_ID, DataType::Utf8, true),
        Field::new(columns::EXPERIMENT, DataType::Utf8, true),
        Field::new(columns::ELEMENT, DataType::Utf8, true),
        Field::new(columns::CONCENTRATION, DataType::Float64, true),
    ]));
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(sample_ids)),
        Arc::new(Float64Array::from(vec![Some(1.0); rows])),
        text("Dust"),
        text("A"),
        text("64"),
        text("64A"),
        nulls(),
        text("Exp1"),
        Arc::new(StringArray::from(elements)),
        Arc::new(Float64Array::from(concentrations)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

    let mut writer = ArrowWriter::try_new(Vec::new(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    Bytes::from(writer.into_inner().unwrap())
}

#[test]
fn test_parquet_read_drops_null_concentration() {
    let data = nullable_long_parquet(
        vec![Some("64At1"), Some("64At1")],
        vec![Some("Fe"), Some("Mg")],
        vec![Some(5.0), None],
    );
    let table = read_long_parquet(data).unwrap();

    assert_eq!(table.records.len(), 1);
    assert_eq!(table.rows_dropped, 1);
    assert_eq!(table.records[0].element, "Fe");
    assert_eq!(table.records[0].concentration, 5.0);
}

#[test]
fn test_parquet_read_drops_null_required_text_and_non_finite() {
    let data = nullable_long_parquet(
        vec![Some("64At1"), None, Some("64At1"), Some("64At1")],
        vec![Some("Fe"), Some("Fe"), None, Some("Ca")],
        vec![Some(1.0), Some(2.0), Some(3.0), Some(f64::NAN)],
    );
    let table = read_long_parquet(data).unwrap();

    assert_eq!(table.rows_dropped, 3);
    assert_eq!(table.records.len(), 1);
    assert_eq!(table.records[0].sample_id, "64At1");
    assert!(table.records.iter().all(|r| r.concentration.is_finite()));
}
