//! Integration tests for icp-explorer
//!
//! These tests run the full pipeline from instrument CSV files to exports.

use bytes::Bytes;
use icp_explorer::auxiliary::AuxiliaryTable;
use icp_explorer::config::PipelineConfig;
use icp_explorer::dataset::{
    load_baseline, DatasetError, Filter, FilterOutcome, SessionDataset, SessionRegistry,
    SourceFormat, SourceSpec,
};
use icp_explorer::export::{columns, read_footer_metadata, read_long_csv, read_long_parquet, ExportFormat};
use icp_explorer::identifier::SampleType;
use icp_explorer::record::RecordKey;
use icp_explorer::series::{build_series, ColorScheme};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const ICP_TOT_RAW: &str = "\
Sample ID,7Li,24Mg,44Ca,56Fe,%RSD
Blank 1,0.02,0.1,0.3,0.01,
64Dt0 Disk,1.10,820,4100,12.5,1.2
64Dt7.5 Disk,1.25,905,4420,<LOD,1.1
64Dt14 Disk,1.31,990,4650,9.8,0.9
64At0 Dust,0.95,700,3900,15.1,1.3
64At7.5 Dust,1.05,760,4010,14.2,1.0
60Ct3 Disk,2.10,1500,6100,22.0,0.8
standard 10ppm,10,10,10,10,
";

const EXP2_TOT_ICP: &str = "\
Sample,Mg,Ca
64Bt21 Disk,1.02,4.9
64Bt28 Disk,1.10,5.1
";

const EX_BIS: &str = "\
ID,Mg,Fe
12At1 Disk,50,2
12Dt1 Disk,55,3
";

const PH_O2: &str = "\
Sample_ID,pH,DO
64Dt0 Disk,7.9,8.1
64Dt7.5 Disk,7.6,6.4
";

const CONFIG: &str = r#"
[[sources]]
path = "data/icpTotRaw.csv"
label = "Exp1"

[[sources]]
path = "data/Exp2_TotICP.csv"
label = "Exp2"
multiplier = 1000.0

[[sources]]
path = "data/exBis12TotIcp.csv"
label = "BIS"

[auxiliary]
path = "data/phO2.csv"
"#;

fn write_project(root: &Path) -> std::path::PathBuf {
    let data = root.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("icpTotRaw.csv"), ICP_TOT_RAW).unwrap();
    fs::write(data.join("Exp2_TotICP.csv"), EXP2_TOT_ICP).unwrap();
    fs::write(data.join("exBis12TotIcp.csv"), EX_BIS).unwrap();
    fs::write(data.join("phO2.csv"), PH_O2).unwrap();
    let config = root.join("icp.toml");
    fs::write(&config, CONFIG).unwrap();
    config
}

fn load_project(root: &Path) -> (PipelineConfig, SessionDataset) {
    let config = PipelineConfig::from_file(&write_project(root)).unwrap();
    let sources = config.to_sources().unwrap();
    let session = SessionDataset::load(&sources, &config.pipeline_options().unwrap()).unwrap();
    (config, session)
}

/// Test the full load from a config file
#[test]
fn test_load_from_config() {
    let dir = tempdir().unwrap();
    let (_config, session) = load_project(dir.path());
    let baseline = session.baseline();

    // 6 samples x 4 elements - 1 <LOD cell, "standard 10ppm" has no sample number
    // but still produces records
    let exp1 = &baseline.stats().sources[0];
    assert_eq!(exp1.blank_rows, 1);
    assert_eq!(exp1.columns_skipped, 1);
    assert_eq!(exp1.records, 6 * 4 - 1 + 4);

    assert_eq!(baseline.stats().sources[1].records, 4);
    assert_eq!(baseline.stats().sources[2].records, 4);
    assert_eq!(baseline.len(), exp1.records + 8);

    assert_eq!(session.list_shale_ids(), vec!["12-BIS", "60", "64"]);
    assert_eq!(session.list_elements("64"), vec!["Ca", "Fe", "Li", "Mg"]);
    assert_eq!(session.list_elements("12-BIS"), vec!["Fe", "Mg"]);
}

/// Test that a batch multiplier reaches the filtered output
#[test]
fn test_filter_combines_batches() {
    let dir = tempdir().unwrap();
    let (_config, session) = load_project(dir.path());

    let outcome = session.filter(&Filter::new("64", "Mg").with_sample_types(&[SampleType::Disk]));
    let points: Vec<(f64, f64)> = outcome
        .records()
        .iter()
        .map(|r| (r.time.unwrap(), r.concentration))
        .collect();

    assert_eq!(points.len(), 5);
    assert_eq!(points[0], (0.0, 820.0));
    assert_eq!(points[2], (14.0, 990.0));
    assert_eq!(points[3].0, 21.0);
    assert!((points[3].1 - 1020.0).abs() < 1e-9);

    let series = build_series(outcome.records(), ColorScheme::ByExposure);
    let names: Vec<&str> = series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["64D", "64B"]);
}

/// Test the point removal workflow: remove, idempotent repeat, reset
#[test]
fn test_clean_and_reset() {
    let dir = tempdir().unwrap();
    let (_config, mut session) = load_project(dir.path());
    let total = session.len();

    let key = RecordKey::new("64Dt7.5 Disk", 7.5, "Mg");
    assert_eq!(session.remove(&key), 1);
    assert_eq!(session.remove(&key), 0);
    assert_eq!(session.len(), total - 1);
    assert_eq!(session.baseline().len(), total);

    session.reset();
    assert_eq!(session.records(), session.baseline().records());
}

/// Test CSV export and reload as a long source
#[test]
fn test_csv_export_reload() {
    let dir = tempdir().unwrap();
    let (_config, mut session) = load_project(dir.path());
    session.remove(&RecordKey::new("60Ct3 Disk", 3.0, "Fe"));

    let path = dir.path().join("cleaned_icp_data.csv");
    session.export_to_path(&path, ExportFormat::Csv).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with(
        "Sample_ID,Time,Sample_Type,Group,Sample_Number,Sample_Combo,Shale_ID,Experiment,Element,Concentration,O2,CO2,Condition"
    ));

    let table = read_long_csv(text.as_bytes()).unwrap();
    assert_eq!(table.records.as_slice(), session.records());

    let reloaded = load_baseline(
        &[SourceSpec::new(&path, "cleaned").with_format(SourceFormat::LongCsv)],
        &Default::default(),
    )
    .unwrap();
    assert_eq!(reloaded.records(), session.records());
}

/// Test Parquet export with footer metadata
#[test]
fn test_parquet_export() {
    let dir = tempdir().unwrap();
    let (_config, session) = load_project(dir.path());

    let path = dir.path().join("cleaned_icp_data.parquet");
    let written = session.export_to_path(&path, ExportFormat::Parquet).unwrap();
    let data = Bytes::from(fs::read(&path).unwrap());
    assert_eq!(data.len(), written);

    let footer = read_footer_metadata(data.clone()).unwrap();
    assert_eq!(
        footer.get(columns::KEY_FORMAT_VERSION).map(String::as_str),
        Some(columns::EXPORT_FORMAT_VERSION)
    );
    assert!(footer.contains_key(columns::KEY_EXPORT_TIMESTAMP));
    assert!(footer[columns::KEY_SOURCES].contains("exBis12TotIcp.csv"));

    let table = read_long_parquet(data).unwrap();
    assert!(table.has_conditions);
    assert_eq!(table.records.as_slice(), session.records());
}

/// Test that an unreadable source aborts the load with its path
#[test]
fn test_missing_source() {
    let dir = tempdir().unwrap();
    write_project(dir.path());
    fs::remove_file(dir.path().join("data/Exp2_TotICP.csv")).unwrap();

    let config = PipelineConfig::from_file(&dir.path().join("icp.toml")).unwrap();
    let err = SessionDataset::load(&config.to_sources().unwrap(), &config.pipeline_options().unwrap())
        .unwrap_err();

    assert!(matches!(err, DatasetError::SourceRead { .. }));
    assert!(err.to_string().contains("Exp2_TotICP.csv"));
}

/// Test the auxiliary table overlay
#[test]
fn test_auxiliary_overlay() {
    let dir = tempdir().unwrap();
    let (config, session) = load_project(dir.path());
    let aux = AuxiliaryTable::from_csv_path(config.auxiliary_path().unwrap()).unwrap();

    let selection = session.filter(&Filter::new("64", "Fe"));
    let annotated = aux.annotate(selection.records());
    let with_ph: Vec<(&str, f64)> = annotated
        .iter()
        .filter_map(|a| a.reading("pH").map(|ph| (a.record.sample_id.as_str(), ph)))
        .collect();

    // 64Dt7.5 Disk has no Fe record (<LOD)
    assert_eq!(with_ph, vec![("64Dt0 Disk", 7.9)]);
}

/// Test that sessions of one registry do not see each other's removals
#[test]
fn test_concurrent_sessions() {
    let dir = tempdir().unwrap();
    let (_config, session) = load_project(dir.path());
    let registry = Arc::new(SessionRegistry::new(Arc::new(session.baseline().clone())));
    let total = registry.baseline().len();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                let id = registry.open().unwrap();
                if i % 2 == 0 {
                    let key = RecordKey::new("64Dt0 Disk", 0.0, "Mg");
                    registry.with_session(id, |s| s.remove(&key)).unwrap();
                }
                (i, registry.with_session(id, |s| s.len()).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (i, len) = handle.join().unwrap();
        let expected = if i % 2 == 0 { total - 1 } else { total };
        assert_eq!(len, expected);
    }
    assert_eq!(registry.len().unwrap(), 4);

    match registry.baseline().filter(&Filter::new("64", "Mg")) {
        FilterOutcome::Records(records) => assert_eq!(records.len(), 7),
        FilterOutcome::Empty => panic!("baseline lost its records"),
    }
}
