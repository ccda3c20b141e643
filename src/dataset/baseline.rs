use std::fs::File;
use std::io::BufReader;

use bytes::Bytes;
use log::{info, warn};

use crate::condition::Condition;
use crate::export::{self, ExportFormat, LongTable};
use crate::ingest::{reshape, ReshapeStats, WideTable};
use crate::normalize::normalize_records;
use crate::record::MeasurementRecord;

use super::error::SourceReadError;
use super::query::{distinct_elements, distinct_shale_ids, select, Filter, FilterOutcome};
use super::{DatasetError, LoadStats, PipelineOptions, SourceFormat, SourceSpec, SourceStats};

/// The fully derived long table built once at startup. Never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineDataset {
    records: Vec<MeasurementRecord>,
    sources: Vec<SourceSpec>,
    stats: LoadStats,
    conditions_derived: bool,
}

impl BaselineDataset {
    /// Wrap already-derived records, e.g. for hosts that build records themselves
    pub fn from_records(records: Vec<MeasurementRecord>, conditions_derived: bool) -> Self {
        Self {
            records,
            sources: Vec::new(),
            stats: LoadStats::default(),
            conditions_derived,
        }
    }

    /// All records in load order
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no source produced a record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sources in load order
    pub fn sources(&self) -> &[SourceSpec] {
        &self.sources
    }

    /// Load statistics
    pub fn stats(&self) -> &LoadStats {
        &self.stats
    }

    /// Whether records carry O2/CO2 conditions
    pub fn conditions_derived(&self) -> bool {
        self.conditions_derived
    }

    /// Sorted distinct shale ids
    pub fn list_shale_ids(&self) -> Vec<String> {
        distinct_shale_ids(&self.records)
    }

    /// Sorted distinct elements of one shale
    pub fn list_elements(&self, shale_id: &str) -> Vec<String> {
        distinct_elements(&self.records, shale_id)
    }

    /// Time-ordered records of a selection
    pub fn filter(&self, filter: &Filter) -> FilterOutcome {
        select(&self.records, filter)
    }

    /// Source list as JSON for export footers
    pub fn sources_json(&self) -> Option<String> {
        serde_json::to_string(&self.sources).ok()
    }

    /// Serialize the baseline records
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, DatasetError> {
        let metadata = export::export_metadata(self.sources_json());
        Ok(export::export_records(
            &self.records,
            self.conditions_derived,
            format,
            &metadata,
        )?)
    }
}

/// Attach the O2/CO2 condition of each record's group
pub fn derive_conditions(records: &mut [MeasurementRecord]) {
    for record in records.iter_mut() {
        record.condition = Some(Condition::for_optional_group(record.group));
    }
}

fn read_long(spec: &SourceSpec) -> Result<LongTable, SourceReadError> {
    match spec.format {
        SourceFormat::LongCsv => {
            let file = File::open(&spec.path)?;
            Ok(export::read_long_csv(BufReader::new(file))?)
        }
        _ => {
            let data = Bytes::from(std::fs::read(&spec.path)?);
            Ok(export::read_long_parquet(data)?)
        }
    }
}

fn load_source(
    spec: &SourceSpec,
    options: &PipelineOptions,
) -> Result<(Vec<MeasurementRecord>, SourceStats), SourceReadError> {
    let (mut records, mut reshape_stats) = match spec.format {
        SourceFormat::Wide => {
            let table = WideTable::from_csv_path(&spec.path)?;
            let reshaped = reshape(&table, &spec.label, &spec.shale_suffix);
            (reshaped.records, reshaped.stats)
        }
        SourceFormat::LongCsv | SourceFormat::LongParquet => {
            let table = read_long(spec)?;
            let stats = ReshapeStats {
                rows_read: table.records.len() + table.rows_dropped,
                cells_dropped: table.rows_dropped,
                records: table.records.len(),
                ..Default::default()
            };
            (table.records, stats)
        }
    };

    let non_finite = normalize_records(&mut records, spec.scale, &options.molar_masses);
    reshape_stats.cells_dropped += non_finite;
    reshape_stats.records -= non_finite;

    if options.derive_conditions {
        derive_conditions(&mut records);
    } else {
        for record in records.iter_mut() {
            record.condition = None;
        }
    }

    let stats = SourceStats::from_reshape(
        &spec.label,
        spec.path.clone(),
        spec.format,
        spec.scale,
        reshape_stats,
    );
    Ok((records, stats))
}

/// Build the baseline from all sources, concatenated in the given order.
///
/// Any unreadable source aborts the whole load; there is no partial baseline.
/// Row-level problems (blank rows, unparsable identifiers, non-numeric cells)
/// never fail the load.
pub fn load_baseline(
    sources: &[SourceSpec],
    options: &PipelineOptions,
) -> Result<BaselineDataset, DatasetError> {
    if sources.is_empty() {
        return Err(DatasetError::NoSources);
    }

    let mut records = Vec::new();
    let mut stats = LoadStats::default();

    for spec in sources {
        let (source_records, source_stats) =
            load_source(spec, options).map_err(|source| DatasetError::SourceRead {
                path: spec.path.clone(),
                label: spec.label.clone(),
                source,
            })?;

        if source_records.is_empty() {
            warn!("Source '{}' ({}) produced no records", spec.label, spec.path.display());
        }
        info!("Loaded {}", source_stats);

        records.extend(source_records);
        stats.sources.push(source_stats);
    }

    info!("{}", stats);

    Ok(BaselineDataset {
        records,
        sources: sources.to_vec(),
        stats,
        conditions_derived: options.derive_conditions,
    })
}
