use std::path::Path;
use std::sync::Arc;

use log::{debug, info};

use crate::export::{self, ExportFormat};
use crate::record::{MeasurementRecord, RecordKey};

use super::query::{distinct_elements, distinct_shale_ids, select, Filter, FilterOutcome};
use super::{load_baseline, BaselineDataset, DatasetError, PipelineOptions, SourceSpec};

/// Working copy of a baseline that interactive actions read and prune.
///
/// ```text
/// load ──► Active ──remove──► Active
///            ▲                  │
///            └──────reset───────┘
/// ```
///
/// `filter` and `export` only read. The baseline itself is never touched.
#[derive(Debug, Clone)]
pub struct SessionDataset {
    baseline: Arc<BaselineDataset>,
    active: Vec<MeasurementRecord>,
    removed: usize,
}

impl SessionDataset {
    /// Start a session over a baseline
    pub fn new(baseline: Arc<BaselineDataset>) -> Self {
        let active = baseline.records().to_vec();
        Self {
            baseline,
            active,
            removed: 0,
        }
    }

    /// Load a baseline from sources and open a session on it
    pub fn load(sources: &[SourceSpec], options: &PipelineOptions) -> Result<Self, DatasetError> {
        Ok(Self::new(Arc::new(load_baseline(sources, options)?)))
    }

    /// The immutable baseline
    pub fn baseline(&self) -> &BaselineDataset {
        &self.baseline
    }

    /// Current records
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.active
    }

    /// Number of current records
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True when every record has been removed
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Records removed since the last reset
    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// Sorted distinct shale ids of the current records
    pub fn list_shale_ids(&self) -> Vec<String> {
        distinct_shale_ids(&self.active)
    }

    /// Sorted distinct elements of one shale in the current records
    pub fn list_elements(&self, shale_id: &str) -> Vec<String> {
        distinct_elements(&self.active, shale_id)
    }

    /// Time-ordered current records of a selection
    pub fn filter(&self, filter: &Filter) -> FilterOutcome {
        select(&self.active, filter)
    }

    /// Remove every record matching the key exactly.
    ///
    /// The match ignores the shale and sample-type selection, so readings of
    /// other series sharing the identifier, time and element go too. Returns the
    /// number of records removed; `0` when the key is already absent.
    pub fn remove(&mut self, key: &RecordKey) -> usize {
        self.remove_where(|record| key.matches(record))
    }

    /// Remove records matching the key that also belong to the given selection
    pub fn remove_in_scope(&mut self, key: &RecordKey, scope: &Filter) -> usize {
        self.remove_where(|record| key.matches(record) && scope.matches(record))
    }

    fn remove_where<F: Fn(&MeasurementRecord) -> bool>(&mut self, predicate: F) -> usize {
        let before = self.active.len();
        self.active.retain(|record| !predicate(record));
        let removed = before - self.active.len();
        self.removed += removed;
        debug!("removed {} records ({} since reset)", removed, self.removed);
        removed
    }

    /// Discard all removals
    pub fn reset(&mut self) {
        self.active = self.baseline.records().to_vec();
        self.removed = 0;
        info!("Session reset to baseline ({} records)", self.active.len());
    }

    /// Serialize the current records
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, DatasetError> {
        let metadata = export::export_metadata(self.baseline.sources_json());
        Ok(export::export_records(
            &self.active,
            self.baseline.conditions_derived(),
            format,
            &metadata,
        )?)
    }

    /// Serialize the current records to a new file. Returns the number of bytes written.
    pub fn export_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        format: ExportFormat,
    ) -> Result<usize, DatasetError> {
        let bytes = self.export(format)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(
            "Exported {} records to {} ({} bytes)",
            self.active.len(),
            path.as_ref().display(),
            bytes.len()
        );
        Ok(bytes.len())
    }
}
