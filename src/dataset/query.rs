use std::collections::BTreeSet;

use crate::identifier::SampleType;
use crate::record::MeasurementRecord;

/// Message for a selection that matches nothing
pub const NO_DATA_MESSAGE: &str = "No data available for this selection.";

/// Current selection of the explorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Shale to show
    pub shale_id: String,
    /// Element to show
    pub element: String,
    /// Sample types to include. Empty means all types.
    pub sample_types: Vec<SampleType>,
}

impl Filter {
    /// Selection over all sample types
    pub fn new(shale_id: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            shale_id: shale_id.into(),
            element: element.into(),
            sample_types: Vec::new(),
        }
    }

    /// Restrict to the given sample types
    pub fn with_sample_types(mut self, sample_types: &[SampleType]) -> Self {
        self.sample_types = sample_types.to_vec();
        self
    }

    /// True when the record belongs to this selection (ignoring its time)
    pub fn matches(&self, record: &MeasurementRecord) -> bool {
        record.shale_id.as_deref() == Some(self.shale_id.as_str())
            && record.element == self.element
            && (self.sample_types.is_empty() || self.sample_types.contains(&record.sample_type))
    }
}

/// Result of filtering. An empty selection is a value, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Nothing matched; render [`NO_DATA_MESSAGE`]
    Empty,
    /// Matching records ordered by time
    Records(Vec<MeasurementRecord>),
}

impl FilterOutcome {
    /// True for [`FilterOutcome::Empty`]
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterOutcome::Empty)
    }

    /// Matching records (empty slice when nothing matched)
    pub fn records(&self) -> &[MeasurementRecord] {
        match self {
            FilterOutcome::Empty => &[],
            FilterOutcome::Records(records) => records.as_slice(),
        }
    }

    /// Number of matching records
    pub fn len(&self) -> usize {
        self.records().len()
    }
}

/// Select the records of a filter that can be placed on the time axis, in time order
pub fn select(records: &[MeasurementRecord], filter: &Filter) -> FilterOutcome {
    let mut selected: Vec<MeasurementRecord> = records
        .iter()
        .filter(|r| r.time.is_some() && filter.matches(r))
        .cloned()
        .collect();

    if selected.is_empty() {
        return FilterOutcome::Empty;
    }

    selected.sort_by(|a, b| {
        a.time
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.time.unwrap_or(f64::INFINITY))
    });
    FilterOutcome::Records(selected)
}

/// Sorted distinct shale ids
pub fn distinct_shale_ids(records: &[MeasurementRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.shale_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted distinct elements measured for one shale
pub fn distinct_elements(records: &[MeasurementRecord], shale_id: &str) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.shale_id.as_deref() == Some(shale_id))
        .map(|r| r.element.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
