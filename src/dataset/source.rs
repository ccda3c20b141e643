use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::normalize::{MolarMassTable, ScaleMode};

/// Label whose sources get the `-BIS` shale suffix unless told otherwise
const BIS_LABEL: &str = "BIS";
const BIS_SUFFIX: &str = "-BIS";

/// Layout of a source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Instrument export: identifier column + one column per element
    #[default]
    Wide,
    /// Long-form CSV export of a previous run
    LongCsv,
    /// Long-form Parquet export of a previous run
    LongParquet,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Wide => write!(f, "wide"),
            SourceFormat::LongCsv => write!(f, "long-csv"),
            SourceFormat::LongParquet => write!(f, "long-parquet"),
        }
    }
}

/// One input file and how its values are to be interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Path of the file
    pub path: PathBuf,
    /// Experiment label carried onto every record
    pub label: String,
    /// Concentration transform for this batch
    pub scale: ScaleMode,
    /// Appended to the sample number to form the shale id
    pub shale_suffix: String,
    /// File layout
    pub format: SourceFormat,
}

impl SourceSpec {
    /// Wide source with no scaling. A `BIS` label implies the `-BIS` shale suffix.
    pub fn new<P: AsRef<Path>>(path: P, label: &str) -> Self {
        let shale_suffix = if label == BIS_LABEL { BIS_SUFFIX } else { "" };
        Self {
            path: path.as_ref().to_path_buf(),
            label: label.to_string(),
            scale: ScaleMode::Identity,
            shale_suffix: shale_suffix.to_string(),
            format: SourceFormat::Wide,
        }
    }

    /// Set the scale mode
    pub fn with_scale(mut self, scale: ScaleMode) -> Self {
        self.scale = scale;
        self
    }

    /// Set the shale suffix
    pub fn with_shale_suffix(mut self, suffix: &str) -> Self {
        self.shale_suffix = suffix.to_string();
        self
    }

    /// Set the file layout
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = format;
        self
    }
}

/// Pipeline switches shared by all sources
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Attach O2/CO2 conditions to every record
    pub derive_conditions: bool,
    /// Molar masses for [`ScaleMode::Molar`] sources
    pub molar_masses: MolarMassTable,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            derive_conditions: true,
            molar_masses: MolarMassTable::standard(),
        }
    }
}
