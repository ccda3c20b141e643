//! # icp-explorer - ICP Time Series from Shale Incubations
//!
//! `icp_explorer` turns instrument exports of an ICP elemental analysis into one
//! normalized long table and offers a session model for exploring and cleaning
//! it: filter by shale and element, drop outlier points, reset, export.
//!
//! ## Key Features
//!
//! - **Identifier Parsing**: Incubation time, disk/dust type, sample number and
//!   treatment group are recovered from free-text sample ids such as `64Dt7.5`.
//!
//! - **Wide-to-Long Reshape**: Every (sample, element) cell becomes one record;
//!   isotope and emission-line headers (`7Li`, `Fe 259.940`) map to symbols.
//!
//! - **Per-Batch Normalization**: Each source carries its own scale
//!   (as reported, flat multiplier, or ppb → mM through molar masses).
//!
//! - **Exposure Conditions**: Treatment groups map to O2/CO2 exposure.
//!
//! - **Session Model**: An immutable baseline plus per-session working copies
//!   supporting point removal, reset and export to CSV or Parquet.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use icp_explorer::prelude::*;
//!
//! let sources = vec![
//!     SourceSpec::new("data/icpTotRaw.csv", "Exp1"),
//!     SourceSpec::new("data/Exp2_TotICP.csv", "Exp2").with_scale(ScaleMode::Multiplier(1000.0)),
//!     SourceSpec::new("data/exBis12TotIcp.csv", "BIS"),
//! ];
//! let mut session = SessionDataset::load(&sources, &PipelineOptions::default())?;
//!
//! for shale in session.list_shale_ids() {
//!     println!("{}: {:?}", shale, session.list_elements(&shale));
//! }
//!
//! match session.filter(&Filter::new("64", "Mg")) {
//!     FilterOutcome::Empty => println!("{}", NO_DATA_MESSAGE),
//!     FilterOutcome::Records(records) => {
//!         for series in build_series(&records, ColorScheme::ByGroup) {
//!             println!("{} ({} points)", series.name, series.points.len());
//!         }
//!     }
//! }
//!
//! session.remove(&RecordKey::new("64Dt7.5", 7.5, "Mg"));
//! session.export_to_path("cleaned_icp_data.csv", ExportFormat::Csv)?;
//! # Ok::<(), DatasetError>(())
//! ```
//!
//! ## Export Layout
//!
//! | Column | Type | Notes |
//! |--------|------|-------|
//! | `Sample_ID` | string | raw identifier |
//! | `Time` | float64, nullable | days |
//! | `Sample_Type` | string | `Disk`, `Dust` or `Unknown` |
//! | `Group` | string, nullable | `A`-`D` |
//! | `Sample_Number` | string, nullable | two digits |
//! | `Sample_Combo` | string, nullable | e.g. `64D` |
//! | `Shale_ID` | string, nullable | sample number + batch suffix |
//! | `Experiment` | string | source label |
//! | `Element` | string | symbol |
//! | `Concentration` | float64 | scaled value |
//! | `O2`, `CO2`, `Condition` | bool, bool, string | only when conditions are derived |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod auxiliary;
pub mod condition;
pub mod config;
pub mod dataset;
pub mod export;
pub mod identifier;
pub mod ingest;
pub mod normalize;
pub mod record;
pub mod series;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::auxiliary::{AnnotatedRecord, AuxiliaryTable, Reading};
    pub use crate::condition::{Condition, ConditionLabel};
    pub use crate::config::PipelineConfig;
    pub use crate::dataset::{
        load_baseline, BaselineDataset, DatasetError, Filter, FilterOutcome, LoadStats,
        PipelineOptions, SessionDataset, SessionRegistry, SourceFormat, SourceSpec,
        NO_DATA_MESSAGE,
    };
    pub use crate::export::{ExportError, ExportFormat, LongTable};
    pub use crate::identifier::{Group, SampleIdentifier, SampleType};
    pub use crate::ingest::{IngestError, WideTable};
    pub use crate::normalize::{MolarMassTable, ScaleMode};
    pub use crate::record::{MeasurementRecord, RecordKey};
    pub use crate::series::{build_series, plot_title, y_axis_label, ColorScheme, Series};
}
