//! # Baseline and Session Datasets
//!
//! Loading runs every source through the same pipeline:
//!
//! ```text
//! CSV ─► WideTable ─► reshape ─► normalize (ScaleMode) ─► derive conditions ─┐
//! CSV ─► WideTable ─► reshape ─► normalize (ScaleMode) ─► derive conditions ─┼─► BaselineDataset
//! export ─► LongTable ─────────► normalize (ScaleMode) ─► derive conditions ─┘
//! ```
//!
//! The [`BaselineDataset`] is built once and never changes. Interactive work
//! happens on a [`SessionDataset`], a working copy that supports filtering,
//! point removal, reset and export. A [`SessionRegistry`] hands every client
//! its own session over the shared baseline.
//!
//! ## Example
//!
//! ```rust,no_run
//! use icp_explorer::dataset::{Filter, PipelineOptions, SessionDataset, SourceSpec};
//! use icp_explorer::normalize::ScaleMode;
//! use icp_explorer::record::RecordKey;
//!
//! let sources = vec![
//!     SourceSpec::new("data/icpTotRaw.csv", "Exp1"),
//!     SourceSpec::new("data/Exp2_TotICP.csv", "Exp2").with_scale(ScaleMode::Multiplier(1000.0)),
//!     SourceSpec::new("data/exBis12TotIcp.csv", "BIS"),
//! ];
//! let mut session = SessionDataset::load(&sources, &PipelineOptions::default())?;
//!
//! let selection = session.filter(&Filter::new("64", "Mg"));
//! println!("{} points", selection.len());
//!
//! session.remove(&RecordKey::new("64Dt7.5", 7.5, "Mg"));
//! session.reset();
//! # Ok::<(), icp_explorer::dataset::DatasetError>(())
//! ```

mod baseline;
mod error;
mod query;
mod registry;
mod session;
mod source;
mod stats;


pub use baseline::{derive_conditions, load_baseline, BaselineDataset};
pub use error::{DatasetError, SourceReadError};
pub use query::{
    distinct_elements, distinct_shale_ids, select, Filter, FilterOutcome, NO_DATA_MESSAGE,
};
pub use registry::SessionRegistry;
pub use session::SessionDataset;
pub use source::{PipelineOptions, SourceFormat, SourceSpec};
pub use stats::{LoadStats, SourceStats};
