//! # Wide-to-Long Ingestion
//!
//! Instrument exports arrive as wide tables: the first column holds the sample
//! identifier and every other column one analyte, often labelled with an isotope
//! mass (`7Li`, `56Fe`) or an emission line (`Fe 259.940`).
//!
//! ```text
//! Sample_ID , 7Li , 24Mg , 56Fe
//! 64Dt7.5   , 1.2 , 830  , <LOD
//! ```
//!
//! becomes
//!
//! ```text
//! 64Dt7.5 | Li | 1.2
//! 64Dt7.5 | Mg | 830
//! ```
//!
//! Cells that are empty or not numeric are dropped, never kept as nulls.

mod element;
mod error;
mod reshape;
mod wide;


pub use element::normalize_element;
pub use error::IngestError;
pub use reshape::{parse_concentration, reshape, ReshapeStats, Reshaped};
pub use wide::{WideRow, WideTable};
