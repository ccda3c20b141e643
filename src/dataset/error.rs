use std::path::PathBuf;

use uuid::Uuid;

use crate::export::ExportError;
use crate::ingest::IngestError;

/// Why a source file could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum SourceReadError {
    /// Wide instrument table could not be read
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Long-form export could not be read
    #[error(transparent)]
    Export(#[from] ExportError),

    /// File could not be opened
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during dataset operations
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// A source file is missing or unreadable. Fatal at load time.
    #[error("Failed to load source '{label}' from {}: {source}", .path.display())]
    SourceRead {
        /// Path of the failing source
        path: PathBuf,
        /// Label of the failing source
        label: String,
        /// Underlying failure
        source: SourceReadError,
    },

    /// No sources were configured
    #[error("No sources configured")]
    NoSources,

    /// Error serializing an export
    #[error("Export error: {0}")]
    ExportError(#[from] ExportError),

    /// I/O error writing an export
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No session with this identity is open
    #[error("Unknown session: {0}")]
    UnknownSession(Uuid),

    /// A session lock was poisoned by a panicking holder
    #[error("Session lock poisoned")]
    SessionPoisoned,
}
