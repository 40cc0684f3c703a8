//! Record stores backed by whole-file JSON persistence.
//!
//! # Responsibility
//! - Own one ordered record sequence per backing file.
//! - Flush the full sequence after every successful mutation.
//!
//! # Invariants
//! - Ids are unique among live records; a new id is the highest live id + 1.
//! - A failed flush leaves the in-memory sequence unchanged.
//! - `NotFound` is a semantic error, never a transport failure.

use crate::model::{RecordId, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod contact_store;
mod json_file;
mod record_store;
mod task_store;

pub use contact_store::ContactStore;
pub use record_store::{Clock, JsonRecordStore};
pub use task_store::TaskStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for record store load/save and CRUD operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file could not be read or written.
    Io { path: PathBuf, source: io::Error },
    /// Backing file exists but is not a JSON array of records.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Records could not be serialized.
    Serialize(serde_json::Error),
    /// Backing file parsed but violates store invariants.
    InvalidData(String),
    /// No record with this id.
    NotFound { kind: &'static str, id: RecordId },
    /// Input rejected before touching storage.
    Validation(ValidationError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Parse { path, source } => write!(
                f,
                "`{}` is not a valid JSON array of records: {source}",
                path.display()
            ),
            Self::Serialize(err) => write!(f, "failed to serialize records: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::NotFound { kind, id } => write!(f, "{kind} {id} not found"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) | Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
