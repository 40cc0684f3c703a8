//! Record models for the contact and to-do stores.
//!
//! # Responsibility
//! - Define the persisted record shapes and their create/patch inputs.
//! - Provide the shared validation error and timestamp format.
//!
//! # Invariants
//! - Every record is identified by a positive integer id unique in its file.
//! - Absent optional values serialize as `null`, matching existing data files.

use chrono::Local;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod contact;
pub mod task;

/// Timestamp layout used for `created_at` / `updated_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Integer identifier shared by all record kinds.
pub type RecordId = u64;

/// Returns the current local time formatted with [`TIMESTAMP_FORMAT`].
pub fn local_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Common behavior the generic store needs from a record.
pub trait Record {
    /// Human-readable kind used in errors and log events.
    const KIND: &'static str;

    fn id(&self) -> RecordId;
}

/// Three-state update instruction for nullable fields.
///
/// `Set(String::new())` stores an empty string; `Clear` stores absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldChange<T> {
    /// Leave the current value untouched.
    #[default]
    Keep,
    /// Remove the value (persisted as `null`).
    Clear,
    /// Replace the value.
    Set(T),
}

impl<T> FieldChange<T> {
    /// Applies this change to `slot`. Returns whether anything changed.
    pub fn apply(self, slot: &mut Option<T>) -> bool {
        match self {
            Self::Keep => false,
            Self::Clear => {
                *slot = None;
                true
            }
            Self::Set(value) => {
                *slot = Some(value);
                true
            }
        }
    }
}

/// Overwrites a required text field only when `value` is non-blank.
pub(crate) fn apply_required(value: Option<String>, slot: &mut String) -> bool {
    match value {
        Some(value) if !value.trim().is_empty() => {
            *slot = value;
            true
        }
        _ => false,
    }
}

/// Input-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was missing or blank.
    EmptyField(&'static str),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} is required and cannot be empty"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}
