//! Core logic for the Pocketbook contact, to-do and calculator programs.
//! Binaries only wire stdio, paths and logging into this crate.

pub mod calc;
pub mod config;
pub mod logging;
pub mod model;
pub mod shell;
pub mod store;

pub use config::AppPaths;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::contact::{Contact, ContactPatch, NewContact};
pub use model::task::{NewTask, Task, TaskFilter, TaskPatch};
pub use model::{FieldChange, Record, RecordId, ValidationError};
pub use shell::{run_calculator, run_contacts, run_todo, ShellError, ShellResult};
pub use store::{ContactStore, JsonRecordStore, StoreError, StoreResult, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
