//! Explicit path configuration for the binaries.
//!
//! # Invariants
//! - Stores never resolve a default path themselves; callers pass one in.
//! - `log_dir` is absolute whenever `data_dir` is.

use std::path::{Path, PathBuf};

/// Default backing file of the contact manager.
pub const CONTACTS_FILE_NAME: &str = "contacts.json";
/// Default backing file of the to-do list.
pub const TASKS_FILE_NAME: &str = "todo.json";

const LOG_DIR_NAME: &str = ".pocketbook/logs";

/// Where data files and logs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    /// Data files in `data_dir`, logs under `<data_dir>/.pocketbook/logs`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        let log_dir = data_dir.join(LOG_DIR_NAME);
        Self { data_dir, log_dir }
    }

    /// Resolves paths against the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        std::env::current_dir().map(Self::new)
    }

    pub fn contacts_file(&self) -> PathBuf {
        self.data_dir.join(CONTACTS_FILE_NAME)
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE_NAME)
    }
}
