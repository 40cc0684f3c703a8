//! Shared startup for the Pocketbook binaries.
//!
//! # Responsibility
//! - Resolve data/log paths from the working directory.
//! - Start file logging without letting a logging failure block the program.

use log::error;
use pocketbook_core::{default_log_level, init_logging, AppPaths, ShellError, StoreError};
use std::process::ExitCode;

/// Resolves paths and starts logging for `program`.
///
/// Fails only when the working directory itself cannot be resolved.
pub fn prepare(program: &str) -> Result<AppPaths, ExitCode> {
    let paths = match AppPaths::from_current_dir() {
        Ok(paths) => paths,
        Err(err) => {
            eprintln!("Error: cannot resolve the working directory: {err}");
            return Err(ExitCode::FAILURE);
        }
    };

    if let Err(err) = init_logging(program, default_log_level(), &paths.log_dir) {
        eprintln!("Warning: logging disabled: {err}");
    }
    Ok(paths)
}

/// Reports a backing file that could not be loaded and aborts startup.
pub fn startup_failure(what: &str, err: &StoreError) -> ExitCode {
    error!("event=startup module=cli status=error error={err}");
    eprintln!("Error: could not load the {what}: {err}");
    eprintln!("Fix or move the file, then start again.");
    ExitCode::FAILURE
}

/// Maps the shell outcome to the process exit status.
pub fn finish(outcome: Result<(), ShellError>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=shell_abort module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
