//! To-do list entry point.

use pocketbook_cli::{finish, prepare, startup_failure};
use pocketbook_core::{run_todo, TaskStore};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let paths = match prepare("todo") {
        Ok(paths) => paths,
        Err(code) => return code,
    };
    let mut store = match TaskStore::open(paths.tasks_file()) {
        Ok(store) => store,
        Err(err) => return startup_failure("to-do list", &err),
    };

    finish(run_todo(&mut store, io::stdin().lock(), io::stdout()))
}
