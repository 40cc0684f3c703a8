//! Contact manager entry point.

use pocketbook_cli::{finish, prepare, startup_failure};
use pocketbook_core::{run_contacts, ContactStore};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let paths = match prepare("contacts") {
        Ok(paths) => paths,
        Err(code) => return code,
    };
    let mut store = match ContactStore::open(paths.contacts_file()) {
        Ok(store) => store,
        Err(err) => return startup_failure("contact list", &err),
    };

    finish(run_contacts(&mut store, io::stdin().lock(), io::stdout()))
}
