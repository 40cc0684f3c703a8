//! Calculator entry point.

use pocketbook_cli::{finish, prepare};
use pocketbook_core::run_calculator;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(code) = prepare("calc") {
        return code;
    }
    finish(run_calculator(io::stdin().lock(), io::stdout()))
}
