//! Interactive menu shells.
//!
//! # Responsibility
//! - Collect field values line by line and dispatch to the record stores.
//! - Report every recoverable failure in-loop and return to the menu.
//!
//! # Invariants
//! - Shells are generic over `BufRead`/`Write`; nothing here touches stdio.
//! - End of input behaves like the exit choice.
//! - Required prompts never return blank text.

use crate::model::{FieldChange, RecordId};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

mod calculator;
mod contacts;
mod todo;

pub use calculator::run_calculator;
pub use contacts::run_contacts;
pub use todo::run_todo;

/// Update-prompt input that clears a nullable field.
pub const CLEAR_MARKER: &str = "-";

pub type ShellResult<T> = Result<T, ShellError>;

/// Terminal-level failures that end a shell loop.
#[derive(Debug)]
pub enum ShellError {
    Io(io::Error),
    /// Input reached end-of-file while a value was expected.
    InputClosed,
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "terminal i/o failed: {err}"),
            Self::InputClosed => write!(f, "input closed"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::InputClosed => None,
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Numeric input that did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub input: String,
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a valid numeric ID", self.input)
    }
}

impl Error for FormatError {}

/// Parses a record id typed by the user.
pub fn parse_id(value: &str) -> Result<RecordId, FormatError> {
    value.trim().parse().map_err(|_| FormatError {
        input: value.trim().to_string(),
    })
}

/// Line-oriented prompt/response channel.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one line of output.
    pub fn say(&mut self, text: impl Display) -> ShellResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Shows `prompt` and returns the trimmed reply.
    pub fn ask(&mut self, prompt: &str) -> ShellResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ShellError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Re-prompts until the reply is non-blank.
    pub fn required(&mut self, prompt: &str) -> ShellResult<String> {
        loop {
            let value = self.ask(prompt)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.say("This field is required!")?;
        }
    }

    /// Blank reply means absent.
    pub fn optional(&mut self, prompt: &str) -> ShellResult<Option<String>> {
        let value = self.ask(prompt)?;
        Ok((!value.is_empty()).then_some(value))
    }

    /// Update prompt for a nullable field: blank keeps, [`CLEAR_MARKER`] clears.
    pub fn change(&mut self, prompt: &str) -> ShellResult<FieldChange<String>> {
        let value = self.ask(prompt)?;
        Ok(match value.as_str() {
            "" => FieldChange::Keep,
            CLEAR_MARKER => FieldChange::Clear,
            _ => FieldChange::Set(value),
        })
    }

    /// Asks for an id; non-numeric input is reported and yields `None`.
    pub fn record_id(&mut self, prompt: &str) -> ShellResult<Option<RecordId>> {
        let value = self.ask(prompt)?;
        match parse_id(&value) {
            Ok(id) => Ok(Some(id)),
            Err(err) => {
                self.say(format_args!("\nError: {err}. Please enter a number."))?;
                Ok(None)
            }
        }
    }

    /// `y`/`yes` (any case) confirms.
    pub fn confirm(&mut self, prompt: &str) -> ShellResult<bool> {
        let value = self.ask(prompt)?.to_lowercase();
        Ok(value == "y" || value == "yes")
    }
}

/// Outcome of one menu dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Exit,
}

/// Converts end-of-input into a clean exit; other errors pass through.
pub(crate) fn exit_on_closed(result: ShellResult<Flow>) -> ShellResult<Flow> {
    match result {
        Err(ShellError::InputClosed) => Ok(Flow::Exit),
        other => other,
    }
}
