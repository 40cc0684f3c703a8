//! Calculator read-eval-print loop.

use super::{Prompter, ShellError, ShellResult};
use crate::calc::{format_number, parse_operand, CalcError, Operation};
use log::{debug, info};
use std::io::{BufRead, Write};

const BANNER: &str = "Simple Calculator
-----------------
Operations available:
1. Addition (+)
2. Subtraction (-)
3. Multiplication (*)
4. Division (/)
-----------------";

/// Runs calculations until the user declines another one or input ends.
pub fn run_calculator<R: BufRead, W: Write>(input: R, output: W) -> ShellResult<()> {
    let mut io = Prompter::new(input, output);
    info!("event=shell_start module=shell status=ok program=calc");

    let outcome = calculate_until_done(&mut io);
    info!("event=shell_exit module=shell status=ok program=calc");
    match outcome {
        Err(ShellError::InputClosed) => Ok(()),
        other => other,
    }
}

fn calculate_until_done<R: BufRead, W: Write>(io: &mut Prompter<R, W>) -> ShellResult<()> {
    loop {
        io.say(BANNER)?;
        match calculate_once(io)? {
            Ok(line) => io.say(line)?,
            Err(err) => {
                debug!("event=calc_rejected module=shell status=error error={err}");
                io.say(error_message(&err))?;
            }
        }

        let another = io
            .ask("\nDo you want to perform another calculation? (yes/no): ")?
            .to_lowercase();
        if another != "yes" {
            io.say("Goodbye!")?;
            return Ok(());
        }
        io.say("")?;
    }
}

/// One calculation. The outer result is terminal I/O, the inner one arithmetic.
fn calculate_once<R: BufRead, W: Write>(
    io: &mut Prompter<R, W>,
) -> ShellResult<Result<String, CalcError>> {
    let lhs = match parse_operand(&io.ask("Enter first number: ")?) {
        Ok(value) => value,
        Err(err) => return Ok(Err(err)),
    };
    let rhs = match parse_operand(&io.ask("Enter second number: ")?) {
        Ok(value) => value,
        Err(err) => return Ok(Err(err)),
    };
    let operation = io.ask("Enter operation (+, -, *, /): ")?;

    Ok(evaluate(lhs, &operation, rhs))
}

fn evaluate(lhs: f64, operation: &str, rhs: f64) -> Result<String, CalcError> {
    let op: Operation = operation.parse()?;
    let result = op.apply(lhs, rhs)?;
    Ok(format!(
        "Result: {} {} {} = {}",
        format_number(lhs),
        op.symbol(),
        format_number(rhs),
        format_number(result)
    ))
}

fn error_message(err: &CalcError) -> &'static str {
    match err {
        CalcError::InvalidNumber(_) => "Error: Please enter valid numbers!",
        CalcError::InvalidOperation(_) => "Invalid operation! Please choose from +, -, *, /",
        CalcError::DivisionByZero => "Error: Division by zero is not allowed!",
    }
}
