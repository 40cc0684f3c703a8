//! Four-function calculator arithmetic.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Calculator input and arithmetic failures.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Operand text is not a number.
    InvalidNumber(String),
    /// Operator is not one of `+ - * /`.
    InvalidOperation(String),
    DivisionByZero,
}

impl Display for CalcError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber(value) => write!(f, "`{value}` is not a valid number"),
            Self::InvalidOperation(value) => {
                write!(f, "unknown operation `{value}`; expected +, -, *, /")
            }
            Self::DivisionByZero => write!(f, "division by zero is not allowed"),
        }
    }
}

impl Error for CalcError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Applies the operation. Division by zero is detected before dividing.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Self::Add => Ok(lhs + rhs),
            Self::Subtract => Ok(lhs - rhs),
            Self::Multiply => Ok(lhs * rhs),
            Self::Divide if rhs == 0.0 => Err(CalcError::DivisionByZero),
            Self::Divide => Ok(lhs / rhs),
        }
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            other => Err(CalcError::InvalidOperation(other.to_string())),
        }
    }
}

/// Parses one operand, rejecting non-finite input such as `nan` or `inf`.
pub fn parse_operand(value: &str) -> Result<f64, CalcError> {
    let trimmed = value.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| CalcError::InvalidNumber(trimmed.to_string()))
}

/// Renders a number the way the calculator prints it: integral values keep
/// one decimal place (`3.0`), others use the shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
