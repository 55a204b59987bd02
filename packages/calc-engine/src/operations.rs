use crate::error::CalcError;
use std::fmt;

/// The four supported binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    /// Exact match only; callers trim beforehand.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        match self {
            Operation::Add => Ok(add(a, b)),
            Operation::Subtract => Ok(subtract(a, b)),
            Operation::Multiply => Ok(multiply(a, b)),
            Operation::Divide => divide(a, b),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Fails for both `0.0` and `-0.0` divisors.
pub fn divide(a: f64, b: f64) -> Result<f64, CalcError> {
    if b == 0.0 {
        return Err(CalcError::DivisionByZero);
    }
    Ok(a / b)
}

/// Dispatches on the textual symbol.
///
/// Symbols are expected to have been validated already; anything outside
/// `+ - * /` yields [`CalcError::UnsupportedOperation`].
pub fn calculate(symbol: &str, a: f64, b: f64) -> Result<f64, CalcError> {
    let operation = Operation::from_symbol(symbol)
        .ok_or_else(|| CalcError::UnsupportedOperation(symbol.to_string()))?;
    operation.apply(a, b)
}

/// Renders a result for the `Result: ...` line. Integral values keep a
/// trailing `.0`, infinities print as `inf` / `-inf`.
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}
