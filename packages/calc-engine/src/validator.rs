use crate::error::CalcError;
use crate::operations::Operation;
use tracing::debug;

pub const SUPPORTED_OPERATIONS: [&str; 4] = ["+", "-", "*", "/"];

pub const QUIT_COMMANDS: [&str; 3] = ["quit", "exit", "q"];

pub fn validate_operation(input: &str) -> Result<Operation, CalcError> {
    let trimmed = input.trim();
    Operation::from_symbol(trimmed).ok_or_else(|| {
        debug!(input = trimmed, "rejected operation");
        CalcError::InvalidOperation(trimmed.to_string())
    })
}

/// Parses a decimal numeral with Rust's `f64` grammar.
///
/// Signed infinities are accepted, NaN is not.
pub fn validate_number(input: &str) -> Result<f64, CalcError> {
    let trimmed = input.trim();
    let invalid = || {
        debug!(input = trimmed, "rejected number");
        CalcError::InvalidNumber(trimmed.to_string())
    };

    if trimmed.is_empty() {
        return Err(invalid());
    }

    match trimmed.parse::<f64>() {
        Ok(value) if !value.is_nan() => Ok(value),
        _ => Err(invalid()),
    }
}

pub fn is_quit_command(input: &str) -> bool {
    let command = sanitize_input(input);
    QUIT_COMMANDS.contains(&command.as_str())
}

pub fn sanitize_input(input: &str) -> String {
    input.trim().to_lowercase()
}
