use thiserror::Error;

/// Everything that can go wrong between reading a line and printing a result.
///
/// The `Display` output of each variant is the exact message shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid operation: '{0}'. Supported operations: +, -, *, /")]
    InvalidOperation(String),

    #[error("Invalid number: '{0}'. Please enter a valid number.")]
    InvalidNumber(String),

    #[error("Division by zero is not allowed.")]
    DivisionByZero,

    /// Raised by the dispatcher when handed a symbol that never went through
    /// validation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}
