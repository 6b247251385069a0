use thiserror::Error;

/// Malformed user input (reported to the user, never fatal).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),

    #[error("not a finite number: {0:?}")]
    InvalidAmount(String),

    #[error("not a non-negative integer: {0:?}")]
    InvalidQuantity(String),

    #[error("not an integer: {0:?}")]
    InvalidIndex(String),
}

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// Input closed while a line was expected.
    #[error("end of input")]
    EndOfInput,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
