use crate::codes::ErrorCode;

/// A failure raised on purpose by function code, carrying the engine error
/// code it should be reported under.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    InvalidFunctionArgument(String),

    #[error("{0}")]
    NumericValueOutOfRange(String),

    #[error("{message}")]
    Other { code: ErrorCode, message: String },
}

impl DomainError {
    /// Builds the error for an arbitrary taxonomy code, preferring the named
    /// variants where one exists.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            ErrorCode::InvalidFunctionArgument => Self::InvalidFunctionArgument(message),
            ErrorCode::NumericValueOutOfRange => Self::NumericValueOutOfRange(message),
            code => Self::Other { code, message },
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidFunctionArgument(message.into())
    }

    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self::NumericValueOutOfRange(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidFunctionArgument(_) => ErrorCode::InvalidFunctionArgument,
            Self::NumericValueOutOfRange(_) => ErrorCode::NumericValueOutOfRange,
            Self::Other { code, .. } => *code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidFunctionArgument(message)
            | Self::NumericValueOutOfRange(message)
            | Self::Other { message, .. } => message,
        }
    }
}
