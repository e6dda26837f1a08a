use serde::{Serialize, Serializer};

use crate::error::Error;

/// Error codes understood by the host query engine.
///
/// The numeric values are the wire contract with the engine and must match
/// its own numbering exactly. Names render in the engine's
/// `SCREAMING_SNAKE_CASE` form (e.g. `"DIVISION_BY_ZERO"`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ErrorCode {
    InvalidFunctionArgument = 7,
    DivisionByZero = 8,
    InvalidCastArgument = 9,
    NotSupported = 13,
    NumericValueOutOfRange = 19,
    ExceededFunctionMemoryLimit = 37,
    FunctionImplementationError = 65549,
}

impl ErrorCode {
    pub const ALL: [Self; 7] = [
        Self::InvalidFunctionArgument,
        Self::DivisionByZero,
        Self::InvalidCastArgument,
        Self::NotSupported,
        Self::NumericValueOutOfRange,
        Self::ExceededFunctionMemoryLimit,
        Self::FunctionImplementationError,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl TryFrom<i32> for ErrorCode {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(Error::UnknownErrorCode { code })
    }
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Serialized as the bare integer code, which is what the engine expects.
impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}
