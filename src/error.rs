#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("parse error: {reason}")]
    Parse { reason: String },

    #[error("unknown error code: {code}")]
    UnknownErrorCode { code: i32 },
}
