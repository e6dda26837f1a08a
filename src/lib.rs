#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod classify;
pub mod codes;
pub mod decimal;
pub mod domain;
pub mod error;
pub mod failure;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use classify::conversion::{conversion_failure, decimal_result_text};
pub use classify::{
    Classification, ClassifyOptions, OUT_OF_MEMORY_MESSAGE, classify, classify_with,
};
pub use codes::ErrorCode;
pub use decimal::{Decimal, MAX_CANONICAL_TEXT_LEN, canonical_decimal_text};
pub use domain::DomainError;
pub use error::Error;
pub use failure::{DivisionByZero, Failure, MemoryExhausted, Panic};
pub use types::{Value, ValueType};
