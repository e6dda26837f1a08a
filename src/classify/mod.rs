pub mod conversion;
pub mod trace;

use std::borrow::Cow;
use std::collections::TryReserveError;

use serde::Serialize;

use crate::codes::ErrorCode;
use crate::domain::DomainError;
use crate::failure::{DivisionByZero, Failure, MemoryExhausted};

/// Fixed message for memory exhaustion. Borrowed so that reporting it never
/// allocates.
pub const OUT_OF_MEMORY_MESSAGE: &str = "Out of memory";

const DEFAULT_MAX_TRACE_LEN: usize = 64 * 1024;

/// What the engine is told about a failed function call.
///
/// `code` and `message` are shown to the end user; `trace` is kept for
/// operators only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub code: ErrorCode,
    pub message: Cow<'static, str>,
    pub trace: String,
}

impl Classification {
    /// The `(code, message, trace)` triple in wire form.
    pub fn into_parts(self) -> (i32, Cow<'static, str>, String) {
        (self.code.code(), self.message, self.trace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ClassifyOptions {
    /// Upper bound on the rendered trace, in bytes.
    pub max_trace_len: usize,
    /// Append the captured backtrace, when one was captured.
    pub include_backtrace: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            max_trace_len: DEFAULT_MAX_TRACE_LEN,
            include_backtrace: true,
        }
    }
}

pub fn classify(failure: &Failure) -> Classification {
    classify_with(failure, &ClassifyOptions::default())
}

/// Maps a caught failure to the engine's error taxonomy. Total: every
/// failure yields exactly one classification and this never panics.
pub fn classify_with(failure: &Failure, options: &ClassifyOptions) -> Classification {
    let rule = matching_rule(failure);
    if let Rule::MemoryExhausted = rule {
        return Classification {
            code: ErrorCode::ExceededFunctionMemoryLimit,
            message: Cow::Borrowed(OUT_OF_MEMORY_MESSAGE),
            trace: trace::render_brief(failure, options),
        };
    }

    // User `Display` code runs here and nowhere else.
    let description = failure.description();
    let trace = trace::render(failure, &description, options);
    let (code, message) = match rule {
        Rule::DivisionByZero => (ErrorCode::DivisionByZero, Cow::Owned(description)),
        Rule::Domain(domain) => (domain.code(), Cow::Owned(domain.message().to_string())),
        Rule::MemoryExhausted | Rule::Unclassified => {
            let type_name = failure.type_name();
            let message = if description.is_empty() {
                Cow::Borrowed(type_name)
            } else {
                Cow::Owned(format!("{type_name}: {description}"))
            };
            (ErrorCode::FunctionImplementationError, message)
        }
    };
    Classification {
        code,
        message,
        trace,
    }
}

enum Rule<'a> {
    DivisionByZero,
    Domain(&'a DomainError),
    MemoryExhausted,
    Unclassified,
}

// First match wins; the order is part of the contract.
fn matching_rule(failure: &Failure) -> Rule<'_> {
    if failure.downcast_ref::<DivisionByZero>().is_some() || failure.is_division_by_zero_panic() {
        return Rule::DivisionByZero;
    }
    if let Some(domain) = failure.downcast_ref::<DomainError>() {
        return Rule::Domain(domain);
    }
    if failure.downcast_ref::<MemoryExhausted>().is_some()
        || failure.downcast_ref::<TryReserveError>().is_some()
    {
        return Rule::MemoryExhausted;
    }
    Rule::Unclassified
}
