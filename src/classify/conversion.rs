use std::borrow::Cow;

use crate::classify::{Classification, ClassifyOptions, trace};
use crate::codes::ErrorCode;
use crate::decimal::canonical_decimal_text;
use crate::failure::Failure;
use crate::types::{Value, ValueType};

/// Report for a function result that could not be converted to the declared
/// result type. Always an implementation error: the function returned
/// something its signature does not allow.
pub fn conversion_failure(
    actual: ValueType,
    target: ValueType,
    cause: &Failure,
    options: &ClassifyOptions,
) -> Classification {
    tracing::debug!(
        %actual,
        %target,
        cause = cause.type_name(),
        "function result failed conversion"
    );

    let mut message = format!(
        "Failed to convert result type '{actual}' to type {target}: {}",
        cause.type_name()
    );
    let description = cause.description();
    if !description.is_empty() {
        message.push_str(": ");
        message.push_str(&description);
    }

    Classification {
        code: ErrorCode::FunctionImplementationError,
        message: Cow::Owned(message),
        trace: trace::render(cause, &description, options),
    }
}

/// Canonical text for a function result declared as `DECIMAL`.
pub fn decimal_result_text(
    value: &Value,
    options: &ClassifyOptions,
) -> Result<String, Classification> {
    canonical_decimal_text(value).map_err(|err| {
        conversion_failure(
            value.value_type(),
            ValueType::Decimal,
            &Failure::new(err),
            options,
        )
    })
}
