use std::any::Any;
use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe, Location};

/// Panic text Rust emits for integer division by zero.
pub const DIVIDE_BY_ZERO_PANIC: &str = "attempt to divide by zero";
/// Panic text Rust emits for integer remainder by zero.
pub const REMAINDER_BY_ZERO_PANIC: &str =
    "attempt to calculate the remainder with a divisor of zero";
/// Panic text `bigdecimal` emits when a decimal is divided by zero.
pub const DECIMAL_DIVISION_BY_ZERO_PANIC: &str = "Division by zero";

/// Arithmetic division or modulo by zero, raised by function code that
/// checks its divisor instead of letting the operation panic.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DivisionByZero(pub Cow<'static, str>);

impl Default for DivisionByZero {
    fn default() -> Self {
        Self(Cow::Borrowed("division by zero"))
    }
}

/// Memory exhaustion signalled by function code or its allocator guard.
#[derive(thiserror::Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("memory exhausted")]
pub struct MemoryExhausted;

/// A panic caught from function code. Displays the panic message, or
/// nothing when the payload was not a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panic {
    message: Option<String>,
}

impl Panic {
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Panic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or_default())
    }
}

impl StdError for Panic {}

/// A failure caught while running function code.
///
/// Wraps the original error in an [`anyhow::Error`] (which owns the cause
/// chain and backtrace) and adds what anyhow erases: the runtime type name of
/// the original error and the place the failure was captured.
#[derive(Debug)]
pub struct Failure {
    error: anyhow::Error,
    type_name: &'static str,
    location: &'static Location<'static>,
}

impl Failure {
    #[track_caller]
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            error: anyhow::Error::new(error),
            type_name: short_type_name(std::any::type_name::<E>()),
            location: Location::caller(),
        }
    }

    /// Wraps a payload returned by [`std::panic::catch_unwind`].
    #[track_caller]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => Some(*message),
            Err(payload) => payload
                .downcast_ref::<&'static str>()
                .map(|message| (*message).to_string()),
        };
        if message.is_none() {
            tracing::trace!("panic payload carries no textual message");
        }
        Self::new(Panic { message })
    }

    /// Short runtime type name of the original failure, e.g. `"DomainError"`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn backtrace(&self) -> &Backtrace {
        self.error.backtrace()
    }

    /// The original error followed by its `source()` chain.
    pub fn chain(&self) -> anyhow::Chain<'_> {
        self.error.chain()
    }

    pub fn is_panic(&self) -> bool {
        self.downcast_ref::<Panic>().is_some()
    }

    pub fn panic_message(&self) -> Option<&str> {
        self.downcast_ref::<Panic>().and_then(Panic::message)
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    /// True for the division/remainder-by-zero panics raised by integer
    /// arithmetic and by `bigdecimal`.
    pub fn is_division_by_zero_panic(&self) -> bool {
        matches!(
            self.panic_message(),
            Some(DIVIDE_BY_ZERO_PANIC | REMAINDER_BY_ZERO_PANIC | DECIMAL_DIVISION_BY_ZERO_PANIC)
        )
    }

    /// Textual description of the failure; empty when it has none.
    ///
    /// A `Display` impl that panics is treated as having no description.
    pub fn description(&self) -> String {
        panic::catch_unwind(AssertUnwindSafe(|| self.error.to_string())).unwrap_or_default()
    }
}

impl<E> From<E> for Failure
where
    E: StdError + Send + Sync + 'static,
{
    #[track_caller]
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

/// `my_crate::errors::KeyLookup<T>` -> `KeyLookup`.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;
    use crate::domain::DomainError;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("inner failed")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    impl StdError for Inner {}

    #[test]
    fn short_type_name_strips_path_and_generics() {
        assert_eq!(short_type_name("a::b::KeyLookup"), "KeyLookup");
        assert_eq!(short_type_name("a::Wrapper<b::Inner>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }

    #[test]
    fn records_type_name_and_caller_location() {
        let line = line!() + 1;
        let failure = Failure::new(DomainError::invalid_argument("x"));
        assert_eq!(failure.type_name(), "DomainError");
        assert_eq!(failure.location().line(), line);
        assert!(failure.location().file().ends_with("failure.rs"));
        assert_eq!(failure.description(), "x");
        assert!(!failure.is_panic());
    }

    #[test]
    fn question_mark_converts_errors() {
        fn run(divisor: i32) -> Result<i32, Failure> {
            let quotient = 10_i32
                .checked_div(divisor)
                .ok_or_else(DivisionByZero::default)?;
            Ok(quotient)
        }
        assert!(matches!(run(2), Ok(5)));
        let failure = run(0).err();
        assert!(matches!(failure, Some(ref f) if f.downcast_ref::<DivisionByZero>().is_some()));
    }

    #[test]
    fn chain_follows_source_chain() {
        let failure = Failure::new(Outer(Inner));
        assert_eq!(failure.description(), "outer failed");
        let chain: Vec<String> = failure.chain().map(ToString::to_string).collect();
        assert_eq!(chain, vec!["outer failed".to_string(), "inner failed".to_string()]);
    }

    #[test]
    fn panic_payloads_keep_their_message() {
        let failure = Failure::from_panic(Box::new("boom"));
        assert!(failure.is_panic());
        assert_eq!(failure.type_name(), "Panic");
        assert_eq!(failure.panic_message(), Some("boom"));

        let failure = Failure::from_panic(Box::new(String::from("owned boom")));
        assert_eq!(failure.description(), "owned boom");

        let failure = Failure::from_panic(Box::new(17_u32));
        assert_eq!(failure.panic_message(), None);
        assert_eq!(failure.description(), "");
        assert_eq!(failure.chain().count(), 1);
    }

    #[test]
    fn runtime_division_panics_are_recognised() {
        let divisor = std::hint::black_box(0_i32);
        let payload = std::panic::catch_unwind(|| 10 / divisor).err();
        let failure = payload.map(Failure::from_panic);
        assert!(matches!(failure, Some(ref f) if f.is_division_by_zero_panic()));

        let payload = std::panic::catch_unwind(|| 10 % divisor).err();
        let failure = payload.map(Failure::from_panic);
        assert!(matches!(failure, Some(ref f) if f.is_division_by_zero_panic()));

        assert!(!Failure::from_panic(Box::new("other")).is_division_by_zero_panic());
    }

    #[test]
    fn decimal_division_panics_are_recognised() {
        let payload = std::panic::catch_unwind(|| {
            bigdecimal::BigDecimal::from(1_i64) / bigdecimal::BigDecimal::from(0_i64)
        })
        .err();
        let failure = payload.map(Failure::from_panic);
        assert!(matches!(failure, Some(ref f) if f.is_division_by_zero_panic()));
    }
}
