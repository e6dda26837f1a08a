use std::fmt;
use std::iter;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::error::Error;
use crate::types::Value;

/// Longest canonical text the boundary will render, in bytes.
pub const MAX_CANONICAL_TEXT_LEN: usize = 1 << 20;

/// An arbitrary-precision decimal as produced by function code.
///
/// Non-finite sentinels are representable so they can be rejected at the
/// boundary instead of being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decimal {
    Finite(BigDecimal),
    /// Zero written with a leading minus sign. `BigDecimal` has no signed
    /// zero, so the sign and scale are kept here.
    NegativeZero { scale: i64 },
    Infinite { negative: bool },
    NaN { signaling: bool },
}

impl Decimal {
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_) | Self::NegativeZero { .. })
    }

    /// Digits after the radix point; negative for values like `1E+3`.
    pub fn scale(&self) -> Option<i64> {
        match self {
            Self::Finite(value) => Some(value.as_bigint_and_exponent().1),
            Self::NegativeZero { scale } => Some(*scale),
            Self::Infinite { .. } | Self::NaN { .. } => None,
        }
    }

    /// Fixed-point text with the exact scale, never exponent notation.
    ///
    /// Fails instead of allocating when the text would exceed
    /// [`MAX_CANONICAL_TEXT_LEN`].
    pub fn to_canonical_text(&self) -> Result<String, Error> {
        match self {
            Self::Finite(value) => {
                let (unscaled, scale) = value.as_bigint_and_exponent();
                let rendered = unscaled.to_string();
                match rendered.strip_prefix('-') {
                    Some(digits) => fixed_point(true, digits, scale),
                    None => fixed_point(false, &rendered, scale),
                }
            }
            Self::NegativeZero { scale } => fixed_point(true, "0", *scale),
            Self::Infinite { .. } | Self::NaN { .. } => Err(Error::InvalidArgument {
                reason: format!("Decimal is not finite: {self}"),
            }),
        }
    }
}

/// Canonical text for a decimal result crossing into the engine.
///
/// Anything that is not tagged as a decimal is rejected, including binary
/// floats whose value happens to be representable.
pub fn canonical_decimal_text(value: &Value) -> Result<String, Error> {
    match value {
        Value::Decimal(decimal) => decimal.to_canonical_text(),
        other => Err(Error::InvalidArgument {
            reason: format!("Not a Decimal: {}", other.value_type()),
        }),
    }
}

fn fixed_point(negative: bool, digits: &str, scale: i64) -> Result<String, Error> {
    // Zero with a positive exponent has no fixed-point spelling other than 0.
    if digits == "0" && scale <= 0 {
        return Ok(if negative { "-0" } else { "0" }.to_string());
    }

    let too_long = || Error::InvalidArgument {
        reason: format!(
            "Decimal with scale {scale} exceeds {MAX_CANONICAL_TEXT_LEN} bytes as fixed-point text"
        ),
    };
    // Sign, "0." prefix and digits on top of the zero padding.
    let zeros = usize::try_from(scale.unsigned_abs()).map_err(|_| too_long())?;
    let len = digits
        .len()
        .checked_add(zeros)
        .and_then(|len| len.checked_add(3))
        .filter(|len| *len <= MAX_CANONICAL_TEXT_LEN)
        .ok_or_else(too_long)?;

    let mut out = String::new();
    out.try_reserve(len).map_err(|_| too_long())?;
    if negative {
        out.push('-');
    }
    if scale <= 0 {
        out.push_str(digits);
        out.extend(iter::repeat_n('0', zeros));
        return Ok(out);
    }

    if digits.len() > zeros {
        let (whole, fraction) = digits.split_at(digits.len() - zeros);
        out.push_str(whole);
        out.push('.');
        out.push_str(fraction);
    } else {
        out.push_str("0.");
        out.extend(iter::repeat_n('0', zeros - digits.len()));
        out.push_str(digits);
    }
    Ok(out)
}

impl FromStr for Decimal {
    type Err = Error;

    /// Accepts plain and exponent notation plus the `Infinity`, `Inf`, `NaN`
    /// and `sNaN` sentinels (optionally signed, any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        if unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity") {
            return Ok(Self::Infinite { negative });
        }
        if unsigned.eq_ignore_ascii_case("nan") {
            return Ok(Self::NaN { signaling: false });
        }
        if unsigned.eq_ignore_ascii_case("snan") {
            return Ok(Self::NaN { signaling: true });
        }
        if unsigned.is_empty() {
            return Err(Error::Parse {
                reason: format!("invalid decimal literal {s:?}"),
            });
        }

        let value = BigDecimal::from_str(text).map_err(|e| Error::Parse {
            reason: format!("invalid decimal literal {s:?}: {e}"),
        })?;
        let (unscaled, scale) = value.as_bigint_and_exponent();
        if negative && unscaled.bits() == 0 {
            return Ok(Self::NegativeZero { scale });
        }
        Ok(Self::Finite(value))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(value) => match self.to_canonical_text() {
                Ok(text) => f.write_str(&text),
                // Too long for fixed point: fall back to exponent notation.
                Err(_) => {
                    let (unscaled, scale) = value.as_bigint_and_exponent();
                    write!(f, "{unscaled}E{}", -i128::from(scale))
                }
            },
            Self::NegativeZero { scale } => match self.to_canonical_text() {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "-0E{}", -i128::from(*scale)),
            },
            Self::Infinite { negative: false } => f.write_str("Infinity"),
            Self::Infinite { negative: true } => f.write_str("-Infinity"),
            Self::NaN { signaling: false } => f.write_str("NaN"),
            Self::NaN { signaling: true } => f.write_str("sNaN"),
        }
    }
}

impl From<BigDecimal> for Decimal {
    fn from(value: BigDecimal) -> Self {
        Self::Finite(value)
    }
}
