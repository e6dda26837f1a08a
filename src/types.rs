use crate::decimal::Decimal;

/// Engine type a boundary value is tagged with, named the way the engine
/// spells it (e.g. `"DOUBLE"`).
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
pub enum ValueType {
    Boolean,
    Bigint,
    Integer,
    Smallint,
    Tinyint,
    Double,
    Real,
    Decimal,
    Varchar,
    Varbinary,
}

/// A scalar result produced by function code, tagged with its type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Bigint(i64),
    Integer(i32),
    Smallint(i16),
    Tinyint(i8),
    Double(f64),
    Real(f32),
    Decimal(Decimal),
    Varchar(String),
    Varbinary(Vec<u8>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Bigint(_) => ValueType::Bigint,
            Self::Integer(_) => ValueType::Integer,
            Self::Smallint(_) => ValueType::Smallint,
            Self::Tinyint(_) => ValueType::Tinyint,
            Self::Double(_) => ValueType::Double,
            Self::Real(_) => ValueType::Real,
            Self::Decimal(_) => ValueType::Decimal,
            Self::Varchar(_) => ValueType::Varchar,
            Self::Varbinary(_) => ValueType::Varbinary,
        }
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Bigint(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Varchar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_types_use_engine_names() {
        assert_eq!(Value::from(2.5).value_type().to_string(), "DOUBLE");
        assert_eq!(Value::Real(1.0).value_type().to_string(), "REAL");
        assert_eq!(Value::from(7_i64).value_type().as_ref(), "BIGINT");
        assert_eq!(
            Value::from("x".to_string()).value_type(),
            ValueType::Varchar
        );
        assert_eq!(Value::Varbinary(vec![1]).value_type().to_string(), "VARBINARY");
        assert_eq!(
            "DECIMAL".parse::<ValueType>().ok(),
            Some(ValueType::Decimal)
        );
    }
}
