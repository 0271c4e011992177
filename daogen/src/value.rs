//! Column values exchanged between generated code and the statement executor.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::errors::{DaoError, DaoResult};

/// A single column or parameter value.
///
/// `Composite` carries the nested values of an embedded identifier, keyed by
/// sub-property name; it never appears in a row or a statement parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Decimal(Decimal),
    Text(String),
    Composite(Vec<(String, Value)>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Decimal(_) => "decimal",
            Value::Text(_) => "text",
            Value::Composite(_) => "composite",
        }
    }

    /// Looks up a component of a composite value.
    pub fn component(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Composite(parts) => parts.iter().find(|(part, _)| part == name).map(|(_, value)| value),
            _ => None,
        }
    }
}

/// Conversion of a property value into a [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Conversion of a [`Value`] back into a property type.
///
/// Implement this for custom property types; they are read as opaque values
/// by generated row mappers and converted through this trait.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> DaoResult<Self>;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> DaoResult<Self> {
        Ok(value)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(value) => value.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> DaoResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> DaoResult<Self> {
        match value {
            Value::Bool(flag) => Ok(flag),
            Value::Integer(number) => Ok(number != 0),
            other => Err(DaoError::type_mismatch("bool", &other)),
        }
    }
}

macro_rules! integer_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> DaoResult<Self> {
                    match value {
                        Value::Integer(number) => <$ty>::try_from(number).map_err(|_| DaoError::OutOfRange {
                            target: stringify!($ty),
                            value: number.to_string(),
                        }),
                        Value::Decimal(decimal) if decimal.fract().is_zero() => decimal
                            .to_i64()
                            .and_then(|number| <$ty>::try_from(number).ok())
                            .ok_or_else(|| DaoError::OutOfRange {
                                target: stringify!($ty),
                                value: decimal.to_string(),
                            }),
                        other => Err(DaoError::type_mismatch(stringify!($ty), &other)),
                    }
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Real(f64::from(*self))
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> DaoResult<Self> {
        f64::from_value(value).map(|number| number as f32)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> DaoResult<Self> {
        match value {
            Value::Real(number) => Ok(number),
            Value::Integer(number) => Ok(number as f64),
            Value::Decimal(decimal) => decimal.to_f64().ok_or_else(|| DaoError::OutOfRange {
                target: "f64",
                value: decimal.to_string(),
            }),
            other => Err(DaoError::type_mismatch("f64", &other)),
        }
    }
}

impl ToValue for Decimal {
    fn to_value(&self) -> Value {
        Value::Decimal(*self)
    }
}

impl FromValue for Decimal {
    fn from_value(value: Value) -> DaoResult<Self> {
        match value {
            Value::Decimal(decimal) => Ok(decimal),
            Value::Integer(number) => Ok(Decimal::from(number)),
            Value::Real(number) => Decimal::from_f64(number).ok_or_else(|| DaoError::OutOfRange {
                target: "Decimal",
                value: number.to_string(),
            }),
            other => Err(DaoError::type_mismatch("Decimal", &other)),
        }
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> DaoResult<Self> {
        match value {
            Value::Text(text) => Ok(text),
            other => Err(DaoError::type_mismatch("String", &other)),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Uniform access to an optional aggregate or referenced entity, whatever
/// shape its accessor returns (`Option<T>`, `Option<&T>` or `&Option<T>`).
pub trait Reference<T> {
    fn referenced(&self) -> Option<&T>;
}

impl<T> Reference<T> for Option<T> {
    fn referenced(&self) -> Option<&T> {
        self.as_ref()
    }
}

impl<T> Reference<T> for Option<&T> {
    fn referenced(&self) -> Option<&T> {
        *self
    }
}

impl<T, R: Reference<T> + ?Sized> Reference<T> for &R {
    fn referenced(&self) -> Option<&T> {
        (**self).referenced()
    }
}
