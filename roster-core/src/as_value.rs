use crate::{Error, Passive, Result, Value, truncate_long};
use anyhow::Context;
use std::any;
use time::{
    Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

/// Conversion between native Rust types and the dynamically typed [`Value`].
///
/// It is used in both directions: `as_value` when binding parameters or
/// rendering literals, `try_from_value` when decoding a row returned by a
/// driver.
///
/// # Error semantics
/// - Numeric narrowing is range checked, the error message includes both the
///   offending value and the target type.
/// - Drivers without native temporal types hand back `Value::Varchar`, those
///   are parsed with [`AsValue::parse`].
///
/// ```rust
/// use roster_core::{AsValue, Value};
/// let v = 42i32.as_value();
/// assert!(matches!(v, Value::Int32(Some(42))));
/// let n: i32 = AsValue::try_from_value(v).unwrap();
/// assert_eq!(n, 42);
/// ```
pub trait AsValue {
    /// The empty variant used to describe the type.
    fn as_empty_value() -> Value;
    /// Convert into the owned [`Value`] representation.
    fn as_value(self) -> Value;
    /// Attempt to convert a [`Value`] into `Self`.
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
    /// Parse the whole input.
    fn parse(input: &str) -> Result<Self>
    where
        Self: Sized,
    {
        Err(Error::msg(format!(
            "Cannot parse `{}` as {}",
            truncate_long!(input),
            any::type_name::<Self>()
        )))
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

fn conversion_error<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert {:?} to {}",
        value,
        any::type_name::<T>()
    ))
}

impl AsValue for bool {
    fn as_empty_value() -> Value {
        Value::Boolean(None)
    }
    fn as_value(self) -> Value {
        Value::Boolean(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Boolean(Some(v)) => Ok(v),
            Value::Int32(Some(v)) => Ok(v != 0),
            Value::Int64(Some(v)) => Ok(v != 0),
            Value::Varchar(Some(ref v)) => Self::parse(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            v if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
            v if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
            _ => Err(Error::msg(format!(
                "Cannot parse `{}` as bool",
                truncate_long!(input)
            ))),
        }
    }
}

impl AsValue for i32 {
    fn as_empty_value() -> Value {
        Value::Int32(None)
    }
    fn as_value(self) -> Value {
        Value::Int32(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int32(Some(v)) => Ok(v),
            Value::Int64(Some(v)) => i32::try_from(v)
                .map_err(|_| Error::msg(format!("Value {v}: i64 is out of range for i32"))),
            Value::Varchar(Some(ref v)) => Self::parse(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        input
            .trim()
            .parse()
            .with_context(|| format!("Cannot parse `{}` as i32", truncate_long!(input)))
    }
}

impl AsValue for i64 {
    fn as_empty_value() -> Value {
        Value::Int64(None)
    }
    fn as_value(self) -> Value {
        Value::Int64(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int64(Some(v)) => Ok(v),
            Value::Int32(Some(v)) => Ok(v as _),
            Value::Varchar(Some(ref v)) => Self::parse(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        input
            .trim()
            .parse()
            .with_context(|| format!("Cannot parse `{}` as i64", truncate_long!(input)))
    }
}

impl AsValue for f64 {
    fn as_empty_value() -> Value {
        Value::Float64(None)
    }
    fn as_value(self) -> Value {
        Value::Float64(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float64(Some(v)) => Ok(v),
            Value::Int32(Some(v)) => Ok(v as _),
            Value::Int64(Some(v)) => Ok(v as _),
            Value::Varchar(Some(ref v)) => Self::parse(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        input
            .trim()
            .parse()
            .with_context(|| format!("Cannot parse `{}` as f64", truncate_long!(input)))
    }
}

impl AsValue for String {
    fn as_empty_value() -> Value {
        Value::Varchar(None)
    }
    fn as_value(self) -> Value {
        Value::Varchar(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Varchar(Some(v)) => Ok(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        Ok(input.into())
    }
}

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

const TIMESTAMP_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
];

impl AsValue for Date {
    fn as_empty_value() -> Value {
        Value::Date(None)
    }
    fn as_value(self) -> Value {
        Value::Date(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(Some(v)) => Ok(v),
            Value::Timestamp(Some(v)) => Ok(v.date()),
            Value::Varchar(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        Date::parse(input.trim(), DATE_FORMAT)
            .with_context(|| format!("Cannot parse `{}` as a date", truncate_long!(input)))
    }
}

impl AsValue for PrimitiveDateTime {
    fn as_empty_value() -> Value {
        Value::Timestamp(None)
    }
    fn as_value(self) -> Value {
        Value::Timestamp(Some(self))
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(Some(v)) => Ok(v),
            Value::Varchar(Some(ref v)) => <Self as AsValue>::parse(v),
            _ => Err(conversion_error::<Self>(&value)),
        }
    }
    fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| PrimitiveDateTime::parse(trimmed, *format).ok())
            .ok_or_else(|| {
                Error::msg(format!(
                    "Cannot parse `{}` as a timestamp",
                    truncate_long!(input)
                ))
            })
    }
}

impl<T: AsValue> AsValue for Passive<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Passive::Set(v) => v.as_value(),
            Passive::NotSet => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(Passive::Set(<T as AsValue>::try_from_value(value)?))
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(<T as AsValue>::try_from_value(value)?)
        })
    }
}
