//! Conversion of raw argument text into typed values.

use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::Error::{CoercionFormat, CoercionOverflow, UnsupportedType};
use crate::error::{Error, Result};
use crate::value::{Value, ValueType};

/// Coerces `raw` into a value of `value_type`.
///
/// Booleans are always `true`: only a flag's presence is meaningful, its
/// absence is handled by the binder.
///
/// # Errors
///
/// Returns [`CoercionOverflow`] when a number does not fit the declared width,
/// [`CoercionFormat`] when the text is not a number, and [`UnsupportedType`]
/// for types that cannot come from an argument.
pub fn coerce(raw: &str, value_type: ValueType) -> Result<Value> {
    match value_type {
        ValueType::Bool => Ok(Value::Bool(true)),
        ValueType::String => Ok(Value::String(raw.to_string())),
        ValueType::Int => parse_int::<isize>(raw, value_type).map(Value::Int),
        ValueType::Int8 => parse_int::<i8>(raw, value_type).map(Value::Int8),
        ValueType::Int16 => parse_int::<i16>(raw, value_type).map(Value::Int16),
        ValueType::Int32 => parse_int::<i32>(raw, value_type).map(Value::Int32),
        ValueType::Int64 => parse_int::<i64>(raw, value_type).map(Value::Int64),
        ValueType::Float32 => parse_float::<f32>(raw, value_type).map(Value::Float32),
        ValueType::Float64 => parse_float::<f64>(raw, value_type).map(Value::Float64),
        ValueType::Reader => Err(UnsupportedType(value_type)),
    }
}

fn parse_int<T>(raw: &str, value_type: ValueType) -> Result<T>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.parse::<T>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoercionOverflow {
            value: raw.to_string(),
            value_type,
        },
        _ => format_error(raw, value_type),
    })
}

trait Float: FromStr {
    fn is_infinite(&self) -> bool;
}

impl Float for f32 {
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

impl Float for f64 {
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

fn parse_float<T: Float>(raw: &str, value_type: ValueType) -> Result<T> {
    let value = raw
        .parse::<T>()
        .map_err(|_| format_error(raw, value_type))?;

    // A finite literal too large for the width parses as infinity
    if value.is_infinite() && !raw.to_ascii_lowercase().contains("inf") {
        return Err(CoercionOverflow {
            value: raw.to_string(),
            value_type,
        });
    }

    Ok(value)
}

fn format_error(raw: &str, value_type: ValueType) -> Error {
    CoercionFormat {
        value: raw.to_string(),
        value_type,
    }
}
