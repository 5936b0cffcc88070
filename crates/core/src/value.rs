//! Value types and typed values.
//!
//! [`ValueType`] is the closed set of parameter types a command can declare.
//! [`Value`] is a bound, typed input and [`Output`] is what a handler hands
//! back for serialization.

use std::any::Any;
use std::fmt::{Debug, Display, Formatter};
use std::io::Read;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type tag of a declared parameter.
///
/// Tags render and deserialize in lowercase (`"int8"`, `"float64"`, ...).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Bool,
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Full contents of standard input. Never parsed from an argument token.
    Reader,
}

impl ValueType {
    pub const ALL: [ValueType; 10] = [
        ValueType::Bool,
        ValueType::String,
        ValueType::Int,
        ValueType::Int8,
        ValueType::Int16,
        ValueType::Int32,
        ValueType::Int64,
        ValueType::Float32,
        ValueType::Float64,
        ValueType::Reader,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Int8 => "int8",
            ValueType::Int16 => "int16",
            ValueType::Int32 => "int32",
            ValueType::Int64 => "int64",
            ValueType::Float32 => "float32",
            ValueType::Float64 => "float64",
            ValueType::Reader => "reader",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(tag: &str) -> std::result::Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|value_type| value_type.as_str() == tag)
            .ok_or_else(|| format!("unknown value type `{tag}`"))
    }
}

/// A typed value bound to a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Reader(Vec<u8>),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
            Value::Int(_) => ValueType::Int,
            Value::Int8(_) => ValueType::Int8,
            Value::Int16(_) => ValueType::Int16,
            Value::Int32(_) => ValueType::Int32,
            Value::Int64(_) => ValueType::Int64,
            Value::Float32(_) => ValueType::Float32,
            Value::Float64(_) => ValueType::Float64,
            Value::Reader(_) => ValueType::Reader,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Reader(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Any integer variant widened to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(value) => i64::try_from(*value).ok(),
            Value::Int8(value) => Some(i64::from(*value)),
            Value::Int16(value) => Some(i64::from(*value)),
            Value::Int32(value) => Some(i64::from(*value)),
            Value::Int64(value) => Some(*value),
            _ => None,
        }
    }

    /// Any float variant widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float32(value) => Some(f64::from(*value)),
            Value::Float64(value) => Some(*value),
            _ => None,
        }
    }
}

/// The text form of a value, shared by output serialization and error
/// messages.
///
/// Floats use the shortest text that reads back to the same value at their
/// width, switching to exponent form at extreme magnitudes (`1e300`). Whole
/// floats drop the trailing `.0`.
impl Display for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => write!(formatter, "{value}"),
            Value::String(value) => formatter.write_str(value),
            Value::Int(value) => write!(formatter, "{value}"),
            Value::Int8(value) => write!(formatter, "{value}"),
            Value::Int16(value) => write!(formatter, "{value}"),
            Value::Int32(value) => write!(formatter, "{value}"),
            Value::Int64(value) => write!(formatter, "{value}"),
            Value::Float32(value) => formatter.write_str(&float_text(value)),
            Value::Float64(value) => formatter.write_str(&float_text(value)),
            Value::Reader(bytes) => formatter.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

fn float_text<F: Debug>(value: F) -> String {
    let text = format!("{value:?}");
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

macro_rules! impl_from_primitive {
    ($($primitive:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$primitive> for Value {
                fn from(value: $primitive) -> Self {
                    Value::$variant(value)
                }
            }

            impl From<$primitive> for Output {
                fn from(value: $primitive) -> Self {
                    Output::Value(Value::$variant(value))
                }
            }
        )*
    };
}

impl_from_primitive! {
    bool => Bool,
    String => String,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<&str> for Output {
    fn from(value: &str) -> Self {
        Output::Value(Value::from(value))
    }
}

/// The single value a handler returns.
pub enum Output {
    Value(Value),
    /// A byte stream, copied to the output unchanged.
    Reader(Box<dyn Read>),
    /// A value of a shape that cannot be serialized, kept for error reporting.
    Unsupported { type_name: &'static str },
}

impl Output {
    pub fn reader<R: Read + 'static>(reader: R) -> Self {
        Output::Reader(Box::new(reader))
    }

    /// Wraps an arbitrary value, recognising the supported shapes.
    ///
    /// Anything that is not a supported primitive or a [`Value`] keeps only its
    /// type name and fails at serialization.
    pub fn from_any<T: Any>(value: T) -> Self {
        let boxed: Box<dyn Any> = Box::new(value);

        macro_rules! downcast {
            ($boxed:ident, $($primitive:ty),*) => {
                $(
                    let $boxed = match $boxed.downcast::<$primitive>() {
                        Ok(value) => return Output::Value(Value::from(*value)),
                        Err(other) => other,
                    };
                )*
            };
        }

        downcast!(boxed, bool, String, &'static str, isize, i8, i16, i32, i64, f32, f64);

        let boxed = match boxed.downcast::<Box<dyn Read>>() {
            Ok(reader) => return Output::Reader(*reader),
            Err(other) => other,
        };

        match boxed.downcast::<Value>() {
            Ok(value) => Output::Value(*value),
            Err(_) => Output::Unsupported {
                type_name: std::any::type_name::<T>(),
            },
        }
    }
}

impl Debug for Output {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::Value(value) => formatter.debug_tuple("Value").field(value).finish(),
            Output::Reader(_) => formatter.write_str("Reader(..)"),
            Output::Unsupported { type_name } => formatter
                .debug_struct("Unsupported")
                .field("type_name", type_name)
                .finish(),
        }
    }
}

impl From<Value> for Output {
    fn from(value: Value) -> Self {
        Output::Value(value)
    }
}
