//! Conversion of a handler's output into bytes.

use std::io::{self, Cursor, Read, Write};

use log::debug;

use crate::error::Error::UnsupportedOutputType;
use crate::error::Result;
use crate::value::{Output, Value};

/// Turns a handler's output into a byte stream.
///
/// No output yields an empty stream and readers pass through unchanged.
/// Numbers are rendered in base 10; floats use the shortest text that reads
/// back to the same value at their width.
///
/// # Errors
///
/// Returns [`UnsupportedOutputType`] for outputs that have no text form.
pub fn serialize(output: Option<Output>) -> Result<Box<dyn Read>> {
    let bytes = match output {
        None => Vec::new(),
        Some(Output::Reader(reader)) => return Ok(reader),
        Some(Output::Value(value)) => value_to_bytes(value),
        Some(Output::Unsupported { type_name }) => {
            return Err(UnsupportedOutputType(type_name.to_string()))
        }
    };

    Ok(Box::new(Cursor::new(bytes)))
}

fn value_to_bytes(value: Value) -> Vec<u8> {
    match value {
        Value::String(value) => value.into_bytes(),
        Value::Reader(bytes) => bytes,
        other => other.to_string().into_bytes(),
    }
}

/// Serializes `output` and copies it into `sink`.
///
/// Nothing is written when serialization fails.
///
/// # Errors
///
/// Returns serialization errors and any I/O error from the copy.
pub fn write_output<W: Write + ?Sized>(output: Option<Output>, sink: &mut W) -> Result<u64> {
    let mut reader = serialize(output)?;
    let written = io::copy(&mut reader, sink)?;
    sink.flush()?;
    debug!("Wrote {written} bytes of output");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::coerce;
    use crate::value::ValueType;

    fn text(output: Option<Output>) -> String {
        let mut reader = serialize(output).unwrap();
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_none_is_empty() {
        assert_eq!(text(None), "");
    }

    #[test]
    fn test_primitives() {
        assert_eq!(text(Some("hello Mr\n".into())), "hello Mr\n");
        assert_eq!(text(Some(true.into())), "true");
        assert_eq!(text(Some(false.into())), "false");
        assert_eq!(text(Some((-12i8).into())), "-12");
        assert_eq!(text(Some(7isize.into())), "7");
        assert_eq!(text(Some(i64::MAX.into())), "9223372036854775807");
    }

    #[test]
    fn test_floats_use_shortest_text() {
        assert_eq!(text(Some(1.5f32.into())), "1.5");
        assert_eq!(text(Some(0.1f32.into())), "0.1");
        assert_eq!(text(Some(0.1f64.into())), "0.1");
        assert_eq!(text(Some(3.0f64.into())), "3");
        assert_eq!(text(Some((-2.25f64).into())), "-2.25");
        assert_eq!(text(Some(1e300f64.into())), "1e300");
        assert_eq!(text(Some(1e-300f64.into())), "1e-300");
        assert_eq!(text(Some(f64::MAX.into())), "1.7976931348623157e308");
        assert_eq!(text(Some(f32::MAX.into())), "3.4028235e38");
    }

    #[test]
    fn test_reader_passes_through() {
        let output = Output::reader(Cursor::new(b"RAW BYTES".to_vec()));
        assert_eq!(text(Some(output)), "RAW BYTES");
    }

    #[test]
    fn test_unsupported_output_names_type() {
        let err = serialize(Some(Output::from_any(vec![1u8]))).err().unwrap();
        match err {
            UnsupportedOutputType(type_name) => assert!(type_name.contains("Vec<u8>")),
            other => panic!("Expected UnsupportedOutputType, got {other:?}"),
        }
    }

    #[test]
    fn test_numbers_read_back_as_the_same_value() {
        let cases = [
            (ValueType::Int8, "-128"),
            (ValueType::Int16, "-32768"),
            (ValueType::Int32, "2147483647"),
            (ValueType::Int64, "-9223372036854775808"),
            (ValueType::Float32, "3.4028235e38"),
            (ValueType::Float32, "1e-7"),
            (ValueType::Float64, "2.2250738585072014e-308"),
            (ValueType::Float64, "0.30000000000000004"),
            (ValueType::Float64, "1e300"),
            (ValueType::Float64, "1e-300"),
            (ValueType::Float64, "1.7976931348623157e308"),
            (ValueType::Float64, "6.02214076e23"),
        ];

        for (value_type, raw) in cases {
            let value = coerce(raw, value_type).unwrap();
            let rendered = text(Some(Output::Value(value.clone())));
            assert!(rendered.len() <= raw.len(), "{raw} rendered as {rendered}");
            assert_eq!(coerce(&rendered, value_type).unwrap(), value, "raw: {raw}");
        }
    }

    #[test]
    fn test_write_output_copies_everything() {
        let mut sink: Vec<u8> = Vec::new();
        let written = write_output(Some(42i32.into()), &mut sink).unwrap();
        assert_eq!(written, 2);
        assert_eq!(sink, b"42");
    }

    #[test]
    fn test_write_output_writes_nothing_on_error() {
        let mut sink: Vec<u8> = Vec::new();
        assert!(write_output(Some(Output::from_any(())), &mut sink).is_err());
        assert!(sink.is_empty());
    }
}
