use log::error;
use thiserror::Error;

use crate::value::ValueType;

pub type Result<T> = std::result::Result<T, Error>;

/// Error reported by a command handler, passed through the pipeline untouched.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No argument defined for flag `{}` (given \"{}\")", .name, .value)]
    UnknownFlag { name: String, value: String },

    #[error("No argument defined for argument position {} (given \"{}\")", .position, .value)]
    UnknownPositionalArgument { position: usize, value: String },

    #[error(
        "Argument `{}` has been provided more than one time: \"{}\", \"{}\"",
        .name,
        .previous,
        .value
    )]
    DuplicateArgument {
        name: String,
        previous: String,
        value: String,
    },

    #[error("Missing argument `{}` at position {}", .name, .position)]
    MissingArgument { name: String, position: usize },

    #[error("Found a non-unique parameter name: `{}`", .0)]
    DuplicateParameter(String),

    #[error("Value \"{}\" is out of range for type {}", .value, .value_type)]
    CoercionOverflow { value: String, value_type: ValueType },

    #[error("Value \"{}\" is not a valid {}", .value, .value_type)]
    CoercionFormat { value: String, value_type: ValueType },

    #[error("No support for parsing argument type `{}`", .0)]
    UnsupportedType(ValueType),

    #[error("Unable to convert output of type `{}` to a byte stream", .0)]
    UnsupportedOutputType(String),

    #[error("{}", .0)]
    Handler(#[source] HandlerError),

    #[error("STDIO error: {}", .0)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn unknown_flag(name: &str, value: &str) -> Self {
        Self::UnknownFlag {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn unknown_positional(position: usize, value: &str) -> Self {
        Self::UnknownPositionalArgument {
            position,
            value: value.to_string(),
        }
    }

    pub fn duplicate_argument(name: &str, previous: &str, value: &str) -> Self {
        error!("Duplicate value for `{name}`: previously \"{previous}\", now \"{value}\"");
        Self::DuplicateArgument {
            name: name.to_string(),
            previous: previous.to_string(),
            value: value.to_string(),
        }
    }

    pub fn handler(source: HandlerError) -> Self {
        Self::Handler(source)
    }
}
