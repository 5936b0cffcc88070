//! Built-in commands.
//!
//! Each command is a parameter declaration plus a handler, the same shape an
//! external generator would emit for a plain function such as
//! `greet(name: string) -> string`.

use std::fmt::{Display, Formatter};
use std::io::{Cursor, Write};

use argbind_core::binding::Inputs;
use argbind_core::spec::{CommandSpec, HandlerResult, ParameterSpec};
use argbind_core::value::{Output, Value, ValueType};
use serde::Serialize;

use crate::error::Error::CommandNotFound;
use crate::error::{Error, Result};

/// A named command that can be run from the command line.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCommand {
    pub id: &'static str,
    pub description: &'static str,
    build: fn() -> CommandSpec,
}

impl BuiltinCommand {
    pub fn spec(&self) -> CommandSpec {
        (self.build)()
    }
}

impl Display for BuiltinCommand {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.id, self.description)
    }
}

/// Serializable view of a command declaration.
#[derive(Serialize, Debug)]
struct Declaration<'a> {
    command: &'a str,
    params: &'a [ParameterSpec],
    output: Option<&'a ParameterSpec>,
}

fn text_command(
    build_text: fn(&str) -> String,
) -> impl Fn(Inputs) -> HandlerResult {
    move |inputs: Inputs| -> HandlerResult {
        let name = inputs.get_str("name").unwrap_or_default();
        Ok(Some(build_text(name).into()))
    }
}

fn greet() -> CommandSpec {
    CommandSpec::new(
        vec![ParameterSpec::ordered("name", ValueType::String)],
        text_command(|name| format!("hello {name}\n")),
    )
    .with_output(ParameterSpec::flag("greeting", ValueType::String))
}

fn dismiss() -> CommandSpec {
    CommandSpec::new(
        vec![ParameterSpec::ordered("name", ValueType::String)],
        text_command(|name| format!("goodbye {name}\n")),
    )
    .with_output(ParameterSpec::flag("greeting", ValueType::String))
}

macro_rules! add_command {
    ($fn_name:ident, $variant:ident) => {
        fn $fn_name() -> CommandSpec {
            CommandSpec::new(
                vec![
                    ParameterSpec::ordered("a", ValueType::$variant),
                    ParameterSpec::ordered("b", ValueType::$variant),
                ],
                |inputs: Inputs| -> HandlerResult {
                    match (inputs.get("a"), inputs.get("b")) {
                        (Some(Value::$variant(a)), Some(Value::$variant(b))) => {
                            Ok(Some(Value::$variant(a.wrapping_add(*b)).into()))
                        }
                        _ => {
                            let message = format!(
                                "`a` and `b` must both be {}",
                                ValueType::$variant
                            );
                            Err(message.into())
                        }
                    }
                },
            )
            .with_output(ParameterSpec::flag("sum", ValueType::$variant))
        }
    };
}

add_command!(add_ints, Int);
add_command!(add_int8, Int8);
add_command!(add_int16, Int16);
add_command!(add_int32, Int32);
add_command!(add_int64, Int64);

fn echo(value_type: ValueType) -> CommandSpec {
    CommandSpec::new(
        vec![ParameterSpec::ordered("a", value_type)],
        |inputs: Inputs| -> HandlerResult {
            Ok(inputs.get("a").cloned().map(Output::from))
        },
    )
    .with_output(ParameterSpec::flag("e", value_type))
}

fn echo_float32() -> CommandSpec {
    echo(ValueType::Float32)
}

fn echo_float64() -> CommandSpec {
    echo(ValueType::Float64)
}

fn bool_flag() -> CommandSpec {
    CommandSpec::new(
        vec![ParameterSpec::flag("on", ValueType::Bool)],
        |inputs: Inputs| -> HandlerResult {
            let position = if inputs.get_bool("on").unwrap_or(false) {
                "on"
            } else {
                "off"
            };
            Ok(Some(position.into()))
        },
    )
    .with_output(ParameterSpec::flag("position", ValueType::String))
}

fn upper() -> CommandSpec {
    CommandSpec::new(
        vec![ParameterSpec::flag("in", ValueType::Reader)],
        |inputs: Inputs| -> HandlerResult {
            let upper = inputs.get_bytes("in").unwrap_or_default().to_ascii_uppercase();
            Ok(Some(Output::reader(Cursor::new(upper))))
        },
    )
    .with_output(ParameterSpec::flag("out", ValueType::Reader))
}

const BUILTIN_COMMANDS: [BuiltinCommand; 11] = [
    BuiltinCommand {
        id: "greet",
        description: "say hello to `name`",
        build: greet,
    },
    BuiltinCommand {
        id: "dismiss",
        description: "say goodbye to `name`",
        build: dismiss,
    },
    BuiltinCommand {
        id: "add-ints",
        description: "add two ints",
        build: add_ints,
    },
    BuiltinCommand {
        id: "add-int8",
        description: "add two int8 values",
        build: add_int8,
    },
    BuiltinCommand {
        id: "add-int16",
        description: "add two int16 values",
        build: add_int16,
    },
    BuiltinCommand {
        id: "add-int32",
        description: "add two int32 values",
        build: add_int32,
    },
    BuiltinCommand {
        id: "add-int64",
        description: "add two int64 values",
        build: add_int64,
    },
    BuiltinCommand {
        id: "echo-float32",
        description: "echo a float32",
        build: echo_float32,
    },
    BuiltinCommand {
        id: "echo-float64",
        description: "echo a float64",
        build: echo_float64,
    },
    BuiltinCommand {
        id: "bool-flag",
        description: "report whether `--on` was given",
        build: bool_flag,
    },
    BuiltinCommand {
        id: "upper",
        description: "upper-case standard input",
        build: upper,
    },
];

pub fn builtin_commands() -> &'static [BuiltinCommand] {
    &BUILTIN_COMMANDS
}

/// Finds a built-in command by ID.
///
/// # Errors
///
/// Returns [`CommandNotFound`] if no command has the given ID.
pub fn find_command(id: &str) -> Result<&'static BuiltinCommand> {
    BUILTIN_COMMANDS
        .iter()
        .find(|command| command.id == id)
        .ok_or_else(|| CommandNotFound(id.to_string()))
}

/// Writes the declaration of `command` as YAML.
///
/// # Errors
///
/// Returns an error if the declaration cannot be serialized or written.
pub fn describe<W: Write>(command: &BuiltinCommand, sink: &mut W) -> Result<()> {
    let spec = command.spec();
    let declaration = Declaration {
        command: command.id,
        params: &spec.params,
        output: spec.output.as_ref(),
    };

    let yaml = serde_yaml::to_string(&declaration)
        .map_err(|e| Error::describe_error(command.id, e))?;
    sink.write_all(yaml.as_bytes())?;
    Ok(())
}
