//! Argbind Core Library
//!
//! This crate binds raw command-line arguments to a typed command declaration
//! and serializes the command's result.
//!
//! # Key Features
//!
//! - **Tokenizing**: `--name=value`, `--name value`, `-name`, positional values and `--`
//! - **Binding**: Positional values by declaration order, flags by case-insensitive name
//! - **Coercion**: Strings, booleans, sized integers and floats with overflow detection
//! - **Serialization**: A handler's single return value rendered as bytes
//!
//! # Examples
//!
//! ```
//! use argbind_core::binding::Inputs;
//! use argbind_core::pipeline::Cli;
//! use argbind_core::spec::{CommandSpec, HandlerResult, ParameterSpec};
//! use argbind_core::value::ValueType;
//!
//! let spec = CommandSpec::new(
//!     vec![
//!         ParameterSpec::ordered("a", ValueType::Int),
//!         ParameterSpec::ordered("b", ValueType::Int),
//!     ],
//!     |inputs: Inputs| -> HandlerResult {
//!         let sum = inputs.get_i64("a").unwrap_or(0) + inputs.get_i64("b").unwrap_or(0);
//!         Ok(Some(sum.into()))
//!     },
//! );
//!
//! let mut stdout: Vec<u8> = Vec::new();
//! Cli::new(spec).exec_args(&["2", "--b=3"], &mut std::io::empty(), &mut stdout)?;
//! assert_eq!(stdout, b"5");
//! # Ok::<(), argbind_core::error::Error>(())
//! ```

pub mod binding;
pub mod coercion;
pub mod error;
pub mod pipeline;
pub mod serialization;
pub mod spec;
pub mod tokenizer;
pub mod value;
