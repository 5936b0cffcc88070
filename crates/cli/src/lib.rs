//! Argbind CLI Library
//!
//! This crate provides the `argbind` binary, which runs built-in commands by
//! binding the trailing command-line arguments against each command's
//! parameter declaration.
//!
//! # Architecture
//!
//! - [`cli_args`]: Parsing of the binary's own options
//! - [`commands`]: Built-in command declarations and handlers
//! - [`error`]: Errors reported by the binary
//!
//! # Examples
//!
//! ```bash
//! # Positional arguments
//! argbind add-ints 1 2
//!
//! # Named arguments, with or without `=`
//! argbind greet --name=Mr
//! argbind greet --name Mr
//!
//! # Boolean flags
//! argbind bool-flag --on
//!
//! # Standard input to standard output
//! echo hello | argbind upper
//!
//! # Show a declaration
//! argbind --describe add-int8
//! ```

pub mod cli_args;
pub mod commands;
pub mod error;
