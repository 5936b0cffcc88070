//! The tokenize, bind, handle, serialize pipeline.

use std::env;
use std::ffi::OsString;
use std::io::{Read, Write};

use log::{debug, info, warn};

use crate::binding::{bind, Inputs};
use crate::error::{Error, Result};
use crate::serialization::write_output;
use crate::spec::CommandSpec;
use crate::tokenizer::{tokenize, ClassifiedToken};
use crate::value::{Value, ValueType};

/// Runs one command declaration against raw arguments.
#[derive(Debug)]
pub struct Cli {
    pub spec: CommandSpec,
}

impl Cli {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }

    pub fn parse_args<S: AsRef<str>>(&self, raw_args: &[S]) -> Vec<ClassifiedToken<'_>> {
        tokenize(raw_args, &self.spec)
    }

    /// Binds raw arguments without calling the handler.
    ///
    /// # Errors
    ///
    /// Returns declaration, binding, and coercion errors.
    pub fn bind_args<S: AsRef<str>>(&self, raw_args: &[S]) -> Result<Inputs> {
        self.spec.validate()?;
        let tokens = self.parse_args(raw_args);
        bind(&tokens, &self.spec)
    }

    /// Runs the whole pipeline.
    ///
    /// `stdin` is read to completion only when a `reader` parameter is
    /// declared. `stdout` receives the serialized output, or nothing if any
    /// stage fails.
    ///
    /// # Errors
    ///
    /// Returns the first error of any stage; handler errors are passed
    /// through as [`Error::Handler`].
    pub fn exec_args<S, R, W>(&self, raw_args: &[S], stdin: &mut R, stdout: &mut W) -> Result<()>
    where
        S: AsRef<str>,
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut inputs = self.bind_args(raw_args)?;
        info!("Bound {} input(s)", inputs.len());

        if self.spec.reads_stdin() {
            let mut buffer = Vec::new();
            stdin.read_to_end(&mut buffer)?;
            debug!("Read {} bytes from stdin", buffer.len());

            for param in self
                .spec
                .params
                .iter()
                .filter(|param| param.value_type == ValueType::Reader)
            {
                inputs.insert(&param.name, Value::Reader(buffer.clone()))?;
            }
        }

        let output = self.spec.handler.call(inputs).map_err(Error::handler)?;
        info!("Handler returned {output:?}");

        write_output(output, stdout)?;
        Ok(())
    }

    /// Runs the pipeline on the process arguments, excluding the program name.
    ///
    /// Arguments that are not valid UTF-8 are converted lossily.
    ///
    /// # Errors
    ///
    /// See [`Cli::exec_args`].
    pub fn exec<R, W>(&self, stdin: &mut R, stdout: &mut W) -> Result<()>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let raw_args = lossy_args(env::args_os().skip(1));
        self.exec_args(raw_args.as_slice(), stdin, stdout)
    }
}

fn lossy_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.into_string() {
            Ok(arg) => arg,
            Err(arg) => {
                let converted = arg.to_string_lossy().into_owned();
                warn!("Argument `{converted}` is not valid UTF-8");
                converted
            }
        })
        .collect()
}
