//! Command declarations.
//!
//! A [`CommandSpec`] lists the parameters a command accepts, a descriptive
//! output declaration, and the [`Handler`] that receives the bound inputs.

use std::collections::HashSet;
use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::binding::Inputs;
use crate::error::Error::DuplicateParameter;
use crate::error::{HandlerError, Result};
use crate::value::{Output, ValueType};

/// Declaration of a single parameter.
///
/// Ordered parameters are bound by position, in declaration order. Every
/// parameter, ordered or not, can also be supplied as a flag by name.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default)]
    pub ordered: bool,
}

impl ParameterSpec {
    pub fn new(name: &str, value_type: ValueType, ordered: bool) -> Self {
        Self {
            name: name.to_string(),
            value_type,
            ordered,
        }
    }

    pub fn ordered(name: &str, value_type: ValueType) -> Self {
        Self::new(name, value_type, true)
    }

    pub fn flag(name: &str, value_type: ValueType) -> Self {
        Self::new(name, value_type, false)
    }

    pub fn is_bool(&self) -> bool {
        self.value_type == ValueType::Bool
    }

    /// Case-insensitive name comparison.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl Display for ParameterSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "`{}` ({})", self.name, self.value_type)
    }
}

/// Result of a handler call: the value to serialize, if any.
pub type HandlerResult = std::result::Result<Option<Output>, HandlerError>;

/// Receives the bound inputs of one invocation.
pub trait Handler {
    fn call(&self, inputs: Inputs) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(Inputs) -> HandlerResult,
{
    fn call(&self, inputs: Inputs) -> HandlerResult {
        self(inputs)
    }
}

pub struct CommandSpec {
    pub params: Vec<ParameterSpec>,
    /// Declared output. Informational only.
    pub output: Option<ParameterSpec>,
    pub handler: Box<dyn Handler>,
}

impl CommandSpec {
    pub fn new<H: Handler + 'static>(params: Vec<ParameterSpec>, handler: H) -> Self {
        Self {
            params,
            output: None,
            handler: Box::new(handler),
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: ParameterSpec) -> Self {
        self.output = Some(output);
        self
    }

    /// Looks up a parameter by name, ignoring case.
    pub fn flag_spec(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|param| param.matches(name))
    }

    /// Looks up the ordered parameter at a 0-based position.
    pub fn ordered_spec(&self, position: usize) -> Option<&ParameterSpec> {
        self.ordered_params().nth(position)
    }

    pub fn ordered_params(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.params.iter().filter(|param| param.ordered)
    }

    pub fn reads_stdin(&self) -> bool {
        self.params
            .iter()
            .any(|param| param.value_type == ValueType::Reader)
    }

    /// Checks that parameter names are unique, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateParameter`] naming the first repeated parameter.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<String> = HashSet::new();
        for param in &self.params {
            if !seen.insert(param.name.to_lowercase()) {
                return Err(DuplicateParameter(param.name.clone()));
            }
        }
        Ok(())
    }
}

impl Debug for CommandSpec {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CommandSpec")
            .field("params", &self.params)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
