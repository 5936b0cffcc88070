//! Matching classified tokens to declared parameters.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::debug;

use crate::coercion::coerce;
use crate::error::Error::MissingArgument;
use crate::error::{Error, Result};
use crate::spec::{CommandSpec, ParameterSpec};
use crate::tokenizer::ClassifiedToken;
use crate::value::{Value, ValueType};

/// Typed inputs of one invocation, keyed by declared parameter name.
///
/// Entries keep the order in which they were bound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    named: IndexMap<String, Value>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, rejecting a second value for the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateArgument`] if `name` is already bound.
    pub fn insert(&mut self, name: &str, value: Value) -> Result<()> {
        if let Some(previous) = self.named.get(name) {
            return Err(Error::duplicate_argument(
                name,
                &previous.to_string(),
                &value.to_string(),
            ));
        }
        self.named.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn get_bytes(&self, name: &str) -> Option<&[u8]> {
        self.get(name).and_then(Value::as_bytes)
    }

    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.named.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Binds classified tokens to the parameters of `spec`.
///
/// Positional tokens bind to ordered parameters in declaration order; named
/// tokens bind by case-insensitive name. Boolean flags are `true` when present
/// and `false` when absent.
///
/// # Errors
///
/// Fails on the first token that names no parameter, binds a parameter twice,
/// or cannot be coerced, and when an ordered non-boolean parameter is missing.
pub fn bind(tokens: &[ClassifiedToken<'_>], spec: &CommandSpec) -> Result<Inputs> {
    let mut inputs = Inputs::new();
    let mut supplied: HashMap<&str, &str> = HashMap::new();
    let mut position = 0;

    for token in tokens {
        let param: &ParameterSpec = if token.is_positional() {
            let param = spec
                .ordered_spec(position)
                .ok_or_else(|| Error::unknown_positional(position + 1, &token.value))?;
            position += 1;
            param
        } else {
            match token.spec {
                Some(param) => param,
                None => spec
                    .flag_spec(&token.name)
                    .ok_or_else(|| Error::unknown_flag(&token.name, &token.value))?,
            }
        };

        if let Some(previous) = supplied.get(param.name.as_str()) {
            return Err(Error::duplicate_argument(&param.name, previous, &token.value));
        }

        let value = coerce(&token.value, param.value_type)?;
        debug!("Bound {param} to {value:?}");
        inputs.insert(&param.name, value)?;
        supplied.insert(param.name.as_str(), token.value.as_str());
    }

    for param in &spec.params {
        if param.is_bool() && !inputs.contains(&param.name) {
            inputs.insert(&param.name, Value::Bool(false))?;
        }
    }

    check_ordered_present(spec, &inputs)?;

    Ok(inputs)
}

fn check_ordered_present(spec: &CommandSpec, inputs: &Inputs) -> Result<()> {
    let missing = spec.ordered_params().enumerate().find(|(_, param)| {
        !matches!(param.value_type, ValueType::Bool | ValueType::Reader)
            && !inputs.contains(&param.name)
    });

    match missing {
        Some((position, param)) => Err(MissingArgument {
            name: param.name.clone(),
            position: position + 1,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::HandlerResult;
    use crate::tokenizer::tokenize;

    fn spec(params: Vec<ParameterSpec>) -> CommandSpec {
        CommandSpec::new(params, |_inputs: Inputs| -> HandlerResult { Ok(None) })
    }

    fn bind_args(spec: &CommandSpec, args: &[&str]) -> Result<Inputs> {
        bind(&tokenize(args, spec), spec)
    }

    #[test]
    fn test_bool_flag_defaults_to_false() {
        let spec = spec(vec![ParameterSpec::flag("on", ValueType::Bool)]);
        let inputs = bind_args(&spec, &[]).unwrap();
        assert_eq!(inputs.get_bool("on"), Some(false));
        assert_eq!(inputs.len(), 1);
    }

    #[test]
    fn test_bool_flag_present_is_true() {
        let spec = spec(vec![ParameterSpec::flag("on", ValueType::Bool)]);
        for args in [["-on"], ["--on"], ["--on=false"], ["--ON"]] {
            let inputs = bind_args(&spec, &args).unwrap();
            assert_eq!(inputs.get_bool("on"), Some(true), "args: {args:?}");
        }
    }

    #[test]
    fn test_positional_bind_in_declaration_order() {
        let spec = spec(vec![
            ParameterSpec::ordered("a", ValueType::Int8),
            ParameterSpec::ordered("b", ValueType::Int8),
        ]);
        let inputs = bind_args(&spec, &["1", "2"]).unwrap();
        assert_eq!(inputs.get("a"), Some(&Value::Int8(1)));
        assert_eq!(inputs.get("b"), Some(&Value::Int8(2)));
    }

    #[test]
    fn test_flag_and_attached_value_bind_the_same() {
        let spec = spec(vec![ParameterSpec::ordered("name", ValueType::String)]);
        let split = bind_args(&spec, &["--name", "Mr"]).unwrap();
        let joined = bind_args(&spec, &["--name=Mr"]).unwrap();
        assert_eq!(split, joined);
        assert_eq!(joined.get_str("name"), Some("Mr"));
    }

    #[test]
    fn test_duplicate_flag_is_rejected() {
        let spec = spec(vec![ParameterSpec::ordered("name", ValueType::String)]);
        let err = bind_args(&spec, &["--name=Mr", "--name=Ms"]).unwrap_err();
        match err {
            Error::DuplicateArgument {
                name,
                previous,
                value,
            } => {
                assert_eq!(name, "name");
                assert_eq!(previous, "Mr");
                assert_eq!(value, "Ms");
            }
            other => panic!("Expected DuplicateArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_positional_and_flag_for_same_parameter_is_duplicate() {
        let spec = spec(vec![ParameterSpec::ordered("name", ValueType::String)]);
        let err = bind_args(&spec, &["Mr", "--name=Ms"]).unwrap_err();
        assert!(matches!(err, Error::DuplicateArgument { .. }));
    }

    #[test]
    fn test_terminator_binds_flag_text_positionally() {
        let spec = spec(vec![
            ParameterSpec::ordered("text", ValueType::String),
            ParameterSpec::flag("on", ValueType::Bool),
        ]);
        let inputs = bind_args(&spec, &["--", "-on"]).unwrap();
        assert_eq!(inputs.get_str("text"), Some("-on"));
        assert_eq!(inputs.get_bool("on"), Some(false));
    }

    #[test]
    fn test_unknown_flag_names_flag_and_value() {
        let spec = spec(vec![ParameterSpec::flag("on", ValueType::Bool)]);
        match bind_args(&spec, &["--title=Dr"]).unwrap_err() {
            Error::UnknownFlag { name, value } => {
                assert_eq!(name, "title");
                assert_eq!(value, "Dr");
            }
            other => panic!("Expected UnknownFlag, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_positional_reports_one_based_position() {
        let spec = spec(vec![ParameterSpec::ordered("name", ValueType::String)]);
        match bind_args(&spec, &["Mr", "Smith"]).unwrap_err() {
            Error::UnknownPositionalArgument { position, value } => {
                assert_eq!(position, 2);
                assert_eq!(value, "Smith");
            }
            other => panic!("Expected UnknownPositionalArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_ordered_parameter_is_rejected() {
        let spec = spec(vec![
            ParameterSpec::ordered("a", ValueType::Int),
            ParameterSpec::ordered("b", ValueType::Int),
        ]);
        match bind_args(&spec, &["1"]).unwrap_err() {
            MissingArgument { name, position } => {
                assert_eq!(name, "b");
                assert_eq!(position, 2);
            }
            other => panic!("Expected MissingArgument, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_named_parameter_stays_absent() {
        let spec = spec(vec![ParameterSpec::flag("title", ValueType::String)]);
        let inputs = bind_args(&spec, &[]).unwrap();
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_coercion_failure_aborts_binding() {
        let spec = spec(vec![ParameterSpec::ordered("a", ValueType::Int8)]);
        let err = bind_args(&spec, &["200"]).unwrap_err();
        assert!(matches!(err, Error::CoercionOverflow { .. }));
    }

    #[test]
    fn test_inputs_insert_rejects_duplicates() {
        let mut inputs = Inputs::new();
        inputs.insert("a", Value::Int(1)).unwrap();
        assert!(inputs.insert("a", Value::Int(2)).is_err());
        assert_eq!(inputs.get_i64("a"), Some(1));
    }

    #[test]
    fn test_inputs_duplicate_reports_text_like_binder() {
        let mut inputs = Inputs::new();
        inputs.insert("name", Value::from("Mr")).unwrap();
        let from_insert = inputs.insert("name", Value::from("Ms")).unwrap_err();

        let spec = spec(vec![ParameterSpec::flag("name", ValueType::String)]);
        let from_bind = bind_args(&spec, &["--name=Mr", "--name=Ms"]).unwrap_err();

        assert_eq!(from_insert.to_string(), from_bind.to_string());
        assert!(!from_insert.to_string().contains("String("));
    }
}
