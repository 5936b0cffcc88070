//! Classification of raw argument tokens.
//!
//! Supported shapes are `--name=value`, `--name value`, `-name=value`,
//! `-name value`, bare positional values, and the `--` terminator after which
//! every token is positional verbatim.

use log::debug;

use crate::spec::{CommandSpec, ParameterSpec};

pub const FLAG_TERMINATOR: &str = "--";
const LONG_FLAG_PREFIX: &str = "--";
const SHORT_FLAG_PREFIX: &str = "-";

/// A raw token after classification.
///
/// An empty `name` marks a positional value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedToken<'a> {
    pub name: String,
    pub value: String,
    pub spec: Option<&'a ParameterSpec>,
}

impl<'a> ClassifiedToken<'a> {
    pub fn positional(value: &str) -> Self {
        Self {
            name: String::new(),
            value: value.to_string(),
            spec: None,
        }
    }

    pub fn named(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            spec: None,
        }
    }

    pub fn is_positional(&self) -> bool {
        self.name.is_empty()
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn missing_value(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_bool(&self) -> bool {
        self.spec.is_some_and(ParameterSpec::is_bool)
    }

    /// A named flag that would take the next positional token as its value.
    fn awaits_value(&self) -> bool {
        self.is_named() && self.missing_value() && !self.is_bool()
    }
}

/// Classifies a single token in isolation.
///
/// Returns `None` for the flag terminator, which produces no token.
pub fn classify<'a>(raw: &str, flags_terminated: bool) -> Option<ClassifiedToken<'a>> {
    if flags_terminated {
        return Some(ClassifiedToken::positional(raw));
    }

    if raw == FLAG_TERMINATOR {
        return None;
    }

    if raw.len() < 2 || !raw.starts_with(SHORT_FLAG_PREFIX) {
        return Some(ClassifiedToken::positional(raw));
    }

    let unprefixed = raw
        .strip_prefix(LONG_FLAG_PREFIX)
        .or_else(|| raw.strip_prefix(SHORT_FLAG_PREFIX))
        .unwrap_or(raw);

    // "--=foo" and "-=foo" are not flags
    if unprefixed.starts_with('=') {
        return Some(ClassifiedToken::positional(raw));
    }

    Some(match unprefixed.split_once('=') {
        Some((name, value)) => ClassifiedToken::named(name, value),
        None => ClassifiedToken::named(unprefixed, ""),
    })
}

/// Splits raw arguments into classified tokens.
///
/// Named tokens carry a best-effort reference to the parameter they name;
/// unknown names are left for the binder to reject. A flag without a value
/// takes the following positional token as its value unless it is boolean
/// or the terminator has been seen.
pub fn tokenize<'a, S: AsRef<str>>(
    raw_args: &[S],
    spec: &'a CommandSpec,
) -> Vec<ClassifiedToken<'a>> {
    let mut tokens: Vec<ClassifiedToken<'a>> = Vec::new();
    let mut flags_terminated = false;

    for raw in raw_args {
        let raw = raw.as_ref();
        let Some(mut token) = classify(raw, flags_terminated) else {
            debug!("Flag terminator found, remaining arguments are positional");
            flags_terminated = true;
            continue;
        };

        if token.is_named() {
            token.spec = spec.flag_spec(&token.name);
        }

        if !flags_terminated && token.is_positional() {
            if let Some(previous) = tokens.last_mut().filter(|prev| prev.awaits_value()) {
                debug!("Using `{}` as the value of flag `{}`", raw, previous.name);
                previous.value = token.value;
                continue;
            }
        }

        debug!("Classified `{raw}` as {token:?}");
        tokens.push(token);
    }

    tokens
}
