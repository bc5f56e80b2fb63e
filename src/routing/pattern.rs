//! Route pattern parsing.
//!
//! A pattern is literal text with typed placeholders:
//!
//! ```text
//! <int:pk>/results/
//! ^^^^^^^^ placeholder: converter `int`, parameter `pk`
//!         ^^^^^^^^^ literal
//! ```
//!
//! `<name>` without a converter means `<str:name>`.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::routing::converter::{Converter, ParamValue};
use crate::routing::matcher;
use crate::routing::params::PathParams;

/// Error raised while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern {pattern:?}: unknown converter {converter:?}")]
    UnknownConverter { pattern: String, converter: String },

    #[error("pattern {pattern:?}: unterminated placeholder at byte {offset}")]
    Unterminated { pattern: String, offset: usize },

    #[error("pattern {pattern:?}: {name:?} is not a valid parameter name")]
    InvalidParamName { pattern: String, name: String },

    #[error("pattern {pattern:?}: parameter {name:?} appears more than once")]
    DuplicateParam { pattern: String, name: String },
}

/// One piece of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    raw: String,
    components: Vec<Component>,
}

impl RoutePattern {
    /// Compile a pattern string.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let mut components = Vec::new();
        let mut literal = String::new();
        let mut seen: Vec<&str> = Vec::new();
        let mut rest = raw;
        let mut offset = 0;

        while let Some(open) = rest.find('<') {
            literal.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            let close = after_open.find('>').ok_or_else(|| PatternError::Unterminated {
                pattern: raw.to_string(),
                offset: offset + open,
            })?;
            let inner = &after_open[..close];

            let (converter, name) = match inner.split_once(':') {
                Some((conv, name)) => {
                    let converter =
                        conv.parse::<Converter>()
                            .map_err(|_| PatternError::UnknownConverter {
                                pattern: raw.to_string(),
                                converter: conv.to_string(),
                            })?;
                    (converter, name)
                }
                None => (Converter::Str, inner),
            };

            if !is_identifier(name) {
                return Err(PatternError::InvalidParamName {
                    pattern: raw.to_string(),
                    name: name.to_string(),
                });
            }
            if seen.contains(&name) {
                return Err(PatternError::DuplicateParam {
                    pattern: raw.to_string(),
                    name: name.to_string(),
                });
            }
            seen.push(name);

            if !literal.is_empty() {
                components.push(Component::Literal(std::mem::take(&mut literal)));
            }
            components.push(Component::Param {
                name: name.to_string(),
                converter,
            });

            let consumed = open + 1 + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            components.push(Component::Literal(literal));
        }

        if raw.starts_with('/') {
            tracing::warn!(
                pattern = %raw,
                "Route pattern starts with '/'; request paths are matched without a leading slash"
            );
        }

        Ok(Self {
            raw: raw.to_string(),
            components,
        })
    }

    /// The pattern as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Placeholder names and converters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = (&str, Converter)> {
        self.components.iter().filter_map(|c| match c {
            Component::Param { name, converter } => Some((name.as_str(), *converter)),
            Component::Literal(_) => None,
        })
    }

    /// Match the whole of `path`, returning the bound parameters.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        matcher::match_components(&self.components, path)
    }

    /// Build a path from parameter values.
    ///
    /// The set of supplied names must equal the set of placeholders, and each
    /// value must be accepted by its converter.
    pub fn reverse(&self, params: &PathParams) -> Result<String, ReverseMismatch> {
        for (name, _) in params.iter() {
            if !self.params().any(|(p, _)| p == name) {
                return Err(ReverseMismatch::Unexpected(name.to_string()));
            }
        }

        let mut url = String::with_capacity(self.raw.len());
        for component in &self.components {
            match component {
                Component::Literal(text) => url.push_str(text),
                Component::Param { name, converter } => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| ReverseMismatch::Missing(name.clone()))?;
                    let text = converter.to_url(value).ok_or_else(|| {
                        ReverseMismatch::Rejected {
                            param: name.clone(),
                            converter: *converter,
                            value: value.clone(),
                        }
                    })?;
                    url.push_str(&text);
                }
            }
        }
        Ok(url)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for RoutePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Why a set of parameters could not fill a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseMismatch {
    #[error("missing parameter {0:?}")]
    Missing(String),

    #[error("unexpected parameter {0:?}")]
    Unexpected(String),

    #[error("value {value} for {param:?} is not accepted by converter {converter}")]
    Rejected {
        param: String,
        converter: Converter,
        value: ParamValue,
    },
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
