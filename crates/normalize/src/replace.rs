//! Substitution rules applied before any other normalization step.
//!
//! A [`Replacement`] pairs a [`Matcher`] with the text that replaces every
//! match. Matchers are either literal substrings or compiled regular
//! expressions; pattern replacements may reference capture groups with the
//! usual `$1` / `${name}` syntax of the `regex` crate.
//!
//! Rules can also be read from an untyped JSON/YAML container through
//! [`parse_replacements`]. The container must be a sequence of
//! `[matcher, replacement]` pairs:
//!
//! ```yaml
//! replacements:
//!   - ["Float64", "Float"]
//!   - [{ pattern: "0x[0-9a-f]+" }, "0xADDR"]
//! ```

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::NormalizeError;

/// What a replacement rule searches for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MatcherRepr", into = "MatcherRepr")]
pub enum Matcher {
    /// Plain substring, matched verbatim.
    Literal(String),
    /// Regular expression, matched with `Regex::replace_all`.
    Pattern(Regex),
}

impl Matcher {
    pub fn literal(text: impl Into<String>) -> Self {
        Matcher::Literal(text.into())
    }

    /// Compile `pattern` into a pattern matcher.
    pub fn pattern(pattern: &str) -> Result<Self, NormalizeError> {
        Regex::new(pattern)
            .map(Matcher::Pattern)
            .map_err(|err| NormalizeError::invalid_pattern(pattern, &err))
    }

    /// Source text of the matcher: the literal itself or the regex source.
    pub fn as_str(&self) -> &str {
        match self {
            Matcher::Literal(text) => text,
            Matcher::Pattern(re) => re.as_str(),
        }
    }

    fn replace_all(&self, text: &str, replacement: &str) -> String {
        match self {
            Matcher::Literal(needle) => text.replace(needle.as_str(), replacement),
            Matcher::Pattern(re) => re.replace_all(text, replacement).into_owned(),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Literal(a), Matcher::Literal(b)) => a == b,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Literal(text) => write!(f, "{text:?}"),
            Matcher::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MatcherRepr {
    Literal(String),
    Pattern(String),
}

impl TryFrom<MatcherRepr> for Matcher {
    type Error = NormalizeError;

    fn try_from(repr: MatcherRepr) -> Result<Self, Self::Error> {
        match repr {
            MatcherRepr::Literal(text) => Ok(Matcher::Literal(text)),
            MatcherRepr::Pattern(pattern) => Matcher::pattern(&pattern),
        }
    }
}

impl From<Matcher> for MatcherRepr {
    fn from(matcher: Matcher) -> Self {
        match matcher {
            Matcher::Literal(text) => MatcherRepr::Literal(text),
            Matcher::Pattern(re) => MatcherRepr::Pattern(re.as_str().to_string()),
        }
    }
}

/// A single `(matcher, replacement)` substitution rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Replacement {
    pub matcher: Matcher,
    pub replacement: String,
}

impl Replacement {
    pub fn new(matcher: Matcher, replacement: impl Into<String>) -> Self {
        Self {
            matcher,
            replacement: replacement.into(),
        }
    }

    /// Literal substring rule.
    pub fn literal(needle: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::new(Matcher::literal(needle), replacement)
    }

    /// Regex rule. Fails if `pattern` does not compile.
    pub fn pattern(pattern: &str, replacement: impl Into<String>) -> Result<Self, NormalizeError> {
        Ok(Self::new(Matcher::pattern(pattern)?, replacement))
    }

    pub(crate) fn validate(&self, index: usize) -> Result<(), NormalizeError> {
        if let Matcher::Literal(needle) = &self.matcher {
            if needle.is_empty() {
                return Err(NormalizeError::InvalidReplacementSpec(format!(
                    "replacement {index}: literal matcher must not be empty"
                )));
            }
        }
        Ok(())
    }

    /// Apply this rule globally over `text`.
    pub fn apply(&self, text: &str) -> String {
        self.matcher.replace_all(text, &self.replacement)
    }
}

/// Parse an untyped replacement container into ordered rules.
///
/// `null` is treated as "no replacements". Any other shape than a sequence of
/// two-element `[matcher, replacement]` sequences is rejected with
/// [`NormalizeError::InvalidReplacementSpec`].
pub fn parse_replacements(spec: &JsonValue) -> Result<Vec<Replacement>, NormalizeError> {
    let items = match spec {
        JsonValue::Null => return Ok(Vec::new()),
        JsonValue::Array(items) => items,
        other => {
            return Err(NormalizeError::InvalidReplacementSpec(format!(
                "expected a list of [matcher, replacement] pairs, got {}",
                kind_name(other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_pair(index, item))
        .collect()
}

fn parse_pair(index: usize, item: &JsonValue) -> Result<Replacement, NormalizeError> {
    let pair = match item {
        JsonValue::Array(pair) if pair.len() == 2 => pair,
        JsonValue::Array(pair) => {
            return Err(NormalizeError::InvalidReplacementSpec(format!(
                "replacement {index}: expected a pair, got {} elements",
                pair.len()
            )))
        }
        other => {
            return Err(NormalizeError::InvalidReplacementSpec(format!(
                "replacement {index}: expected a [matcher, replacement] pair, got {}",
                kind_name(other)
            )))
        }
    };

    let matcher = parse_matcher(index, &pair[0])?;
    let replacement = match &pair[1] {
        JsonValue::String(text) => text.clone(),
        other => {
            return Err(NormalizeError::InvalidReplacementSpec(format!(
                "replacement {index}: replacement text must be a string, got {}",
                kind_name(other)
            )))
        }
    };

    let rule = Replacement::new(matcher, replacement);
    rule.validate(index)?;
    Ok(rule)
}

fn parse_matcher(index: usize, value: &JsonValue) -> Result<Matcher, NormalizeError> {
    match value {
        JsonValue::String(text) => Ok(Matcher::Literal(text.clone())),
        JsonValue::Object(map) if map.len() == 1 => match map.iter().next() {
            Some((key, JsonValue::String(text))) if key == "pattern" => Matcher::pattern(text),
            Some((key, JsonValue::String(text))) if key == "literal" => {
                Ok(Matcher::Literal(text.clone()))
            }
            _ => Err(NormalizeError::InvalidReplacementSpec(format!(
                "replacement {index}: matcher map must be {{pattern: ..}} or {{literal: ..}}"
            ))),
        },
        other => Err(NormalizeError::InvalidReplacementSpec(format!(
            "replacement {index}: matcher must be a string or a {{pattern: ..}} map, got {}",
            kind_name(other)
        ))),
    }
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "a map",
    }
}
