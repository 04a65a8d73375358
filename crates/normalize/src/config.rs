//! Configuration for the normalization pipeline.
//!
//! [`NormalizeConfig`] carries the two knobs of the pipeline: whether long
//! bracketed sequences are collapsed, and the ordered substitution rules that
//! run before anything else. The same config is snapshotted into every
//! [`CanonicalForm`](crate::CanonicalForm) so a later comparison against a raw
//! reference string can normalize that string the same way.
//!
//! # Examples
//!
//! ```rust
//! use normalize::{Matcher, NormalizeConfig};
//!
//! let config = NormalizeConfig::default();
//! assert!(config.simplify_sequences);
//! assert!(config.replacements.is_empty());
//!
//! let custom = NormalizeConfig::default()
//!     .with_replacement(Matcher::literal("Float64"), "Float")
//!     .without_sequence_simplification();
//! assert_eq!(custom.replacements.len(), 1);
//! assert!(!custom.simplify_sequences);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::NormalizeError;
use crate::replace::{parse_replacements, Matcher, Replacement};

/// Configuration for the normalization pipeline.
///
/// Serialized form:
///
/// ```json
/// {
///   "simplify_sequences": true,
///   "replacements": [
///     { "matcher": { "literal": "Float64" }, "replacement": "Float" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizeConfig {
    /// If true, `[a, b, ..., z]` runs are collapsed to `[a, z]`.
    ///
    /// Collections print differently depending on how many elements they
    /// hold and whether the printer truncates them; keeping only the first
    /// and last element makes those renderings comparable.
    ///
    /// # Default
    ///
    /// `true`
    #[serde(default = "NormalizeConfig::default_simplify_sequences")]
    pub simplify_sequences: bool,

    /// Substitutions applied in order, each globally, before digit isolation.
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

impl NormalizeConfig {
    pub(crate) fn default_simplify_sequences() -> bool {
        true
    }

    /// Append a substitution rule.
    pub fn with_replacement(mut self, matcher: Matcher, replacement: impl Into<String>) -> Self {
        self.replacements.push(Replacement::new(matcher, replacement));
        self
    }

    /// Append every rule of an untyped `[[matcher, replacement], ...]` container.
    pub fn with_replacement_spec(mut self, spec: &JsonValue) -> Result<Self, NormalizeError> {
        self.replacements.extend(parse_replacements(spec)?);
        Ok(self)
    }

    /// Keep bracketed sequences as printed.
    pub fn without_sequence_simplification(mut self) -> Self {
        self.simplify_sequences = false;
        self
    }

    /// Reject rules that cannot be applied meaningfully.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        self.replacements
            .iter()
            .enumerate()
            .try_for_each(|(index, rule)| rule.validate(index))
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            simplify_sequences: Self::default_simplify_sequences(),
            replacements: Vec::new(),
        }
    }
}
