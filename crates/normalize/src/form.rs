//! The canonical form produced by the normalization pipeline.
//!
//! A [`CanonicalForm`] holds the normalized text together with the settings
//! that produced it. The settings travel with the text so that a raw reference
//! string compared against the form can be normalized identically, no matter
//! which side of the comparison the form sits on.
//!
//! # Examples
//!
//! ```rust
//! use normalize::{normalize, NormalizeConfig};
//!
//! let form = normalize("Int(1) at [1, 2, 3]", &NormalizeConfig::default()).unwrap();
//! assert_eq!(form.text(), "Int( 1 ) at [ 1 , 3 ]");
//! assert!(form.simplify_sequences());
//!
//! let reference = form.renormalize("Int(1) at [1, 3]").unwrap();
//! assert_eq!(reference.text(), form.text());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::pipeline::normalize;
use crate::replace::Replacement;
use crate::token::{tokenize, Token};

/// Normalized text plus the settings used to derive it.
///
/// ```text
/// CanonicalForm
/// ├── text: String                      # whitespace-tokenizable canonical text
/// ├── simplify_sequences: bool          # sequence collapsing applied?
/// └── replacements: Vec<Replacement>    # substitution rules applied, in order
/// ```
///
/// Fields are private: a form is never modified after construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalForm {
    text: String,
    simplify_sequences: bool,
    replacements: Vec<Replacement>,
}

impl CanonicalForm {
    pub(crate) fn new(text: String, config: &NormalizeConfig) -> Self {
        Self {
            text,
            simplify_sequences: config.simplify_sequences,
            replacements: config.replacements.clone(),
        }
    }

    /// The canonical text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn simplify_sequences(&self) -> bool {
        self.simplify_sequences
    }

    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }

    /// Snapshot of the settings this form was built with.
    pub fn config(&self) -> NormalizeConfig {
        NormalizeConfig {
            simplify_sequences: self.simplify_sequences,
            replacements: self.replacements.clone(),
        }
    }

    /// Normalize `raw` with this form's settings.
    pub fn renormalize(&self, raw: &str) -> Result<CanonicalForm, NormalizeError> {
        normalize(raw, &self.config())
    }

    /// Whitespace-delimited tokens of the canonical text, with byte offsets.
    pub fn tokens(&self) -> Vec<Token> {
        tokenize(&self.text)
    }

    /// Consume the form, keeping only its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

impl AsRef<str> for CanonicalForm {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
