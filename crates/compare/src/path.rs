//! Path detection and component splitting.
//!
//! Detection is purely syntactic and never touches the filesystem: a field
//! looks like a path when it contains a separator of the configured
//! [`PathStyle`] and at least one non-empty component.

use serde::{Deserialize, Serialize};

/// Which characters separate path components.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    /// `/` only.
    Unix,
    /// `\` only.
    Windows,
    /// Either `/` or `\`.
    #[default]
    Any,
}

impl PathStyle {
    pub fn is_separator(self, ch: char) -> bool {
        match self {
            PathStyle::Unix => ch == '/',
            PathStyle::Windows => ch == '\\',
            PathStyle::Any => ch == '/' || ch == '\\',
        }
    }

    pub fn looks_like_path(self, field: &str) -> bool {
        field.chars().any(|ch| self.is_separator(ch)) && components(field, self).next().is_some()
    }
}

/// Non-empty components of `field`, in order.
pub fn components(field: &str, style: PathStyle) -> impl DoubleEndedIterator<Item = &str> {
    field
        .split(move |ch: char| style.is_separator(ch))
        .filter(|part| !part.is_empty())
}

/// The last `count` components (fewer if the path is shorter).
pub(crate) fn trailing(field: &str, count: usize, style: PathStyle) -> Vec<&str> {
    let mut tail: Vec<&str> = components(field, style).rev().take(count).collect();
    tail.reverse();
    tail
}
