//! Field classification and per-field verdicts.
//!
//! The left-hand field alone decides the classification: integer first, then
//! float, then path or plain text. The right-hand field is parsed as the same
//! numeric kind; if it does not parse, the pair is a mismatch and the numeric
//! rule is never consulted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::CompareConfig;

/// Resolved classification of a field pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Integer,
    Float,
    Path,
    Plain,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Path => "path",
            FieldKind::Plain => "plain",
        };
        f.write_str(name)
    }
}

/// Outcome of comparing a single field pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldVerdict {
    pub kind: FieldKind,
    pub matched: bool,
}

/// Classify `left` and compare it with `right` under `cfg`.
///
/// Only fields containing an ASCII digit are parsed as numbers, so number
/// words such as `inf` or `NaN` are plain text and their case matters:
/// `Inf` does not match `inf`.
pub fn compare_fields(left: &str, right: &str, cfg: &CompareConfig) -> FieldVerdict {
    // Words such as `NaN` or `inf` parse as floats but are compared as text.
    if left.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(a) = left.parse::<i64>() {
            let matched = match right.parse::<i64>() {
                Ok(b) => cfg.int_rule.matches(a, b),
                Err(_) => false,
            };
            return FieldVerdict {
                kind: FieldKind::Integer,
                matched,
            };
        }
        if let Ok(a) = left.parse::<f64>() {
            let matched = match right.parse::<f64>() {
                Ok(b) => cfg.float_rule.matches(a, b),
                Err(_) => false,
            };
            return FieldVerdict {
                kind: FieldKind::Float,
                matched,
            };
        }
    }

    let left = strip_comma(left);
    let right = strip_comma(right);
    let style = cfg.path_style;
    if style.looks_like_path(left) || style.looks_like_path(right) {
        return FieldVerdict {
            kind: FieldKind::Path,
            matched: cfg.path_rule.matches(left, right, style),
        };
    }

    FieldVerdict {
        kind: FieldKind::Plain,
        matched: left == right,
    }
}

/// Drop at most one leading and one trailing comma.
pub fn strip_comma(field: &str) -> &str {
    let field = field.strip_prefix(',').unwrap_or(field);
    field.strip_suffix(',').unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FloatRule, PathRule};

    fn verdict(left: &str, right: &str) -> FieldVerdict {
        compare_fields(left, right, &CompareConfig::default())
    }

    #[test]
    fn integers_compare_exactly() {
        assert_eq!(
            verdict("1", "1"),
            FieldVerdict {
                kind: FieldKind::Integer,
                matched: true
            }
        );
        assert!(!verdict("1", "2").matched);
    }

    #[test]
    fn floats_use_tolerance() {
        let v = verdict("3.1415", "3.141592653589793");
        assert_eq!(v.kind, FieldKind::Float);
        assert!(v.matched);

        let exact = CompareConfig::default().with_float_rule(FloatRule::Exact);
        assert!(!compare_fields("3.1415", "3.141592653589793", &exact).matched);
    }

    #[test]
    fn right_side_parse_failure_is_mismatch() {
        let v = verdict("1", "1.0");
        assert_eq!(v.kind, FieldKind::Integer);
        assert!(!v.matched);

        let v = verdict("2.5", "abc");
        assert_eq!(v.kind, FieldKind::Float);
        assert!(!v.matched);
    }

    #[test]
    fn classification_driven_by_left_field() {
        let v = verdict("1.0", "1");
        assert_eq!(v.kind, FieldKind::Float);
        assert!(v.matched);
    }

    #[test]
    fn number_words_stay_plain() {
        assert_eq!(verdict("NaN", "NaN").kind, FieldKind::Plain);
        assert!(verdict("NaN", "NaN").matched);
        assert!(verdict("inf", "inf").matched);

        let v = verdict("Inf", "inf");
        assert_eq!(v.kind, FieldKind::Plain);
        assert!(!v.matched);
    }

    #[test]
    fn paths_match_on_last_component() {
        let v = verdict("/usr/bin/bash", "/bin/bash");
        assert_eq!(v.kind, FieldKind::Path);
        assert!(v.matched);
        assert!(!verdict("/usr/bin/bash", "/usr/bin/zsh").matched);

        let full = CompareConfig::default().with_path_rule(PathRule::Full);
        assert!(!compare_fields("/usr/bin/bash", "/bin/bash", &full).matched);
    }

    #[test]
    fn path_on_either_side_selects_path_rule() {
        let v = verdict("bash", "/bin/bash");
        assert_eq!(v.kind, FieldKind::Path);
        assert!(v.matched);
    }

    #[test]
    fn commas_stripped_for_text_and_paths() {
        assert!(verdict("word,", "word").matched);
        assert!(verdict(",word", "word,").matched);
        assert!(verdict("/usr/bin/bash,", "/bin/bash").matched);
        assert_eq!(strip_comma(",,x,,"), ",x,");
    }

    #[test]
    fn plain_text_is_exact() {
        assert!(verdict("Object", "Object").matched);
        assert!(!verdict("Object", "object").matched);
    }
}
