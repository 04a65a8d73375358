use std::fmt;
use std::sync::Arc;

use normalize::NormalizeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::path::{self, PathStyle};
use crate::report::MismatchReport;

/// Default relative tolerance for floating-point fields.
pub const DEFAULT_RTOL: f64 = 1e-3;

pub type FloatPredicate = Arc<dyn Fn(f64, f64) -> bool + Send + Sync>;
pub type IntPredicate = Arc<dyn Fn(i64, i64) -> bool + Send + Sync>;
pub type PathPredicate = Arc<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Equality rule for fields classified as floating-point numbers.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FloatRule {
    /// `a == b`, or both finite and `|a - b| <= rtol * max(|a|, |b|)`.
    Relative { rtol: f64 },
    /// `a == b`, or both finite and `|a - b| <= atol`.
    Absolute { atol: f64 },
    /// Plain `==`.
    Exact,
    /// Caller-supplied predicate. Not serializable.
    #[serde(skip)]
    Custom(FloatPredicate),
}

impl FloatRule {
    pub fn custom(f: impl Fn(f64, f64) -> bool + Send + Sync + 'static) -> Self {
        FloatRule::Custom(Arc::new(f))
    }

    pub fn matches(&self, a: f64, b: f64) -> bool {
        match self {
            FloatRule::Relative { rtol } => {
                a == b
                    || (a.is_finite()
                        && b.is_finite()
                        && (a - b).abs() <= rtol * a.abs().max(b.abs()))
            }
            FloatRule::Absolute { atol } => {
                a == b || (a.is_finite() && b.is_finite() && (a - b).abs() <= *atol)
            }
            FloatRule::Exact => a == b,
            FloatRule::Custom(f) => f(a, b),
        }
    }
}

impl Default for FloatRule {
    fn default() -> Self {
        FloatRule::Relative { rtol: DEFAULT_RTOL }
    }
}

/// Equality rule for fields classified as integers.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntRule {
    #[default]
    Exact,
    /// `|a - b| <= delta`.
    Within { delta: u64 },
    #[serde(skip)]
    Custom(IntPredicate),
}

impl IntRule {
    pub fn custom(f: impl Fn(i64, i64) -> bool + Send + Sync + 'static) -> Self {
        IntRule::Custom(Arc::new(f))
    }

    pub fn matches(&self, a: i64, b: i64) -> bool {
        match self {
            IntRule::Exact => a == b,
            IntRule::Within { delta } => {
                (i128::from(a) - i128::from(b)).unsigned_abs() <= u128::from(*delta)
            }
            IntRule::Custom(f) => f(a, b),
        }
    }
}

/// Equality rule for fields that look like filesystem paths.
///
/// Rules receive both fields whole; splitting into components follows the
/// configured [`PathStyle`].
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathRule {
    /// Only the final component has to match: `/usr/bin/bash` ~ `/bin/bash`.
    #[default]
    LastComponent,
    /// The last `count` components have to match.
    TrailingComponents { count: usize },
    /// Whole strings have to match.
    Full,
    #[serde(skip)]
    Custom(PathPredicate),
}

impl PathRule {
    pub fn custom(f: impl Fn(&str, &str) -> bool + Send + Sync + 'static) -> Self {
        PathRule::Custom(Arc::new(f))
    }

    pub fn matches(&self, a: &str, b: &str, style: PathStyle) -> bool {
        match self {
            PathRule::LastComponent => path::trailing(a, 1, style) == path::trailing(b, 1, style),
            PathRule::TrailingComponents { count } => {
                path::trailing(a, *count, style) == path::trailing(b, *count, style)
            }
            PathRule::Full => a == b,
            PathRule::Custom(f) => f(a, b),
        }
    }
}

impl fmt::Debug for FloatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatRule::Relative { rtol } => f.debug_struct("Relative").field("rtol", rtol).finish(),
            FloatRule::Absolute { atol } => f.debug_struct("Absolute").field("atol", atol).finish(),
            FloatRule::Exact => f.write_str("Exact"),
            FloatRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for FloatRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FloatRule::Relative { rtol: a }, FloatRule::Relative { rtol: b }) => a == b,
            (FloatRule::Absolute { atol: a }, FloatRule::Absolute { atol: b }) => a == b,
            (FloatRule::Exact, FloatRule::Exact) => true,
            (FloatRule::Custom(a), FloatRule::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for IntRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntRule::Exact => f.write_str("Exact"),
            IntRule::Within { delta } => f.debug_struct("Within").field("delta", delta).finish(),
            IntRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for IntRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (IntRule::Exact, IntRule::Exact) => true,
            (IntRule::Within { delta: a }, IntRule::Within { delta: b }) => a == b,
            (IntRule::Custom(a), IntRule::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for PathRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRule::LastComponent => f.write_str("LastComponent"),
            PathRule::TrailingComponents { count } => f
                .debug_struct("TrailingComponents")
                .field("count", count)
                .finish(),
            PathRule::Full => f.write_str("Full"),
            PathRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl PartialEq for PathRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathRule::LastComponent, PathRule::LastComponent) => true,
            (
                PathRule::TrailingComponents { count: a },
                PathRule::TrailingComponents { count: b },
            ) => a == b,
            (PathRule::Full, PathRule::Full) => true,
            (PathRule::Custom(a), PathRule::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Configuration for a comparison.
///
/// `CompareConfig` is cheap to clone and serde-friendly (except for `Custom`
/// rules) so it can be loaded from the YAML config alongside the normalizer
/// settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompareConfig {
    #[serde(default)]
    pub float_rule: FloatRule,
    #[serde(default)]
    pub int_rule: IntRule,
    #[serde(default)]
    pub path_rule: PathRule,
    /// Which separators make a field look like a path.
    #[serde(default)]
    pub path_style: PathStyle,
    /// Build a [`MismatchReport`] on mismatch; it is attached to the error or
    /// emitted to the comparator's sink.
    #[serde(default = "CompareConfig::default_true")]
    pub report_on_mismatch: bool,
    /// Return [`CompareError::Mismatch`] instead of `Ok(false)`.
    #[serde(default = "CompareConfig::default_true")]
    pub raise_on_mismatch: bool,
}

impl CompareConfig {
    pub(crate) fn default_true() -> bool {
        true
    }

    pub fn with_float_rule(mut self, rule: FloatRule) -> Self {
        self.float_rule = rule;
        self
    }

    pub fn with_int_rule(mut self, rule: IntRule) -> Self {
        self.int_rule = rule;
        self
    }

    pub fn with_path_rule(mut self, rule: PathRule) -> Self {
        self.path_rule = rule;
        self
    }

    pub fn with_path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    pub fn with_report_on_mismatch(mut self, report: bool) -> Self {
        self.report_on_mismatch = report;
        self
    }

    pub fn with_raise_on_mismatch(mut self, raise: bool) -> Self {
        self.raise_on_mismatch = raise;
        self
    }

    /// Validate rule parameters.
    pub fn validate(&self) -> Result<(), CompareError> {
        match self.float_rule {
            FloatRule::Relative { rtol } if !(rtol.is_finite() && rtol >= 0.0) => {
                return Err(CompareError::InvalidConfig(
                    "float_rule.rtol must be a finite value >= 0.0".into(),
                ));
            }
            FloatRule::Absolute { atol } if !(atol.is_finite() && atol >= 0.0) => {
                return Err(CompareError::InvalidConfig(
                    "float_rule.atol must be a finite value >= 0.0".into(),
                ));
            }
            _ => {}
        }
        if let PathRule::TrailingComponents { count: 0 } = self.path_rule {
            return Err(CompareError::InvalidConfig(
                "path_rule.count must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            float_rule: FloatRule::default(),
            int_rule: IntRule::default(),
            path_rule: PathRule::default(),
            path_style: PathStyle::default(),
            report_on_mismatch: true,
            raise_on_mismatch: true,
        }
    }
}

/// Errors produced by the comparison layer.
#[derive(Debug, Clone, Error)]
pub enum CompareError {
    /// The operands differ; carries the report when reporting is enabled.
    #[error("approximate comparison failed{}", describe(.report))]
    Mismatch { report: Option<Box<MismatchReport>> },
    /// Invalid rule parameters.
    #[error("invalid compare config: {0}")]
    InvalidConfig(String),
    /// A raw operand could not be normalized.
    #[error("normalization failed: {0}")]
    Normalize(#[from] NormalizeError),
}

impl CompareError {
    /// The mismatch report, if this is a reported mismatch.
    pub fn report(&self) -> Option<&MismatchReport> {
        match self {
            CompareError::Mismatch { report } => report.as_deref(),
            _ => None,
        }
    }
}

fn describe(report: &Option<Box<MismatchReport>>) -> String {
    match report {
        Some(report) => format!("\n{report}"),
        None => String::new(),
    }
}
