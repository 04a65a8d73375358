//! # showmatch comparator (`compare`)
//!
//! ## Purpose
//!
//! `compare` sits on top of the normalization layer (`normalize`). It splits
//! two canonical forms into whitespace-delimited fields, walks them pairwise,
//! and decides per field whether the pair is "close enough":
//!
//! - integers: [`IntRule`] (exact by default)
//! - floats: [`FloatRule`] (relative tolerance `1e-3` by default)
//! - path-like fields: [`PathRule`] (last component by default), with
//!   detection controlled by [`PathStyle`]
//! - everything else: exact text, ignoring one leading/trailing comma
//!
//! The left field decides the classification. The walk stops at the first
//! divergent pair, and fields beyond the shorter side are ignored so that
//! truncated renderings still match.
//!
//! ## Core Types
//!
//! - [`CompareConfig`]: per-comparison rules plus the reporting switches
//!   `report_on_mismatch` and `raise_on_mismatch`.
//! - [`Comparator`]: runs comparisons and owns the [`ReportSink`] that receives
//!   non-raised reports.
//! - [`Operand`]: a [`normalize::CanonicalForm`] or raw text. Raw text is
//!   normalized with the other side's settings.
//! - [`MismatchReport`]: both canonical texts plus the first divergent pair.
//!
//! ## Example Usage
//!
//! ```
//! use compare::{Comparator, CompareConfig, FloatRule};
//! use normalize::{normalize, NormalizeConfig};
//!
//! let rendered = "Object with Int(1), /usr/bin/bash and [1.0, 3.141592653589793, 7.5]";
//! let form = normalize(rendered, &NormalizeConfig::default()).unwrap();
//!
//! let comparator = Comparator::default();
//! assert!(comparator
//!     .approx_equal(&form, "Object with Int(1), /bin/bash and [1.0, 3.1415, 7.5]")
//!     .unwrap());
//!
//! let strict = Comparator::new(
//!     CompareConfig::default()
//!         .with_float_rule(FloatRule::Exact)
//!         .with_raise_on_mismatch(false),
//! );
//! assert!(!strict.approx_equal("pi 3.1415", "pi 3.141592653589793").unwrap());
//! ```

pub mod engine;
pub mod field;
pub mod path;
pub mod report;
pub mod types;

pub use crate::engine::{approx_equal, Comparator, Operand};
pub use crate::field::{compare_fields, FieldKind, FieldVerdict};
pub use crate::path::PathStyle;
pub use crate::report::{ComparisonOutcome, MismatchReport, ReportSink, StderrSink, TracingSink};
pub use crate::types::{CompareConfig, CompareError, FloatRule, IntRule, PathRule, DEFAULT_RTOL};
