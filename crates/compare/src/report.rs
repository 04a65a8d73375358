//! Mismatch diagnostics.

use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::field::FieldKind;

/// Result of walking two canonical forms.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    /// Every compared pair matched. `compared` is the length of the shorter side.
    Match { compared: usize },
    /// First divergent pair.
    Mismatch(Box<MismatchReport>),
}

impl ComparisonOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ComparisonOutcome::Match { .. })
    }

    pub fn report(&self) -> Option<&MismatchReport> {
        match self {
            ComparisonOutcome::Match { .. } => None,
            ComparisonOutcome::Mismatch(report) => Some(report),
        }
    }
}

/// Where and how two canonical forms first diverged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MismatchReport {
    /// Full canonical text of the left operand.
    pub left: String,
    /// Full canonical text of the right operand.
    pub right: String,
    /// Zero-based position of the divergent field pair.
    pub index: usize,
    pub left_field: String,
    pub right_field: String,
    /// Byte offset of `left_field` in `left`.
    pub left_offset: usize,
    /// Byte offset of `right_field` in `right`.
    pub right_offset: usize,
    pub kind: FieldKind,
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "first difference at field {} ({})",
            self.index + 1,
            self.kind
        )?;
        write_side(f, "left: ", &self.left, self.left_offset, &self.left_field)?;
        write_side(f, "right:", &self.right, self.right_offset, &self.right_field)?;
        write!(
            f,
            "  differing fields: `{}` vs `{}`",
            self.left_field, self.right_field
        )
    }
}

fn write_side(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    text: &str,
    offset: usize,
    field: &str,
) -> fmt::Result {
    writeln!(f, "  {label} {text}")?;
    // Carets only line up on single-line renderings.
    if !text.contains('\n') {
        let column = text.get(..offset).map_or(0, |prefix| prefix.chars().count());
        let width = field.chars().count().max(1);
        writeln!(
            f,
            "  {:pad$} {:col$}{}",
            "",
            "",
            "^".repeat(width),
            pad = label.len(),
            col = column
        )?;
    }
    Ok(())
}

/// Destination for reports of mismatches that are not raised as errors.
///
/// Emission is best-effort and must not fail.
pub trait ReportSink: Send + Sync {
    fn emit(&self, report: &MismatchReport);
}

impl<F> ReportSink for F
where
    F: Fn(&MismatchReport) + Send + Sync,
{
    fn emit(&self, report: &MismatchReport) {
        self(report)
    }
}

/// Writes reports to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl ReportSink for StderrSink {
    fn emit(&self, report: &MismatchReport) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "approximate comparison failed\n{report}");
    }
}

/// Logs reports as `tracing` warnings.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn emit(&self, report: &MismatchReport) {
        warn!(
            field = report.index,
            kind = %report.kind,
            left_field = %report.left_field,
            right_field = %report.right_field,
            "approximate_mismatch\n{report}"
        );
    }
}
