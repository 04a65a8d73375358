use std::borrow::Cow;
use std::sync::Arc;

use normalize::{normalize, CanonicalForm, NormalizeConfig, NormalizeError};
use tracing::{debug, Level};

use crate::field::compare_fields;
use crate::report::{ComparisonOutcome, MismatchReport, ReportSink, StderrSink};
use crate::types::{CompareConfig, CompareError};

#[cfg(test)]
mod tests;

/// One side of a comparison: an already normalized form or raw text.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Form(&'a CanonicalForm),
    Raw(&'a str),
}

impl<'a> From<&'a CanonicalForm> for Operand<'a> {
    fn from(form: &'a CanonicalForm) -> Self {
        Operand::Form(form)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(text: &'a str) -> Self {
        Operand::Raw(text)
    }
}

impl<'a> From<&'a String> for Operand<'a> {
    fn from(text: &'a String) -> Self {
        Operand::Raw(text.as_str())
    }
}

/// Field-wise approximate comparator.
pub struct Comparator {
    config: CompareConfig,
    sink: Arc<dyn ReportSink>,
}

impl Comparator {
    /// Comparator that emits non-raised reports to standard error.
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            sink: Arc::new(StderrSink),
        }
    }

    /// Replace the destination of non-raised reports.
    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare two operands and return `true` when every field pair matches.
    ///
    /// On mismatch, returns [`CompareError::Mismatch`] when
    /// `raise_on_mismatch` is set, otherwise emits the report (if
    /// `report_on_mismatch`) and returns `Ok(false)`.
    pub fn approx_equal<'a, 'b>(
        &self,
        left: impl Into<Operand<'a>>,
        right: impl Into<Operand<'b>>,
    ) -> Result<bool, CompareError> {
        let report = match self.compare(left, right)? {
            ComparisonOutcome::Match { .. } => return Ok(true),
            ComparisonOutcome::Mismatch(report) => report,
        };

        if self.config.raise_on_mismatch {
            let report = self.config.report_on_mismatch.then_some(report);
            return Err(CompareError::Mismatch { report });
        }
        if self.config.report_on_mismatch {
            self.sink.emit(&report);
        }
        Ok(false)
    }

    /// Compare two operands and return the outcome without raising or emitting.
    ///
    /// A raw operand is normalized with the settings of the other operand when
    /// that one is a [`CanonicalForm`], and with defaults otherwise.
    pub fn compare<'a, 'b>(
        &self,
        left: impl Into<Operand<'a>>,
        right: impl Into<Operand<'b>>,
    ) -> Result<ComparisonOutcome, CompareError> {
        self.config.validate()?;
        let (left, right) = resolve(left.into(), right.into())?;
        Ok(self.compare_forms(&left, &right))
    }

    /// Walk both forms field by field and stop at the first mismatch.
    ///
    /// Fields beyond the shorter form are never compared. Callers validate the
    /// config first.
    pub(crate) fn compare_forms(
        &self,
        left: &CanonicalForm,
        right: &CanonicalForm,
    ) -> ComparisonOutcome {
        let left_tokens = left.tokens();
        let right_tokens = right.tokens();

        let span = tracing::span!(
            Level::DEBUG,
            "showmatch.compare",
            left_fields = left_tokens.len(),
            right_fields = right_tokens.len()
        );
        let _guard = span.enter();

        for (index, (l, r)) in left_tokens.iter().zip(right_tokens.iter()).enumerate() {
            let verdict = compare_fields(&l.text, &r.text, &self.config);
            if !verdict.matched {
                debug!(
                    field = index,
                    kind = %verdict.kind,
                    left_field = %l.text,
                    right_field = %r.text,
                    "compare_mismatch"
                );
                return ComparisonOutcome::Mismatch(Box::new(MismatchReport {
                    left: left.text().to_string(),
                    right: right.text().to_string(),
                    index,
                    left_field: l.text.clone(),
                    right_field: r.text.clone(),
                    left_offset: l.start,
                    right_offset: r.start,
                    kind: verdict.kind,
                }));
            }
        }

        let compared = left_tokens.len().min(right_tokens.len());
        debug!(compared, "compare_match");
        ComparisonOutcome::Match { compared }
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(CompareConfig::default())
    }
}

/// Compare two operands under `cfg`, reporting to standard error.
pub fn approx_equal<'a, 'b>(
    left: impl Into<Operand<'a>>,
    right: impl Into<Operand<'b>>,
    cfg: &CompareConfig,
) -> Result<bool, CompareError> {
    Comparator::new(cfg.clone()).approx_equal(left, right)
}

fn resolve<'a, 'b>(
    left: Operand<'a>,
    right: Operand<'b>,
) -> Result<(Cow<'a, CanonicalForm>, Cow<'b, CanonicalForm>), NormalizeError> {
    Ok(match (left, right) {
        (Operand::Form(l), Operand::Form(r)) => (Cow::Borrowed(l), Cow::Borrowed(r)),
        (Operand::Form(l), Operand::Raw(r)) => (Cow::Borrowed(l), Cow::Owned(l.renormalize(r)?)),
        (Operand::Raw(l), Operand::Form(r)) => (Cow::Owned(r.renormalize(l)?), Cow::Borrowed(r)),
        (Operand::Raw(l), Operand::Raw(r)) => {
            let cfg = NormalizeConfig::default();
            (Cow::Owned(normalize(l, &cfg)?), Cow::Owned(normalize(r, &cfg)?))
        }
    })
}
