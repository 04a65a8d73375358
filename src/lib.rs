//! Workspace umbrella crate for showmatch.
//!
//! This crate stitches together the normalizer and the approximate comparator
//! so a test can check a value's debug rendering against a reference string
//! with a single call or the [`assert_show_matches!`] macro.

pub mod config;

pub use compare::{
    Comparator, CompareConfig, CompareError, ComparisonOutcome, FieldKind, FloatRule, IntRule,
    MismatchReport, Operand, PathRule, PathStyle, ReportSink, StderrSink, TracingSink,
    approx_equal,
};
pub use normalize::{
    CanonicalForm, DebugRenderer, DisplayRenderer, Matcher, NormalizeConfig, NormalizeError,
    RenderContext, RenderMode, Renderer, Replacement, normalize, normalize_debug, normalize_value,
};

use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use tracing::{Level, debug};

/// Errors that can occur while checking a rendering against a reference.
#[derive(Debug, Clone)]
pub enum ShowMatchError {
    Normalize(NormalizeError),
    Compare(CompareError),
}

impl ShowMatchError {
    /// The mismatch report carried by a raised comparison failure.
    pub fn report(&self) -> Option<&MismatchReport> {
        match self {
            ShowMatchError::Compare(err) => err.report(),
            ShowMatchError::Normalize(_) => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, ShowMatchError::Compare(CompareError::Mismatch { .. }))
    }
}

impl fmt::Display for ShowMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowMatchError::Normalize(err) => write!(f, "normalization failure: {err}"),
            ShowMatchError::Compare(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShowMatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ShowMatchError::Normalize(err) => Some(err),
            ShowMatchError::Compare(err) => Some(err),
        }
    }
}

impl From<NormalizeError> for ShowMatchError {
    fn from(value: NormalizeError) -> Self {
        ShowMatchError::Normalize(value)
    }
}

impl From<CompareError> for ShowMatchError {
    fn from(value: CompareError) -> Self {
        ShowMatchError::Compare(value)
    }
}

/// Metrics observer for the normalize and compare stages.
pub trait ShowMatchMetrics: Send + Sync {
    fn record_normalize(&self, latency: Duration, result: Result<(), NormalizeError>);
    fn record_compare(&self, latency: Duration, result: Result<bool, CompareError>);
}

/// Install or clear the global metrics recorder.
pub fn set_show_match_metrics(recorder: Option<Arc<dyn ShowMatchMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn ShowMatchMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn ShowMatchMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn ShowMatchMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn ShowMatchMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_normalize(self, result: Result<(), NormalizeError>) {
        self.recorder.record_normalize(self.start.elapsed(), result);
    }

    fn record_compare(self, result: Result<bool, CompareError>) {
        self.recorder.record_compare(self.start.elapsed(), result);
    }
}

/// Check the compact `Debug` rendering of `value` against `expected`.
///
/// `expected` is normalized with `normalize_cfg` as well, so both sides see the
/// same substitutions. Mismatches follow `compare_cfg`: with
/// `raise_on_mismatch` set they come back as
/// [`ShowMatchError::Compare`], otherwise as `Ok(false)`.
pub fn show_matches<T: Debug + ?Sized>(
    value: &T,
    expected: &str,
    normalize_cfg: &NormalizeConfig,
    compare_cfg: &CompareConfig,
) -> Result<bool, ShowMatchError> {
    show_matches_with(
        value,
        &DebugRenderer,
        &RenderMode::Compact,
        &RenderContext::new(),
        expected,
        normalize_cfg,
        compare_cfg,
    )
}

/// Like [`show_matches`], with a caller-supplied renderer.
///
/// `mode` and `context` are forwarded to `renderer` untouched.
pub fn show_matches_with<T, R>(
    value: &T,
    renderer: &R,
    mode: &RenderMode,
    context: &RenderContext,
    expected: &str,
    normalize_cfg: &NormalizeConfig,
    compare_cfg: &CompareConfig,
) -> Result<bool, ShowMatchError>
where
    T: ?Sized,
    R: Renderer<T> + ?Sized,
{
    let span = tracing::span!(
        Level::DEBUG,
        "showmatch.show_matches",
        expected_len = expected.len()
    );
    let _guard = span.enter();

    let metrics = MetricsSpan::start();
    let form = normalize_value(value, renderer, mode, context, normalize_cfg);
    if let Some(metrics) = metrics {
        metrics.record_normalize(form.as_ref().map(|_| ()).map_err(Clone::clone));
    }
    let form = form?;

    let metrics = MetricsSpan::start();
    let result = Comparator::new(compare_cfg.clone()).approx_equal(&form, expected);
    if let Some(metrics) = metrics {
        metrics.record_compare(result.clone());
    }
    let matched = result?;
    debug!(matched, "show_matches_done");
    Ok(matched)
}

/// Assert that a value's `Debug` rendering approximately matches a reference.
///
/// ```
/// use showmatch::assert_show_matches;
///
/// assert_show_matches!(vec![1.0, 2.0, 3.0, 3.14159], "[1.0, 3.1416]");
/// ```
///
/// Optional third and fourth arguments are a [`NormalizeConfig`] and a
/// [`CompareConfig`]; both are borrowed. On failure the macro panics with the
/// mismatch report.
#[macro_export]
macro_rules! assert_show_matches {
    ($value:expr, $expected:expr $(,)?) => {
        $crate::assert_show_matches!(
            $value,
            $expected,
            $crate::NormalizeConfig::default(),
            $crate::CompareConfig::default()
        )
    };
    ($value:expr, $expected:expr, $normalize_cfg:expr $(,)?) => {
        $crate::assert_show_matches!(
            $value,
            $expected,
            $normalize_cfg,
            $crate::CompareConfig::default()
        )
    };
    ($value:expr, $expected:expr, $normalize_cfg:expr, $compare_cfg:expr $(,)?) => {
        match $crate::show_matches(
            &$value,
            ::core::convert::AsRef::<str>::as_ref(&$expected),
            &$normalize_cfg,
            &$compare_cfg,
        ) {
            ::core::result::Result::Ok(true) => {}
            ::core::result::Result::Ok(false) => ::core::panic!(
                "assertion `show_matches!({}, {})` failed",
                ::core::stringify!($value),
                ::core::stringify!($expected),
            ),
            ::core::result::Result::Err(err) => ::core::panic!(
                "assertion `show_matches!({}, {})` failed: {}",
                ::core::stringify!($value),
                ::core::stringify!($expected),
                err,
            ),
        }
    };
}
