use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use normalize::Matcher;
use proptest::prelude::*;

use crate::field::FieldKind;
use crate::path::PathStyle;
use crate::types::{FloatRule, IntRule, PathRule};

const RENDERED: &str =
    "Object with Int(1), /usr/bin/bash and [1.0, 3.141592653589793, 7.5, 1.4142135623730951]";
const EXPECTED: &str = "Object with Int(1), /usr/bin/bash and [1.0, 3.1415, 7.5, 1.4142]";

fn quiet() -> CompareConfig {
    CompareConfig::default().with_raise_on_mismatch(false)
}

/// Sink that keeps every emitted report for inspection.
#[derive(Default)]
struct CollectingSink {
    reports: Mutex<Vec<MismatchReport>>,
}

impl CollectingSink {
    fn snapshot(&self) -> Vec<MismatchReport> {
        self.reports.lock().unwrap().clone()
    }
}

impl ReportSink for CollectingSink {
    fn emit(&self, report: &MismatchReport) {
        self.reports.lock().unwrap().push(report.clone());
    }
}

#[test]
fn end_to_end_rendering_matches_reference() {
    let form = normalize(RENDERED, &NormalizeConfig::default()).expect("normalize");
    let comparator = Comparator::default();
    assert!(comparator.approx_equal(&form, EXPECTED).expect("match"));
    assert!(comparator.approx_equal(EXPECTED, &form).expect("match"));
}

#[test]
fn end_to_end_mismatch_raises_with_integer_pair() {
    let form = normalize(RENDERED, &NormalizeConfig::default()).expect("normalize");
    let expected = EXPECTED.replace("Int(1)", "Int(2)");

    let err = Comparator::default()
        .approx_equal(&form, &expected)
        .expect_err("mismatch must raise");
    let report = err.report().expect("report attached");
    assert_eq!(report.kind, FieldKind::Integer);
    assert_eq!(report.left_field, "1");
    assert_eq!(report.right_field, "2");
    assert_eq!(report.index, 3);
    assert_eq!(report.left, form.text());
    assert!(err.to_string().contains("differing fields: `1` vs `2`"));
}

#[test]
fn end_to_end_mismatch_returns_false_when_not_raising() {
    let sink = Arc::new(CollectingSink::default());
    let comparator = Comparator::new(quiet()).with_sink(sink.clone());
    let expected = EXPECTED.replace("Int(1)", "Int(2)");

    let matched = comparator
        .approx_equal(RENDERED, expected.as_str())
        .expect("no error when not raising");
    assert!(!matched);

    let reports = sink.snapshot();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].left_field, "1");
    assert_eq!(reports[0].right_field, "2");
}

#[test]
fn reporting_can_be_disabled() {
    let sink = Arc::new(CollectingSink::default());
    let comparator =
        Comparator::new(quiet().with_report_on_mismatch(false)).with_sink(sink.clone());
    assert!(!comparator.approx_equal("a 1", "a 2").expect("no error"));
    assert!(sink.snapshot().is_empty());

    let raising = Comparator::new(CompareConfig::default().with_report_on_mismatch(false));
    let err = raising.approx_equal("a 1", "a 2").expect_err("raises");
    assert!(matches!(err, CompareError::Mismatch { report: None }));
    assert_eq!(err.to_string(), "approximate comparison failed");
}

#[test]
fn raised_mismatch_is_not_emitted() {
    let sink = Arc::new(CollectingSink::default());
    let comparator = Comparator::default().with_sink(sink.clone());
    assert!(comparator.approx_equal("x", "y").is_err());
    assert!(sink.snapshot().is_empty());
}

#[test]
fn comparison_stops_at_first_mismatch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let cfg = quiet().with_int_rule(IntRule::custom(move |a, b| {
        counter.fetch_add(1, Ordering::SeqCst);
        a == b
    }));
    let comparator = Comparator::new(cfg).with_sink(Arc::new(|_: &MismatchReport| {}));

    let matched = comparator
        .approx_equal("1 2 3 4 5", "1 9 3 4 5")
        .expect("no error");
    assert!(!matched);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn trailing_fields_are_ignored() {
    let comparator = Comparator::default();
    assert!(comparator.approx_equal("a b c", "a b").expect("match"));
    assert!(comparator.approx_equal("a", "a b c d").expect("match"));
    assert!(comparator.approx_equal("", "anything").expect("match"));

    let outcome = comparator.compare("a b c", "a b").expect("compare");
    assert_eq!(outcome, ComparisonOutcome::Match { compared: 2 });
}

#[test]
fn float_tolerance_is_configurable() {
    let default = Comparator::default();
    assert!(default
        .approx_equal("3.1415", "3.141592653589793")
        .expect("match"));

    let exact = Comparator::new(CompareConfig::default().with_float_rule(FloatRule::Exact));
    let err = exact
        .approx_equal("3.1415", "3.141592653589793")
        .expect_err("exact float mismatch");
    assert_eq!(err.report().map(|r| r.kind), Some(FieldKind::Float));
}

#[test]
fn path_rule_is_configurable() {
    let default = Comparator::default();
    assert!(default.approx_equal("/usr/bin/bash", "/bin/bash").expect("match"));

    let full = Comparator::new(quiet().with_path_rule(PathRule::Full))
        .with_sink(Arc::new(|_: &MismatchReport| {}));
    assert!(!full.approx_equal("/usr/bin/bash", "/bin/bash").expect("no error"));

    let two = Comparator::new(quiet().with_path_rule(PathRule::TrailingComponents { count: 2 }))
        .with_sink(Arc::new(|_: &MismatchReport| {}));
    assert!(two.approx_equal("/usr/bin/bash", "/bin/bash").expect("no error"));
    assert!(!two.approx_equal("/usr/bin/bash", "/sbin/bash").expect("no error"));
}

#[test]
fn windows_paths_only_detected_when_style_allows() {
    let unix = Comparator::new(quiet().with_path_style(PathStyle::Unix))
        .with_sink(Arc::new(|_: &MismatchReport| {}));
    assert!(!unix
        .approx_equal(r"C:\tools\bash.exe", r"D:\bash.exe")
        .expect("no error"));

    let windows = Comparator::new(quiet().with_path_style(PathStyle::Windows));
    assert!(windows
        .approx_equal(r"C:\tools\bash.exe", r"D:\bash.exe")
        .expect("no error"));
}

#[test]
fn raw_operand_inherits_form_settings() {
    let cfg = NormalizeConfig::default()
        .with_replacement(Matcher::literal("Float64"), "Float")
        .without_sequence_simplification();
    let form = normalize("Float64[1.0, 2.0, 3.0]", &cfg).expect("normalize");

    let comparator = Comparator::new(quiet()).with_sink(Arc::new(|_: &MismatchReport| {}));
    // Without the replacement the raw side would read `Float 64[` and fail.
    assert!(comparator
        .approx_equal(&form, "Float64[1.0, 2.0, 3.0]")
        .expect("no error"));
    assert!(comparator
        .approx_equal("Float64[1.0, 2.0, 3.0]", &form)
        .expect("no error"));
    // Simplification stays off, so a shortened reference no longer lines up.
    assert!(!comparator
        .approx_equal(&form, "Float64[1.0, 3.0]")
        .expect("no error"));
}

#[test]
fn forms_compare_regardless_of_origin() {
    #[derive(Debug)]
    #[allow(dead_code)]
    struct Sample {
        values: Vec<f64>,
    }

    let value = Sample {
        values: vec![1.0, 2.0, 3.0, 4.000001],
    };
    let from_value = normalize::normalize_debug(&value, &NormalizeConfig::default())
        .expect("normalize value");
    let from_text =
        normalize("Sample { values: [1.0, 4.0] }", &NormalizeConfig::default()).expect("text");

    assert!(Comparator::default()
        .approx_equal(&from_value, &from_text)
        .expect("match"));
}

#[test]
fn invalid_config_rejected_before_comparing() {
    let comparator =
        Comparator::new(CompareConfig::default().with_float_rule(FloatRule::Absolute { atol: -1.0 }));
    assert!(matches!(
        comparator.approx_equal("1.0", "1.0"),
        Err(CompareError::InvalidConfig(_))
    ));
}

#[test]
fn zero_trailing_components_rejected_before_paths_compare() {
    let comparator = Comparator::new(
        quiet().with_path_rule(PathRule::TrailingComponents { count: 0 }),
    );
    assert!(matches!(
        comparator.compare("/usr/bin/bash", "/opt/zsh"),
        Err(CompareError::InvalidConfig(_))
    ));
}

#[test]
fn free_function_uses_config() {
    let cfg = CompareConfig::default().with_int_rule(IntRule::Within { delta: 1 });
    assert!(approx_equal("count 10", "count 11", &cfg).expect("match"));
    assert!(approx_equal("count 10", "count 12", &cfg).is_err());
}

proptest! {
    #[test]
    fn default_comparison_is_symmetric(
        left in proptest::collection::vec(0u8..6, 0..8),
        right in proptest::collection::vec(0u8..6, 0..8),
    ) {
        // Both sides draw from the same vocabulary with one field kind per slot value.
        const VOCAB: [&str; 6] = ["1", "2", "3.5", "3.5001", "/usr/bin/bash", "word,"];
        let render = |ids: &[u8]| {
            ids.iter()
                .map(|&i| VOCAB[usize::from(i)])
                .collect::<Vec<_>>()
                .join(" ")
        };
        let a = render(&left[..]);
        let b = render(&right[..]);
        let comparator = Comparator::new(quiet()).with_sink(Arc::new(|_: &MismatchReport| {}));
        let ab = comparator.approx_equal(a.as_str(), b.as_str()).expect("no error");
        let ba = comparator.approx_equal(b.as_str(), a.as_str()).expect("no error");
        prop_assert_eq!(ab, ba);
    }
}
