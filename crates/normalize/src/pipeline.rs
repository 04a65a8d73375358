use std::fmt::Debug;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, Level};

use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::form::CanonicalForm;
use crate::render::{DebugRenderer, RenderContext, RenderMode, Renderer};

// A bracketed run with at least two commas and no nested brackets. The first
// and last groups exclude commas so the greedy middle swallows every inner item.
static SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([^\[\],]*),[^\[\]]*,([^\[\],]*)\]").expect("sequence regex compiles")
});

/// Main entry point. Normalizes raw text into a [`CanonicalForm`].
///
/// Steps, in order: replacements, digit isolation, sequence simplification.
pub fn normalize(input: &str, cfg: &NormalizeConfig) -> Result<CanonicalForm, NormalizeError> {
    let span = tracing::span!(
        Level::DEBUG,
        "showmatch.normalize",
        input_len = input.len(),
        replacements = cfg.replacements.len(),
        simplify_sequences = cfg.simplify_sequences
    );
    let _guard = span.enter();

    cfg.validate()?;

    let mut text = input.to_string();
    for rule in &cfg.replacements {
        text = rule.apply(&text);
    }

    let mut text = isolate_digits(&text);
    if cfg.simplify_sequences {
        text = simplify_sequences(&text);
    }

    debug!(output_len = text.len(), "normalize_success");
    Ok(CanonicalForm::new(text, cfg))
}

/// Render `value` with `renderer`, then normalize the text.
///
/// `mode` and `context` are handed to the renderer verbatim.
pub fn normalize_value<T, R>(
    value: &T,
    renderer: &R,
    mode: &RenderMode,
    context: &RenderContext,
    cfg: &NormalizeConfig,
) -> Result<CanonicalForm, NormalizeError>
where
    T: ?Sized,
    R: Renderer<T> + ?Sized,
{
    let rendered = renderer.render(value, mode, context);
    normalize(&rendered, cfg)
}

/// Normalize the compact `Debug` rendering of `value`.
pub fn normalize_debug<T: Debug + ?Sized>(
    value: &T,
    cfg: &NormalizeConfig,
) -> Result<CanonicalForm, NormalizeError> {
    normalize_value(
        value,
        &DebugRenderer,
        &RenderMode::Compact,
        &RenderContext::new(),
        cfg,
    )
}

/// Insert a space wherever an ASCII digit touches a character that is not a
/// digit, a dot, or whitespace.
///
/// `Int(1)` becomes `Int( 1 )`; `3.14` and `42` stay whole.
pub fn isolate_digits(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    let mut prev: Option<char> = None;

    for ch in text.chars() {
        if let Some(p) = prev {
            if needs_boundary(p, ch) {
                out.push(' ');
            }
        }
        out.push(ch);
        prev = Some(ch);
    }

    out
}

fn needs_boundary(left: char, right: char) -> bool {
    (left.is_ascii_digit() && is_separable(right)) || (is_separable(left) && right.is_ascii_digit())
}

fn is_separable(ch: char) -> bool {
    !ch.is_ascii_digit() && ch != '.' && !ch.is_whitespace()
}

/// Collapse every `[a, b, ..., z]` run to `[a, z]`.
///
/// Runs with fewer than three items are left alone. Nested collections are not
/// generalized: only innermost runs (no brackets inside) collapse, in a single
/// pass.
pub fn simplify_sequences(text: &str) -> String {
    SEQUENCE.replace_all(text, "[${1},${2}]").into_owned()
}
