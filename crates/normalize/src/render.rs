//! Rendering arbitrary values into text.
//!
//! The normalizer never inspects values itself. It asks a [`Renderer`] for
//! the text and forwards the [`RenderMode`] and [`RenderContext`] untouched.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Tag selecting how a renderer should print a value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Single-line rendering (`{:?}` for [`DebugRenderer`]).
    #[default]
    Compact,
    /// Multi-line rendering (`{:#?}` for [`DebugRenderer`]).
    Pretty,
    /// Renderer-specific mode, passed through as is.
    Tagged(String),
}

/// Auxiliary key/value settings forwarded to the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct RenderContext(BTreeMap<String, JsonValue>);

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }
}

/// Produces the textual rendering of a value.
///
/// Closures with the matching signature are renderers too:
///
/// ```rust
/// use normalize::{normalize_value, NormalizeConfig, RenderContext, RenderMode};
///
/// let render = |v: &(i32, i32), _: &RenderMode, _: &RenderContext| format!("P({}, {})", v.0, v.1);
/// let form = normalize_value(
///     &(3, 4),
///     &render,
///     &RenderMode::default(),
///     &RenderContext::new(),
///     &NormalizeConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(form.text(), "P( 3 , 4 )");
/// ```
pub trait Renderer<T: ?Sized> {
    fn render(&self, value: &T, mode: &RenderMode, context: &RenderContext) -> String;
}

impl<T, F> Renderer<T> for F
where
    T: ?Sized,
    F: Fn(&T, &RenderMode, &RenderContext) -> String,
{
    fn render(&self, value: &T, mode: &RenderMode, context: &RenderContext) -> String {
        self(value, mode, context)
    }
}

/// Renders through the value's `Debug` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugRenderer;

impl<T: Debug + ?Sized> Renderer<T> for DebugRenderer {
    fn render(&self, value: &T, mode: &RenderMode, _context: &RenderContext) -> String {
        match mode {
            RenderMode::Pretty => format!("{value:#?}"),
            RenderMode::Compact | RenderMode::Tagged(_) => format!("{value:?}"),
        }
    }
}

/// Renders through the value's `Display` implementation; the mode is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayRenderer;

impl<T: Display + ?Sized> Renderer<T> for DisplayRenderer {
    fn render(&self, value: &T, _mode: &RenderMode, _context: &RenderContext) -> String {
        value.to_string()
    }
}
