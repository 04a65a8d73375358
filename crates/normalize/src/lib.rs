//! showmatch normalization layer.
//!
//! Turns the printed representation of a value into canonical text that can be
//! compared field by field with a reference string.
//!
//! ## What we do
//!
//! - User substitutions (literal or regex), applied first, in order
//! - Digit isolation: digits are split from neighbouring letters and
//!   punctuation (`Int(1)` → `Int( 1 )`), dots excepted so decimals stay whole
//! - Sequence simplification: `[a, b, ..., z]` → `[a, z]`, so truncated or
//!   differently sized collections still line up
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. Same text and config, same [`CanonicalForm`],
//! and normalizing canonical text again with the same config changes nothing.
//!
//! ## Limitations
//!
//! Sequence simplification only sees bracket runs without nested brackets; in a
//! vector of vectors the inner vectors collapse and the outer one is kept.

mod config;
mod error;
mod form;
mod pipeline;
mod render;
mod replace;
mod token;

pub use crate::config::NormalizeConfig;
pub use crate::error::NormalizeError;
pub use crate::form::CanonicalForm;
pub use crate::pipeline::{
    isolate_digits, normalize, normalize_debug, normalize_value, simplify_sequences,
};
pub use crate::render::{DebugRenderer, DisplayRenderer, RenderContext, RenderMode, Renderer};
pub use crate::replace::{parse_replacements, Matcher, Replacement};
pub use crate::token::{tokenize, Token};
