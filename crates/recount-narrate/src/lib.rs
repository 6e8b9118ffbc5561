//! Message rendering for Recount.
//!
//! Turns a change record into a human-readable sentence. Wording lives in a
//! per-event-kind template table; the diff engine only supplies values.
//! Callers may replace the whole strategy by implementing
//! [`MessageRenderer`].
//!
//! # Key Types
//!
//! - [`MessageRenderer`] — Pluggable rendering strategy
//! - [`DefaultRenderer`] — Built-in English templates
//! - [`RenderContext`] — Named values available to templates

pub mod renderer;
pub mod template;

pub use renderer::{DefaultRenderer, MessageRenderer, RenderContext};
pub use template::{capitalize, normalize_whitespace, substitute, uncapitalize};
