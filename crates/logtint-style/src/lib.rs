#![forbid(unsafe_code)]

//! Style types for logtint.
//!
//! This crate provides:
//! - [`Style`] attribute sets (weight, foreground, background) applied to spans
//! - [`StyleSheet`] for named style registration
//! - Color types and downgrade utilities for less capable terminals

/// Color types, profiles, and downgrade utilities.
pub mod color;
/// Style attribute sets.
pub mod style;
/// StyleSheet registry for named styles.
pub mod stylesheet;

pub use color::{Color, ColorProfile, Rgb};
pub use style::{Style, StyleFlags};
pub use stylesheet::StyleSheet;
