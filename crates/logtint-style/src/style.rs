#![forbid(unsafe_code)]

//! Attribute sets applied atomically to decorated spans.

use bitflags::bitflags;

use crate::color::Rgb;

bitflags! {
    /// Text attribute flags.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct StyleFlags: u8 {
        /// Bold / increased weight.
        const BOLD      = 0b0001;
        /// Dim / decreased intensity.
        const DIM       = 0b0010;
        /// Italic text.
        const ITALIC    = 0b0100;
        /// Single underline.
        const UNDERLINE = 0b1000;
    }
}

/// Weight, foreground, and background for a span of text.
///
/// A style is a complete replacement, not a patch: applying it to a span
/// overwrites whatever the span carried before.
///
/// # Example
/// ```
/// use logtint_style::{Rgb, Style, StyleFlags};
///
/// let style = Style::new().fg(Rgb::RED).bg(Rgb::WHITE).bold();
/// assert!(style.attrs.contains(StyleFlags::BOLD));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Foreground color (text color).
    pub fg: Option<Rgb>,
    /// Background color.
    pub bg: Option<Rgb>,
    /// Text attributes.
    pub attrs: StyleFlags,
}

impl Style {
    /// Create an empty style.
    #[inline]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
        }
    }

    /// Set foreground color.
    #[inline]
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set background color.
    #[inline]
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add bold attribute.
    #[inline]
    #[must_use]
    pub const fn bold(self) -> Self {
        self.add_attr(StyleFlags::BOLD)
    }

    /// Add dim attribute.
    #[inline]
    #[must_use]
    pub const fn dim(self) -> Self {
        self.add_attr(StyleFlags::DIM)
    }

    /// Add italic attribute.
    #[inline]
    #[must_use]
    pub const fn italic(self) -> Self {
        self.add_attr(StyleFlags::ITALIC)
    }

    /// Add underline attribute.
    #[inline]
    #[must_use]
    pub const fn underline(self) -> Self {
        self.add_attr(StyleFlags::UNDERLINE)
    }

    /// Whether the style is bold.
    #[inline]
    pub const fn is_bold(&self) -> bool {
        self.attrs.contains(StyleFlags::BOLD)
    }

    /// Whether nothing is set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_empty()
    }

    #[inline]
    const fn add_attr(mut self, flag: StyleFlags) -> Self {
        self.attrs = self.attrs.union(flag);
        self
    }
}
