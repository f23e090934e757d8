#![forbid(unsafe_code)]

//! ANSI rendering of a decorated [`TextBuffer`].
//!
//! Each styled segment is written as SGR attributes, then foreground and
//! background colors, then the text, then a full reset. Colors are reduced to
//! what the [`ColorProfile`] supports. [`ColorProfile::Mono`] writes the text
//! with no escape sequences at all.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use logtint_style::{Color, ColorProfile, Rgb, Style, StyleFlags};
use logtint_text::TextBuffer;

/// Write the whole buffer to `out`.
pub fn render<W: Write>(out: &mut W, buffer: &TextBuffer, profile: ColorProfile) -> io::Result<()> {
    for (text, style) in buffer.segments() {
        match style {
            Some(style) if profile.has_color() && !style.is_empty() => {
                write_styled(out, text, style, profile)?;
            }
            _ => queue!(out, Print(text))?,
        }
    }
    out.flush()
}

/// Render into a string, mostly for tests and snapshots.
pub fn render_to_string(buffer: &TextBuffer, profile: ColorProfile) -> io::Result<String> {
    let mut out = Vec::with_capacity(buffer.len());
    render(&mut out, buffer, profile)?;
    String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

fn write_styled<W: Write>(
    out: &mut W,
    text: &str,
    style: Style,
    profile: ColorProfile,
) -> io::Result<()> {
    for (flag, attribute) in [
        (StyleFlags::BOLD, Attribute::Bold),
        (StyleFlags::DIM, Attribute::Dim),
        (StyleFlags::ITALIC, Attribute::Italic),
        (StyleFlags::UNDERLINE, Attribute::Underlined),
    ] {
        if style.attrs.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    if let Some(color) = style.fg.and_then(|rgb| term_color(rgb, profile)) {
        queue!(out, SetForegroundColor(color))?;
    }
    if let Some(color) = style.bg.and_then(|rgb| term_color(rgb, profile)) {
        queue!(out, SetBackgroundColor(color))?;
    }
    queue!(out, Print(text), SetAttribute(Attribute::Reset))
}

fn term_color(rgb: Rgb, profile: ColorProfile) -> Option<TermColor> {
    Some(match Color::downgrade(rgb, profile)? {
        Color::Rgb(Rgb { r, g, b }) => TermColor::Rgb { r, g, b },
        // crossterm writes named colors as palette indices too.
        Color::Ansi256(index) | Color::Ansi16(index) => TermColor::AnsiValue(index),
    })
}
