//! Color types, profiles, and downgrade utilities.

/// Terminal color profile used for downgrade decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorProfile {
    /// No color output.
    Mono,
    /// Standard 16 ANSI colors.
    Ansi16,
    /// Extended 256-color palette.
    Ansi256,
    /// Full 24-bit RGB color.
    TrueColor,
}

impl ColorProfile {
    /// Choose the best available profile from detection flags.
    ///
    /// `no_color` should reflect explicit user intent (e.g. NO_COLOR).
    #[must_use]
    pub const fn from_flags(true_color: bool, colors_256: bool, no_color: bool) -> Self {
        if no_color {
            Self::Mono
        } else if true_color {
            Self::TrueColor
        } else if colors_256 {
            Self::Ansi256
        } else {
            Self::Ansi16
        }
    }

    /// Detect the profile from `NO_COLOR`, `COLORTERM`, and `TERM`.
    #[must_use]
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let true_color = std::env::var("COLORTERM")
            .is_ok_and(|v| v.eq_ignore_ascii_case("truecolor") || v.eq_ignore_ascii_case("24bit"));
        let colors_256 = std::env::var("TERM").is_ok_and(|v| v.contains("256color"));
        Self::from_flags(true_color, colors_256, no_color)
    }

    /// Whether any color output is produced under this profile.
    #[must_use]
    pub const fn has_color(self) -> bool {
        !matches!(self, Self::Mono)
    }
}

/// RGB color (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const DARK_RED: Self = Self::new(128, 0, 0);
    pub const DARK_GREEN: Self = Self::new(0, 128, 0);

    /// Create a new RGB color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A color value at the fidelity a terminal can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// True-color RGB value.
    Rgb(Rgb),
    /// 256-color palette index.
    Ansi256(u8),
    /// Standard 16-color ANSI index (0–15).
    Ansi16(u8),
}

impl Color {
    /// Downgrade an RGB color to fit the given profile.
    ///
    /// Returns `None` for [`ColorProfile::Mono`].
    #[must_use]
    pub fn downgrade(rgb: Rgb, profile: ColorProfile) -> Option<Self> {
        match profile {
            ColorProfile::Mono => None,
            ColorProfile::TrueColor => Some(Self::Rgb(rgb)),
            ColorProfile::Ansi256 => Some(Self::Ansi256(rgb_to_256(rgb))),
            ColorProfile::Ansi16 => Some(Self::Ansi16(rgb_to_ansi16(rgb))),
        }
    }
}

const ANSI16_PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(205, 0, 0),
    Rgb::new(0, 205, 0),
    Rgb::new(205, 205, 0),
    Rgb::new(0, 0, 238),
    Rgb::new(205, 0, 205),
    Rgb::new(0, 205, 205),
    Rgb::new(229, 229, 229),
    Rgb::new(127, 127, 127),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(92, 92, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Nearest index in the 256-color palette (cube or gray ramp).
#[must_use]
pub fn rgb_to_256(rgb: Rgb) -> u8 {
    let Rgb { r, g, b } = rgb;
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            249..=255 => 231,
            _ => 232 + ((r - 8) / 10).min(23),
        };
    }
    // Cube levels are 0, 95, 135, 175, 215, 255; split at their midpoints.
    let level = |v: u8| -> u8 {
        match v {
            0..=47 => 0,
            48..=114 => 1,
            _ => (v - 35) / 40,
        }
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Nearest ANSI 16-color index by luma-weighted distance.
#[must_use]
pub fn rgb_to_ansi16(rgb: Rgb) -> u8 {
    let distance = |c: &Rgb| -> u64 {
        let dr = (i64::from(rgb.r) - i64::from(c.r)).unsigned_abs();
        let dg = (i64::from(rgb.g) - i64::from(c.g)).unsigned_abs();
        let db = (i64::from(rgb.b) - i64::from(c.b)).unsigned_abs();
        2126 * dr * dr + 7152 * dg * dg + 722 * db * db
    };
    ANSI16_PALETTE
        .iter()
        .enumerate()
        .min_by_key(|(_, c)| distance(c))
        .map_or(0, |(idx, _)| idx as u8)
}
