//! Clipping themes and their colour palettes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Visual style of a clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    /// Black ink on white newsprint.
    #[default]
    Classic,
    /// Saffron masthead with maroon rules.
    Kesari,
    /// Blue masthead with navy rules.
    #[serde(rename = "Modern Blue", alias = "ModernBlue")]
    ModernBlue,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Kesari, Theme::ModernBlue];

    /// Display label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Kesari => "Kesari",
            Theme::ModernBlue => "Modern Blue",
        }
    }

    /// Parse a label case-insensitively, ignoring spaces, dashes and underscores.
    pub fn from_label(label: &str) -> Option<Theme> {
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "classic" => Some(Theme::Classic),
            "kesari" => Some(Theme::Kesari),
            "modernblue" | "blue" => Some(Theme::ModernBlue),
            _ => None,
        }
    }

    pub fn palette(&self) -> &'static ThemePalette {
        match self {
            Theme::Classic => &CLASSIC,
            Theme::Kesari => &KESARI,
            Theme::ModernBlue => &MODERN_BLUE,
        }
    }
}

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const WHITE: Color = Color([0xff, 0xff, 0xff]);
    pub const BLACK: Color = Color([0x00, 0x00, 0x00]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn parse_hex(value: &str) -> Option<Color> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color([r, g, b]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Colour tokens used to paint one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    /// Page (newsprint) colour.
    pub background: Color,
    /// Masthead band colour.
    pub header_background: Color,
    /// Masthead title colour.
    pub header_text: Color,
    /// Accent rules.
    pub accent: Color,
    /// Body and headline ink.
    pub text: Color,
    /// Frame border and section rules.
    pub border: Color,
    /// Tagline strip, caption strip, and footer badge fill.
    pub strip_background: Color,
    /// Ink on strips.
    pub strip_text: Color,
}

const CLASSIC: ThemePalette = ThemePalette {
    background: Color::WHITE,
    header_background: Color::WHITE,
    header_text: Color::BLACK,
    accent: Color::BLACK,
    text: Color::BLACK,
    border: Color::BLACK,
    strip_background: Color::BLACK,
    strip_text: Color::WHITE,
};

const KESARI: ThemePalette = ThemePalette {
    background: Color::rgb(0xff, 0xfb, 0xf0),
    header_background: Color::rgb(0xff, 0x99, 0x33),
    header_text: Color::WHITE,
    accent: Color::rgb(0xb3, 0x24, 0x00),
    text: Color::rgb(0x4a, 0x0e, 0x00),
    border: Color::rgb(0xb3, 0x24, 0x00),
    strip_background: Color::rgb(0xb3, 0x24, 0x00),
    strip_text: Color::WHITE,
};

const MODERN_BLUE: ThemePalette = ThemePalette {
    background: Color::rgb(0xf0, 0xf9, 0xff),
    header_background: Color::rgb(0x00, 0x5c, 0xbf),
    header_text: Color::WHITE,
    accent: Color::rgb(0x00, 0x33, 0x66),
    text: Color::rgb(0x00, 0x1a, 0x33),
    border: Color::rgb(0x00, 0x33, 0x66),
    strip_background: Color::rgb(0x00, 0x33, 0x66),
    strip_text: Color::WHITE,
};
