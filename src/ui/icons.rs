//! Decorative glyphs shown in the empty states.

use ratatui::style::Color;

/// Slate grey, `#4b5563`.
pub const ICON_COLOUR: Color = Color::Rgb(0x4b, 0x55, 0x63);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Search,
    Music,
}

impl Glyph {
    pub const fn symbol(self) -> &'static str {
        match self {
            Glyph::Search => "\u{2315}",
            Glyph::Music => "\u{266B}",
        }
    }

    /// Nominal size in pixels.
    pub const fn size(self) -> u16 {
        match self {
            Glyph::Search => 44,
            Glyph::Music => 64,
        }
    }

    /// Terminal rows reserved for the glyph, roughly one per 16px.
    pub const fn rows(self) -> u16 {
        self.size().div_ceil(16)
    }

    pub const fn colour(self) -> Color {
        ICON_COLOUR
    }
}
