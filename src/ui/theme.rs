//! Light and dark color themes
//!
//! The active [`Theme`] lives in the application state and its [`Palette`] is
//! handed to every render function.

use ratatui::style::Color;

/// Color theme selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors used by the renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    /// Borders and headings
    pub accent: Color,
    /// Hints and secondary text
    pub muted: Color,
    pub error: Color,
    pub temperature: Color,
}

impl Theme {
    /// Returns the other theme
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Glyph for the toggle control: the theme a press switches to
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Theme::Light => "\u{1F319}", // 🌙
            Theme::Dark => "\u{2600}",   // ☀
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color::White,
                foreground: Color::Black,
                accent: Color::Blue,
                muted: Color::DarkGray,
                error: Color::Red,
                temperature: Color::Rgb(230, 120, 20),
            },
            Theme::Dark => Palette {
                background: Color::Black,
                foreground: Color::White,
                accent: Color::Cyan,
                muted: Color::Gray,
                error: Color::LightRed,
                temperature: Color::Yellow,
            },
        }
    }
}
