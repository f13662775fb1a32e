//! Theme System
//!
//! Semantic colours for the overlay and landing page. A theme is a set of
//! [`ThemeColor`]s; the terminal preset uses ANSI indices so it follows the
//! user's terminal scheme, the others use explicit RGB.
//!
//! # Example
//!
//! ```ignore
//! use whitepaper_tui::theme::get_preset;
//!
//! let nord = get_preset("nord").unwrap();
//! let primary = nord.primary();
//! ```

use crate::types::Rgba;

mod presets;

pub use presets::*;

// =============================================================================
// ThemeColor
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeColor {
    /// Use terminal's default color.
    Default,
    /// ANSI palette index (0-255).
    Ansi(u8),
    /// Explicit RGB color.
    Rgb(Rgba),
}

impl ThemeColor {
    pub const fn hex(value: u32) -> Self {
        Self::Rgb(Rgba::from_rgb_int(value))
    }

    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub description: &'static str,
    pub primary: ThemeColor,
    pub secondary: ThemeColor,
    pub accent: ThemeColor,
    pub success: ThemeColor,
    pub text: ThemeColor,
    pub text_muted: ThemeColor,
    pub text_bright: ThemeColor,
    pub background: ThemeColor,
    pub surface: ThemeColor,
    pub border: ThemeColor,
    pub border_focus: ThemeColor,
}

impl Theme {
    pub fn primary(&self) -> Rgba {
        self.primary.resolve()
    }

    pub fn secondary(&self) -> Rgba {
        self.secondary.resolve()
    }

    pub fn accent(&self) -> Rgba {
        self.accent.resolve()
    }

    pub fn success(&self) -> Rgba {
        self.success.resolve()
    }

    pub fn text(&self) -> Rgba {
        self.text.resolve()
    }

    pub fn text_muted(&self) -> Rgba {
        self.text_muted.resolve()
    }

    pub fn text_bright(&self) -> Rgba {
        self.text_bright.resolve()
    }

    pub fn bg(&self) -> Rgba {
        self.background.resolve()
    }

    pub fn surface(&self) -> Rgba {
        self.surface.resolve()
    }

    pub fn border(&self) -> Rgba {
        self.border.resolve()
    }

    pub fn border_focus(&self) -> Rgba {
        self.border_focus.resolve()
    }
}

impl Default for Theme {
    fn default() -> Self {
        terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(ThemeColor::Default.resolve(), Rgba::TERMINAL_DEFAULT);
        assert_eq!(ThemeColor::Ansi(12).resolve(), Rgba::ansi(12));
        assert_eq!(ThemeColor::hex(0x282a36).resolve(), Rgba::rgb(0x28, 0x2a, 0x36));
    }

    #[test]
    fn test_default_is_terminal() {
        assert_eq!(Theme::default().name, "terminal");
        assert!(Theme::default().text().is_terminal_default());
    }
}
