//! Theme presets.
//!
//! - terminal (default, ANSI colours)
//! - dracula
//! - nord
//! - gruvbox

use super::{Theme, ThemeColor};

/// Terminal theme - uses ANSI colors to respect the user's terminal theme.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal",
        description: "Uses terminal default colors",
        primary: ThemeColor::Ansi(12),   // bright blue
        secondary: ThemeColor::Ansi(13), // bright magenta
        accent: ThemeColor::Ansi(11),    // bright yellow
        success: ThemeColor::Ansi(2),
        text: ThemeColor::Default,
        text_muted: ThemeColor::Ansi(8),
        text_bright: ThemeColor::Ansi(15),
        background: ThemeColor::Default,
        surface: ThemeColor::Default,
        border: ThemeColor::Ansi(7),
        border_focus: ThemeColor::Ansi(12),
    }
}

pub fn dracula() -> Theme {
    Theme {
        name: "dracula",
        description: "Dracula dark theme",
        primary: ThemeColor::hex(0xbd93f9),
        secondary: ThemeColor::hex(0xff79c6),
        accent: ThemeColor::hex(0xf1fa8c),
        success: ThemeColor::hex(0x50fa7b),
        text: ThemeColor::hex(0xf8f8f2),
        text_muted: ThemeColor::hex(0x6272a4),
        text_bright: ThemeColor::hex(0xffffff),
        background: ThemeColor::hex(0x282a36),
        surface: ThemeColor::hex(0x44475a),
        border: ThemeColor::hex(0x6272a4),
        border_focus: ThemeColor::hex(0xbd93f9),
    }
}

pub fn nord() -> Theme {
    Theme {
        name: "nord",
        description: "Arctic, north-bluish palette",
        primary: ThemeColor::hex(0x88c0d0),
        secondary: ThemeColor::hex(0x81a1c1),
        accent: ThemeColor::hex(0xebcb8b),
        success: ThemeColor::hex(0xa3be8c),
        text: ThemeColor::hex(0xd8dee9),
        text_muted: ThemeColor::hex(0x616e88),
        text_bright: ThemeColor::hex(0xeceff4),
        background: ThemeColor::hex(0x2e3440),
        surface: ThemeColor::hex(0x3b4252),
        border: ThemeColor::hex(0x4c566a),
        border_focus: ThemeColor::hex(0x88c0d0),
    }
}

pub fn gruvbox() -> Theme {
    Theme {
        name: "gruvbox",
        description: "Retro groove warm palette",
        primary: ThemeColor::hex(0x83a598),
        secondary: ThemeColor::hex(0xd3869b),
        accent: ThemeColor::hex(0xfabd2f),
        success: ThemeColor::hex(0xb8bb26),
        text: ThemeColor::hex(0xebdbb2),
        text_muted: ThemeColor::hex(0x928374),
        text_bright: ThemeColor::hex(0xfbf1c7),
        background: ThemeColor::hex(0x282828),
        surface: ThemeColor::hex(0x3c3836),
        border: ThemeColor::hex(0x665c54),
        border_focus: ThemeColor::hex(0x83a598),
    }
}

/// Names accepted by [`get_preset`].
pub const PRESET_NAMES: [&str; 4] = ["terminal", "dracula", "nord", "gruvbox"];

/// Get a preset theme by name.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "terminal" => Some(terminal()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        "gruvbox" => Some(gruvbox()),
        _ => None,
    }
}
