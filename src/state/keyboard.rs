//! Keyboard Module - key events and the key-to-intent mapping
//!
//! Keys arrive as [`KeyboardEvent`]s with DOM-style names ("ArrowRight",
//! "Escape", "a"). Which intent a key expresses depends on what the reader
//! is looking at, so mapping is per [`Mode`]:
//!
//! | Overlay                  | Intent            |
//! |--------------------------|-------------------|
//! | ArrowRight, l, n, Space  | next section      |
//! | ArrowLeft, h, p          | previous section  |
//! | Home / End               | first / last      |
//! | 1-9                      | jump to section   |
//! | Escape, q                | close             |
//! | d                        | download current  |
//! | ArrowUp/Down, k/j, PgUp/PgDn | scroll body   |
//!
//! | Landing                  | Intent            |
//! |--------------------------|-------------------|
//! | ArrowUp/Down, k/j, PgUp/PgDn | scroll page   |
//! | Tab / Shift+Tab          | focus entry point |
//! | Enter                    | activate          |
//! | w                        | open (resume)     |
//! | q                        | quit              |
//!
//! Ctrl+C quits in both modes.
//!
//! # Example
//!
//! ```ignore
//! let event = KeyboardEvent::new("ArrowRight");
//! assert_eq!(intent_for(&event, Mode::Overlay), Some(Intent::Navigate(NavIntent::Next)));
//! ```

use super::navigator::NavIntent;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowUp")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::none())
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press and repeat both count as input; release does not.
    pub fn is_actionable(&self) -> bool {
        self.state != KeyState::Release
    }
}

/// Which surface has the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Landing,
    Overlay,
}

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Navigator transition
    Navigate(NavIntent),
    /// Scroll the focused surface by lines (negative is up)
    ScrollLines(i32),
    /// Scroll the focused surface by pages (negative is up)
    ScrollPages(i32),
    FocusNext,
    FocusPrevious,
    Activate,
    DownloadCurrent,
    Quit,
}

// =============================================================================
// MAPPING
// =============================================================================

/// Map a key event to an intent for `mode`. Unbound keys yield `None`.
pub fn intent_for(event: &KeyboardEvent, mode: Mode) -> Option<Intent> {
    if !event.is_actionable() {
        return None;
    }

    if event.modifiers.ctrl {
        return match event.key.as_str() {
            "c" | "C" => Some(Intent::Quit),
            _ => None,
        };
    }

    if let Some(intent) = scroll_intent(&event.key) {
        return Some(intent);
    }

    match mode {
        Mode::Overlay => overlay_intent(event),
        Mode::Landing => landing_intent(event),
    }
}

fn scroll_intent(key: &str) -> Option<Intent> {
    match key {
        "ArrowDown" | "j" => Some(Intent::ScrollLines(1)),
        "ArrowUp" | "k" => Some(Intent::ScrollLines(-1)),
        "PageDown" => Some(Intent::ScrollPages(1)),
        "PageUp" => Some(Intent::ScrollPages(-1)),
        _ => None,
    }
}

fn overlay_intent(event: &KeyboardEvent) -> Option<Intent> {
    let nav = match event.key.as_str() {
        "ArrowRight" | "l" | "n" | " " => NavIntent::Next,
        "ArrowLeft" | "h" | "p" => NavIntent::Previous,
        "Home" => NavIntent::JumpTo(0),
        "End" => NavIntent::JumpTo(i64::MAX),
        "Escape" | "q" => NavIntent::Close,
        "d" => return Some(Intent::DownloadCurrent),
        key => {
            let number = section_number(key)?;
            NavIntent::JumpTo(number - 1)
        }
    };
    Some(Intent::Navigate(nav))
}

fn landing_intent(event: &KeyboardEvent) -> Option<Intent> {
    match event.key.as_str() {
        "Tab" if event.modifiers.shift => Some(Intent::FocusPrevious),
        "Tab" => Some(Intent::FocusNext),
        "Enter" => Some(Intent::Activate),
        "w" => Some(Intent::Navigate(NavIntent::Open(None))),
        "q" => Some(Intent::Quit),
        _ => None,
    }
}

/// `"1"`..`"9"` as a one-based section number.
fn section_number(key: &str) -> Option<i64> {
    let mut chars = key.chars();
    let digit = chars.next()?.to_digit(10)?;
    if chars.next().is_some() || digit == 0 {
        return None;
    }
    Some(digit as i64)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(key: &str) -> Option<Intent> {
        intent_for(&KeyboardEvent::new(key), Mode::Overlay)
    }

    fn landing(key: &str) -> Option<Intent> {
        intent_for(&KeyboardEvent::new(key), Mode::Landing)
    }

    #[test]
    fn test_overlay_next_previous() {
        for key in ["ArrowRight", "l", "n", " "] {
            assert_eq!(overlay(key), Some(Intent::Navigate(NavIntent::Next)), "{key}");
        }
        for key in ["ArrowLeft", "h", "p"] {
            assert_eq!(overlay(key), Some(Intent::Navigate(NavIntent::Previous)), "{key}");
        }
    }

    #[test]
    fn test_overlay_home_end() {
        assert_eq!(overlay("Home"), Some(Intent::Navigate(NavIntent::JumpTo(0))));
        assert_eq!(overlay("End"), Some(Intent::Navigate(NavIntent::JumpTo(i64::MAX))));
    }

    #[test]
    fn test_overlay_digit_jump() {
        assert_eq!(overlay("1"), Some(Intent::Navigate(NavIntent::JumpTo(0))));
        assert_eq!(overlay("7"), Some(Intent::Navigate(NavIntent::JumpTo(6))));
        assert_eq!(overlay("0"), None);
    }

    #[test]
    fn test_overlay_close_and_download() {
        assert_eq!(overlay("Escape"), Some(Intent::Navigate(NavIntent::Close)));
        assert_eq!(overlay("q"), Some(Intent::Navigate(NavIntent::Close)));
        assert_eq!(overlay("d"), Some(Intent::DownloadCurrent));
    }

    #[test]
    fn test_scroll_keys_both_modes() {
        assert_eq!(overlay("ArrowDown"), Some(Intent::ScrollLines(1)));
        assert_eq!(landing("k"), Some(Intent::ScrollLines(-1)));
        assert_eq!(landing("PageDown"), Some(Intent::ScrollPages(1)));
        assert_eq!(overlay("PageUp"), Some(Intent::ScrollPages(-1)));
    }

    #[test]
    fn test_landing_focus() {
        assert_eq!(landing("Tab"), Some(Intent::FocusNext));
        let shift_tab = KeyboardEvent::with_modifiers("Tab", Modifiers::shift());
        assert_eq!(intent_for(&shift_tab, Mode::Landing), Some(Intent::FocusPrevious));
        assert_eq!(landing("Enter"), Some(Intent::Activate));
    }

    #[test]
    fn test_landing_open_and_quit() {
        assert_eq!(landing("w"), Some(Intent::Navigate(NavIntent::Open(None))));
        assert_eq!(landing("q"), Some(Intent::Quit));
        // Navigation keys do nothing on the landing page
        assert_eq!(landing("ArrowRight"), None);
        assert_eq!(landing("3"), None);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let event = KeyboardEvent::with_modifiers("c", Modifiers::ctrl());
        assert_eq!(intent_for(&event, Mode::Landing), Some(Intent::Quit));
        assert_eq!(intent_for(&event, Mode::Overlay), Some(Intent::Quit));

        let ctrl_n = KeyboardEvent::with_modifiers("n", Modifiers::ctrl());
        assert_eq!(intent_for(&ctrl_n, Mode::Overlay), None);
    }

    #[test]
    fn test_release_ignored() {
        let mut event = KeyboardEvent::new("ArrowRight");
        event.state = KeyState::Release;
        assert_eq!(intent_for(&event, Mode::Overlay), None);

        event.state = KeyState::Repeat;
        assert!(intent_for(&event, Mode::Overlay).is_some());
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(overlay("F5"), None);
        assert_eq!(overlay(""), None);
    }
}
