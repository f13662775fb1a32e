//! Focus System - entry-point focus ring, traps and history
//!
//! Manages keyboard focus over the landing page's entry points:
//! - Focus cycling (Tab/Shift+Tab), wrapping at both ends
//! - Focus trapping while the overlay is open
//! - Focus history so closing the overlay returns focus to the entry point
//!   that opened it
//!
//! # Example
//!
//! ```ignore
//! let mut ring = FocusRing::new(["open-paper", "download-pdf"]);
//! ring.focus_next();                 // "open-paper"
//! ring.push_trap("overlay");         // remembers "open-paper"
//! ring.focus_next();                 // false, trapped
//! ring.pop_trap();                   // focus back on "open-paper"
//! ```

use log::debug;
use spark_signals::{signal, Signal};

const MAX_HISTORY: usize = 10;

/// Ordered focus targets plus trap and history stacks.
pub struct FocusRing {
    targets: Vec<String>,
    focused: Signal<Option<usize>>,
    traps: Vec<String>,
    history: Vec<String>,
}

impl FocusRing {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            focused: signal(None),
            traps: Vec::new(),
            history: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Id of the focused target, if any
    pub fn focused(&self) -> Option<&str> {
        self.focused.get().and_then(|i| self.targets.get(i)).map(String::as_str)
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused() == Some(id)
    }

    pub fn focused_signal(&self) -> Signal<Option<usize>> {
        self.focused.clone()
    }

    pub fn is_trapped(&self) -> bool {
        !self.traps.is_empty()
    }

    pub fn trap(&self) -> Option<&str> {
        self.traps.last().map(String::as_str)
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    pub fn focus_next(&mut self) -> bool {
        self.step(1)
    }

    pub fn focus_previous(&mut self) -> bool {
        self.step(-1)
    }

    /// Focus a specific target by id
    pub fn focus(&mut self, id: &str) -> bool {
        if self.is_trapped() {
            return false;
        }
        match self.targets.iter().position(|t| t == id) {
            Some(pos) => {
                self.set_focus(Some(pos));
                true
            }
            None => false,
        }
    }

    /// Clear focus
    pub fn blur(&mut self) {
        self.set_focus(None);
    }

    fn step(&mut self, direction: isize) -> bool {
        if self.is_trapped() || self.targets.is_empty() {
            return false;
        }

        let len = self.targets.len() as isize;
        let next = match self.focused.get() {
            None if direction > 0 => 0,
            None => len - 1,
            Some(pos) => (pos as isize + direction).rem_euclid(len),
        } as usize;

        if self.focused.get() == Some(next) {
            return false;
        }
        self.set_focus(Some(next));
        true
    }

    fn set_focus(&mut self, index: Option<usize>) {
        if self.focused.get() != index {
            debug!(
                "focus: {:?} -> {:?}",
                self.focused(),
                index.and_then(|i| self.targets.get(i))
            );
            self.focused.set(index);
        }
    }

    // -------------------------------------------------------------------------
    // Trap + history
    // -------------------------------------------------------------------------

    /// Trap focus inside `container`, remembering the current focus.
    pub fn push_trap(&mut self, container: impl Into<String>) {
        self.save_to_history();
        self.traps.push(container.into());
    }

    /// Release the innermost trap and restore the focus it saved.
    pub fn pop_trap(&mut self) -> Option<String> {
        let container = self.traps.pop()?;
        if !self.is_trapped() {
            self.restore_from_history();
        }
        Some(container)
    }

    pub fn save_to_history(&mut self) {
        if let Some(id) = self.focused().map(str::to_string) {
            self.history.push(id);
            if self.history.len() > MAX_HISTORY {
                self.history.remove(0);
            }
        }
    }

    /// Pop history until an entry that is still a target is found.
    pub fn restore_from_history(&mut self) -> bool {
        while let Some(id) = self.history.pop() {
            if let Some(pos) = self.targets.iter().position(|t| *t == id) {
                self.set_focus(Some(pos));
                return true;
            }
        }
        false
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> FocusRing {
        FocusRing::new(["open", "pdf", "archive"])
    }

    #[test]
    fn test_initial_state() {
        let ring = setup();
        assert_eq!(ring.focused(), None);
        assert!(!ring.is_trapped());
        assert_eq!(ring.targets().len(), 3);
    }

    #[test]
    fn test_focus_next_wraps() {
        let mut ring = setup();
        assert!(ring.focus_next());
        assert_eq!(ring.focused(), Some("open"));
        ring.focus_next();
        ring.focus_next();
        assert_eq!(ring.focused(), Some("archive"));
        ring.focus_next();
        assert_eq!(ring.focused(), Some("open"));
    }

    #[test]
    fn test_focus_previous_from_none_goes_last() {
        let mut ring = setup();
        assert!(ring.focus_previous());
        assert_eq!(ring.focused(), Some("archive"));
        ring.focus_previous();
        assert_eq!(ring.focused(), Some("pdf"));
    }

    #[test]
    fn test_single_target_does_not_move() {
        let mut ring = FocusRing::new(["only"]);
        assert!(ring.focus_next());
        assert!(!ring.focus_next());
        assert!(!ring.focus_previous());
    }

    #[test]
    fn test_empty_ring() {
        let mut ring = FocusRing::new(Vec::<String>::new());
        assert!(!ring.focus_next());
        assert_eq!(ring.focused(), None);
    }

    #[test]
    fn test_focus_by_id() {
        let mut ring = setup();
        assert!(ring.focus("pdf"));
        assert!(ring.is_focused("pdf"));
        assert!(!ring.focus("missing"));
        assert!(ring.is_focused("pdf"));
    }

    #[test]
    fn test_blur() {
        let mut ring = setup();
        ring.focus("pdf");
        ring.blur();
        assert_eq!(ring.focused(), None);
    }

    #[test]
    fn test_trap_blocks_navigation_and_restores() {
        let mut ring = setup();
        ring.focus("pdf");

        ring.push_trap("overlay");
        assert!(ring.is_trapped());
        assert_eq!(ring.trap(), Some("overlay"));
        assert!(!ring.focus_next());
        assert!(!ring.focus("open"));

        // Something else steals focus while the overlay is up
        ring.blur();

        assert_eq!(ring.pop_trap(), Some("overlay".to_string()));
        assert!(!ring.is_trapped());
        assert_eq!(ring.focused(), Some("pdf"));
    }

    #[test]
    fn test_pop_without_trap() {
        let mut ring = setup();
        assert_eq!(ring.pop_trap(), None);
    }

    #[test]
    fn test_nested_traps_restore_once() {
        let mut ring = setup();
        ring.focus("archive");
        ring.push_trap("overlay");
        ring.push_trap("dialog");
        ring.pop_trap();
        assert!(ring.is_trapped());
        ring.pop_trap();
        assert_eq!(ring.focused(), Some("archive"));
    }

    #[test]
    fn test_history_bounded() {
        let mut ring = setup();
        for _ in 0..(MAX_HISTORY + 5) {
            ring.focus_next();
            ring.save_to_history();
        }
        assert_eq!(ring.history.len(), MAX_HISTORY);
    }

    #[test]
    fn test_restore_with_empty_history() {
        let mut ring = setup();
        assert!(!ring.restore_from_history());
    }
}
