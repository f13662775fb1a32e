//! Scroll State - vertical offset clamped to content
//!
//! One `ScrollState` per scrollable surface (the overlay body, the landing
//! page). The offset always stays in `[0, max_scroll]` where
//! `max_scroll = content_height - viewport_height` (or 0 when the content
//! fits). Resizing either height re-clamps.

use spark_signals::{signal, Signal};

/// Default scroll amount for arrow keys (lines).
pub const LINE_SCROLL: i32 = 1;

/// Page Up/Down moves this fraction of the viewport.
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

pub struct ScrollState {
    offset: Signal<u16>,
    content_height: u16,
    viewport_height: u16,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: signal(0),
            content_height: 0,
            viewport_height: 0,
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset.get()
    }

    pub fn offset_signal(&self) -> Signal<u16> {
        self.offset.clone()
    }

    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_scrollable(&self) -> bool {
        self.max_scroll() > 0
    }

    /// Update measured sizes and re-clamp the offset.
    pub fn set_extent(&mut self, content_height: u16, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        let max = self.max_scroll();
        if self.offset() > max {
            self.offset.set(max);
        }
    }

    /// Set offset (clamped to valid range).
    pub fn set_offset(&self, y: u16) {
        let clamped = y.min(self.max_scroll());
        if clamped != self.offset() {
            self.offset.set(clamped);
        }
    }

    /// Scroll by a delta amount.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at boundary.
    pub fn scroll_by(&self, delta: i32) -> bool {
        let current = self.offset();
        let next = (current as i32 + delta).clamp(0, self.max_scroll() as i32) as u16;
        if next == current {
            return false;
        }
        self.offset.set(next);
        true
    }

    /// Scroll by whole pages (negative is up).
    pub fn scroll_pages(&self, pages: i32) -> bool {
        let page = ((self.viewport_height as f32 * PAGE_SCROLL_FACTOR) as i32).max(1);
        self.scroll_by(page * pages)
    }

    pub fn scroll_to_top(&self) {
        self.set_offset(0);
    }

    pub fn scroll_to_bottom(&self) {
        self.set_offset(self.max_scroll());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> ScrollState {
        let mut scroll = ScrollState::new();
        scroll.set_extent(100, 20);
        scroll
    }

    #[test]
    fn test_max_scroll() {
        let scroll = setup();
        assert_eq!(scroll.max_scroll(), 80);
        assert!(scroll.is_scrollable());
    }

    #[test]
    fn test_content_fits() {
        let mut scroll = ScrollState::new();
        scroll.set_extent(10, 20);
        assert_eq!(scroll.max_scroll(), 0);
        assert!(!scroll.scroll_by(5));
    }

    #[test]
    fn test_scroll_by_clamps() {
        let scroll = setup();
        assert!(scroll.scroll_by(50));
        assert_eq!(scroll.offset(), 50);
        assert!(scroll.scroll_by(500));
        assert_eq!(scroll.offset(), 80);
        assert!(!scroll.scroll_by(1));
        assert!(scroll.scroll_by(-500));
        assert_eq!(scroll.offset(), 0);
        assert!(!scroll.scroll_by(-1));
    }

    #[test]
    fn test_scroll_pages() {
        let scroll = setup();
        scroll.scroll_pages(1);
        assert_eq!(scroll.offset(), 18);
        scroll.scroll_pages(-1);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_top_bottom() {
        let scroll = setup();
        scroll.scroll_to_bottom();
        assert_eq!(scroll.offset(), 80);
        scroll.scroll_to_top();
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut scroll = setup();
        scroll.scroll_to_bottom();
        scroll.set_extent(30, 20);
        assert_eq!(scroll.offset(), 10);
    }
}
