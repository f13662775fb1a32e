//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be
//! displayed on the terminal. The shell draws a whole frame into it, then the
//! diff renderer writes only what changed.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Clipping**: drawing functions accept an optional clip `Rect`.
//! - **Wide characters**: CJK and emoji occupy two cells; the second holds the
//!   continuation marker `0`.
//! - **Backgrounds**: `None` keeps whatever background the cell already has.

use crate::layout::{char_width, string_width};
use crate::types::{Attr, BorderStyle, Cell, Rect, Rgba};

/// A 2D buffer of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer as a rect.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill the whole buffer with `bg`.
    pub fn clear(&mut self, bg: Rgba) {
        for cell in &mut self.cells {
            *cell = Cell { bg, ..Cell::default() };
        }
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width as usize * height as usize];
    }

    /// Visible text of row `y`, continuation cells skipped.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| cell.char != 0)
            .filter_map(|cell| char::from_u32(cell.char))
            .collect()
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        char: u32,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&Rect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if clip.is_some_and(|clip| !clip.contains(x, y)) {
            return false;
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];
        cell.char = char;
        cell.fg = fg;
        if let Some(bg) = bg {
            cell.bg = bg;
        }
        cell.attrs = attrs;
        true
    }

    /// Fill a rectangle with a background color.
    pub fn fill_rect(&mut self, rect: Rect, bg: Rgba) {
        let x2 = rect.right().min(self.width);
        let y2 = rect.bottom().min(self.height);
        for y in rect.y..y2 {
            for x in rect.x..x2 {
                let idx = self.index(x, y);
                self.cells[idx] = Cell { bg, ..Cell::default() };
            }
        }
    }

    /// Draw text at a position.
    ///
    /// Returns the number of cells used.
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&Rect>,
    ) -> u16 {
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            let w = char_width(ch);
            if w == 0 {
                continue;
            }

            if self.set_cell(col, y, ch as u32, fg, bg, attrs, clip) && w == 2 {
                // Continuation marker for the second half
                self.set_cell(col + 1, y, 0, fg, bg, attrs, clip);
            }
            col = col.saturating_add(w);
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within `width` cells starting at `x`.
    pub fn draw_text_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
    ) -> u16 {
        let offset = width.saturating_sub(string_width(text)) / 2;
        self.draw_text(x + offset, y, text, fg, bg, attrs, None)
    }

    /// Draw text right-aligned within `width` cells starting at `x`.
    pub fn draw_text_right(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
    ) -> u16 {
        let offset = width.saturating_sub(string_width(text));
        self.draw_text(x + offset, y, text, fg, bg, attrs, None)
    }

    /// Draw a border around a rectangle.
    pub fn draw_border(&mut self, rect: Rect, style: BorderStyle, color: Rgba, bg: Option<Rgba>) {
        if rect.width < 2 || rect.height < 2 || style == BorderStyle::None {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let x2 = rect.x + rect.width - 1;
        let y2 = rect.y + rect.height - 1;
        let mut put = |x: u16, y: u16, c: char| {
            self.set_cell(x, y, c as u32, color, bg, Attr::NONE, None);
        };

        put(rect.x, rect.y, tl);
        put(x2, rect.y, tr);
        put(x2, y2, br);
        put(rect.x, y2, bl);

        for col in (rect.x + 1)..x2 {
            put(col, rect.y, horiz);
            put(col, y2, horiz);
        }
        for row in (rect.y + 1)..y2 {
            put(rect.x, row, vert);
            put(x2, row, vert);
        }
    }

    /// Draw a horizontal line.
    pub fn draw_hline(&mut self, x: u16, y: u16, length: u16, char: char, fg: Rgba) {
        for col in x..x.saturating_add(length).min(self.width) {
            self.set_cell(col, y, char as u32, fg, None, Attr::NONE, None);
        }
    }

    /// Draw a vertical line.
    pub fn draw_vline(&mut self, x: u16, y: u16, length: u16, char: char, fg: Rgba) {
        for row in y..y.saturating_add(length).min(self.height) {
            self.set_cell(x, row, char as u32, fg, None, Attr::NONE, None);
        }
    }

    /// Draw a progress bar. `progress` is clamped to `[0, 1]`.
    pub fn draw_progress(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        progress: f32,
        filled_fg: Rgba,
        empty_fg: Rgba,
    ) {
        let progress = progress.clamp(0.0, 1.0);
        let filled = (progress * width as f32).round() as u16;

        for col in 0..width {
            let (char, fg) = if col < filled {
                ('█', filled_fg)
            } else {
                ('░', empty_fg)
            };
            self.set_cell(x + col, y, char as u32, fg, None, Attr::NONE, None);
        }
    }

    /// Draw a vertical scrollbar.
    ///
    /// `scroll_position` in `[0, 1]` is how far down the content is scrolled,
    /// `viewport_ratio` is the visible fraction of the content.
    pub fn draw_scrollbar_v(
        &mut self,
        x: u16,
        y: u16,
        height: u16,
        scroll_position: f32,
        viewport_ratio: f32,
        track_fg: Rgba,
        thumb_fg: Rgba,
    ) {
        if height == 0 {
            return;
        }

        let thumb_height = ((height as f32 * viewport_ratio.clamp(0.0, 1.0)) as u16).max(1);
        let track_space = height.saturating_sub(thumb_height);
        let thumb_start = (track_space as f32 * scroll_position.clamp(0.0, 1.0)).round() as u16;

        for row in 0..height {
            let is_thumb = row >= thumb_start && row < thumb_start + thumb_height;
            let (char, fg) = if is_thumb { ('█', thumb_fg) } else { ('│', track_fg) };
            self.set_cell(x, y + row, char as u32, fg, None, Attr::NONE, None);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_creation() {
        let buf = FrameBuffer::new(10, 4);
        assert_eq!(buf.width(), 10);
        assert_eq!(buf.height(), 4);
        assert_eq!(buf.cells().len(), 40);
        assert!(buf.get(10, 0).is_none());
    }

    #[test]
    fn test_draw_text_and_row_text() {
        let mut buf = FrameBuffer::new(10, 1);
        let used = buf.draw_text(1, 0, "hi", Rgba::WHITE, None, Attr::BOLD, None);
        assert_eq!(used, 2);
        assert_eq!(buf.row_text(0), " hi       ");
        assert_eq!(buf.get(1, 0).unwrap().attrs, Attr::BOLD);
    }

    #[test]
    fn test_draw_text_clips_at_edge() {
        let mut buf = FrameBuffer::new(4, 1);
        buf.draw_text(2, 0, "abcdef", Rgba::WHITE, None, Attr::NONE, None);
        assert_eq!(buf.row_text(0), "  ab");
    }

    #[test]
    fn test_draw_text_clip_rect() {
        let mut buf = FrameBuffer::new(10, 2);
        let clip = Rect::new(0, 0, 3, 1);
        buf.draw_text(0, 0, "abcdef", Rgba::WHITE, None, Attr::NONE, Some(&clip));
        buf.draw_text(0, 1, "xyz", Rgba::WHITE, None, Attr::NONE, Some(&clip));
        assert_eq!(buf.row_text(0).trim_end(), "abc");
        assert_eq!(buf.row_text(1).trim_end(), "");
    }

    #[test]
    fn test_wide_char_continuation() {
        let mut buf = FrameBuffer::new(6, 1);
        let used = buf.draw_text(0, 0, "日a", Rgba::WHITE, None, Attr::NONE, None);
        assert_eq!(used, 3);
        assert_eq!(buf.get(1, 0).unwrap().char, 0);
        assert_eq!(buf.row_text(0), "日a   ");
    }

    #[test]
    fn test_fill_rect_keeps_in_bounds() {
        let mut buf = FrameBuffer::new(5, 5);
        let bg = Rgba::rgb(10, 20, 30);
        buf.fill_rect(Rect::new(3, 3, 10, 10), bg);
        assert_eq!(buf.get(4, 4).unwrap().bg, bg);
        assert_ne!(buf.get(2, 2).unwrap().bg, bg);
    }

    #[test]
    fn test_background_none_preserves() {
        let mut buf = FrameBuffer::new(3, 1);
        let bg = Rgba::rgb(1, 2, 3);
        buf.clear(bg);
        buf.draw_text(0, 0, "x", Rgba::WHITE, None, Attr::NONE, None);
        assert_eq!(buf.get(0, 0).unwrap().bg, bg);
    }

    #[test]
    fn test_draw_border() {
        let mut buf = FrameBuffer::new(4, 3);
        buf.draw_border(buf.bounds(), BorderStyle::Single, Rgba::WHITE, None);
        assert_eq!(buf.row_text(0), "┌──┐");
        assert_eq!(buf.row_text(1), "│  │");
        assert_eq!(buf.row_text(2), "└──┘");
    }

    #[test]
    fn test_draw_progress() {
        let mut buf = FrameBuffer::new(10, 1);
        buf.draw_progress(0, 0, 10, 0.5, Rgba::WHITE, Rgba::GRAY);
        assert_eq!(buf.row_text(0), "█████░░░░░");
    }

    #[test]
    fn test_scrollbar_thumb_at_bottom() {
        let mut buf = FrameBuffer::new(1, 4);
        buf.draw_scrollbar_v(0, 0, 4, 1.0, 0.5, Rgba::GRAY, Rgba::WHITE);
        let column: String = (0..4).map(|y| buf.row_text(y)).collect();
        assert_eq!(column, "││██");
    }
}
