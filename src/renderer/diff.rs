//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed.
//!
//! # Algorithm
//!
//! 1. Wrap output in a synchronized update
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: move the cursor only if it is not already there, emit
//!      colour and attribute changes only when they differ, print the cell
//! 3. Flush the writer
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::queue;

use super::buffer::FrameBuffer;
use crate::types::{Attr, Cell, Rgba};

/// Map our colour to crossterm's.
pub fn to_color(color: Rgba) -> Color {
    if color.is_terminal_default() || color.is_transparent() {
        Color::Reset
    } else if color.is_ansi() {
        Color::AnsiValue(color.ansi_index())
    } else {
        Color::Rgb {
            r: color.r as u8,
            g: color.g as u8,
            b: color.b as u8,
        }
    }
}

/// Terminal state already emitted this frame.
#[derive(Default)]
struct CellState {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Option<Attr>,
}

/// Differential renderer.
///
/// Keeps track of the previous frame to enable diff-based rendering.
pub struct DiffRenderer<W: Write> {
    out: W,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> DiffRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, previous: None }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns true if any cells were changed.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<bool> {
        let mut state = CellState::default();
        let mut has_changes = false;

        queue!(self.out, BeginSynchronizedUpdate)?;

        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                let Some(cell) = buffer.get(x, y) else {
                    continue;
                };

                let changed = match &self.previous {
                    Some(prev) if same_size => prev.get(x, y) != Some(cell),
                    _ => true,
                };

                if changed {
                    has_changes = true;
                    render_cell(&mut self.out, &mut state, x, y, cell)?;
                }
            }
        }

        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(has_changes)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.out.flush()?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            Show,
            LeaveAlternateScreen
        )?;
        self.out.flush()
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

fn render_cell<W: Write>(
    out: &mut W,
    state: &mut CellState,
    x: u16,
    y: u16,
    cell: &Cell,
) -> io::Result<()> {
    // Second half of a wide char: the terminal already advanced past it
    if cell.char == 0 {
        state.cursor = None;
        return Ok(());
    }

    if state.cursor != Some((x, y)) {
        queue!(out, MoveTo(x, y))?;
    }

    if state.attrs != Some(cell.attrs) {
        // Reset clears colours too
        queue!(out, SetAttribute(Attribute::Reset))?;
        state.fg = None;
        state.bg = None;
        for (flag, attribute) in [
            (Attr::BOLD, Attribute::Bold),
            (Attr::DIM, Attribute::Dim),
            (Attr::ITALIC, Attribute::Italic),
            (Attr::UNDERLINE, Attribute::Underlined),
            (Attr::INVERSE, Attribute::Reverse),
        ] {
            if cell.attrs.contains(flag) {
                queue!(out, SetAttribute(attribute))?;
            }
        }
        state.attrs = Some(cell.attrs);
    }

    if state.fg != Some(cell.fg) {
        queue!(out, SetForegroundColor(to_color(cell.fg)))?;
        state.fg = Some(cell.fg);
    }
    if state.bg != Some(cell.bg) {
        queue!(out, SetBackgroundColor(to_color(cell.bg)))?;
        state.bg = Some(cell.bg);
    }

    let ch = char::from_u32(cell.char).unwrap_or(' ');
    queue!(out, Print(ch))?;

    let advance = crate::layout::char_width(ch).max(1);
    state.cursor = Some((x.saturating_add(advance), y));
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
