//! Text Measurement
//!
//! Utilities for measuring and wrapping text in terminal cells.
//!
//! Widths come from `unicode-width`:
//! - ASCII characters: 1 cell
//! - CJK characters and most emoji: 2 cells
//! - Zero-width and control characters: 0 cells

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a character in terminal cells.
pub fn char_width(c: char) -> u16 {
    c.width().unwrap_or(0) as u16
}

/// Measure the display width of a string in terminal cells.
pub fn string_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}

/// Word-wrap text to a given width.
///
/// Breaks at whitespace; a word wider than `width` is split by character.
/// Explicit `\n` starts a new line. Empty input yields no lines.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    wrap_hanging(text, width, 0)
}

/// Word-wrap with continuation lines indented by `indent` cells.
///
/// Used for bullet items so wrapped text lines up after the marker.
pub fn wrap_hanging(text: &str, width: u16, indent: u16) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if width == 0 {
        return vec![text.to_string()];
    }

    // Accumulate in usize: a dump wraps at u16::MAX and long paragraphs exceed it
    let width = width as usize;
    let indent = (indent as usize).min(width - 1);
    let pad = " ".repeat(indent);
    let mut lines = Vec::new();

    for raw_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0usize;

        let mut push_line = |current: &mut String, current_width: &mut usize| {
            lines.push(std::mem::take(current));
            current.push_str(&pad);
            *current_width = indent;
        };

        for word in raw_line.split_whitespace() {
            let word_width = word.width();
            let starts_line = current.trim().is_empty();
            let needed = if starts_line { word_width } else { word_width + 1 };

            if current_width + needed > width && !starts_line {
                push_line(&mut current, &mut current_width);
            }

            if !current.trim().is_empty() {
                current.push(' ');
                current_width += 1;
            }

            if current_width + word_width <= width {
                current.push_str(word);
                current_width += word_width;
                continue;
            }

            // Word wider than the line: hard break by character
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if current_width + w > width && !current.trim().is_empty() {
                    push_line(&mut current, &mut current_width);
                }
                current.push(c);
                current_width += w;
            }
        }

        lines.push(current);
    }

    lines
}

/// Truncate text to fit within `width` cells, appending `…` when cut.
pub fn truncate_text(text: &str, width: u16) -> String {
    if string_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0usize;
    let limit = width as usize - 1;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
