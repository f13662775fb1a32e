//! Overlay - the whitepaper reader
//!
//! Layout (see [`overlay_panes`]):
//!
//! ```text
//! ┌ header ─────────────────────────────────────────┐
//! │ table of contents │ section body              ┃ │
//! │ ▸ 1. Executive…   │ Title                     ┃ │
//! │      subtitle     │ subtitle                  │ │
//! │   2. Problem      │ parsed paragraphs, bullets│ │
//! ├ footer ─────────────────────────────────────────┤
//! │ Section 1 of 7         ● ○ ○ ○ ○ ○ ○        14% │
//! │ ███████░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░ │
//! ```
//!
//! The body scrolls independently and goes back to the top whenever the
//! section changes.

use spark_signals::Signal;

use crate::content::{parse_content_with, ParserConfig, RenderNode, Section, SectionStore};
use crate::error::Result;
use crate::layout::{overlay_panes, string_width, truncate_text, wrap_hanging};
use crate::renderer::FrameBuffer;
use crate::state::{Navigator, Progress, ScrollState};
use crate::theme::Theme;
use crate::types::{Attr, Rect, Rgba};

const KEY_POINT_MARKER: char = '✓';

// =============================================================================
// BODY LINES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Subtitle,
    Visual,
    Heading,
    Text,
    Bullet,
    KeyPointsTitle,
    KeyPoint,
    Blank,
}

/// One display row of a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLine {
    pub text: String,
    pub style: LineStyle,
}

impl BodyLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    fn blank() -> Self {
        Self::new(String::new(), LineStyle::Blank)
    }
}

fn push_blank(lines: &mut Vec<BodyLine>) {
    if lines.last().is_some_and(|l| l.style != LineStyle::Blank) {
        lines.push(BodyLine::blank());
    }
}

fn push_wrapped(lines: &mut Vec<BodyLine>, text: &str, width: u16, indent: u16, style: LineStyle) {
    lines.extend(
        wrap_hanging(text, width, indent)
            .into_iter()
            .map(|line| BodyLine::new(line, style)),
    );
}

/// Lay out a section's body as wrapped display rows.
///
/// Title, subtitle and visual tag first, then the parsed content, then the
/// key points. Consecutive blank rows collapse to one.
pub fn body_lines(section: &Section, parser: &ParserConfig, width: u16) -> Vec<BodyLine> {
    let mut lines = Vec::new();
    let bullet_indent = string_width(&parser.bullet.to_string()) + 1;

    push_wrapped(&mut lines, &section.title, width, 0, LineStyle::Title);
    if !section.subtitle.is_empty() {
        push_wrapped(&mut lines, &section.subtitle, width, 0, LineStyle::Subtitle);
    }
    if !section.visual.is_empty() {
        lines.push(BodyLine::new(format!("◆ {}", section.visual), LineStyle::Visual));
    }
    push_blank(&mut lines);

    for node in parse_content_with(&section.content, parser) {
        match node {
            RenderNode::Heading(text) => {
                push_blank(&mut lines);
                push_wrapped(&mut lines, &text, width, 0, LineStyle::Heading);
            }
            RenderNode::Paragraph(segments) => {
                for segment in segments {
                    if segment.bullet {
                        let display = segment.display(parser.bullet);
                        push_wrapped(&mut lines, &display, width, bullet_indent, LineStyle::Bullet);
                    } else if !segment.text.is_empty() {
                        push_wrapped(&mut lines, &segment.text, width, 0, LineStyle::Text);
                    }
                }
                push_blank(&mut lines);
            }
        }
    }

    if !section.key_points.is_empty() {
        push_blank(&mut lines);
        lines.push(BodyLine::new("Key Points", LineStyle::KeyPointsTitle));
        for point in &section.key_points {
            let display = format!("{} {}", KEY_POINT_MARKER, point);
            push_wrapped(&mut lines, &display, width, 2, LineStyle::KeyPoint);
        }
    }

    while lines.last().is_some_and(|l| l.style == LineStyle::Blank) {
        lines.pop();
    }
    lines
}

/// Every section as plain text, for non-interactive output.
pub fn dump_document(store: &SectionStore, parser: &ParserConfig) -> String {
    let mut out = String::new();
    for (index, section) in store.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("[{}/{}] {}\n", index + 1, store.count(), section.id));
        for line in body_lines(section, parser, u16::MAX) {
            out.push_str(&line.text);
            out.push('\n');
        }
    }
    out
}

// =============================================================================
// OVERLAY VIEW
// =============================================================================

pub struct OverlayView {
    parser: ParserConfig,
    sidebar_width: u16,
    scroll: ScrollState,
}

impl OverlayView {
    pub fn new(parser: ParserConfig, sidebar_width: u16) -> Self {
        Self {
            parser,
            sidebar_width,
            scroll: ScrollState::new(),
        }
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    /// Offset signal, so section changes can reset it.
    pub fn scroll_offset_signal(&self) -> Signal<u16> {
        self.scroll.offset_signal()
    }

    pub fn scroll_lines(&self, delta: i32) -> bool {
        self.scroll.scroll_by(delta)
    }

    pub fn scroll_pages(&self, pages: i32) -> bool {
        self.scroll.scroll_pages(pages)
    }

    pub fn render(
        &mut self,
        buf: &mut FrameBuffer,
        nav: &Navigator,
        progress: &Progress,
        theme: &Theme,
    ) -> Result<()> {
        let panes = overlay_panes(buf.width(), buf.height(), self.sidebar_width)?;
        let bounds = buf.bounds();
        buf.fill_rect(bounds, theme.bg());

        draw_header(buf, panes.header, theme);
        if panes.sidebar.width > 0 {
            draw_toc(buf, panes.sidebar, nav, theme);
        }
        self.draw_body(buf, panes.body, nav.current_section()?, theme);
        draw_footer(buf, panes.footer, progress, theme);
        Ok(())
    }

    fn draw_body(&mut self, buf: &mut FrameBuffer, area: Rect, section: &Section, theme: &Theme) {
        let inner = Rect::new(
            area.x + 2,
            area.y + 1,
            area.width.saturating_sub(5),
            area.height.saturating_sub(1),
        );
        if inner.is_empty() {
            return;
        }

        let lines = body_lines(section, &self.parser, inner.width);
        let total = lines.len().min(u16::MAX as usize) as u16;
        self.scroll.set_extent(total, inner.height);

        let offset = self.scroll.offset() as usize;
        for (row, line) in lines.iter().skip(offset).take(inner.height as usize).enumerate() {
            let (fg, attrs) = line_style(line.style, theme);
            buf.draw_text(inner.x, inner.y + row as u16, &line.text, fg, None, attrs, Some(&inner));
        }

        if self.scroll.is_scrollable() {
            let position = self.scroll.offset() as f32 / self.scroll.max_scroll() as f32;
            let ratio = inner.height as f32 / total as f32;
            buf.draw_scrollbar_v(
                area.right().saturating_sub(1),
                inner.y,
                inner.height,
                position,
                ratio,
                theme.border(),
                theme.primary(),
            );
        }
    }
}

fn line_style(style: LineStyle, theme: &Theme) -> (Rgba, Attr) {
    match style {
        LineStyle::Title => (theme.text_bright(), Attr::BOLD),
        LineStyle::Subtitle => (theme.text_muted(), Attr::ITALIC),
        LineStyle::Visual => (theme.secondary(), Attr::NONE),
        LineStyle::Heading => (theme.accent(), Attr::BOLD),
        LineStyle::Text | LineStyle::Bullet | LineStyle::KeyPoint => (theme.text(), Attr::NONE),
        LineStyle::KeyPointsTitle => (theme.success(), Attr::BOLD),
        LineStyle::Blank => (theme.text(), Attr::NONE),
    }
}

fn draw_header(buf: &mut FrameBuffer, area: Rect, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    buf.draw_text(area.x + 1, area.y, "Whitepaper", theme.primary(), None, Attr::BOLD, Some(&area));
    let hint = "←/→ sections · ↑/↓ scroll · Esc close";
    if string_width(hint) + 14 <= area.width {
        buf.draw_text_right(area.x, area.y, area.width - 1, hint, theme.text_muted(), None, Attr::NONE);
    }
    if area.height > 1 {
        buf.draw_hline(area.x, area.y + 1, area.width, '─', theme.border());
    }
}

/// Table of contents, two rows per section, scrolled to keep the active
/// entry visible.
fn draw_toc(buf: &mut FrameBuffer, area: Rect, nav: &Navigator, theme: &Theme) {
    let divider_x = area.right().saturating_sub(1);
    buf.draw_vline(divider_x, area.y, area.height, '│', theme.border());

    let text_area = Rect::new(area.x, area.y, area.width.saturating_sub(1), area.height);
    let text_width = text_area.width.saturating_sub(3);
    let visible = (area.height / 2).max(1) as usize;
    let active = nav.current_index();
    let first = if active < visible { 0 } else { active + 1 - visible };

    for (row, (index, section)) in nav.store().iter().enumerate().skip(first).take(visible).enumerate() {
        let y = area.y + (row as u16) * 2;
        let is_active = index == active;
        let (marker, fg, attrs) = if is_active {
            ("▸", theme.primary(), Attr::BOLD)
        } else {
            (" ", theme.text(), Attr::NONE)
        };

        let title = truncate_text(&format!("{}. {}", index + 1, section.title), text_width);
        buf.draw_text(area.x + 1, y, marker, fg, None, attrs, Some(&text_area));
        buf.draw_text(area.x + 3, y, &title, fg, None, attrs, Some(&text_area));

        if !section.subtitle.is_empty() {
            let subtitle = truncate_text(&section.subtitle, text_width.saturating_sub(3));
            buf.draw_text(area.x + 6, y + 1, &subtitle, theme.text_muted(), None, Attr::NONE, Some(&text_area));
        }
    }
}

fn draw_footer(buf: &mut FrameBuffer, area: Rect, progress: &Progress, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    buf.draw_hline(area.x, area.y, area.width, '─', theme.border());
    if area.height < 3 {
        return;
    }

    let y = area.y + 1;
    buf.draw_text(area.x + 1, y, &progress.label(), theme.text(), None, Attr::NONE, Some(&area));

    let dots: Vec<&str> = progress
        .dot_states()
        .into_iter()
        .map(|active| if active { "●" } else { "○" })
        .collect();
    let dots = dots.join(" ");
    if string_width(&dots) + 30 <= area.width {
        buf.draw_text_centered(area.x, y, area.width, &dots, theme.primary(), None, Attr::NONE);
    }

    let percent = format!("{:.0}%", progress.percent_complete());
    buf.draw_text_right(area.x, y, area.width.saturating_sub(1), &percent, theme.text_bright(), None, Attr::BOLD);

    buf.draw_progress(
        area.x + 1,
        area.y + 2,
        area.width.saturating_sub(2),
        progress.ratio(),
        theme.primary(),
        theme.border(),
    );
}

// =============================================================================
// TESTS
// =============================================================================
