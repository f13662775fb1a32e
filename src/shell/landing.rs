//! Landing - the scroll-driven sequence in front of the whitepaper
//!
//! Regions are stacked vertically in a [`ScrollViewport`]. The viewport is
//! the [`VisibilitySource`] for the reveal controller: each scroll or resize
//! re-measures every observed region, and the first measurement at or above
//! the threshold latches the region revealed. Unrevealed regions draw as a
//! placeholder; revealed ones slide up and fade in over
//! [`ENTRANCE_DURATION`].
//!
//! Some regions carry entry points (open the whitepaper, download a file).
//! Tab cycles focus over them and Enter hands their [`EntryAction`] back to
//! the caller.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::content::SectionStore;
use crate::error::Result;
use crate::layout::{stack_vertical, string_width, truncate_text, wrap_text};
use crate::renderer::FrameBuffer;
use crate::state::{FocusRing, RevealController, ScrollState, VisibilitySource};
use crate::theme::Theme;
use crate::types::{Attr, BorderStyle, Rect, Rgba};

use super::downloads::{catalogue, ARCHIVE_FILENAME};
use super::metrics::{simulation_metrics, MetricCarousel};

/// Entrance animation length, from the reveal instant.
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(600);

/// Rows a region slides up while entering.
const ENTRANCE_SLIDE: f32 = 2.0;

const REGION_GAP: u16 = 1;
const MAX_CONTENT_WIDTH: u16 = 88;
const STATUS_HEIGHT: u16 = 1;

const TAGLINE: &str = "A comprehensive framework for transforming human civilization from \
                       extractive competition to regenerative cooperation through \
                       scientifically validated mechanisms.";

const KEY_STATS: [(&str, &str); 4] = [
    ("4.6B", "People Transformed by 2042"),
    ("48%", "Better Performance vs Traditional"),
    ("205%", "Optimization Potential"),
    ("2x", "Better Crisis Response"),
];

// =============================================================================
// SCROLL VIEWPORT
// =============================================================================

type VisibilityCallback = Rc<dyn Fn(f32)>;

#[derive(Default)]
struct ViewportInner {
    regions: Vec<(String, Rect)>,
    observers: HashMap<String, VisibilityCallback>,
    scroll: ScrollState,
}

impl ViewportInner {
    fn ratio(&self, region: &str) -> Option<f32> {
        let (_, rect) = self.regions.iter().find(|(id, _)| id == region)?;
        Some(visible_ratio(*rect, self.scroll.offset(), self.scroll.viewport_height()))
    }
}

/// Fraction of `rect`'s rows inside `[offset, offset + height)`.
pub fn visible_ratio(rect: Rect, offset: u16, height: u16) -> f32 {
    if rect.height == 0 {
        return 0.0;
    }
    let top = rect.y.max(offset) as u32;
    let bottom = (rect.y as u32 + rect.height as u32).min(offset as u32 + height as u32);
    bottom.saturating_sub(top) as f32 / rect.height as f32
}

/// Vertical scroll container over laid-out regions.
///
/// Region rects are in content coordinates (row 0 is the top of the page).
#[derive(Default)]
pub struct ScrollViewport {
    inner: RefCell<ViewportInner>,
}

impl ScrollViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the region geometry and viewport height, then re-measure.
    pub fn set_layout(&self, regions: Vec<(String, Rect)>, viewport_height: u16) {
        {
            let mut inner = self.inner.borrow_mut();
            let content_height = regions
                .iter()
                .map(|(_, rect)| rect.bottom())
                .max()
                .unwrap_or(0);
            inner.regions = regions;
            inner.scroll.set_extent(content_height, viewport_height);
        }
        self.measure();
    }

    pub fn offset(&self) -> u16 {
        self.inner.borrow().scroll.offset()
    }

    pub fn viewport_height(&self) -> u16 {
        self.inner.borrow().scroll.viewport_height()
    }

    pub fn max_scroll(&self) -> u16 {
        self.inner.borrow().scroll.max_scroll()
    }

    pub fn region_rect(&self, region: &str) -> Option<Rect> {
        self.inner
            .borrow()
            .regions
            .iter()
            .find(|(id, _)| id == region)
            .map(|(_, rect)| *rect)
    }

    pub fn visible_ratio(&self, region: &str) -> Option<f32> {
        self.inner.borrow().ratio(region)
    }

    pub fn scroll_by(&self, delta: i32) -> bool {
        let moved = self.inner.borrow().scroll.scroll_by(delta);
        if moved {
            self.measure();
        }
        moved
    }

    pub fn scroll_pages(&self, pages: i32) -> bool {
        let moved = self.inner.borrow().scroll.scroll_pages(pages);
        if moved {
            self.measure();
        }
        moved
    }

    /// Scroll the least amount that puts content `row` on screen.
    pub fn scroll_into_view(&self, row: u16) -> bool {
        let (offset, height) = {
            let inner = self.inner.borrow();
            (inner.scroll.offset(), inner.scroll.viewport_height())
        };
        let target = if row < offset {
            row
        } else if height > 0 && row >= offset.saturating_add(height) {
            row + 1 - height
        } else {
            return false;
        };
        self.inner.borrow().scroll.set_offset(target);
        let moved = self.offset() != offset;
        if moved {
            self.measure();
        }
        moved
    }

    /// Deliver the current ratio to every observer.
    pub fn measure(&self) {
        let pending: Vec<(VisibilityCallback, f32)> = {
            let inner = self.inner.borrow();
            inner
                .observers
                .iter()
                .filter_map(|(region, callback)| Some((callback.clone(), inner.ratio(region)?)))
                .collect()
        };
        for (callback, ratio) in pending {
            callback(ratio);
        }
    }
}

impl VisibilitySource for ScrollViewport {
    /// Registers the callback and measures once right away if the region
    /// is already laid out.
    fn observe(&self, region: &str, callback: Box<dyn Fn(f32)>) {
        let callback: VisibilityCallback = Rc::from(callback);
        let initial = {
            let mut inner = self.inner.borrow_mut();
            inner.observers.insert(region.to_string(), callback.clone());
            inner.ratio(region)
        };
        if let Some(ratio) = initial {
            callback(ratio);
        }
    }

    fn unobserve(&self, region: &str) {
        self.inner.borrow_mut().observers.remove(region);
    }
}

// =============================================================================
// REGIONS + ENTRY POINTS
// =============================================================================

/// What activating an entry point asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryAction {
    /// Open the overlay, at `section` or wherever the reader left off
    OpenDocument { section: Option<String> },
    Download { filename: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPoint {
    pub id: String,
    pub label: String,
    pub action: EntryAction,
    /// Muted text after the label
    pub detail: String,
    /// Row within the owning region
    row: u16,
    centered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Hero,
    KeyMetrics,
    Highlights,
    Results,
    Whitepaper,
    Downloads,
}

pub struct LandingRegion {
    pub id: &'static str,
    pub kind: RegionKind,
    pub height: u16,
    pub entries: Vec<EntryPoint>,
}

fn entry(id: impl Into<String>, label: impl Into<String>, action: EntryAction, row: u16) -> EntryPoint {
    EntryPoint {
        id: id.into(),
        label: label.into(),
        action,
        detail: String::new(),
        row,
        centered: false,
    }
}

/// The landing sequence, top to bottom.
pub fn landing_regions(store: &SectionStore) -> Vec<LandingRegion> {
    let open_at = |section: Option<&str>| EntryAction::OpenDocument {
        section: section.map(str::to_string),
    };

    let hero = LandingRegion {
        id: "hero",
        kind: RegionKind::Hero,
        height: 9,
        entries: vec![
            EntryPoint {
                centered: true,
                ..entry("hero-explore", "Explore Research", open_at(None), 6)
            },
            EntryPoint {
                centered: true,
                ..entry(
                    "hero-download",
                    "Download Papers",
                    EntryAction::Download {
                        filename: ARCHIVE_FILENAME.to_string(),
                    },
                    7,
                )
            },
        ],
    };

    let highlights = LandingRegion {
        id: "highlights",
        kind: RegionKind::Highlights,
        height: 2 + store.count() as u16,
        entries: store
            .iter()
            .enumerate()
            .map(|(i, section)| EntryPoint {
                detail: section.subtitle.clone(),
                ..entry(
                    format!("highlight-{}", section.id),
                    format!("{}. {}", i + 1, section.title),
                    open_at(Some(section.id.as_str())),
                    2 + i as u16,
                )
            })
            .collect(),
    };

    let whitepaper = LandingRegion {
        id: "whitepaper",
        kind: RegionKind::Whitepaper,
        height: 5,
        entries: vec![EntryPoint {
            centered: true,
            ..entry("whitepaper-open", "Read the Whitepaper", open_at(None), 3)
        }],
    };

    let items = catalogue();
    let downloads = LandingRegion {
        id: "downloads",
        kind: RegionKind::Downloads,
        height: 2 + items.len() as u16,
        entries: items
            .iter()
            .enumerate()
            .map(|(i, artifact)| EntryPoint {
                detail: artifact.summary(),
                ..entry(
                    format!("download-{}", artifact.filename),
                    artifact.title,
                    EntryAction::Download {
                        filename: artifact.filename.to_string(),
                    },
                    2 + i as u16,
                )
            })
            .collect(),
    };

    vec![
        hero,
        LandingRegion {
            id: "key-metrics",
            kind: RegionKind::KeyMetrics,
            height: 11,
            entries: Vec::new(),
        },
        highlights,
        LandingRegion {
            id: "results",
            kind: RegionKind::Results,
            height: 3 + simulation_metrics().len() as u16,
            entries: Vec::new(),
        },
        whitepaper,
        downloads,
    ]
}

/// Entrance progress in `[0, 1]`, eased out.
pub fn entrance_progress(revealed_at: Instant, now: Instant) -> f32 {
    let elapsed = now.saturating_duration_since(revealed_at).as_secs_f32();
    let t = (elapsed / ENTRANCE_DURATION.as_secs_f32()).clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

// =============================================================================
// LANDING
// =============================================================================

pub struct Landing {
    regions: Vec<LandingRegion>,
    viewport: ScrollViewport,
    reveal: RevealController,
    pending: Rc<RefCell<Vec<String>>>,
    revealed_at: RefCell<HashMap<String, Instant>>,
    focus: FocusRing,
    carousel: MetricCarousel,
    width: u16,
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Landing {
    /// Build the regions and attach each one to `reveal` at `threshold`.
    pub fn new(
        store: &SectionStore,
        reveal: RevealController,
        threshold: f32,
        carousel: MetricCarousel,
    ) -> Self {
        let regions = landing_regions(store);
        let focus = FocusRing::new(
            regions
                .iter()
                .flat_map(|region| region.entries.iter().map(|e| e.id.clone())),
        );

        // Reveals arrive from scroll measurements, which carry no clock. They
        // are stamped by the next call that does.
        let pending: Rc<RefCell<Vec<String>>> = Rc::default();
        let queue = pending.clone();
        let cleanup = reveal.subscribe(move |event| {
            queue.borrow_mut().push(event.region.clone());
        });

        let landing = Self {
            regions,
            viewport: ScrollViewport::new(),
            reveal,
            pending,
            revealed_at: RefCell::default(),
            focus,
            carousel,
            width: 0,
            unsubscribe: Some(Box::new(cleanup)),
        };
        for region in &landing.regions {
            landing.reveal.attach_to(&landing.viewport, region.id, threshold);
        }
        landing
    }

    pub fn regions(&self) -> &[LandingRegion] {
        &self.regions
    }

    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    pub fn focus(&self) -> &FocusRing {
        &self.focus
    }

    pub fn focus_mut(&mut self) -> &mut FocusRing {
        &mut self.focus
    }

    pub fn carousel(&self) -> &MetricCarousel {
        &self.carousel
    }

    pub fn is_revealed(&self, region: &str) -> bool {
        self.reveal.is_revealed(region)
    }

    /// Lay the regions out for a `width` x `height` screen and re-measure.
    pub fn layout(&mut self, width: u16, height: u16) -> Result<()> {
        self.width = width;
        let content_width = width.min(MAX_CONTENT_WIDTH);
        let heights: Vec<u16> = self.regions.iter().map(|r| r.height).collect();
        let rects = stack_vertical(content_width, &heights, REGION_GAP)?;

        let geometry = self
            .regions
            .iter()
            .zip(rects)
            .map(|(region, rect)| (region.id.to_string(), rect))
            .collect();
        self.viewport
            .set_layout(geometry, height.saturating_sub(STATUS_HEIGHT));
        Ok(())
    }

    pub fn scroll_lines(&self, delta: i32) -> bool {
        self.viewport.scroll_by(delta)
    }

    pub fn scroll_pages(&self, pages: i32) -> bool {
        self.viewport.scroll_pages(pages)
    }

    pub fn focus_next(&mut self) -> bool {
        let moved = self.focus.focus_next();
        self.reveal_focused();
        moved
    }

    pub fn focus_previous(&mut self) -> bool {
        let moved = self.focus.focus_previous();
        self.reveal_focused();
        moved
    }

    pub fn focused_entry(&self) -> Option<&EntryPoint> {
        let id = self.focus.focused()?;
        self.entries().find(|e| e.id == id)
    }

    /// The focused entry point's action, if any.
    pub fn activate(&self) -> Option<EntryAction> {
        self.focused_entry().map(|e| e.action.clone())
    }

    pub fn entries(&self) -> impl Iterator<Item = &EntryPoint> {
        self.regions.iter().flat_map(|r| r.entries.iter())
    }

    fn reveal_focused(&self) {
        let Some(id) = self.focus.focused() else {
            return;
        };
        let row = self.regions.iter().find_map(|region| {
            let entry = region.entries.iter().find(|e| e.id == id)?;
            let rect = self.viewport.region_rect(region.id)?;
            Some(rect.y + entry.row)
        });
        if let Some(row) = row {
            self.viewport.scroll_into_view(row);
        }
    }

    /// Start the entrance of every region revealed since the last call.
    fn stamp_reveals(&self, now: Instant) {
        let revealed: Vec<String> = self.pending.borrow_mut().drain(..).collect();
        let mut stamps = self.revealed_at.borrow_mut();
        for region in revealed {
            stamps.entry(region).or_insert(now);
        }
    }

    /// Advance the metric carousel if due.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.stamp_reveals(now);
        self.carousel.tick(now)
    }

    pub fn until_next_tick(&self, now: Instant) -> Duration {
        self.carousel.until_next(now)
    }

    /// True while any entrance animation is still running.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.stamp_reveals(now);
        self.revealed_at
            .borrow()
            .values()
            .any(|at| now.saturating_duration_since(*at) < ENTRANCE_DURATION)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn render(&self, buf: &mut FrameBuffer, theme: &Theme, now: Instant, status: Option<&str>) {
        self.stamp_reveals(now);
        let bounds = buf.bounds();
        buf.fill_rect(bounds, theme.bg());

        let viewport_height = self.viewport.viewport_height();
        let clip = Rect::new(0, 0, buf.width(), viewport_height.min(buf.height()));
        let content_width = buf.width().min(MAX_CONTENT_WIDTH);
        let margin = (buf.width() - content_width) / 2;
        let offset = self.viewport.offset() as i32;

        for region in &self.regions {
            let Some(rect) = self.viewport.region_rect(region.id) else {
                continue;
            };
            let top = rect.y as i32 - offset;
            if top >= clip.height as i32 || top + rect.height as i32 <= 0 {
                continue;
            }

            let revealed_at = self.revealed_at.borrow().get(region.id).copied();
            let progress = match revealed_at {
                Some(at) => entrance_progress(at, now),
                None if self.reveal.is_revealed(region.id) => 1.0,
                None => {
                    let y = top + (rect.height / 2) as i32;
                    if (0..clip.height as i32).contains(&y) {
                        buf.draw_text_centered(margin, y as u16, content_width, "· · ·", theme.border(), None, Attr::NONE);
                    }
                    continue;
                }
            };

            let slide = ((1.0 - progress) * ENTRANCE_SLIDE).round() as i32;
            let mut painter = Painter {
                buf: &mut *buf,
                x: margin,
                top: top + slide,
                width: content_width,
                clip,
                bg: theme.bg(),
                fade: progress,
            };
            self.draw_region(&mut painter, region, theme);
        }

        self.draw_status(buf, theme, status);
    }

    fn draw_region(&self, p: &mut Painter<'_>, region: &LandingRegion, theme: &Theme) {
        match region.kind {
            RegionKind::Hero => {
                p.centered(1, "LIFE System", theme.primary(), Attr::BOLD);
                let lines = wrap_text(TAGLINE, p.width.saturating_sub(8).min(72));
                for (i, line) in lines.iter().take(3).enumerate() {
                    p.centered(3 + i as u16, line, theme.text_muted(), Attr::NONE);
                }
            }
            RegionKind::KeyMetrics => {
                p.centered(0, "Simulation Results Overview", theme.text_bright(), Attr::BOLD);
                let cell = p.width / KEY_STATS.len() as u16;
                for (i, (value, label)) in KEY_STATS.iter().enumerate() {
                    let x = cell * i as u16;
                    p.centered_in(2, x, cell, value, theme.accent(), Attr::BOLD);
                    let label = truncate_text(label, cell.saturating_sub(2));
                    p.centered_in(3, x, cell, &label, theme.text_muted(), Attr::NONE);
                }
                if let Some(area) = p.area(5, 6) {
                    self.carousel.render(p.buf, area, theme);
                }
            }
            RegionKind::Highlights => {
                p.text(0, 0, "Research Highlights", theme.text_bright(), Attr::BOLD);
            }
            RegionKind::Results => {
                p.text(0, 0, "Performance Comparison", theme.text_bright(), Attr::BOLD);
                let header = format!("{:<26}{:>12}{:>12}{:>14}", "Metric", "Traditional", "LIFE", "Improvement");
                p.text(2, 0, &header, theme.text_muted(), Attr::UNDERLINE);
                for (i, metric) in simulation_metrics().iter().enumerate() {
                    let row = format!(
                        "{:<26}{:>11.0}%{:>11.0}%",
                        metric.name,
                        metric.traditional * 100.0,
                        metric.life * 100.0
                    );
                    p.text(3 + i as u16, 0, &row, theme.text(), Attr::NONE);
                    let improvement = format!("{:>13}", format!("+{}%", metric.improvement));
                    p.text(3 + i as u16, 50, &improvement, theme.success(), Attr::BOLD);
                }
            }
            RegionKind::Whitepaper => {
                p.frame(0, region.height, theme.border());
                p.centered(1, "The Whitepaper", theme.text_bright(), Attr::BOLD);
                p.centered(
                    2,
                    "The complete research paper, section by section.",
                    theme.text_muted(),
                    Attr::NONE,
                );
            }
            RegionKind::Downloads => {
                p.text(0, 0, "Research Materials", theme.text_bright(), Attr::BOLD);
            }
        }

        for entry in &region.entries {
            self.draw_entry(p, entry, theme);
        }
    }

    fn draw_entry(&self, p: &mut Painter<'_>, entry: &EntryPoint, theme: &Theme) {
        let focused = self.focus.is_focused(&entry.id);
        let attrs = if focused { Attr::INVERSE | Attr::BOLD } else { Attr::NONE };
        let label = format!("[ {} ]", entry.label);

        if entry.centered {
            p.centered(entry.row, &label, theme.primary(), attrs);
            return;
        }

        let used = p.text(entry.row, 2, &label, theme.primary(), attrs);
        if !entry.detail.is_empty() {
            let room = p.width.saturating_sub(used + 5);
            let detail = truncate_text(&entry.detail, room);
            p.text(entry.row, used + 3, &detail, theme.text_muted(), Attr::NONE);
        }
    }

    fn draw_status(&self, buf: &mut FrameBuffer, theme: &Theme, status: Option<&str>) {
        let y = self.viewport.viewport_height();
        if y >= buf.height() {
            return;
        }
        let row = Rect::new(0, y, buf.width(), 1);
        buf.fill_rect(row, theme.surface());

        let hint = "↑/↓ scroll · Tab focus · Enter open · w whitepaper · q quit";
        buf.draw_text(1, y, &truncate_text(hint, buf.width().saturating_sub(2)), theme.text_muted(), None, Attr::NONE, Some(&row));

        let right = match status {
            Some(message) => message.to_string(),
            None => {
                let max = self.viewport.max_scroll();
                let pct = if max == 0 { 100 } else { self.viewport.offset() as u32 * 100 / max as u32 };
                format!("{}%", pct)
            }
        };
        if string_width(&right) + string_width(hint) + 4 <= buf.width() {
            buf.draw_text_right(0, y, buf.width() - 1, &right, theme.text_bright(), None, Attr::NONE);
        }
    }
}

impl Drop for Landing {
    fn drop(&mut self) {
        for region in &self.regions {
            self.reveal.detach_from(&self.viewport, region.id);
        }
        if let Some(cleanup) = self.unsubscribe.take() {
            cleanup();
        }
    }
}

/// Draws one region at a scrolled, sliding offset, faded toward the
/// background.
struct Painter<'a> {
    buf: &'a mut FrameBuffer,
    x: u16,
    top: i32,
    width: u16,
    clip: Rect,
    bg: Rgba,
    fade: f32,
}

impl Painter<'_> {
    fn row(&self, row: u16) -> Option<u16> {
        let y = self.top + row as i32;
        (0..self.clip.height as i32).contains(&y).then_some(y as u16)
    }

    fn color(&self, color: Rgba) -> Rgba {
        if self.fade >= 1.0 {
            color
        } else {
            Rgba::lerp(self.bg, color, self.fade)
        }
    }

    fn text(&mut self, row: u16, col: u16, text: &str, fg: Rgba, attrs: Attr) -> u16 {
        let Some(y) = self.row(row) else {
            return string_width(text);
        };
        let fg = self.color(fg);
        let clip = self.clip;
        self.buf.draw_text(self.x + col, y, text, fg, None, attrs, Some(&clip));
        string_width(text)
    }

    fn centered(&mut self, row: u16, text: &str, fg: Rgba, attrs: Attr) {
        self.centered_in(row, 0, self.width, text, fg, attrs);
    }

    fn centered_in(&mut self, row: u16, col: u16, width: u16, text: &str, fg: Rgba, attrs: Attr) {
        let offset = width.saturating_sub(string_width(text)) / 2;
        self.text(row, col + offset, text, fg, attrs);
    }

    /// Rounded box around `height` rows, drawn only when fully visible.
    fn frame(&mut self, row: u16, height: u16, color: Rgba) {
        if let Some(area) = self.area(row, height) {
            let color = self.color(color);
            self.buf.draw_border(area, BorderStyle::Rounded, color, None);
        }
    }

    /// Screen rect for `height` rows starting at `row`, if fully visible.
    fn area(&self, row: u16, height: u16) -> Option<Rect> {
        let y = self.row(row)?;
        let bottom = self.row(row + height - 1)?;
        Some(Rect::new(self.x, y, self.width, bottom - y + 1))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::content::document::builtin_sections;

    fn rect(y: u16, height: u16) -> Rect {
        Rect::new(0, y, 10, height)
    }

    fn setup() -> (Landing, RevealController) {
        let store = SectionStore::new(builtin_sections()).unwrap();
        let reveal = RevealController::new();
        let carousel = MetricCarousel::new(simulation_metrics(), Duration::from_secs(3), Instant::now());
        let mut landing = Landing::new(&store, reveal.clone(), 0.3, carousel);
        landing.layout(100, 30).unwrap();
        (landing, reveal)
    }

    fn screen(buf: &FrameBuffer) -> String {
        (0..buf.height()).map(|y| buf.row_text(y) + "\n").collect()
    }

    #[test]
    fn test_visible_ratio() {
        assert_eq!(visible_ratio(rect(0, 10), 0, 10), 1.0);
        assert_eq!(visible_ratio(rect(10, 10), 0, 10), 0.0);
        assert_eq!(visible_ratio(rect(10, 10), 5, 10), 0.5);
        assert_eq!(visible_ratio(rect(0, 0), 0, 10), 0.0);
        assert_eq!(visible_ratio(rect(0, 40), 10, 10), 0.25);
    }

    #[test]
    fn test_viewport_observe_delivers_on_scroll() {
        let viewport = ScrollViewport::new();
        viewport.set_layout(vec![("a".into(), rect(0, 10)), ("b".into(), rect(10, 10))], 10);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        viewport.observe("b", Box::new(move |r| seen_clone.borrow_mut().push(r)));
        assert_eq!(*seen.borrow(), vec![0.0]);

        assert!(viewport.scroll_by(5));
        assert_eq!(*seen.borrow(), vec![0.0, 0.5]);

        viewport.unobserve("b");
        viewport.scroll_by(5);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_viewport_scroll_clamped() {
        let viewport = ScrollViewport::new();
        viewport.set_layout(vec![("a".into(), rect(0, 25))], 10);
        assert!(!viewport.scroll_by(-1));
        viewport.scroll_by(100);
        assert_eq!(viewport.offset(), 15);

        // Shrinking content re-clamps
        viewport.set_layout(vec![("a".into(), rect(0, 12))], 10);
        assert_eq!(viewport.offset(), 2);
    }

    #[test]
    fn test_scroll_into_view() {
        let viewport = ScrollViewport::new();
        viewport.set_layout(vec![("a".into(), rect(0, 50))], 10);
        assert!(!viewport.scroll_into_view(5));
        assert!(viewport.scroll_into_view(20));
        assert_eq!(viewport.offset(), 11);
        assert!(viewport.scroll_into_view(3));
        assert_eq!(viewport.offset(), 3);
    }

    #[test]
    fn test_initial_layout_reveals_visible_regions() {
        let (_landing, reveal) = setup();
        assert!(reveal.is_revealed("hero"));
        assert!(reveal.is_revealed("key-metrics"));
        assert!(!reveal.is_revealed("downloads"));
    }

    #[test]
    fn test_scroll_reveals_and_latch_survives_scroll_back() {
        let (landing, reveal) = setup();
        while landing.scroll_pages(1) {}
        assert!(reveal.is_revealed("downloads"));

        while landing.scroll_pages(-1) {}
        assert_eq!(landing.viewport().offset(), 0);
        assert!(reveal.is_revealed("downloads"));
        assert_eq!(landing.viewport().visible_ratio("downloads"), Some(0.0));
    }

    #[test]
    fn test_focus_cycles_entries_and_scrolls_into_view() {
        let (mut landing, _) = setup();
        assert!(landing.focus_next());
        assert_eq!(landing.focus().focused(), Some("hero-explore"));
        assert_eq!(
            landing.activate(),
            Some(EntryAction::OpenDocument { section: None })
        );

        // Wraps backwards to the last download
        landing.focus_mut().blur();
        landing.focus_previous();
        let last = landing.focused_entry().unwrap();
        assert!(last.id.starts_with("download-"));
        assert!(landing.viewport().offset() > 0);
        assert!(landing.is_revealed("downloads"));
    }

    #[test]
    fn test_highlight_entries_open_at_section() {
        let (landing, _) = setup();
        let entry = landing
            .entries()
            .find(|e| e.id == "highlight-methodology")
            .unwrap();
        assert_eq!(
            entry.action,
            EntryAction::OpenDocument {
                section: Some("methodology".to_string())
            }
        );
        assert_eq!(entry.label, "4. Simulation Methodology");
    }

    #[test]
    fn test_entrance_progress() {
        let start = Instant::now();
        assert_eq!(entrance_progress(start, start), 0.0);
        assert_eq!(entrance_progress(start, start + ENTRANCE_DURATION), 1.0);
        assert_eq!(entrance_progress(start, start + Duration::from_secs(5)), 1.0);
        let mid = entrance_progress(start, start + ENTRANCE_DURATION / 2);
        assert!(mid > 0.5 && mid < 1.0);
    }

    #[test]
    fn test_entrance_follows_caller_clock() {
        let (landing, _) = setup();
        let start = Instant::now() + Duration::from_secs(10);

        // Initial reveals start their entrance at the first clocked call
        assert!(landing.is_animating(start));
        assert!(landing.is_animating(start + ENTRANCE_DURATION / 2));
        assert!(!landing.is_animating(start + ENTRANCE_DURATION));

        let later = start + Duration::from_secs(5);
        assert!(!landing.is_revealed("results"));
        landing.scroll_lines(20);
        assert!(landing.is_revealed("results"));
        assert!(landing.is_animating(later));
        assert!(!landing.is_animating(later + ENTRANCE_DURATION));
    }

    #[test]
    fn test_render_revealed_and_placeholder() {
        let (landing, _) = setup();
        let mut buf = FrameBuffer::new(100, 30);
        let start = Instant::now();
        landing.render(&mut buf, &Theme::default(), start, None);
        let later = start + Duration::from_secs(1);
        landing.render(&mut buf, &Theme::default(), later, None);
        let text = screen(&buf);

        assert!(text.contains("LIFE System"));
        assert!(text.contains("[ Explore Research ]"));
        assert!(text.contains("4.6B"));
        assert!(buf.row_text(29).contains("q quit"));
    }

    #[test]
    fn test_render_status_message() {
        let (landing, _) = setup();
        let mut buf = FrameBuffer::new(100, 30);
        landing.render(&mut buf, &Theme::default(), Instant::now(), Some("Downloading x.pdf"));
        assert!(buf.row_text(29).contains("Downloading x.pdf"));
    }

    #[test]
    fn test_drop_releases_reveal_subscription() {
        let (landing, reveal) = setup();
        assert!(reveal.is_attached("hero"));
        drop(landing);
        assert!(!reveal.is_attached("hero"));
        assert!(reveal.is_revealed("hero"));
    }
}
