//! Metric carousel - one simulation metric highlighted at a time.
//!
//! The highlight advances cyclically, `(i + 1) % len`, once per interval.
//! Time is passed in so the carousel can be driven by the event loop's clock
//! and by tests alike.

use std::time::{Duration, Instant};

use spark_signals::{signal, Signal};

use crate::renderer::FrameBuffer;
use crate::theme::Theme;
use crate::types::{Attr, Rect};

/// Traditional vs LIFE System score for one dimension, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub name: &'static str,
    pub traditional: f32,
    pub life: f32,
    /// Relative improvement in percent
    pub improvement: u32,
}

pub fn simulation_metrics() -> Vec<Metric> {
    vec![
        Metric { name: "Life Satisfaction", traditional: 0.22, life: 0.65, improvement: 195 },
        Metric { name: "Economic Security", traditional: 0.18, life: 0.58, improvement: 222 },
        Metric { name: "Social Connection", traditional: 0.14, life: 0.78, improvement: 457 },
        Metric { name: "Crisis Response", traditional: 0.20, life: 0.41, improvement: 105 },
        Metric { name: "Environmental Impact", traditional: 0.15, life: 0.72, improvement: 380 },
        Metric { name: "Democratic Participation", traditional: 0.25, life: 0.89, improvement: 256 },
    ]
}

pub struct MetricCarousel {
    metrics: Vec<Metric>,
    index: Signal<usize>,
    interval: Duration,
    last_advance: Instant,
}

impl MetricCarousel {
    pub fn new(metrics: Vec<Metric>, interval: Duration, now: Instant) -> Self {
        Self {
            metrics,
            index: signal(0),
            interval,
            last_advance: now,
        }
    }

    pub fn index(&self) -> usize {
        self.index.get()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn current(&self) -> Option<&Metric> {
        self.metrics.get(self.index())
    }

    /// Step to the next metric, wrapping.
    pub fn advance(&mut self) {
        if self.metrics.is_empty() {
            return;
        }
        self.index.set((self.index() + 1) % self.metrics.len());
    }

    /// Advance if an interval has elapsed since the last step.
    ///
    /// A long stall advances once, not once per missed interval.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_advance) < self.interval {
            return false;
        }
        self.advance();
        self.last_advance = now;
        true
    }

    /// Time left until the next step.
    pub fn until_next(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_advance))
    }

    /// Draw the current metric: name, improvement and two bars.
    pub fn render(&self, buf: &mut FrameBuffer, area: Rect, theme: &Theme) {
        let Some(metric) = self.current() else {
            return;
        };
        if area.height < 4 || area.width < 20 {
            return;
        }

        let label_width = 20u16;
        let bar_width = area.width.saturating_sub(label_width + 6);

        buf.draw_text(area.x, area.y, metric.name, theme.text_bright(), None, Attr::BOLD, Some(&area));
        let badge = format!("+{}% improvement", metric.improvement);
        buf.draw_text_right(area.x, area.y, area.width, &badge, theme.success(), None, Attr::NONE);

        let rows = [
            ("Traditional System", metric.traditional, theme.text_muted()),
            ("LIFE System", metric.life, theme.success()),
        ];
        for (row, (label, value, color)) in rows.into_iter().enumerate() {
            let y = area.y + 2 + row as u16;
            buf.draw_text(area.x, y, label, theme.text(), None, Attr::NONE, Some(&area));
            buf.draw_progress(area.x + label_width, y, bar_width, value, color, theme.border());
            let pct = format!("{:>3.0}%", value * 100.0);
            buf.draw_text(area.x + label_width + bar_width + 1, y, &pct, theme.text(), None, Attr::NONE, Some(&area));
        }

        // Position dots
        let dots: String = (0..self.len())
            .map(|i| if i == self.index() { '●' } else { '○' })
            .collect();
        if area.height > 5 {
            buf.draw_text_centered(area.x, area.y + 5, area.width, &dots, theme.text_muted(), None, Attr::NONE);
        }
    }
}
