//! App - owns every component and routes input to them
//!
//! One [`Navigator`] drives both surfaces. While it is closed the landing
//! sequence has the keyboard; while it is open the overlay does, and the
//! landing focus ring is trapped until it closes again.
//!
//! ```ignore
//! let config = Config::default();
//! let store = load_store(None)?;
//! App::new(config, store, LogSink::new(), 80, 24, Instant::now())?.run()?;
//! ```

use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};
use log::{debug, info};

use crate::config::Config;
use crate::content::SectionStore;
use crate::error::Result;
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::state::input::{disable_mouse, enable_mouse, poll_event, InputEvent};
use crate::state::{intent_for, Intent, Mode, NavEvent, NavIntent, Navigator, Progress, RevealController};
use crate::theme::Theme;

use super::downloads::{DownloadRequest, DownloadSink};
use super::landing::{EntryAction, Landing};
use super::metrics::{simulation_metrics, MetricCarousel};
use super::overlay::OverlayView;

/// Focus trap name while the overlay is open.
const OVERLAY_TRAP: &str = "overlay";

/// Poll interval while an entrance animation runs (~30fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Longest wait for input when nothing is animating.
const IDLE_INTERVAL: Duration = Duration::from_millis(500);

pub struct App<S: DownloadSink> {
    theme: Theme,
    navigator: Navigator,
    progress: Progress,
    landing: Landing,
    overlay: OverlayView,
    sink: S,
    status: Option<String>,
    running: bool,
    width: u16,
    height: u16,
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl<S: DownloadSink> App<S> {
    /// Wire everything up for a `width` x `height` screen.
    ///
    /// Opens the overlay at `config.start_section` when set.
    pub fn new(
        config: Config,
        store: SectionStore,
        sink: S,
        width: u16,
        height: u16,
        now: Instant,
    ) -> Result<Self> {
        let store = Rc::new(store);
        let navigator = Navigator::new(store.clone())?;
        let progress = Progress::new(&navigator);

        let carousel = MetricCarousel::new(
            simulation_metrics(),
            Duration::from_millis(config.carousel_interval_ms),
            now,
        );
        let mut landing = Landing::new(
            &store,
            RevealController::new(),
            config.reveal_threshold,
            carousel,
        );
        landing.layout(width, height)?;

        let overlay = OverlayView::new(config.parser_config(), config.sidebar_width);

        // Body scroll starts at the top of every section shown
        let offset = overlay.scroll_offset_signal();
        let cleanup = navigator.subscribe(move |event| match event {
            NavEvent::Opened { .. } | NavEvent::Moved { .. } => {
                offset.set(0);
            }
            NavEvent::Closed { .. } => {}
        });

        let mut app = Self {
            theme: config.theme(),
            navigator,
            progress,
            landing,
            overlay,
            sink,
            status: None,
            running: true,
            width,
            height,
            unsubscribe: Some(Box::new(cleanup)),
        };

        if let Some(id) = config.start_section.as_deref() {
            info!("Opening at section {}", id);
            app.open_document(Some(id))?;
        }
        Ok(app)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn mode(&self) -> Mode {
        if self.navigator.is_open() {
            Mode::Overlay
        } else {
            Mode::Landing
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn landing(&self) -> &Landing {
        &self.landing
    }

    pub fn overlay(&self) -> &OverlayView {
        &self.overlay
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    // -------------------------------------------------------------------------
    // Input routing
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Key(key) => {
                if let Some(intent) = intent_for(&key, self.mode()) {
                    self.status = None;
                    self.handle_intent(intent)?;
                }
            }
            InputEvent::Wheel(lines) => self.handle_intent(Intent::ScrollLines(lines))?,
            InputEvent::Resize(width, height) => self.resize(width, height)?,
            InputEvent::None => {}
        }
        Ok(())
    }

    pub fn handle_intent(&mut self, intent: Intent) -> Result<()> {
        debug!("app: {:?} in {:?}", intent, self.mode());
        match intent {
            Intent::Navigate(nav) => {
                self.navigate(nav);
            }
            Intent::ScrollLines(lines) => {
                if self.navigator.is_open() {
                    self.overlay.scroll_lines(lines);
                } else {
                    self.landing.scroll_lines(lines);
                }
            }
            Intent::ScrollPages(pages) => {
                if self.navigator.is_open() {
                    self.overlay.scroll_pages(pages);
                } else {
                    self.landing.scroll_pages(pages);
                }
            }
            Intent::FocusNext => {
                self.landing.focus_next();
            }
            Intent::FocusPrevious => {
                self.landing.focus_previous();
            }
            Intent::Activate => {
                if let Some(action) = self.landing.activate() {
                    self.run_action(action)?;
                }
            }
            Intent::DownloadCurrent => {
                let section = self.navigator.current_section()?;
                let request = DownloadRequest::Section {
                    id: section.id.clone(),
                    title: section.title.clone(),
                };
                self.download(request);
            }
            Intent::Quit => {
                info!("Quit requested");
                self.running = false;
            }
        }
        Ok(())
    }

    fn run_action(&mut self, action: EntryAction) -> Result<()> {
        match action {
            EntryAction::OpenDocument { section } => {
                self.open_document(section.as_deref())?;
            }
            EntryAction::Download { filename } => {
                self.download(DownloadRequest::File { filename });
            }
        }
        Ok(())
    }

    /// Open the overlay at `section`, or where the reader left off.
    fn open_document(&mut self, section: Option<&str>) -> Result<bool> {
        let was_open = self.navigator.is_open();
        let changed = match section {
            Some(id) => self.navigator.open_section(id)?,
            None => self.navigator.open(None),
        };
        self.sync_focus_trap(was_open);
        Ok(changed)
    }

    fn navigate(&mut self, intent: NavIntent) -> bool {
        let was_open = self.navigator.is_open();
        let changed = self.navigator.apply(intent);
        self.sync_focus_trap(was_open);
        changed
    }

    /// Trap landing focus on open, restore the opener on close.
    fn sync_focus_trap(&mut self, was_open: bool) {
        let focus = self.landing.focus_mut();
        match (was_open, self.navigator.is_open()) {
            (false, true) => focus.push_trap(OVERLAY_TRAP),
            (true, false) => {
                focus.pop_trap();
            }
            _ => {}
        }
    }

    fn download(&mut self, request: DownloadRequest) {
        self.sink.request(&request);
        self.status = Some(format!("Downloading {}", request));
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        debug!("app: resize {}x{}", width, height);
        self.width = width;
        self.height = height;
        self.landing.layout(width, height)
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    /// Advance timers. Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.landing.tick(now)
    }

    /// How long the loop may block waiting for input.
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        if !self.navigator.is_open() && self.landing.is_animating(now) {
            return FRAME_INTERVAL;
        }
        self.landing.until_next_tick(now).clamp(Duration::from_millis(1), IDLE_INTERVAL)
    }

    /// Draw the active surface into `buf`.
    pub fn render(&mut self, buf: &mut FrameBuffer, now: Instant) -> Result<()> {
        if self.navigator.is_open() {
            self.overlay
                .render(buf, &self.navigator, &self.progress, &self.theme)
        } else {
            self.landing
                .render(buf, &self.theme, now, self.status.as_deref());
            Ok(())
        }
    }

    /// Take over the terminal and run until quit.
    pub fn run(&mut self) -> Result<()> {
        let _terminal = TerminalGuard::enter()?;
        let mut renderer = DiffRenderer::stdout();
        renderer.enter_fullscreen()?;

        let (width, height) = size()?;
        self.resize(width, height)?;
        let mut buf = FrameBuffer::new(width, height);

        while self.running {
            let now = Instant::now();
            self.tick(now);

            if (buf.width(), buf.height()) != (self.width, self.height) {
                buf.resize(self.width, self.height);
                renderer.invalidate();
            }
            buf.clear(self.theme.bg());
            self.render(&mut buf, now)?;
            renderer.render(&buf)?;

            if let Some(event) = poll_event(self.poll_timeout(now))? {
                self.handle_event(event)?;
            }
        }

        renderer.exit_fullscreen()?;
        Ok(())
    }
}

impl<S: DownloadSink> Drop for App<S> {
    fn drop(&mut self) {
        if let Some(cleanup) = self.unsubscribe.take() {
            cleanup();
        }
    }
}

/// Raw mode and mouse capture, released on drop even if the loop errors.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = enable_mouse() {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_mouse();
        let _ = disable_raw_mode();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::document::builtin_sections;
    use crate::shell::downloads::LogSink;
    use crate::state::KeyboardEvent;

    fn setup() -> App<LogSink> {
        setup_with(Config::default())
    }

    fn setup_with(config: Config) -> App<LogSink> {
        let store = SectionStore::new(builtin_sections()).unwrap();
        App::new(config, store, LogSink::new(), 100, 30, Instant::now()).unwrap()
    }

    fn press(app: &mut App<LogSink>, key: &str) {
        app.handle_event(InputEvent::Key(KeyboardEvent::new(key))).unwrap();
    }

    #[test]
    fn test_starts_on_landing() {
        let app = setup();
        assert_eq!(app.mode(), Mode::Landing);
        assert!(app.is_running());
        assert!(app.landing().is_revealed("hero"));
    }

    #[test]
    fn test_w_opens_overlay_and_escape_closes() {
        let mut app = setup();
        press(&mut app, "w");
        assert_eq!(app.mode(), Mode::Overlay);

        press(&mut app, "ArrowRight");
        press(&mut app, "ArrowRight");
        assert_eq!(app.navigator().current_index(), 2);
        assert_eq!(app.progress().label(), "Section 3 of 7");

        press(&mut app, "Escape");
        assert_eq!(app.mode(), Mode::Landing);

        // Reopening resumes where the reader left off
        press(&mut app, "w");
        assert_eq!(app.navigator().current_index(), 2);
    }

    #[test]
    fn test_number_keys_jump_and_clamp() {
        let mut app = setup();
        press(&mut app, "w");
        press(&mut app, "5");
        assert_eq!(app.navigator().current_index(), 4);
        press(&mut app, "9");
        assert_eq!(app.navigator().current_index(), 6);
        press(&mut app, "Home");
        assert_eq!(app.navigator().current_index(), 0);
    }

    #[test]
    fn test_focus_restored_after_overlay_closes() {
        let mut app = setup();
        press(&mut app, "Tab");
        assert_eq!(app.landing().focus().focused(), Some("hero-explore"));

        press(&mut app, "Enter");
        assert_eq!(app.mode(), Mode::Overlay);
        assert!(app.landing().focus().is_trapped());

        press(&mut app, "q");
        assert_eq!(app.mode(), Mode::Landing);
        assert!(!app.landing().focus().is_trapped());
        assert_eq!(app.landing().focus().focused(), Some("hero-explore"));
    }

    #[test]
    fn test_highlight_entry_opens_at_section() {
        let mut app = setup();
        app.landing.focus_mut().focus("highlight-methodology");
        press(&mut app, "Enter");
        assert!(app.navigator().is_open());
        assert_eq!(app.navigator().current_index(), 3);
    }

    #[test]
    fn test_download_entry_calls_sink() {
        let mut app = setup();
        press(&mut app, "Tab");
        press(&mut app, "Tab");
        press(&mut app, "Enter");

        let last = app.sink().last().unwrap();
        assert!(matches!(last, DownloadRequest::File { ref filename } if filename.ends_with(".zip")));
        assert!(app.status().unwrap().starts_with("Downloading"));
        assert_eq!(app.mode(), Mode::Landing);
    }

    #[test]
    fn test_download_current_section() {
        let mut app = setup();
        press(&mut app, "w");
        press(&mut app, "End");
        press(&mut app, "d");
        assert_eq!(
            app.sink().last(),
            Some(DownloadRequest::Section {
                id: "conclusion".to_string(),
                title: "Conclusion".to_string(),
            })
        );
    }

    #[test]
    fn test_section_change_resets_body_scroll() {
        let mut app = setup();
        let mut buf = FrameBuffer::new(100, 16);
        app.resize(100, 16).unwrap();
        press(&mut app, "w");
        app.render(&mut buf, Instant::now()).unwrap();

        press(&mut app, "PageDown");
        assert!(app.overlay().scroll().offset() > 0);

        press(&mut app, "n");
        assert_eq!(app.overlay().scroll().offset(), 0);
    }

    #[test]
    fn test_start_section_deep_link() {
        let config = Config {
            start_section: Some("results".to_string()),
            ..Config::default()
        };
        let app = setup_with(config);
        assert_eq!(app.mode(), Mode::Overlay);
        assert_eq!(app.navigator().current_index(), 4);
        assert!(app.landing().focus().is_trapped());
    }

    #[test]
    fn test_unknown_start_section_fails() {
        let config = Config {
            start_section: Some("nope".to_string()),
            ..Config::default()
        };
        let store = SectionStore::new(builtin_sections()).unwrap();
        assert!(App::new(config, store, LogSink::new(), 80, 24, Instant::now()).is_err());
    }

    #[test]
    fn test_wheel_scrolls_active_surface() {
        let mut app = setup();
        app.handle_event(InputEvent::Wheel(3)).unwrap();
        assert_eq!(app.landing().viewport().offset(), 3);
    }

    #[test]
    fn test_quit() {
        let mut app = setup();
        press(&mut app, "q");
        assert!(!app.is_running());
    }

    #[test]
    fn test_ctrl_c_quits_from_overlay() {
        let mut app = setup();
        press(&mut app, "w");
        let event = KeyboardEvent::with_modifiers("c", crate::state::Modifiers::ctrl());
        app.handle_event(InputEvent::Key(event)).unwrap();
        assert!(!app.is_running());
    }

    #[test]
    fn test_render_switches_surface() {
        let mut app = setup();
        let mut buf = FrameBuffer::new(100, 30);
        let later = Instant::now() + Duration::from_secs(1);

        app.render(&mut buf, later).unwrap();
        let landing: String = (0..30).map(|y| buf.row_text(y)).collect();
        assert!(landing.contains("LIFE System"));

        press(&mut app, "w");
        app.render(&mut buf, later).unwrap();
        let overlay: String = (0..30).map(|y| buf.row_text(y)).collect();
        assert!(overlay.contains("Section 1 of 7"));
    }

    #[test]
    fn test_scroll_reset_subscription() {
        let app = setup();
        assert_eq!(app.navigator().subscriber_count(), 1);
    }
}
