//! Reveal Controller - one-shot entrance latches per page region
//!
//! Each attached region has a visibility threshold in `(0, 1]`. The first
//! measurement at or above the threshold flips the region's latch to
//! revealed and emits exactly one [`RevealEvent`]. Latches never reset, not
//! on scroll-back and not on detach.
//!
//! Measurements come from a [`VisibilitySource`] (anything that can report a
//! visible-area ratio per region) or are fed directly through
//! [`RevealController::record_visibility`].
//!
//! # Example
//!
//! ```ignore
//! let reveal = RevealController::new();
//! let cleanup = reveal.subscribe(|event| println!("revealed {}", event.region));
//! reveal.attach("hero", 0.3);
//! reveal.record_visibility("hero", 0.1); // nothing
//! reveal.record_visibility("hero", 0.5); // revealed
//! reveal.record_visibility("hero", 0.9); // already revealed, nothing
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, warn};
use spark_signals::{signal, Signal};

/// Default in-view threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Smallest accepted threshold. Zero would reveal regions that are not visible.
pub const MIN_THRESHOLD: f32 = 0.01;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealEvent {
    pub region: String,
}

/// Injected viewport-intersection capability.
///
/// `observe` registers a callback receiving the region's visible ratio each
/// time it is measured. `unobserve` stops delivery; unknown regions are ignored.
pub trait VisibilitySource {
    fn observe(&self, region: &str, callback: Box<dyn Fn(f32)>);
    fn unobserve(&self, region: &str);
}

struct Region {
    threshold: f32,
    attached: bool,
    revealed: Signal<bool>,
}

type RevealHandler = Rc<dyn Fn(&RevealEvent)>;

#[derive(Default)]
struct RevealInner {
    regions: HashMap<String, Region>,
    handlers: Vec<(usize, RevealHandler)>,
    next_id: usize,
}

/// Clamp a configured threshold into `[MIN_THRESHOLD, 1]`. NaN falls back to
/// the default.
pub fn normalize_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        warn!("reveal threshold NaN, using {}", DEFAULT_THRESHOLD);
        return DEFAULT_THRESHOLD;
    }
    let clamped = threshold.clamp(MIN_THRESHOLD, 1.0);
    if clamped != threshold {
        warn!("reveal threshold {} out of range, clamped to {}", threshold, clamped);
    }
    clamped
}

fn normalize_ratio(ratio: f32) -> f32 {
    if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Shared handle; clones see the same latches.
#[derive(Clone, Default)]
pub struct RevealController {
    inner: Rc<RefCell<RevealInner>>,
}

impl RevealController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing `region`. Returns false if it was already attached.
    ///
    /// Re-attaching a detached region keeps its latch.
    pub fn attach(&self, region: &str, threshold: f32) -> bool {
        let threshold = normalize_threshold(threshold);
        let mut inner = self.inner.borrow_mut();

        match inner.regions.get_mut(region) {
            Some(existing) if existing.attached => false,
            Some(existing) => {
                existing.attached = true;
                existing.threshold = threshold;
                debug!("reveal: reattach {} at {}", region, threshold);
                true
            }
            None => {
                inner.regions.insert(
                    region.to_string(),
                    Region {
                        threshold,
                        attached: true,
                        revealed: signal(false),
                    },
                );
                debug!("reveal: attach {} at {}", region, threshold);
                true
            }
        }
    }

    /// Stop observing `region`. The latch is kept. Returns false if it was
    /// not attached.
    pub fn detach(&self, region: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.regions.get_mut(region) {
            Some(existing) if existing.attached => {
                existing.attached = false;
                debug!("reveal: detach {}", region);
                true
            }
            _ => false,
        }
    }

    /// Feed one measurement. Returns true if this measurement revealed the
    /// region.
    ///
    /// Measurements for unattached regions are dropped.
    pub fn record_visibility(&self, region: &str, ratio: f32) -> bool {
        let ratio = normalize_ratio(ratio);

        // Effects on the latch may call back into the controller
        let latch = {
            let inner = self.inner.borrow();
            let Some(state) = inner.regions.get(region) else {
                return false;
            };
            if !state.attached || state.revealed.get() || ratio < state.threshold {
                return false;
            }
            state.revealed.clone()
        };
        latch.set(true);

        debug!("reveal: {} revealed at ratio {:.2}", region, ratio);
        self.notify(&RevealEvent {
            region: region.to_string(),
        });
        true
    }

    pub fn is_revealed(&self, region: &str) -> bool {
        self.inner
            .borrow()
            .regions
            .get(region)
            .is_some_and(|state| state.revealed.get())
    }

    pub fn is_attached(&self, region: &str) -> bool {
        self.inner
            .borrow()
            .regions
            .get(region)
            .is_some_and(|state| state.attached)
    }

    pub fn threshold(&self, region: &str) -> Option<f32> {
        self.inner.borrow().regions.get(region).map(|state| state.threshold)
    }

    /// The region's latch as a signal, for reactive consumers.
    pub fn revealed_signal(&self, region: &str) -> Option<Signal<bool>> {
        self.inner
            .borrow()
            .regions
            .get(region)
            .map(|state| state.revealed.clone())
    }

    // -------------------------------------------------------------------------
    // Visibility source wiring
    // -------------------------------------------------------------------------

    /// Attach `region` and route `source` measurements into it.
    pub fn attach_to(&self, source: &dyn VisibilitySource, region: &str, threshold: f32) -> bool {
        if !self.attach(region, threshold) {
            return false;
        }
        let controller = self.clone();
        let id = region.to_string();
        source.observe(
            region,
            Box::new(move |ratio| {
                controller.record_visibility(&id, ratio);
            }),
        );
        true
    }

    /// Detach `region` and stop `source` from measuring it.
    pub fn detach_from(&self, source: &dyn VisibilitySource, region: &str) -> bool {
        source.unobserve(region);
        self.detach(region)
    }

    // -------------------------------------------------------------------------
    // Subscription
    // -------------------------------------------------------------------------

    /// Register a reveal handler. Returns cleanup function.
    pub fn subscribe<F>(&self, handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&RevealEvent) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handlers.push((id, Rc::new(handler)));
            id
        };

        let inner = self.inner.clone();
        move || {
            inner.borrow_mut().handlers.retain(|(handler_id, _)| *handler_id != id);
        }
    }

    fn notify(&self, event: &RevealEvent) {
        let handlers: Vec<RevealHandler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() -> (RevealController, Rc<RefCell<Vec<String>>>) {
        let reveal = RevealController::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let _cleanup = reveal.subscribe(move |event| sink.borrow_mut().push(event.region.clone()));
        (reveal, events)
    }

    /// Fake source that replays ratios on demand.
    #[derive(Default)]
    struct FakeSource {
        callbacks: RefCell<HashMap<String, Box<dyn Fn(f32)>>>,
    }

    impl FakeSource {
        fn emit(&self, region: &str, ratio: f32) {
            if let Some(callback) = self.callbacks.borrow().get(region) {
                callback(ratio);
            }
        }
    }

    impl VisibilitySource for FakeSource {
        fn observe(&self, region: &str, callback: Box<dyn Fn(f32)>) {
            self.callbacks.borrow_mut().insert(region.to_string(), callback);
        }

        fn unobserve(&self, region: &str) {
            self.callbacks.borrow_mut().remove(region);
        }
    }

    #[test]
    fn test_one_shot_sequence() {
        let (reveal, events) = setup();
        reveal.attach("hero", 0.3);

        let fired: Vec<bool> = [0.1, 0.5, 0.1, 0.9]
            .iter()
            .map(|ratio| reveal.record_visibility("hero", *ratio))
            .collect();

        assert_eq!(fired, vec![false, true, false, false]);
        assert_eq!(*events.borrow(), vec!["hero".to_string()]);
        assert!(reveal.is_revealed("hero"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let (reveal, _events) = setup();
        reveal.attach("a", 0.5);
        assert!(reveal.record_visibility("a", 0.5));
    }

    #[test]
    fn test_double_attach_is_noop() {
        let (reveal, _events) = setup();
        assert!(reveal.attach("a", 0.3));
        assert!(!reveal.attach("a", 0.9));
        assert_eq!(reveal.threshold("a"), Some(0.3));
    }

    #[test]
    fn test_detach_unattached_is_noop() {
        let (reveal, _events) = setup();
        assert!(!reveal.detach("nobody"));
    }

    #[test]
    fn test_detach_keeps_latch() {
        let (reveal, events) = setup();
        reveal.attach("a", 0.3);
        reveal.record_visibility("a", 1.0);
        reveal.detach("a");
        assert!(reveal.is_revealed("a"));

        reveal.attach("a", 0.3);
        reveal.record_visibility("a", 1.0);
        assert!(reveal.is_revealed("a"));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_detached_measurements_dropped() {
        let (reveal, events) = setup();
        reveal.attach("a", 0.3);
        reveal.detach("a");
        assert!(!reveal.record_visibility("a", 1.0));
        assert!(!reveal.is_revealed("a"));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_unknown_region_ignored() {
        let (reveal, _events) = setup();
        assert!(!reveal.record_visibility("ghost", 1.0));
        assert!(!reveal.is_revealed("ghost"));
    }

    #[test]
    fn test_regions_independent() {
        let (reveal, events) = setup();
        reveal.attach("a", 0.3);
        reveal.attach("b", 0.8);

        reveal.record_visibility("a", 0.5);
        reveal.record_visibility("b", 0.5);

        assert!(reveal.is_revealed("a"));
        assert!(!reveal.is_revealed("b"));
        assert_eq!(*events.borrow(), vec!["a".to_string()]);
    }

    #[test]
    fn test_threshold_normalized() {
        assert_eq!(normalize_threshold(0.0), MIN_THRESHOLD);
        assert_eq!(normalize_threshold(-1.0), MIN_THRESHOLD);
        assert_eq!(normalize_threshold(1.5), 1.0);
        assert_eq!(normalize_threshold(f32::NAN), DEFAULT_THRESHOLD);
        assert_eq!(normalize_threshold(0.3), 0.3);
    }

    #[test]
    fn test_nan_ratio_never_reveals() {
        let (reveal, _events) = setup();
        reveal.attach("a", MIN_THRESHOLD);
        assert!(!reveal.record_visibility("a", f32::NAN));
        assert!(reveal.record_visibility("a", 7.0));
    }

    #[test]
    fn test_revealed_signal() {
        let (reveal, _events) = setup();
        reveal.attach("a", 0.3);
        let latch = reveal.revealed_signal("a").unwrap();
        assert!(!latch.get());
        reveal.record_visibility("a", 0.4);
        assert!(latch.get());
    }

    #[test]
    fn test_latch_effect_can_attach() {
        let (reveal, events) = setup();
        reveal.attach("hero", 0.3);
        let latch = reveal.revealed_signal("hero").unwrap();

        let chained = reveal.clone();
        let _stop = spark_signals::effect(move || {
            if latch.get() {
                chained.attach("next", 0.3);
            }
        });

        assert!(reveal.record_visibility("hero", 0.9));
        assert!(reveal.is_attached("next"));
        assert_eq!(*events.borrow(), vec!["hero".to_string()]);
    }

    #[test]
    fn test_unsubscribe() {
        let reveal = RevealController::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = count.clone();
        let cleanup = reveal.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        reveal.attach("a", 0.3);
        reveal.attach("b", 0.3);
        reveal.record_visibility("a", 1.0);
        cleanup();
        reveal.record_visibility("b", 1.0);

        assert_eq!(count.get(), 1);
        assert!(reveal.is_revealed("b"));
    }

    #[test]
    fn test_attach_to_source() {
        let (reveal, events) = setup();
        let source = FakeSource::default();

        assert!(reveal.attach_to(&source, "hero", 0.3));
        assert!(!reveal.attach_to(&source, "hero", 0.3));

        source.emit("hero", 0.1);
        assert!(!reveal.is_revealed("hero"));
        source.emit("hero", 0.6);
        assert!(reveal.is_revealed("hero"));

        reveal.detach_from(&source, "hero");
        assert!(source.callbacks.borrow().is_empty());
        assert!(!reveal.is_attached("hero"));
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_handler_can_query_controller() {
        let reveal = RevealController::new();
        let seen = Rc::new(Cell::new(false));
        let reveal_clone = reveal.clone();
        let seen_clone = seen.clone();
        let _cleanup = reveal.subscribe(move |event| {
            seen_clone.set(reveal_clone.is_revealed(&event.region));
        });

        reveal.attach("a", 0.3);
        reveal.record_visibility("a", 0.3);
        assert!(seen.get());
    }
}
