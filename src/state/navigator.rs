//! Navigator - which section is active, and whether the overlay is open
//!
//! The only legal way to change reading position. Two states:
//! - `Closed` (overlay hidden, position remembered)
//! - `Open(current_index)`
//!
//! Every request is clamped into `[0, count - 1]`; nothing wraps and nothing
//! fails. `next`/`previous`/`jump_to` are ignored while closed.
//!
//! State lives in signals so derived views track it. Subscribers registered
//! with [`Navigator::subscribe`] are called synchronously after every actual
//! transition, in registration order. No-ops do not notify.
//!
//! # Example
//!
//! ```ignore
//! let nav = Navigator::new(store)?;
//! let cleanup = nav.subscribe(|event| println!("{event:?}"));
//! nav.open(None);
//! nav.next();
//! nav.jump_to(99); // clamps to the last section
//! cleanup();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use spark_signals::{signal, Signal};

use crate::content::{Section, SectionStore};
use crate::error::{Error, Result};

// =============================================================================
// TYPES
// =============================================================================

/// A state transition, delivered to subscribers after it is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Opened { index: usize },
    Closed { index: usize },
    Moved { from: usize, to: usize },
}

/// Navigation intents accepted from the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Open(Option<i64>),
    Close,
    Next,
    Previous,
    JumpTo(i64),
}

type NavHandler = Rc<dyn Fn(&NavEvent)>;

#[derive(Default)]
struct Subscribers {
    handlers: Vec<(usize, NavHandler)>,
    next_id: usize,
}

/// Clamp a possibly negative request into `[0, count - 1]`.
///
/// `count` must be non-zero.
pub fn clamp_index(requested: i64, count: usize) -> usize {
    let last = count.saturating_sub(1) as i64;
    requested.clamp(0, last) as usize
}

// =============================================================================
// NAVIGATOR
// =============================================================================

/// Owns `current_index` and `is_open` for one document instance.
pub struct Navigator {
    store: Rc<SectionStore>,
    current: Signal<usize>,
    open: Signal<bool>,
    subscribers: Rc<RefCell<Subscribers>>,
}

impl Navigator {
    /// Closed navigator positioned at the first section.
    pub fn new(store: Rc<SectionStore>) -> Result<Self> {
        if store.is_empty() {
            return Err(Error::EmptyDocument);
        }
        Ok(Self {
            store,
            current: signal(0),
            open: signal(false),
            subscribers: Rc::new(RefCell::new(Subscribers::default())),
        })
    }

    /// Closed navigator positioned at the section with `id` (deep link).
    pub fn with_start(store: Rc<SectionStore>, id: &str) -> Result<Self> {
        let index = store
            .index_of(id)
            .ok_or_else(|| Error::UnknownSection(id.to_string()))?;
        let nav = Self::new(store)?;
        nav.current.set(index);
        Ok(nav)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    pub fn current_index(&self) -> usize {
        self.current.get()
    }

    pub fn count(&self) -> usize {
        self.store.count()
    }

    pub fn store(&self) -> &Rc<SectionStore> {
        &self.store
    }

    /// The section at `current_index`.
    pub fn current_section(&self) -> Result<&Section> {
        self.store.at(self.current_index())
    }

    pub fn is_first(&self) -> bool {
        self.current_index() == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index() + 1 == self.count()
    }

    /// Signal for reactive consumers of the position.
    pub fn index_signal(&self) -> Signal<usize> {
        self.current.clone()
    }

    /// Signal for reactive consumers of the open flag.
    pub fn open_signal(&self) -> Signal<bool> {
        self.open.clone()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// `Closed -> Open(clamp(start ?? current))`. No-op when already open.
    pub fn open(&self, start: Option<i64>) -> bool {
        if self.is_open() {
            debug!("nav: open ignored, already open at {}", self.current_index());
            return false;
        }

        let index = match start {
            Some(requested) => clamp_index(requested, self.count()),
            None => self.current_index(),
        };

        self.current.set(index);
        self.open.set(true);
        debug!("nav: open at {}/{}", index + 1, self.count());
        self.notify(NavEvent::Opened { index });
        true
    }

    /// Open at the section with `id`, or move there if already open.
    pub fn open_section(&self, id: &str) -> Result<bool> {
        let index = self
            .store
            .index_of(id)
            .ok_or_else(|| Error::UnknownSection(id.to_string()))?;
        if self.is_open() {
            Ok(self.jump_to(index as i64))
        } else {
            Ok(self.open(Some(index as i64)))
        }
    }

    /// `Open(_) -> Closed`. Position is kept for the next open.
    pub fn close(&self) -> bool {
        if !self.is_open() {
            return false;
        }

        let index = self.current_index();
        self.open.set(false);
        debug!("nav: close at {}/{}", index + 1, self.count());
        self.notify(NavEvent::Closed { index });
        true
    }

    pub fn next(&self) -> bool {
        self.move_to(self.current_index() as i64 + 1)
    }

    pub fn previous(&self) -> bool {
        self.move_to(self.current_index() as i64 - 1)
    }

    /// Move to `index`, clamped. Out-of-range requests never fail.
    pub fn jump_to(&self, index: i64) -> bool {
        self.move_to(index)
    }

    /// Apply one intent. Returns whether state changed.
    pub fn apply(&self, intent: NavIntent) -> bool {
        match intent {
            NavIntent::Open(start) => self.open(start),
            NavIntent::Close => self.close(),
            NavIntent::Next => self.next(),
            NavIntent::Previous => self.previous(),
            NavIntent::JumpTo(index) => self.jump_to(index),
        }
    }

    fn move_to(&self, requested: i64) -> bool {
        if !self.is_open() {
            debug!("nav: move to {} ignored while closed", requested);
            return false;
        }

        let from = self.current_index();
        let to = clamp_index(requested, self.count());
        if from == to {
            return false;
        }

        self.current.set(to);
        debug!("nav: move {} -> {} (requested {})", from, to, requested);
        self.notify(NavEvent::Moved { from, to });
        true
    }

    // -------------------------------------------------------------------------
    // Subscription
    // -------------------------------------------------------------------------

    /// Register a transition handler. Returns cleanup function.
    pub fn subscribe<F>(&self, handler: F) -> impl FnOnce() + use<F>
    where
        F: Fn(&NavEvent) + 'static,
    {
        let id = {
            let mut subs = self.subscribers.borrow_mut();
            let id = subs.next_id;
            subs.next_id += 1;
            subs.handlers.push((id, Rc::new(handler)));
            id
        };

        let subscribers = self.subscribers.clone();
        move || {
            subscribers
                .borrow_mut()
                .handlers
                .retain(|(handler_id, _)| *handler_id != id);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().handlers.len()
    }

    fn notify(&self, event: NavEvent) {
        // Snapshot so handlers may navigate or unsubscribe re-entrantly
        let handlers: Vec<NavHandler> = self
            .subscribers
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();

        for handler in handlers {
            handler(&event);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
