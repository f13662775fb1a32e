//! # whitepaper-tui
//!
//! Terminal reader for a long-form, multi-section whitepaper.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive state, taffy for pane layout and crossterm for the terminal.
//!
//! ## Architecture
//!
//! ```text
//! sections (JSON / built-in) → SectionStore → Navigator ─┬→ Progress
//!                                                        └→ overlay view
//! ScrollViewport (visibility) → RevealController → landing regions
//! key events → Intent → Navigator / scroll / focus / DownloadSink
//! ```
//!
//! The reading state (navigator, progress, reveal latches, parser) has no
//! terminal dependency and is usable on its own.
//!
//! ## Modules
//!
//! - [`content`] - Sections, the store, the body text parser
//! - [`state`] - Navigator, progress, reveal, focus, keyboard, scroll
//! - [`layout`] - Text measurement and taffy pane layout
//! - [`renderer`] - Frame buffer and diff renderer
//! - [`theme`] - Colour presets
//! - [`shell`] - Overlay, landing sequence and the app loop
//! - [`config`] - JSON configuration

pub mod config;
pub mod content;
pub mod error;
pub mod layout;
pub mod renderer;
pub mod shell;
pub mod state;
pub mod theme;
pub mod types;

pub use config::Config;
pub use content::{
    parse_content, parse_content_with, ParserConfig, RenderNode, Section, SectionStore, Segment,
};
pub use error::{Error, Result};
pub use shell::{App, DownloadRequest, DownloadSink, LogSink};
pub use state::{
    NavEvent, NavIntent, Navigator, Progress, RevealController, RevealEvent, VisibilitySource,
};
