//! Layout Module
//!
//! Terminal geometry for the overlay and landing page.
//!
//! - Text measurement and word wrapping in terminal cells (`unicode-width`)
//! - Pane layout through [Taffy](https://github.com/DioxusLabs/taffy)
//!
//! # Example
//!
//! ```ignore
//! use whitepaper_tui::layout::{overlay_panes, wrap_text};
//!
//! let panes = overlay_panes(120, 40, 30)?;
//! let lines = wrap_text("Long paragraph text", panes.body.width);
//! ```

mod taffy_bridge;
mod text_measure;

pub use taffy_bridge::*;
pub use text_measure::*;
