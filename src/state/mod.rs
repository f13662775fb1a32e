//! State Module - reading state and interaction systems
//!
//! - **Navigator** - current section, open/closed, bounded transitions
//! - **Progress** - percentage and dots derived from the navigator
//! - **Reveal** - one-shot entrance latches per landing region
//! - **Focus** - entry-point cycling, overlay trap, history
//! - **Keyboard** - event types, key to intent mapping
//! - **Input** - crossterm conversion and polling
//! - **Scroll** - clamped vertical offsets

pub mod input;
mod focus;
mod keyboard;
mod navigator;
mod progress;
mod reveal;
mod scroll;

pub use focus::*;
pub use keyboard::*;
pub use navigator::*;
pub use progress::*;
pub use reveal::*;
pub use scroll::*;
