//! Renderer Module - frame buffer and terminal output
//!
//! The shell draws each frame into a [`FrameBuffer`]; the [`DiffRenderer`]
//! writes only the cells that changed since the previous frame.

mod buffer;
mod diff;

pub use buffer::FrameBuffer;
pub use diff::{to_color, DiffRenderer};
