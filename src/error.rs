//! Error types for whitepaper-tui.
//!
//! Document loading, configuration, pane layout and direct indexed lookups
//! can fail. Navigation, progress, reveal latches and content parsing are total.

/// Result type alias for whitepaper-tui operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or addressing the document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Direct lookup outside `[0, count - 1]`
    #[error("section index {index} out of range (document has {count} sections)")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of sections in the store
        count: usize,
    },

    /// A navigator needs at least one section to point at
    #[error("document has no sections")]
    EmptyDocument,

    /// Two sections share an id
    #[error("duplicate section id: {0}")]
    DuplicateSection(String),

    /// A deep link or configured start section names no section
    #[error("unknown section id: {0}")]
    UnknownSection(String),

    /// Configuration value that cannot be clamped into range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Pane layout could not be computed
    #[error("layout error: {0}")]
    Layout(#[from] taffy::TaffyError),

    /// JSON decoding error (config or section files)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
