//! Shell Module - presentation around the reading state
//!
//! - **Overlay** - table of contents, section body, progress footer
//! - **Landing** - scroll viewport, reveal-driven regions, entry points
//! - **Metrics** - rotating simulation metric highlight
//! - **Downloads** - artefact catalogue and the download seam
//! - **App** - composition and the event loop

mod app;
mod downloads;
mod landing;
mod metrics;
mod overlay;

pub use app::App;
pub use downloads::{
    catalogue, Artifact, ArtifactKind, DownloadRequest, DownloadSink, LogSink, ARCHIVE_FILENAME,
};
pub use landing::{
    entrance_progress, landing_regions, visible_ratio, EntryAction, EntryPoint, Landing,
    LandingRegion, RegionKind, ScrollViewport, ENTRANCE_DURATION,
};
pub use metrics::{simulation_metrics, Metric, MetricCarousel};
pub use overlay::{body_lines, dump_document, BodyLine, LineStyle, OverlayView};
