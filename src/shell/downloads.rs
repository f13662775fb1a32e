//! Downloads - the artefact catalogue and the delivery seam.
//!
//! Delivery is someone else's job. The shell only names what was asked for
//! and hands it to a [`DownloadSink`].

use std::cell::RefCell;
use std::fmt;

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Pdf,
    Png,
    Markdown,
    Zip,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::Pdf => "PDF",
            ArtifactKind::Png => "PNG",
            ArtifactKind::Markdown => "Markdown",
            ArtifactKind::Zip => "ZIP",
        };
        f.write_str(label)
    }
}

/// One downloadable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub title: &'static str,
    pub description: &'static str,
    pub filename: &'static str,
    pub size: &'static str,
    pub kind: ArtifactKind,
}

impl Artifact {
    /// `"PDF · 15.2 MB"`
    pub fn summary(&self) -> String {
        format!("{} · {}", self.kind, self.size)
    }
}

/// Filename of the bundle with everything in it.
pub const ARCHIVE_FILENAME: &str = "life_system_complete_archive.zip";

/// Research materials offered on the landing page.
pub fn catalogue() -> Vec<Artifact> {
    vec![
        Artifact {
            title: "Comprehensive Scientific Paper",
            description: "Peer-review ready analysis with complete methodology and results",
            filename: "life_system_comprehensive_scientific_paper.pdf",
            size: "15.2 MB",
            kind: ArtifactKind::Pdf,
        },
        Artifact {
            title: "Final Research Report",
            description: "Executive summary with key findings and recommendations",
            filename: "life_system_final_report.pdf",
            size: "8.7 MB",
            kind: ArtifactKind::Pdf,
        },
        Artifact {
            title: "Simulation Analysis Charts",
            description: "Visualization of 17-year simulation results",
            filename: "comprehensive_17_year_analysis.png",
            size: "2.1 MB",
            kind: ArtifactKind::Png,
        },
        Artifact {
            title: "Publication Charts",
            description: "Publication-ready charts and visualizations",
            filename: "life_system_publication_charts.png",
            size: "1.8 MB",
            kind: ArtifactKind::Png,
        },
        Artifact {
            title: "Simulation Summary",
            description: "Detailed summary of simulation methodology and results",
            filename: "life_system_comprehensive_simulation_summary.md",
            size: "156 KB",
            kind: ArtifactKind::Markdown,
        },
        Artifact {
            title: "Technical Implementation Code",
            description: "Complete source code for all simulations and algorithms",
            filename: "life_system_simulation_code.zip",
            size: "12.4 MB",
            kind: ArtifactKind::Zip,
        },
        Artifact {
            title: "Complete Research Archive",
            description: "All papers, visualizations, code and documentation",
            filename: ARCHIVE_FILENAME,
            size: "45.8 MB",
            kind: ArtifactKind::Zip,
        },
    ]
}

/// What the reader asked to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadRequest {
    /// A catalogue file
    File { filename: String },
    /// The section currently open in the overlay
    Section { id: String, title: String },
}

impl fmt::Display for DownloadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadRequest::File { filename } => write!(f, "{}", filename),
            DownloadRequest::Section { id, title } => write!(f, "section {} ({})", id, title),
        }
    }
}

/// Receives download requests.
pub trait DownloadSink {
    fn request(&self, request: &DownloadRequest);
}

/// Logs each request and keeps the last one for the status line.
#[derive(Debug, Default)]
pub struct LogSink {
    last: RefCell<Option<DownloadRequest>>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<DownloadRequest> {
        self.last.borrow().clone()
    }
}

impl DownloadSink for LogSink {
    fn request(&self, request: &DownloadRequest) {
        info!("Downloading {}", request);
        *self.last.borrow_mut() = Some(request.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_filenames_unique() {
        let items = catalogue();
        assert_eq!(items.len(), 7);
        let mut names: Vec<_> = items.iter().map(|a| a.filename).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 7);
        assert!(items.iter().any(|a| a.filename == ARCHIVE_FILENAME));
    }

    #[test]
    fn test_summary() {
        assert_eq!(catalogue()[0].summary(), "PDF · 15.2 MB");
    }

    #[test]
    fn test_log_sink_records_last() {
        let sink = LogSink::new();
        assert!(sink.last().is_none());

        sink.request(&DownloadRequest::File {
            filename: "a.pdf".to_string(),
        });
        sink.request(&DownloadRequest::Section {
            id: "results".to_string(),
            title: "Results".to_string(),
        });

        assert_eq!(
            sink.last().unwrap().to_string(),
            "section results (Results)"
        );
    }
}
