//! Configuration
//!
//! Loaded from an optional JSON file, then overridden by command-line flags.
//! Every field has a default, so `{}` is a valid file.
//!
//! ```json
//! {
//!   "theme": "nord",
//!   "reveal_threshold": 0.3,
//!   "bullet_marker": "•",
//!   "heading_marker": "**",
//!   "carousel_interval_ms": 3000,
//!   "sidebar_width": 30,
//!   "sections": "paper.json",
//!   "start_section": "methodology"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Deserialize;

use crate::content::{ParserConfig, DEFAULT_BULLET, DEFAULT_HEADING_MARKER};
use crate::error::{Error, Result};
use crate::state::{normalize_threshold, DEFAULT_THRESHOLD};
use crate::theme::{get_preset, Theme, PRESET_NAMES};

pub const DEFAULT_CAROUSEL_INTERVAL_MS: u64 = 3000;
pub const MIN_CAROUSEL_INTERVAL_MS: u64 = 250;
pub const DEFAULT_SIDEBAR_WIDTH: u16 = 30;
pub const MIN_SIDEBAR_WIDTH: u16 = 12;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: String,
    pub reveal_threshold: f32,
    pub bullet_marker: char,
    pub heading_marker: String,
    pub carousel_interval_ms: u64,
    pub sidebar_width: u16,
    /// JSON array of section records; built-in document when unset
    pub sections: Option<PathBuf>,
    /// Section id to open on launch
    pub start_section: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "terminal".to_string(),
            reveal_threshold: DEFAULT_THRESHOLD,
            bullet_marker: DEFAULT_BULLET,
            heading_marker: DEFAULT_HEADING_MARKER.to_string(),
            carousel_interval_ms: DEFAULT_CAROUSEL_INTERVAL_MS,
            sidebar_width: DEFAULT_SIDEBAR_WIDTH,
            sections: None,
            start_section: None,
        }
    }
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Decode and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Clamp what can be clamped, reject the rest.
    pub fn validate(&mut self) -> Result<()> {
        if self.heading_marker.chars().count() != 2 {
            return Err(Error::InvalidConfig(format!(
                "heading_marker must be exactly two characters, got {:?}",
                self.heading_marker
            )));
        }
        if self.heading_marker.chars().any(|c| c == self.bullet_marker) {
            return Err(Error::InvalidConfig(
                "heading_marker and bullet_marker must differ".to_string(),
            ));
        }
        if self.bullet_marker.is_whitespace() {
            return Err(Error::InvalidConfig(
                "bullet_marker cannot be whitespace".to_string(),
            ));
        }
        if get_preset(&self.theme).is_none() {
            return Err(Error::InvalidConfig(format!(
                "unknown theme {:?} (available: {})",
                self.theme,
                PRESET_NAMES.join(", ")
            )));
        }

        self.reveal_threshold = normalize_threshold(self.reveal_threshold);

        if self.carousel_interval_ms < MIN_CAROUSEL_INTERVAL_MS {
            warn!(
                "carousel_interval_ms {} too small, using {}",
                self.carousel_interval_ms, MIN_CAROUSEL_INTERVAL_MS
            );
            self.carousel_interval_ms = MIN_CAROUSEL_INTERVAL_MS;
        }
        if self.sidebar_width < MIN_SIDEBAR_WIDTH {
            warn!(
                "sidebar_width {} too small, using {}",
                self.sidebar_width, MIN_SIDEBAR_WIDTH
            );
            self.sidebar_width = MIN_SIDEBAR_WIDTH;
        }
        Ok(())
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            bullet: self.bullet_marker,
            heading_marker: self.heading_marker.clone(),
        }
    }

    /// The configured theme, terminal if the name is unknown.
    pub fn theme(&self) -> Theme {
        get_preset(&self.theme).unwrap_or_default()
    }
}
