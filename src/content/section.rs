//! Section - one addressable unit of the document.

use serde::Deserialize;

/// One section of the whitepaper.
///
/// Created once at startup from static configuration and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Stable unique identifier (used by deep links and downloads).
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Raw body: blocks separated by a blank line.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    /// Illustration tag, only consumed by the shell.
    #[serde(default)]
    pub visual: String,
}

impl Section {
    /// Create a section with empty body, key points and visual.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: String::new(),
            content: String::new(),
            key_points: Vec::new(),
            visual: String::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_key_points<I, S>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_points = points.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_visual(mut self, visual: impl Into<String>) -> Self {
        self.visual = visual.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let s = Section::new("intro", "Introduction")
            .with_subtitle("Why now")
            .with_key_points(["a", "b"])
            .with_visual("globe");
        assert_eq!(s.id, "intro");
        assert_eq!(s.subtitle, "Why now");
        assert_eq!(s.key_points, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(s.visual, "globe");
        assert!(s.content.is_empty());
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{"id": "x", "title": "X", "keyPoints": ["one"]}"#;
        let s: Section = serde_json::from_str(json).unwrap();
        assert_eq!(s.id, "x");
        assert_eq!(s.key_points, vec!["one".to_string()]);
        assert!(s.subtitle.is_empty());
        assert!(s.visual.is_empty());
    }
}
