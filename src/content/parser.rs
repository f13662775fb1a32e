//! Content Parser - raw section text to render nodes
//!
//! Section bodies are plain text with two conventions:
//! - blocks are separated by a blank line (`"\n\n"`)
//! - a block wrapped in the heading marker (`**Title**`) is a heading
//! - inside any other block, the bullet marker (`•`) starts a bullet item
//!
//! The parser is total: every input yields a node sequence, malformed
//! markers degrade to paragraphs.
//!
//! # Example
//!
//! ```ignore
//! use whitepaper_tui::content::{parse_content, RenderNode};
//!
//! let nodes = parse_content("**Title**\n\nBody text");
//! assert_eq!(nodes[0], RenderNode::Heading("Title".into()));
//! ```

/// Block delimiter: two consecutive line breaks.
pub const BLOCK_DELIMITER: &str = "\n\n";

/// Default bullet marker.
pub const DEFAULT_BULLET: char = '•';

/// Default heading marker (two characters, both ends of the block).
pub const DEFAULT_HEADING_MARKER: &str = "**";

// =============================================================================
// TYPES
// =============================================================================

/// Marker characters recognized by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub bullet: char,
    pub heading_marker: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            bullet: DEFAULT_BULLET,
            heading_marker: DEFAULT_HEADING_MARKER.to_string(),
        }
    }
}

/// One line-level fragment of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// Bullet items start on a new line, prefixed with the marker.
    pub bullet: bool,
}

impl Segment {
    pub fn lead(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bullet: false,
        }
    }

    pub fn item(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bullet: true,
        }
    }

    /// Display form: lead text as-is, bullet items as `"{marker} {text}"`.
    pub fn display(&self, marker: char) -> String {
        if self.bullet {
            format!("{} {}", marker, self.text)
        } else {
            self.text.clone()
        }
    }
}

/// A parsed content unit, independent of presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Heading(String),
    /// First segment is the lead; the rest are bullet items.
    Paragraph(Vec<Segment>),
}

impl RenderNode {
    /// Build a paragraph from a lead and bullet items.
    pub fn paragraph<S: Into<String>>(lead: S, items: impl IntoIterator<Item = S>) -> Self {
        let mut segments = vec![Segment::lead(lead)];
        segments.extend(items.into_iter().map(Segment::item));
        RenderNode::Paragraph(segments)
    }

    /// Plain text of every segment, in order.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            RenderNode::Heading(text) => vec![text.as_str()],
            RenderNode::Paragraph(segments) => segments.iter().map(|s| s.text.as_str()).collect(),
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, RenderNode::Heading(_))
    }

    /// Lines this node renders as, before wrapping.
    pub fn display_lines(&self, marker: char) -> Vec<String> {
        match self {
            RenderNode::Heading(text) => vec![text.clone()],
            RenderNode::Paragraph(segments) => segments
                .iter()
                .filter(|s| s.bullet || !s.text.is_empty())
                .map(|s| s.display(marker))
                .collect(),
        }
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse with the default markers.
pub fn parse_content(input: &str) -> Vec<RenderNode> {
    parse_content_with(input, &ParserConfig::default())
}

/// Parse a raw section body into render nodes.
///
/// Empty input yields no nodes. Every other input yields exactly one node per
/// block, in input order.
pub fn parse_content_with(input: &str, config: &ParserConfig) -> Vec<RenderNode> {
    if input.is_empty() {
        return Vec::new();
    }

    let normalized = input.replace("\r\n", "\n");
    normalized
        .split(BLOCK_DELIMITER)
        .map(|block| parse_block(block, config))
        .collect()
}

fn parse_block(block: &str, config: &ParserConfig) -> RenderNode {
    let trimmed = block.trim();

    if let Some(title) = heading_text(trimmed, &config.heading_marker) {
        return RenderNode::Heading(title.to_string());
    }

    let mut fragments = trimmed.split(config.bullet);
    let lead = fragments.next().unwrap_or_default().trim();

    let mut segments = vec![Segment::lead(lead)];
    segments.extend(
        fragments
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(Segment::item),
    );

    RenderNode::Paragraph(segments)
}

/// Inner text if the whole block is wrapped in the marker.
fn heading_text<'a>(trimmed: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() || trimmed.len() < marker.len() * 2 {
        return None;
    }

    let inner = trimmed.strip_prefix(marker)?.strip_suffix(marker)?.trim();

    // "**a** and **b**" is emphasis inside a paragraph, not a heading
    if inner.is_empty() || inner.contains(marker) {
        return None;
    }

    Some(inner)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(parse_content("").is_empty());
    }

    #[test]
    fn test_heading_then_body() {
        let nodes = parse_content("**Title**\n\nBody text");
        assert_eq!(
            nodes,
            vec![
                RenderNode::Heading("Title".to_string()),
                RenderNode::Paragraph(vec![Segment::lead("Body text")]),
            ]
        );
    }

    #[test]
    fn test_bullet_splitting() {
        let nodes = parse_content("Lead text• Item one• Item two");
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].texts(), vec!["Lead text", "Item one", "Item two"]);

        let RenderNode::Paragraph(segments) = &nodes[0] else {
            panic!("expected paragraph");
        };
        assert!(!segments[0].bullet);
        assert!(segments[1].bullet);
        assert!(segments[2].bullet);
        assert_eq!(segments[1].display('•'), "• Item one");
    }

    #[test]
    fn test_block_order_preserved() {
        let nodes = parse_content("one\n\n**two**\n\nthree");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].texts(), vec!["one"]);
        assert!(nodes[1].is_heading());
        assert_eq!(nodes[2].texts(), vec!["three"]);
    }

    #[test]
    fn test_unterminated_marker_is_paragraph() {
        let nodes = parse_content("**Not a heading");
        assert_eq!(nodes, vec![RenderNode::paragraph("**Not a heading", [])]);
    }

    #[test]
    fn test_inline_emphasis_is_paragraph() {
        let nodes = parse_content("**a** and **b**");
        assert!(!nodes[0].is_heading());
        assert_eq!(nodes[0].texts(), vec!["**a** and **b**"]);
    }

    #[test]
    fn test_bare_markers_are_paragraph() {
        assert!(!parse_content("**")[0].is_heading());
        assert!(!parse_content("***")[0].is_heading());
        assert!(!parse_content("****")[0].is_heading());
        assert!(!parse_content("**   **")[0].is_heading());
    }

    #[test]
    fn test_heading_inner_whitespace_trimmed() {
        let nodes = parse_content("  ** Spaced Title **  ");
        assert_eq!(nodes, vec![RenderNode::Heading("Spaced Title".to_string())]);
    }

    #[test]
    fn test_whitespace_block_degrades_to_empty_paragraph() {
        let nodes = parse_content("a\n\n   \n\nb");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1], RenderNode::Paragraph(vec![Segment::lead("")]));

        let nodes = parse_content("a\n\n\n\nb");
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[1].texts(), vec![""]);
    }

    #[test]
    fn test_leading_bullet_keeps_empty_lead() {
        let nodes = parse_content("• first• second");
        assert_eq!(nodes[0].texts(), vec!["", "first", "second"]);
        assert_eq!(nodes[0].display_lines('•'), vec!["• first", "• second"]);
    }

    #[test]
    fn test_empty_bullet_items_dropped() {
        let nodes = parse_content("Lead•• item•");
        assert_eq!(nodes[0].texts(), vec!["Lead", "item"]);
    }

    #[test]
    fn test_crlf_normalized() {
        let nodes = parse_content("**Title**\r\n\r\nBody");
        assert_eq!(nodes.len(), 2);
        assert!(nodes[0].is_heading());
    }

    #[test]
    fn test_em_dash_is_plain_text() {
        let nodes = parse_content("Cooperation — not competition");
        assert_eq!(nodes[0].texts(), vec!["Cooperation — not competition"]);
    }

    #[test]
    fn test_parse_is_pure() {
        let input = "**H**\n\nLead• a• b\n\n\n\ntail";
        assert_eq!(parse_content(input), parse_content(input));
    }

    #[test]
    fn test_custom_markers() {
        let config = ParserConfig {
            bullet: '-',
            heading_marker: "==".to_string(),
        };
        let nodes = parse_content_with("==Intro==\n\nList- x- y", &config);
        assert_eq!(nodes[0], RenderNode::Heading("Intro".to_string()));
        assert_eq!(nodes[1].texts(), vec!["List", "x", "y"]);
    }

    #[test]
    fn test_multibyte_heading_marker() {
        let config = ParserConfig {
            bullet: '•',
            heading_marker: "««".to_string(),
        };
        let nodes = parse_content_with("««Titel««", &config);
        assert_eq!(nodes[0], RenderNode::Heading("Titel".to_string()));
    }

    #[test]
    fn test_empty_heading_marker_never_matches() {
        let config = ParserConfig {
            bullet: '•',
            heading_marker: String::new(),
        };
        let nodes = parse_content_with("**x**", &config);
        assert!(!nodes[0].is_heading());
    }
}
