//! Taffy Bridge - pane geometry via Taffy flexbox
//!
//! Two layouts are computed here:
//! - the overlay frame: header, table-of-contents sidebar, body, footer
//! - the landing page: regions stacked in a column with a gap
//!
//! Taffy reports child positions relative to the parent; results are
//! converted to absolute terminal [`Rect`]s.

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Size, Style,
    TaffyTree,
};

use crate::error::Result;
use crate::types::Rect;

/// Overlay header rows (title + rule).
pub const HEADER_HEIGHT: u16 = 2;

/// Overlay footer rows (label, progress bar, dots).
pub const FOOTER_HEIGHT: u16 = 3;

/// Below this body width the sidebar is hidden.
pub const MIN_BODY_WIDTH: u16 = 30;

// =============================================================================
// TYPES
// =============================================================================

/// Absolute rects of the overlay's panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayPanes {
    pub header: Rect,
    /// Zero-width when the terminal is too narrow
    pub sidebar: Rect,
    pub body: Rect,
    pub footer: Rect,
}

// =============================================================================
// STYLE HELPERS
// =============================================================================

fn fixed_height(height: u16) -> Style {
    Style {
        size: Size {
            width: Dimension::Auto,
            height: Dimension::Length(height as f32),
        },
        flex_shrink: 0.0,
        ..Style::default()
    }
}

fn fixed_width(width: u16) -> Style {
    Style {
        size: Size {
            width: Dimension::Length(width as f32),
            height: Dimension::Auto,
        },
        flex_shrink: 0.0,
        ..Style::default()
    }
}

fn grow() -> Style {
    Style {
        flex_grow: 1.0,
        min_size: Size {
            width: Dimension::Length(0.0),
            height: Dimension::Length(0.0),
        },
        ..Style::default()
    }
}

fn to_rect(tree: &TaffyTree, node: NodeId, origin: (f32, f32)) -> Result<(Rect, (f32, f32))> {
    let layout = tree.layout(node)?;
    let x = origin.0 + layout.location.x;
    let y = origin.1 + layout.location.y;
    let rect = Rect::new(
        x.round() as u16,
        y.round() as u16,
        layout.size.width.round() as u16,
        layout.size.height.round() as u16,
    );
    Ok((rect, (x, y)))
}

// =============================================================================
// OVERLAY
// =============================================================================

/// Compute the overlay panes for a `width` x `height` terminal.
pub fn overlay_panes(width: u16, height: u16, sidebar_width: u16) -> Result<OverlayPanes> {
    let mut tree: TaffyTree = TaffyTree::new();

    let sidebar_width = if width >= sidebar_width.saturating_add(MIN_BODY_WIDTH) {
        sidebar_width
    } else {
        0
    };

    let header = tree.new_leaf(fixed_height(HEADER_HEIGHT))?;
    let sidebar = tree.new_leaf(fixed_width(sidebar_width))?;
    let body = tree.new_leaf(grow())?;
    let footer = tree.new_leaf(fixed_height(FOOTER_HEIGHT))?;

    let main = tree.new_with_children(
        Style {
            flex_direction: FlexDirection::Row,
            ..grow()
        },
        &[sidebar, body],
    )?;

    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size {
                width: Dimension::Length(width as f32),
                height: Dimension::Length(height as f32),
            },
            ..Style::default()
        },
        &[header, main, footer],
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::Definite(height as f32),
        },
    )?;

    let origin = (0.0, 0.0);
    let (header, _) = to_rect(&tree, header, origin)?;
    let (_, main_origin) = to_rect(&tree, main, origin)?;
    let (sidebar, _) = to_rect(&tree, sidebar, main_origin)?;
    let (body, _) = to_rect(&tree, body, main_origin)?;
    let (footer, _) = to_rect(&tree, footer, origin)?;

    Ok(OverlayPanes {
        header,
        sidebar,
        body,
        footer,
    })
}

// =============================================================================
// LANDING STACK
// =============================================================================

/// Stack blocks of the given heights in a `width`-wide column with `gap`
/// rows between them. Positions are in content coordinates (row 0 is the top
/// of the page, before scrolling).
pub fn stack_vertical(width: u16, heights: &[u16], gap: u16) -> Result<Vec<Rect>> {
    let mut tree: TaffyTree = TaffyTree::new();

    let children = heights
        .iter()
        .map(|&h| tree.new_leaf(fixed_height(h)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let root = tree.new_with_children(
        Style {
            flex_direction: FlexDirection::Column,
            gap: Size {
                width: LengthPercentage::Length(0.0),
                height: LengthPercentage::Length(gap as f32),
            },
            size: Size {
                width: Dimension::Length(width as f32),
                height: Dimension::Auto,
            },
            ..Style::default()
        },
        &children,
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::MaxContent,
        },
    )?;

    children
        .iter()
        .map(|&child| to_rect(&tree, child, (0.0, 0.0)).map(|(rect, _)| rect))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_panes_wide() {
        let panes = overlay_panes(100, 30, 30).unwrap();

        assert_eq!(panes.header, Rect::new(0, 0, 100, HEADER_HEIGHT));
        assert_eq!(panes.footer, Rect::new(0, 30 - FOOTER_HEIGHT, 100, FOOTER_HEIGHT));

        assert_eq!(panes.sidebar.x, 0);
        assert_eq!(panes.sidebar.y, HEADER_HEIGHT);
        assert_eq!(panes.sidebar.width, 30);

        assert_eq!(panes.body.x, 30);
        assert_eq!(panes.body.y, HEADER_HEIGHT);
        assert_eq!(panes.body.width, 70);
        assert_eq!(panes.body.height, 30 - HEADER_HEIGHT - FOOTER_HEIGHT);
    }

    #[test]
    fn test_overlay_panes_narrow_hides_sidebar() {
        let panes = overlay_panes(50, 20, 30).unwrap();
        assert_eq!(panes.sidebar.width, 0);
        assert_eq!(panes.body.x, 0);
        assert_eq!(panes.body.width, 50);
    }

    #[test]
    fn test_overlay_panes_tiny_terminal() {
        let panes = overlay_panes(10, 4, 30).unwrap();
        assert!(panes.body.height <= 4);
        assert_eq!(panes.header.width, 10);
    }

    #[test]
    fn test_stack_vertical() {
        let rects = stack_vertical(80, &[5, 10, 3], 1).unwrap();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[0], Rect::new(0, 0, 80, 5));
        assert_eq!(rects[1], Rect::new(0, 6, 80, 10));
        assert_eq!(rects[2], Rect::new(0, 17, 80, 3));
    }

    #[test]
    fn test_stack_vertical_empty() {
        assert!(stack_vertical(80, &[], 1).unwrap().is_empty());
    }
}
