#![forbid(unsafe_code)]

//! Touch-start region classification.
//!
//! Swipes may only begin inside the calendar's interactive area (day grid,
//! list rows, empty cells, view background), never on the toolbar, buttons,
//! filter dropdowns, or an open modal. The embedder mirrors its layout into
//! a [`RegionMap`]: one viewport rectangle plus zero or more blocked
//! rectangles, updated whenever the host relayouts. Classification happens
//! only at touch-start; a live gesture is never re-filtered as the finger
//! wanders.
//!
//! Blocked regions win over the viewport, and later-added regions win over
//! earlier ones, matching the intuition that overlays sit on top.

use crate::geometry::{Point, Rect};

/// What kind of UI sits on top of a blocked rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Navigation/title toolbar.
    Toolbar,
    /// A button, link, or similar control.
    Control,
    /// A filter-dropdown container.
    Dropdown,
    /// A modal dialog (typically registered covering the whole viewport
    /// while open, since the backdrop swallows interaction everywhere).
    Modal,
}

impl BlockKind {
    /// Lowercase name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toolbar => "toolbar",
            Self::Control => "control",
            Self::Dropdown => "dropdown",
            Self::Modal => "modal",
        }
    }
}

/// A rectangle where swipes must not start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockedRegion {
    pub rect: Rect,
    pub kind: BlockKind,
}

/// Classification of a touch-start point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchTarget {
    /// Inside the viewport, clear of blocked regions: a swipe may begin.
    Interactive,
    /// Covered by a blocked region of the given kind.
    Blocked(BlockKind),
    /// Outside the viewport entirely.
    Outside,
}

impl TouchTarget {
    /// Whether a swipe may begin here.
    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive)
    }
}

/// The embedder-maintained layout mirror used to filter touch-starts.
#[derive(Debug, Clone, Default)]
pub struct RegionMap {
    viewport: Rect,
    blocked: Vec<BlockedRegion>,
}

impl RegionMap {
    /// Empty map: no viewport, nothing interactive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with the given viewport and no blocked regions.
    #[must_use]
    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            viewport,
            blocked: Vec::new(),
        }
    }

    /// The interactive viewport.
    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Replace the viewport (host relayout).
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Register a blocked rectangle. Later registrations take precedence
    /// when rectangles overlap.
    pub fn block(&mut self, rect: Rect, kind: BlockKind) {
        self.blocked.push(BlockedRegion { rect, kind });
    }

    /// Remove every blocked rectangle of the given kind (for example when
    /// a modal closes).
    pub fn unblock(&mut self, kind: BlockKind) {
        self.blocked.retain(|region| region.kind != kind);
    }

    /// Remove all blocked rectangles.
    pub fn clear_blocked(&mut self) {
        self.blocked.clear();
    }

    /// Currently registered blocked regions.
    #[must_use]
    pub fn blocked(&self) -> &[BlockedRegion] {
        &self.blocked
    }

    /// Whether the map has a usable viewport.
    #[inline]
    #[must_use]
    pub fn has_viewport(&self) -> bool {
        !self.viewport.is_empty()
    }

    /// Classify a touch-start point.
    #[must_use]
    pub fn classify(&self, point: Point) -> TouchTarget {
        for region in self.blocked.iter().rev() {
            if region.rect.contains(point) {
                return TouchTarget::Blocked(region.kind);
            }
        }
        if self.viewport.contains(point) {
            TouchTarget::Interactive
        } else {
            TouchTarget::Outside
        }
    }
}
