#![forbid(unsafe_code)]

//! Raw touch input model.
//!
//! [`TouchEvent`] is the canonical input the tracker consumes. Embedders
//! translate whatever their platform delivers (DOM touch events, winit
//! `Touch`, synthetic test input) into this shape.
//!
//! # Invariants
//!
//! 1. Coordinates are pixels in the host surface's coordinate space.
//! 2. `contacts` counts simultaneous contacts at the moment of the event;
//!    for an end event it includes the contact being lifted.
//! 3. Events are not validated on construction; [`TouchEvent::is_well_formed`]
//!    is the single validity check and the tracker applies it on every event.

use crate::geometry::Point;

/// Phase of a touch contact's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A contact landed on the surface.
    Start,
    /// The contact moved while down.
    Move,
    /// The contact lifted normally.
    End,
    /// The platform revoked the contact (for example a native scroll or
    /// system gesture took over). Treated as a gesture abort, never as a
    /// completed swipe.
    Cancel,
}

/// A single touch input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Lifecycle phase.
    pub phase: TouchPhase,
    /// Horizontal position in pixels.
    pub x: f32,
    /// Vertical position in pixels.
    pub y: f32,
    /// Number of simultaneous contacts participating in this event.
    pub contacts: u8,
}

impl TouchEvent {
    /// Create a new event.
    #[inline]
    pub const fn new(phase: TouchPhase, x: f32, y: f32, contacts: u8) -> Self {
        Self {
            phase,
            x,
            y,
            contacts,
        }
    }

    /// Single-contact start event.
    #[inline]
    pub const fn start(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Start, x, y, 1)
    }

    /// Single-contact move event.
    #[inline]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Move, x, y, 1)
    }

    /// Single-contact end event.
    #[inline]
    pub const fn end(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::End, x, y, 1)
    }

    /// Single-contact cancel event.
    #[inline]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(TouchPhase::Cancel, x, y, 1)
    }

    /// Set the contact count (builder style).
    #[inline]
    #[must_use]
    pub const fn with_contacts(mut self, contacts: u8) -> Self {
        self.contacts = contacts;
        self
    }

    /// Position as a [`Point`].
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether this event carries exactly one contact.
    #[inline]
    #[must_use]
    pub const fn is_single_contact(&self) -> bool {
        self.contacts == 1
    }

    /// Whether the coordinate payload is usable.
    ///
    /// False for NaN or infinite coordinates, and for a zero contact count
    /// (an event that claims no contact produced it).
    #[inline]
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.position().is_finite() && self.contacts > 0
    }
}
