#![forbid(unsafe_code)]

//! Semantic swipe vocabulary produced by gesture tracking.
//!
//! The tracker (see [`crate::session`]) turns raw [`TouchEvent`]s into
//! [`SwipeEvent`]s; the controller layer reacts to those without re-deriving
//! geometry. The pure decision rules live here so they can be tested and
//! fuzzed in isolation: [`GestureVerdict::evaluate`] is the commit/bounce
//! rule, [`FollowTransform::from_raw`] is the follow-frame math.
//!
//! # Invariants
//!
//! 1. Every tracked gesture is well-formed: `Began` → zero or more
//!    `FollowMoved` (preceded by exactly one `FollowEngaged` if any) →
//!    `Released` or `Aborted`.
//! 2. `FollowEngaged` is emitted at most once per gesture.
//! 3. A `Commit` verdict always carries the direction matching the sign of
//!    the final horizontal delta.
//!
//! # Failure Modes
//!
//! - A gesture interrupted by teardown emits nothing further; the caller is
//!   responsible for its own cleanup (the controller force-releases the
//!   interaction lock).
//!
//! [`TouchEvent`]: crate::touch::TouchEvent

use crate::config::SwipeConfig;

/// Horizontal swipe direction (direction of finger travel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Finger moved leftward (negative x).
    Left,
    /// Finger moved rightward (positive x).
    Right,
}

impl SwipeDirection {
    /// The opposite direction.
    #[must_use]
    pub fn opposite(&self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Direction from a horizontal delta. Non-negative maps to `Right`.
    #[inline]
    #[must_use]
    pub fn from_dx(dx: f32) -> Self {
        if dx >= 0.0 { Self::Right } else { Self::Left }
    }

    /// Sign of this direction on the x axis (`Right` = +1, `Left` = -1).
    #[inline]
    #[must_use]
    pub fn sign(&self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// The page-navigation this direction maps to.
    ///
    /// Swiping rightward drags the current page toward the right, revealing
    /// the previous one; leftward reveals the next.
    #[must_use]
    pub fn nav(&self) -> NavDirection {
        match self {
            Self::Right => NavDirection::Prev,
            Self::Left => NavDirection::Next,
        }
    }

    /// Lowercase name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Page-navigation direction requested from the calendar collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// One page backward in time.
    Prev,
    /// One page forward in time.
    Next,
}

impl NavDirection {
    /// Lowercase name for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Next => "next",
        }
    }
}

/// Why a released gesture did not commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Horizontal travel below the trigger distance (includes taps).
    BelowTrigger,
    /// Vertical drift at or beyond the allowed maximum.
    ExcessiveDrift,
    /// Horizontal travel did not strictly exceed vertical travel.
    VerticalDominant,
}

/// Why an in-progress gesture was abandoned without a release verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// An event carried NaN or infinite coordinates.
    MalformedCoordinates,
    /// The platform cancelled the touch (native scroll or system gesture
    /// took over).
    TouchCancelled,
}

/// Outcome of a released gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureVerdict {
    /// Valid swipe; navigate and run the two-stage transition.
    Commit(SwipeDirection),
    /// Invalid swipe; rubber-band back to rest.
    Bounce(RejectReason),
}

impl GestureVerdict {
    /// Apply the commit rule to the final gesture deltas.
    ///
    /// Commit requires all three, checked in order: horizontal travel at
    /// least `trigger_distance`, vertical drift under `max_cross_drift`,
    /// and horizontal strictly greater than vertical. The first failed
    /// check becomes the bounce reason.
    #[must_use]
    pub fn evaluate(dx: f32, dy: f32, config: &SwipeConfig) -> Self {
        let ax = dx.abs();
        let ay = dy.abs();

        if ax < config.trigger_distance {
            Self::Bounce(RejectReason::BelowTrigger)
        } else if ay >= config.max_cross_drift {
            Self::Bounce(RejectReason::ExcessiveDrift)
        } else if ax <= ay {
            Self::Bounce(RejectReason::VerticalDominant)
        } else {
            Self::Commit(SwipeDirection::from_dx(dx))
        }
    }

    /// Whether this verdict commits.
    #[inline]
    #[must_use]
    pub fn is_commit(&self) -> bool {
        matches!(self, Self::Commit(_))
    }
}

/// Semantic event emitted by the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeEvent {
    /// A qualifying touch-start was accepted; tracking began.
    Began { x: f32, y: f32 },
    /// Horizontal intent confirmed; the follow state engaged. The
    /// controller captures the interaction-lock snapshot on this event.
    FollowEngaged,
    /// A move while following. Deltas are relative to the gesture start.
    FollowMoved { raw_dx: f32, raw_dy: f32 },
    /// The gesture ended; carries the final deltas and the verdict.
    Released {
        raw_dx: f32,
        raw_dy: f32,
        verdict: GestureVerdict,
    },
    /// The gesture was abandoned mid-flight.
    Aborted { reason: AbortReason },
}

impl SwipeEvent {
    /// Whether this event ends the gesture.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Released { .. } | Self::Aborted { .. })
    }

    /// The release verdict, if this is a release.
    #[must_use]
    pub fn verdict(&self) -> Option<GestureVerdict> {
        match self {
            Self::Released { verdict, .. } => Some(*verdict),
            _ => None,
        }
    }
}

/// One follow frame: damped offset, dipped opacity, and hint visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowTransform {
    /// Horizontal translation in pixels, clamped to the follow range.
    pub offset: f32,
    /// Surface opacity in `[1 - dip, 1]`.
    pub opacity: f32,
    /// Directional hint to display, if the raw travel is far enough.
    pub hint: Option<SwipeDirection>,
}

impl FollowTransform {
    /// Compute the frame for a raw horizontal delta.
    ///
    /// The offset is the raw delta scaled by the damping factor and clamped
    /// to `±max_follow`; opacity dips proportionally to the clamped offset,
    /// bottoming out at `1 - follow_opacity_dip`. The hint appears once the
    /// raw (undamped) travel reaches the hint distance.
    #[must_use]
    pub fn from_raw(raw_dx: f32, config: &SwipeConfig) -> Self {
        let damped = raw_dx * config.damping_factor;
        let offset = damped.clamp(-config.max_follow, config.max_follow);
        let ratio = (offset.abs() / config.max_follow).min(1.0);
        let opacity = 1.0 - ratio * config.follow_opacity_dip;

        let hint = if raw_dx != 0.0 && raw_dx.abs() >= config.hint_distance() {
            Some(SwipeDirection::from_dx(raw_dx))
        } else {
            None
        };

        Self {
            offset,
            opacity,
            hint,
        }
    }

    /// The rest frame: no translation, full opacity, no hint.
    #[must_use]
    pub fn rest() -> Self {
        Self {
            offset: 0.0,
            opacity: 1.0,
            hint: None,
        }
    }
}
