#![forbid(unsafe_code)]

//! Gesture tracking: transforms raw touch events into semantic swipe events.
//!
//! [`SwipeTracker`] is a stateful processor that converts a [`TouchEvent`]
//! stream into [`SwipeEvent`]s. It is purely kinematic: no surface writes,
//! no collaborator calls, no region filtering (the controller applies the
//! region filter before forwarding a touch-start). That keeps every
//! threshold decision deterministic and testable from bare coordinates.
//!
//! # State Machine
//!
//! - **Idle**: no active session. Only a well-formed single-contact start
//!   is accepted.
//! - **Tracking**: a session exists but horizontal intent is unconfirmed.
//!   Each move re-checks the deadzone and angle gates; a steep early move
//!   does not permanently reject the gesture.
//! - **Following**: horizontal intent confirmed. Moves emit follow deltas;
//!   the release verdict decides commit versus bounce.
//!
//! # Invariants
//!
//! 1. At most one session is active at a time; a start while a session
//!    exists is ignored.
//! 2. Multi-contact events never mutate the session (the gesture may still
//!    complete once events return to a single contact).
//! 3. `FollowEngaged` is emitted exactly once per gesture, before the first
//!    `FollowMoved`.
//! 4. Session coordinates are always finite; a non-finite coordinate aborts
//!    the gesture instead of being stored.
//! 5. After any terminal event ([`SwipeEvent::is_terminal`]) or
//!    [`reset`](SwipeTracker::reset), the tracker is back in `Idle`.
//!
//! # Failure Modes
//!
//! - `reset()` emits nothing; callers interrupting a gesture (teardown)
//!   perform their own lock/surface cleanup.

use web_time::Instant;

use crate::config::SwipeConfig;
use crate::swipe::{AbortReason, GestureVerdict, SwipeEvent};
use crate::touch::{TouchEvent, TouchPhase};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One continuous single-pointer touch interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Start position.
    pub start_x: f32,
    pub start_y: f32,
    /// Most recent position.
    pub last_x: f32,
    pub last_y: f32,
    /// When the session began.
    pub started_at: Instant,
}

impl GestureSession {
    fn begin(x: f32, y: f32, now: Instant) -> Self {
        Self {
            start_x: x,
            start_y: y,
            last_x: x,
            last_y: y,
            started_at: now,
        }
    }

    /// Horizontal travel since start.
    #[inline]
    #[must_use]
    pub fn dx(&self) -> f32 {
        self.last_x - self.start_x
    }

    /// Vertical travel since start.
    #[inline]
    #[must_use]
    pub fn dy(&self) -> f32 {
        self.last_y - self.start_y
    }
}

/// Coarse tracker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Tracking,
    Following,
}

/// What the embedder should do with the platform's default handling of the
/// event it just forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The event was not for us; no state changed.
    Ignored,
    /// The event advanced the tracker but default handling may proceed
    /// (vertical scrolling stays live while a gesture is ambiguous).
    Passthrough,
    /// Suppress default handling: the move was dominantly horizontal.
    Consumed,
}

/// Result of processing one event.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerOutput {
    pub disposition: Disposition,
    pub events: Vec<SwipeEvent>,
}

impl TrackerOutput {
    fn ignored() -> Self {
        Self {
            disposition: Disposition::Ignored,
            events: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// SwipeTracker
// ---------------------------------------------------------------------------

/// Stateful swipe tracker.
///
/// Call [`process`](SwipeTracker::process) for each incoming touch event.
/// The returned [`TrackerOutput`] carries the semantic events plus the
/// scroll-suppression disposition: default handling is suppressed only when
/// a move's horizontal travel strictly exceeds its vertical travel, which
/// deliberately leaves ambiguous gestures scrollable.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    config: SwipeConfig,
    session: Option<GestureSession>,
    following: bool,
}

impl SwipeTracker {
    /// Create a tracker with the given (already sanitized) configuration.
    #[must_use]
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            session: None,
            following: false,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Current coarse state.
    #[must_use]
    pub fn state(&self) -> TrackerState {
        match (&self.session, self.following) {
            (None, _) => TrackerState::Idle,
            (Some(_), false) => TrackerState::Tracking,
            (Some(_), true) => TrackerState::Following,
        }
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    /// Drop any active session without emitting events.
    pub fn reset(&mut self) {
        self.session = None;
        self.following = false;
    }

    /// Feed a whole script of events at one instant, collecting every
    /// semantic event.
    ///
    /// This skips per-event disposition handling, allowing tests to put a
    /// tracker into a known state without asserting on intermediate output.
    #[cfg(feature = "test-helpers")]
    pub fn drive(&mut self, events: &[TouchEvent], now: Instant) -> Vec<SwipeEvent> {
        let mut collected = Vec::new();
        for event in events {
            collected.extend(self.process(event, now).events);
        }
        collected
    }

    /// Process one touch event.
    pub fn process(&mut self, event: &TouchEvent, now: Instant) -> TrackerOutput {
        if !event.is_well_formed() {
            return self.abort_if_active(AbortReason::MalformedCoordinates);
        }
        if !event.is_single_contact() {
            // Another contact landed; skip the event, keep the session.
            return TrackerOutput::ignored();
        }

        match event.phase {
            TouchPhase::Start => self.on_touch_start(event, now),
            TouchPhase::Move => self.on_touch_move(event),
            TouchPhase::End => self.on_touch_end(event, now),
            TouchPhase::Cancel => self.abort_if_active(AbortReason::TouchCancelled),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl SwipeTracker {
    fn on_touch_start(&mut self, event: &TouchEvent, now: Instant) -> TrackerOutput {
        if self.session.is_some() {
            // Single-pointer contract; a second start without an end is
            // dropped rather than clobbering the live session.
            return TrackerOutput::ignored();
        }

        self.session = Some(GestureSession::begin(event.x, event.y, now));
        self.following = false;

        TrackerOutput {
            disposition: Disposition::Passthrough,
            events: vec![SwipeEvent::Began {
                x: event.x,
                y: event.y,
            }],
        }
    }

    fn on_touch_move(&mut self, event: &TouchEvent) -> TrackerOutput {
        let Some(session) = self.session.as_mut() else {
            return TrackerOutput::ignored();
        };

        session.last_x = event.x;
        session.last_y = event.y;
        let dx = session.dx();
        let dy = session.dy();

        let disposition = if dx.abs() > dy.abs() {
            Disposition::Consumed
        } else {
            Disposition::Passthrough
        };

        let mut events = Vec::new();
        if !self.following && Self::confirms_intent(dx, dy, &self.config) {
            self.following = true;
            events.push(SwipeEvent::FollowEngaged);
            #[cfg(feature = "tracing")]
            tracing::debug!(dx = ?dx, dy = ?dy, "follow engaged");
        }
        if self.following {
            events.push(SwipeEvent::FollowMoved {
                raw_dx: dx,
                raw_dy: dy,
            });
        }

        TrackerOutput {
            disposition,
            events,
        }
    }

    fn on_touch_end(&mut self, event: &TouchEvent, now: Instant) -> TrackerOutput {
        let Some(mut session) = self.session.take() else {
            return TrackerOutput::ignored();
        };
        self.following = false;

        session.last_x = event.x;
        session.last_y = event.y;
        let dx = session.dx();
        let dy = session.dy();
        let verdict = GestureVerdict::evaluate(dx, dy, &self.config);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dx = ?dx,
            dy = ?dy,
            commit = verdict.is_commit(),
            duration_ms = now.duration_since(session.started_at).as_millis() as u64,
            "gesture released"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = now;

        TrackerOutput {
            disposition: Disposition::Passthrough,
            events: vec![SwipeEvent::Released {
                raw_dx: dx,
                raw_dy: dy,
                verdict,
            }],
        }
    }

    fn abort_if_active(&mut self, reason: AbortReason) -> TrackerOutput {
        if self.session.is_none() {
            return TrackerOutput::ignored();
        }
        self.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!(reason = ?reason, "gesture aborted");

        TrackerOutput {
            disposition: Disposition::Passthrough,
            events: vec![SwipeEvent::Aborted { reason }],
        }
    }

    /// Deadzone plus angle gate for entering the follow state.
    fn confirms_intent(dx: f32, dy: f32, config: &SwipeConfig) -> bool {
        if dx.abs() <= config.deadzone {
            return false;
        }
        let angle = dy.abs().atan2(dx.abs()).to_degrees();
        angle < config.angle_threshold_deg
    }
}
