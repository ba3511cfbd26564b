#![forbid(unsafe_code)]

//! Core: touch gesture recognition, geometry, and animation primitives.
//!
//! # Role in swipenav
//! `swipenav-core` is the decision layer. It owns the touch event model,
//! the swipe state machine, threshold configuration, and the easing
//! primitives the controller animates with. Nothing in this crate touches
//! a view surface or a calendar; it turns coordinates into verdicts.
//!
//! # Primary responsibilities
//! - **SwipeTracker**: touch lifecycle state machine emitting semantic
//!   swipe events.
//! - **GestureVerdict**: commit/bounce classification of a released
//!   gesture.
//! - **RegionMap**: hit-testing of touch-start points against blocked
//!   regions.
//! - **Tween** and easing: deterministic time-based animation values.
//!
//! # How it fits in the system
//! The controller (`swipenav-runtime`) forwards platform touch input
//! through `SwipeTracker`, maps the resulting semantic events onto surface
//! transforms, edit-lock toggles, and calendar navigation, and drives the
//! commit/bounce choreography with the animation primitives defined here.

pub mod animation;
pub mod config;
pub mod geometry;
pub mod lock;
pub mod logging;
pub mod region;
pub mod session;
pub mod swipe;
pub mod touch;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
