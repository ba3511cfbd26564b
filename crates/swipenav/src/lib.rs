#![forbid(unsafe_code)]

//! Swipenav public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports common types from the internal crates and offers a lightweight
//! prelude for day-to-day usage.
//!
//! The split underneath is simple: `swipenav-core` turns touch coordinates
//! into verdicts, `swipenav-runtime` turns verdicts into view transitions.
//! Most applications only need [`SwipeController`] plus the [`PagedView`]
//! and [`SwipeSurface`] traits from here.

// --- Core re-exports -------------------------------------------------------

pub use swipenav_core::animation::{EasingFn, Tween, ease_in, ease_in_out, ease_linear, ease_out};
pub use swipenav_core::config::SwipeConfig;
pub use swipenav_core::geometry::{Point, Rect};
pub use swipenav_core::lock::{EditFlag, EditFlags, LockSnapshot};
pub use swipenav_core::region::{BlockKind, BlockedRegion, RegionMap, TouchTarget};
pub use swipenav_core::session::{Disposition, SwipeTracker, TrackerOutput, TrackerState};
pub use swipenav_core::swipe::{
    AbortReason, FollowTransform, GestureVerdict, NavDirection, RejectReason, SwipeDirection,
    SwipeEvent,
};
pub use swipenav_core::touch::{TouchEvent, TouchPhase};

// --- Runtime re-exports ----------------------------------------------------

pub use swipenav_runtime::{
    ControllerPhase, DeferredQueue, Generation, GenerationSource, IndicatorMode, InteractionLock,
    PagedView, SurfaceFrame, SwipeController, SwipeSurface,
};

// --- Tuning re-exports -----------------------------------------------------

pub use swipenav_runtime::{
    DetectionTuning, FollowTuning, ReleaseTuning, TransitionTuning, TuningError, TuningProfile,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ControllerPhase, Disposition, EditFlag, PagedView, Rect, RegionMap, SurfaceFrame,
        SwipeConfig, SwipeController, SwipeDirection, SwipeSurface, TouchEvent, TouchPhase,
    };

    pub use crate::{core, runtime};
}

pub use swipenav_core as core;
pub use swipenav_runtime as runtime;
