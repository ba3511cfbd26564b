#![forbid(unsafe_code)]

//! Swipenav Runtime
//!
//! This crate provides the controller that ties the core gesture decisions
//! to a host application: region filtering, the interaction lock over edit
//! flags, commit/bounce choreography, and deferred actions on an explicit
//! clock.
//!
//! # Key Components
//!
//! - [`SwipeController`] - Orchestrates a gesture from touch start to
//!   settled transition
//! - [`PagedView`] - Trait for the paged content being navigated
//! - [`SwipeSurface`] - Trait for the visual layer (transforms, indicator)
//! - [`InteractionLock`] - Snapshot/restore of the view's edit flags
//! - [`DeferredQueue`] - Time-ordered actions with generation stranding
//! - [`TuningProfile`] - File-loadable gesture tuning (TOML/JSON)
//!
//! # Role in swipenav
//! `swipenav-runtime` is the orchestrator. It consumes touch events
//! classified by `swipenav-core`, drives the injected [`PagedView`] and
//! [`SwipeSurface`] collaborators, and owns every timing decision so hosts
//! and tests can drive the clock explicitly.
//!
//! # How it fits in the system
//! The runtime is the center of the architecture: it is the bridge between
//! raw platform touch input and the host's calendar view. The core crate
//! stays pure; everything with side effects lives here behind injected
//! traits.

pub mod cancellation;
pub mod controller;
pub mod interaction_lock;
pub mod paged_view;
pub mod scheduler;
pub mod surface;
pub mod testkit;
pub mod tuning;

pub use cancellation::{Generation, GenerationSource};
pub use controller::{ControllerPhase, SwipeController};
pub use interaction_lock::InteractionLock;
pub use paged_view::PagedView;
pub use scheduler::DeferredQueue;
pub use surface::{IndicatorMode, SurfaceFrame, SwipeSurface};
pub use testkit::{FakeCalendar, RecordingSurface, SurfaceOp};
pub use tuning::{
    DetectionTuning, FollowTuning, ReleaseTuning, TransitionTuning, TuningError, TuningProfile,
};
