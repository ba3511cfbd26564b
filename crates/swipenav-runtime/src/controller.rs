#![forbid(unsafe_code)]

//! The swipe navigation controller.
//!
//! [`SwipeController`] wires the core tracker to a [`PagedView`] and a
//! [`SwipeSurface`]: it filters touch starts by region, follows the finger
//! with damped transforms, locks the view's edit flags while a gesture is
//! live, and runs the two-stage commit (or single-stage bounce)
//! choreography on release. Timing is fully explicit: the embedder calls
//! [`process`](SwipeController::process) per touch event and
//! [`tick`](SwipeController::tick) per animation frame, so every test can
//! drive the clock.
//!
//! # Invariants
//!
//! 1. `prev`/`next` fires at most once per committed gesture, at the
//!    configured fraction of the exit stage.
//! 2. Every lock engage is balanced by exactly one release: on the delayed
//!    restore after a commit settles, at bounce start, on abort, on
//!    `destroy`, at the start of the next gesture if a restore is still
//!    pending, or on drop as a last resort.
//! 3. A new gesture strands all deferred work from the previous one before
//!    anything is scheduled for it.
//! 4. Touch starts are refused while a commit or bounce animation runs;
//!    the running transition is never disturbed.
//! 5. `tick` advances animations before draining deferred actions, so a
//!    navigation snap lands after the last exit frame of the same instant.
//!
//! # Failure Modes
//!
//! - A view that reports every edit flag as absent still locks and
//!   unlocks cleanly; only the flag writes are skipped.
//! - Events before `init` or after `destroy` are ignored outright.

use web_time::{Duration, Instant};

use swipenav_core::animation::{Animation, Tween, ease_out, lerp};
use swipenav_core::config::SwipeConfig;
use swipenav_core::region::RegionMap;
use swipenav_core::session::{Disposition, SwipeTracker, TrackerState};
use swipenav_core::swipe::{
    AbortReason, FollowTransform, GestureVerdict, NavDirection, SwipeDirection, SwipeEvent,
};
use swipenav_core::touch::{TouchEvent, TouchPhase};

use crate::cancellation::GenerationSource;
use crate::interaction_lock::InteractionLock;
use crate::paged_view::PagedView;
use crate::scheduler::DeferredQueue;
use crate::surface::{IndicatorMode, SurfaceFrame, SwipeSurface};

/// Opacity held during the commit transition (end of exit, start of entry).
const TRANSITION_OPACITY: f32 = 0.6;

// ---------------------------------------------------------------------------
// Phases and stages
// ---------------------------------------------------------------------------

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    /// No gesture, no animation.
    Idle,
    /// A touch is down but horizontal intent is unconfirmed.
    Tracking,
    /// The view follows the finger.
    Following,
    /// Commit choreography is running.
    Committing,
    /// Bounce-back animation is running.
    Bouncing,
}

/// Work the controller has put off to a later instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    /// Turn the page mid-exit and snap to the entry pose.
    Nav(NavDirection),
    /// Restore the edit flags captured at gesture start.
    RestoreLock,
    /// Remove the transient commit indicator.
    ClearIndicator,
}

/// Tween between two surface frames.
#[derive(Debug, Clone)]
struct FrameTween {
    tween: Tween,
    from: SurfaceFrame,
    to: SurfaceFrame,
}

impl FrameTween {
    fn new(from: SurfaceFrame, to: SurfaceFrame, duration: Duration) -> Self {
        Self {
            tween: Tween::new(duration).easing(ease_out),
            from,
            to,
        }
    }

    /// Advance by `dt` and sample the interpolated frame.
    fn tick(&mut self, dt: Duration) -> SurfaceFrame {
        self.tween.tick(dt);
        self.sample()
    }

    fn sample(&self) -> SurfaceFrame {
        let t = self.tween.value();
        SurfaceFrame::new(
            lerp(self.from.translation_x, self.to.translation_x, t),
            lerp(self.from.opacity, self.to.opacity, t),
        )
    }

    fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }
}

#[derive(Debug)]
struct CommitRun {
    /// Travel direction of the committed swipe.
    direction: SwipeDirection,
    stage: CommitStage,
}

#[derive(Debug)]
enum CommitStage {
    /// Old content slides out toward `exit_distance`.
    Exit(FrameTween),
    /// Navigation done, surface snapped to the entry pose; the entry
    /// animation starts on the next tick.
    Snapped,
    /// New content slides from the entry pose to rest.
    Enter(FrameTween),
}

#[derive(Debug)]
struct BounceRun {
    tween: FrameTween,
}

// ---------------------------------------------------------------------------
// SwipeController
// ---------------------------------------------------------------------------

/// Swipe-to-navigate controller over an injected view and surface.
///
/// Construction does not activate it; give the region map a viewport,
/// then call [`init`](Self::init).
#[derive(Debug)]
pub struct SwipeController<C: PagedView, S: SwipeSurface> {
    calendar: C,
    surface: S,
    config: SwipeConfig,
    regions: RegionMap,
    tracker: SwipeTracker,
    lock: InteractionLock,
    generations: GenerationSource,
    deferred: DeferredQueue<DeferredAction>,
    commit: Option<CommitRun>,
    bounce: Option<BounceRun>,
    /// Direction of the indicator currently showing, if any.
    indicator: Option<SwipeDirection>,
    /// Last frame presented while following; start pose for release
    /// animations.
    last_follow: SurfaceFrame,
    last_tick: Option<Instant>,
    enabled: bool,
}

impl<C: PagedView, S: SwipeSurface> SwipeController<C, S> {
    /// Create an inactive controller. The config is sanitized up front.
    pub fn new(calendar: C, surface: S, config: SwipeConfig) -> Self {
        let config = config.sanitized();
        Self {
            tracker: SwipeTracker::new(config.clone()),
            calendar,
            surface,
            regions: RegionMap::new(),
            lock: InteractionLock::new(),
            generations: GenerationSource::new(),
            deferred: DeferredQueue::new(),
            commit: None,
            bounce: None,
            indicator: None,
            last_follow: SurfaceFrame::rest(),
            last_tick: None,
            enabled: false,
            config,
        }
    }

    /// Start accepting touch input. Idempotent.
    ///
    /// Refuses to arm while the region map has no viewport; set one and
    /// call again.
    pub fn init(&mut self) {
        if self.enabled {
            return;
        }
        if !self.regions.has_viewport() {
            tracing::warn!("init with an empty viewport; controller stays disabled");
            return;
        }
        self.enabled = true;
        self.last_tick = None;
        tracing::debug!("swipe controller initialized");
    }

    /// Stop accepting input and settle everything immediately: animations
    /// are dropped, deferred work is cancelled, overrides and indicators
    /// are cleared, and a held lock is restored right now.
    ///
    /// A destroy before `init` is a no-op. The controller can be
    /// re-initialized afterwards.
    pub fn destroy(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.tracker.reset();
        self.commit = None;
        self.bounce = None;
        self.generations.advance();
        self.deferred.clear();
        self.lock.release(&mut self.calendar);
        self.surface.clear_indicator();
        self.indicator = None;
        self.surface.clear_overrides();
        self.last_follow = SurfaceFrame::rest();
        self.last_tick = None;
        tracing::debug!("swipe controller destroyed");
    }

    // ---- accessors --------------------------------------------------------

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    #[must_use]
    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    pub fn regions_mut(&mut self) -> &mut RegionMap {
        &mut self.regions
    }

    #[must_use]
    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn calendar_mut(&mut self) -> &mut C {
        &mut self.calendar
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Current phase, animation states taking precedence over tracking.
    #[must_use]
    pub fn phase(&self) -> ControllerPhase {
        if self.commit.is_some() {
            ControllerPhase::Committing
        } else if self.bounce.is_some() {
            ControllerPhase::Bouncing
        } else {
            match self.tracker.state() {
                TrackerState::Idle => ControllerPhase::Idle,
                TrackerState::Tracking => ControllerPhase::Tracking,
                TrackerState::Following => ControllerPhase::Following,
            }
        }
    }

    /// Whether everything has come to rest: no gesture, no animation, no
    /// deferred work, no held lock.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.tracker.state() == TrackerState::Idle
            && self.commit.is_none()
            && self.bounce.is_none()
            && self.deferred.is_empty()
            && !self.lock.is_engaged()
    }

    // ---- event input ------------------------------------------------------

    /// Process one touch event.
    ///
    /// The returned [`Disposition`] tells the embedder whether to suppress
    /// the platform's default handling (native scrolling) for this event.
    pub fn process(&mut self, event: &TouchEvent, now: Instant) -> Disposition {
        if !self.enabled {
            return Disposition::Ignored;
        }

        if event.phase == TouchPhase::Start
            && event.is_well_formed()
            && event.is_single_contact()
            && self.tracker.state() == TrackerState::Idle
        {
            // Starts are refused while a release animation runs; the
            // animation owns the surface until it settles.
            if self.commit.is_some() || self.bounce.is_some() {
                return Disposition::Ignored;
            }
            if !self.regions.classify(event.position()).is_interactive() {
                tracing::trace!("touch start on non-interactive target");
                return Disposition::Ignored;
            }
            // A restore scheduled by the previous gesture may still be
            // pending. Run it now, then strand it along with everything
            // else the previous gesture deferred.
            if self.lock.is_engaged() {
                tracing::warn!("stale interaction lock at gesture start");
                self.lock.release(&mut self.calendar);
            }
            self.surface.clear_indicator();
            self.indicator = None;
            self.generations.advance();
            self.deferred.clear();
        }

        let output = self.tracker.process(event, now);
        for semantic in output.events {
            self.apply_event(semantic, now);
        }
        output.disposition
    }

    /// Advance animations to `now`, then run any deferred actions due.
    pub fn tick(&mut self, now: Instant) {
        if !self.enabled {
            return;
        }
        let dt = match self.last_tick {
            Some(prev) => now.saturating_duration_since(prev),
            None => Duration::ZERO,
        };
        self.last_tick = Some(now);

        self.advance_animations(dt, now);
        let due = self.deferred.drain_due(now, &self.generations);
        for action in due {
            self.apply_deferred(action);
        }
    }
}

// ---------------------------------------------------------------------------
// Internal event handlers
// ---------------------------------------------------------------------------

impl<C: PagedView, S: SwipeSurface> SwipeController<C, S> {
    fn apply_event(&mut self, event: SwipeEvent, now: Instant) {
        match event {
            SwipeEvent::Began { .. } => {}
            SwipeEvent::FollowEngaged => {
                self.lock.engage(&mut self.calendar);
            }
            SwipeEvent::FollowMoved { raw_dx, .. } => self.follow(raw_dx),
            SwipeEvent::Released { verdict, .. } => match verdict {
                GestureVerdict::Commit(direction) => self.begin_commit(direction, now),
                GestureVerdict::Bounce(reason) => {
                    tracing::debug!(reason = ?reason, "gesture bounced");
                    self.begin_bounce(now);
                }
            },
            SwipeEvent::Aborted { reason } => self.abort(reason),
        }
    }

    fn follow(&mut self, raw_dx: f32) {
        let transform = FollowTransform::from_raw(raw_dx, &self.config);
        let frame = SurfaceFrame::new(transform.offset, transform.opacity);
        self.last_follow = frame;
        self.surface.present(frame);

        let hint = transform.hint;
        match hint {
            // Re-issued every qualifying frame; a repeated show replaces
            // the previous indicator rather than stacking.
            Some(direction) => {
                self.surface
                    .show_indicator(direction, IndicatorMode::Persistent);
            }
            None => {
                if self.indicator.is_some() {
                    self.surface.clear_indicator();
                }
            }
        }
        self.indicator = hint;
    }

    fn begin_commit(&mut self, direction: SwipeDirection, now: Instant) {
        self.surface
            .show_indicator(direction, IndicatorMode::Transient);
        self.indicator = Some(direction);

        let stamp = self.generations.current();
        self.deferred
            .schedule(now + self.config.nav_point(), stamp, DeferredAction::Nav(direction.nav()));
        self.deferred.schedule(
            now + self.config.indicator_linger,
            stamp,
            DeferredAction::ClearIndicator,
        );

        let to = SurfaceFrame::new(
            direction.sign() * self.config.exit_distance,
            TRANSITION_OPACITY,
        );
        self.commit = Some(CommitRun {
            direction,
            stage: CommitStage::Exit(FrameTween::new(
                self.last_follow,
                to,
                self.config.commit_duration,
            )),
        });
        self.last_tick = Some(now);
        tracing::debug!(direction = direction.as_str(), "commit started");
    }

    fn begin_bounce(&mut self, now: Instant) {
        // The lock lifts as the bounce starts; nothing below depends on it.
        self.lock.release(&mut self.calendar);
        if self.indicator.take().is_some() {
            self.surface.clear_indicator();
        }

        self.bounce = Some(BounceRun {
            tween: FrameTween::new(
                self.last_follow,
                SurfaceFrame::rest(),
                self.config.bounce_duration,
            ),
        });
        self.last_tick = Some(now);
    }

    fn abort(&mut self, reason: AbortReason) {
        self.lock.release(&mut self.calendar);
        self.surface.clear_indicator();
        self.indicator = None;
        self.surface.clear_overrides();
        self.last_follow = SurfaceFrame::rest();
        self.generations.advance();
        self.deferred.clear();
        tracing::debug!(reason = ?reason, "gesture aborted");
    }

    fn advance_animations(&mut self, dt: Duration, now: Instant) {
        let mut commit_settled = false;
        let mut bounce_settled = false;

        if let Some(run) = self.commit.as_mut() {
            match &mut run.stage {
                CommitStage::Exit(tween) => {
                    let frame = tween.tick(dt);
                    self.surface.present(frame);
                }
                CommitStage::Snapped => {
                    let from = SurfaceFrame::new(
                        -run.direction.sign() * self.config.entry_distance,
                        TRANSITION_OPACITY,
                    );
                    let tween =
                        FrameTween::new(from, SurfaceFrame::rest(), self.config.commit_duration);
                    self.surface.present(tween.sample());
                    run.stage = CommitStage::Enter(tween);
                }
                CommitStage::Enter(tween) => {
                    let frame = tween.tick(dt);
                    self.surface.present(frame);
                    commit_settled = tween.is_complete();
                }
            }
        } else if let Some(run) = self.bounce.as_mut() {
            let frame = run.tween.tick(dt);
            self.surface.present(frame);
            bounce_settled = run.tween.is_complete();
        }

        if commit_settled {
            self.settle_commit(now);
        }
        if bounce_settled {
            self.settle_bounce();
        }
    }

    fn apply_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::Nav(direction) => self.perform_nav(direction),
            DeferredAction::RestoreLock => {
                self.lock.release(&mut self.calendar);
            }
            DeferredAction::ClearIndicator => {
                self.surface.clear_indicator();
                self.indicator = None;
            }
        }
    }

    /// Turn the page and snap the surface to the entry pose.
    fn perform_nav(&mut self, direction: NavDirection) {
        let Some(run) = self.commit.as_mut() else {
            return;
        };
        self.calendar.navigate(direction);

        let entry = SurfaceFrame::new(
            -run.direction.sign() * self.config.entry_distance,
            TRANSITION_OPACITY,
        );
        self.surface.present(entry);
        self.surface.force_reflow();
        run.stage = CommitStage::Snapped;
        tracing::debug!(direction = direction.as_str(), "navigated");
    }

    fn settle_commit(&mut self, now: Instant) {
        self.commit = None;
        self.last_follow = SurfaceFrame::rest();
        self.surface.clear_overrides();
        // The lock outlives the animation by a small margin so a stray
        // tap on finger-up cannot hit a just-re-enabled widget.
        self.deferred.schedule(
            now + self.config.release_delay,
            self.generations.current(),
            DeferredAction::RestoreLock,
        );
        tracing::debug!("commit settled");
    }

    fn settle_bounce(&mut self) {
        self.bounce = None;
        self.last_follow = SurfaceFrame::rest();
        self.surface.clear_overrides();
        tracing::debug!("bounce settled");
    }
}

impl<C: PagedView, S: SwipeSurface> Drop for SwipeController<C, S> {
    fn drop(&mut self) {
        // Backstop: never leave the view's edit flags forced off.
        if self.lock.is_engaged() {
            tracing::warn!("controller dropped with lock engaged; restoring flags");
            self.lock.release(&mut self.calendar);
        }
    }
}
