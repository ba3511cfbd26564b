#![forbid(unsafe_code)]

//! Time-driven animation primitives.
//!
//! [`Tween`] produces eased progress in `[0, 1]` as wall time is fed in via
//! [`Animation::tick`]. Callers map progress onto concrete values with
//! [`lerp`]; the controller uses one tween per transition stage.
//!
//! # Invariants
//!
//! 1. `value()` is monotonically non-decreasing between resets.
//! 2. `value()` is exactly 1.0 once `is_complete()` returns true.
//! 3. Zero durations are clamped to 1ns so progress never divides by zero.
//! 4. Ticking past the end accumulates [`Animation::overshoot`] rather than
//!    wrapping.

use web_time::Duration;

/// An easing function mapping linear progress to eased progress.
///
/// Input and output are in `[0, 1]`.
pub type EasingFn = fn(f32) -> f32;

/// Identity easing.
#[must_use]
pub fn ease_linear(t: f32) -> f32 {
    t
}

/// Cubic ease-in: slow start, fast finish.
#[must_use]
pub fn ease_in(t: f32) -> f32 {
    t * t * t
}

/// Cubic ease-out: fast start, slow settle. The default for swipe
/// transitions; motion decelerating into place reads as physical.
#[must_use]
pub fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Cubic ease-in-out.
#[must_use]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

/// Linear interpolation between `a` and `b` at progress `t`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// A time-driven animation producing a scalar value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has reached its end.
    fn is_complete(&self) -> bool;

    /// Current value.
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time accumulated past the end, for chaining stages without drift.
    fn overshoot(&self) -> Duration;
}

/// Eased progress from 0.0 to 1.0 over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    elapsed: Duration,
    duration: Duration,
    easing: EasingFn,
}

impl Tween {
    /// Create a tween over `duration` with linear easing.
    ///
    /// Zero durations are clamped to 1ns.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
            easing: ease_linear,
        }
    }

    /// Set the easing function (builder style).
    #[must_use]
    pub fn easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// Total duration.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Elapsed time, capped at the duration.
    #[inline]
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed.min(self.duration)
    }

    /// Linear (un-eased) progress in `[0, 1]`.
    #[must_use]
    pub fn linear_progress(&self) -> f32 {
        if self.elapsed >= self.duration {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()) as f32
        }
    }
}

impl Animation for Tween {
    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f32 {
        (self.easing)(self.linear_progress()).clamp(0.0, 1.0)
    }

    fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.elapsed.saturating_sub(self.duration)
    }
}
