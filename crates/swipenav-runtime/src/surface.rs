#![forbid(unsafe_code)]

//! The visual surface the controller animates.
//!
//! [`SwipeSurface`] is the write-only sink for everything the user sees
//! during a gesture: the horizontal translation and opacity of the view,
//! the directional indicator overlay, and the style cleanup when a
//! transition settles. The controller computes frames; the surface applies
//! them however the host renders.

use swipenav_core::swipe::SwipeDirection;

/// One visual state of the animated view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFrame {
    /// Horizontal translation in pixels. Positive moves right.
    pub translation_x: f32,
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
}

impl SurfaceFrame {
    #[inline]
    #[must_use]
    pub const fn new(translation_x: f32, opacity: f32) -> Self {
        Self {
            translation_x,
            opacity,
        }
    }

    /// The untransformed resting state.
    #[inline]
    #[must_use]
    pub const fn rest() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl Default for SurfaceFrame {
    fn default() -> Self {
        Self::rest()
    }
}

/// How long an indicator stays up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    /// Shown while the finger is down; cleared on release or abort.
    Persistent,
    /// Flashed on commit; the controller clears it after a linger delay.
    Transient,
}

/// Sink for the controller's visual output.
///
/// Implementations must tolerate redundant calls: `clear_indicator` with no
/// indicator showing and `clear_overrides` at rest are both no-ops.
pub trait SwipeSurface {
    /// Apply a translation/opacity frame to the view.
    fn present(&mut self, frame: SurfaceFrame);

    /// Show the directional indicator overlay, replacing any indicator
    /// already visible.
    fn show_indicator(&mut self, direction: SwipeDirection, mode: IndicatorMode);

    /// Remove the indicator overlay.
    fn clear_indicator(&mut self);

    /// Force a synchronous layout pass.
    ///
    /// Called between the post-navigation snap and the entry animation so
    /// the snap position is observed before the view animates from it.
    fn force_reflow(&mut self);

    /// Drop every transform/opacity override, returning the view to its
    /// natural style.
    fn clear_overrides(&mut self);
}

impl<S: SwipeSurface + ?Sized> SwipeSurface for &mut S {
    fn present(&mut self, frame: SurfaceFrame) {
        (**self).present(frame);
    }

    fn show_indicator(&mut self, direction: SwipeDirection, mode: IndicatorMode) {
        (**self).show_indicator(direction, mode);
    }

    fn clear_indicator(&mut self) {
        (**self).clear_indicator();
    }

    fn force_reflow(&mut self) {
        (**self).force_reflow();
    }

    fn clear_overrides(&mut self) {
        (**self).clear_overrides();
    }
}
