#![forbid(unsafe_code)]

//! Swipe tuning parameters.

use web_time::Duration;

/// Minimum animation duration after sanitization. Zero-length tweens divide
/// by elapsed time, so degenerate durations are clamped up.
const MIN_DURATION: Duration = Duration::from_millis(1);

/// Minimum follow clamp after sanitization, keeps the opacity ratio finite.
const MIN_FOLLOW: f32 = 1.0;

/// Thresholds, damping, and timing for swipe navigation.
///
/// Immutable for the lifetime of a controller. Pass through
/// [`sanitized`](SwipeConfig::sanitized) before use; the controller does
/// this on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeConfig {
    /// Minimum horizontal distance (px) for a swipe to commit (default: 50.0).
    pub trigger_distance: f32,
    /// Maximum vertical drift (px) tolerated on commit (default: 100.0).
    pub max_cross_drift: f32,
    /// Maximum angle from horizontal (degrees) to enter the follow state
    /// (default: 30.0).
    pub angle_threshold_deg: f32,
    /// Horizontal movement (px) before the follow state can engage
    /// (default: 10.0).
    pub deadzone: f32,
    /// Multiplier applied to raw horizontal travel for the follow offset
    /// (default: 0.4).
    pub damping_factor: f32,
    /// Clamp for the damped follow offset, either direction (px)
    /// (default: 60.0).
    pub max_follow: f32,
    /// Maximum opacity reduction at full follow offset (default: 0.25,
    /// i.e. opacity bottoms out at 0.75 while following).
    pub follow_opacity_dip: f32,
    /// Fraction of `trigger_distance` at which the directional hint shows
    /// (default: 0.6).
    pub hint_fraction: f32,
    /// Exit-stage translation target (px) for a committed swipe
    /// (default: 120.0).
    pub exit_distance: f32,
    /// Entry-pose translation (px) the surface snaps to on the far side
    /// (default: 100.0).
    pub entry_distance: f32,
    /// Duration of each commit stage, exit and entry (default: 200ms).
    pub commit_duration: Duration,
    /// Duration of the bounce-back animation (default: 200ms).
    pub bounce_duration: Duration,
    /// Fraction of the exit stage after which navigation fires and the
    /// entry pose is snapped (default: 0.6).
    pub nav_fraction: f32,
    /// Delay between animation settle and lock release, so a stray tap on
    /// finger-up cannot hit a just-re-enabled widget (default: 50ms).
    pub release_delay: Duration,
    /// How long the transient commit indicator stays before auto-clearing
    /// (default: 400ms).
    pub indicator_linger: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            trigger_distance: 50.0,
            max_cross_drift: 100.0,
            angle_threshold_deg: 30.0,
            deadzone: 10.0,
            damping_factor: 0.4,
            max_follow: 60.0,
            follow_opacity_dip: 0.25,
            hint_fraction: 0.6,
            exit_distance: 120.0,
            entry_distance: 100.0,
            commit_duration: Duration::from_millis(200),
            bounce_duration: Duration::from_millis(200),
            nav_fraction: 0.6,
            release_delay: Duration::from_millis(50),
            indicator_linger: Duration::from_millis(400),
        }
    }
}

impl SwipeConfig {
    /// Clamp degenerate values into usable ranges.
    ///
    /// Non-finite distances fall back to their defaults, negative distances
    /// clamp to zero (`max_follow` to a small positive minimum), fractions
    /// clamp to `[0, 1]`, the angle to `[0, 90]`, and zero durations to 1ms.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        self.trigger_distance = sane_distance(self.trigger_distance, d.trigger_distance);
        self.max_cross_drift = sane_distance(self.max_cross_drift, d.max_cross_drift);
        self.deadzone = sane_distance(self.deadzone, d.deadzone);
        self.exit_distance = sane_distance(self.exit_distance, d.exit_distance);
        self.entry_distance = sane_distance(self.entry_distance, d.entry_distance);
        self.max_follow = sane_distance(self.max_follow, d.max_follow).max(MIN_FOLLOW);

        self.angle_threshold_deg = if self.angle_threshold_deg.is_finite() {
            self.angle_threshold_deg.clamp(0.0, 90.0)
        } else {
            d.angle_threshold_deg
        };

        self.damping_factor = sane_fraction(self.damping_factor, d.damping_factor);
        self.follow_opacity_dip = sane_fraction(self.follow_opacity_dip, d.follow_opacity_dip);
        self.hint_fraction = sane_fraction(self.hint_fraction, d.hint_fraction);
        self.nav_fraction = sane_fraction(self.nav_fraction, d.nav_fraction);

        self.commit_duration = self.commit_duration.max(MIN_DURATION);
        self.bounce_duration = self.bounce_duration.max(MIN_DURATION);
        // A zero release delay or indicator linger is a valid choice.

        self
    }

    /// Raw distance at which the directional hint becomes visible.
    #[inline]
    #[must_use]
    pub fn hint_distance(&self) -> f32 {
        self.trigger_distance * self.hint_fraction
    }

    /// Elapsed exit-stage time at which navigation fires, rounded to whole
    /// milliseconds so clean configs give clean schedule points.
    #[inline]
    #[must_use]
    pub fn nav_point(&self) -> Duration {
        let ms = self.commit_duration.as_secs_f64() * 1e3 * f64::from(self.nav_fraction);
        Duration::from_millis(ms.round() as u64)
    }
}

fn sane_distance(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value.max(0.0) } else { fallback }
}

fn sane_fraction(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_already_sane() {
        let config = SwipeConfig::default();
        assert_eq!(config.clone().sanitized(), config);
    }

    #[test]
    fn sanitize_clamps_negative_and_nonfinite() {
        let config = SwipeConfig {
            trigger_distance: -5.0,
            max_cross_drift: f32::NAN,
            max_follow: -1.0,
            damping_factor: 3.0,
            nav_fraction: f32::INFINITY,
            commit_duration: Duration::ZERO,
            ..SwipeConfig::default()
        }
        .sanitized();

        assert_eq!(config.trigger_distance, 0.0);
        assert_eq!(config.max_cross_drift, SwipeConfig::default().max_cross_drift);
        assert_eq!(config.max_follow, 1.0);
        assert_eq!(config.damping_factor, 1.0);
        assert_eq!(config.nav_fraction, SwipeConfig::default().nav_fraction);
        assert_eq!(config.commit_duration, Duration::from_millis(1));
    }

    #[test]
    fn angle_clamps_to_quarter_turn() {
        let config = SwipeConfig {
            angle_threshold_deg: 180.0,
            ..SwipeConfig::default()
        }
        .sanitized();
        assert_eq!(config.angle_threshold_deg, 90.0);
    }

    #[test]
    fn hint_distance_tracks_trigger() {
        let config = SwipeConfig::default();
        assert!((config.hint_distance() - 30.0).abs() < 1e-4);
    }

    #[test]
    fn nav_point_is_fraction_of_commit() {
        let config = SwipeConfig::default();
        assert_eq!(config.nav_point(), Duration::from_millis(120));
    }
}
