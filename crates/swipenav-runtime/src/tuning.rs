#![forbid(unsafe_code)]

//! Tuning-as-data for the swipe controller.
//!
//! Captures every gesture threshold and animation timing as a single
//! [`TuningProfile`] that can be loaded from TOML or JSON at startup,
//! removing the need for compile-time constant changes when tuning feel.
//!
//! # Loading
//!
//! ```toml
//! # swipenav-tuning.toml
//! [detection]
//! trigger_distance = 50.0
//! angle_threshold_deg = 30.0
//!
//! [follow]
//! damping_factor = 0.4
//! ```
//!
//! ```rust,ignore
//! let profile = TuningProfile::from_toml_file("swipenav-tuning.toml")?;
//! let profile = TuningProfile::from_json_str(json)?;
//! let config = profile.to_swipe_config();
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the value in [`SwipeConfig::default`], so
//! `TuningProfile::default()` produces the stock behavior and a partial
//! file only overrides what it names.

#[cfg(feature = "tuning-config")]
use std::path::Path;

#[cfg(feature = "tuning-config")]
use serde::{Deserialize, Serialize};

use web_time::Duration;

use swipenav_core::config::SwipeConfig;

// ---------------------------------------------------------------------------
// Top-level TuningProfile
// ---------------------------------------------------------------------------

/// Top-level tuning profile for swipe navigation.
///
/// Groups every tunable parameter into a single struct that can be loaded
/// from TOML or JSON. All fields default to the values in
/// [`SwipeConfig::default`]. Durations are expressed in milliseconds.
///
/// Range checks live in [`validate`](Self::validate); the controller
/// additionally sanitizes the resulting [`SwipeConfig`] at construction,
/// so a profile that skips validation cannot produce a degenerate
/// animation.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "tuning-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "tuning-config", serde(default))]
pub struct TuningProfile {
    /// Gesture qualification thresholds.
    pub detection: DetectionTuning,

    /// Finger-follow damping and hint parameters.
    pub follow: FollowTuning,

    /// Commit and bounce transition geometry and timing.
    pub transition: TransitionTuning,

    /// Post-transition release timing.
    pub release: ReleaseTuning,
}

impl Default for TuningProfile {
    fn default() -> Self {
        Self {
            detection: DetectionTuning::default(),
            follow: FollowTuning::default(),
            transition: TransitionTuning::default(),
            release: ReleaseTuning::default(),
        }
    }
}

impl TuningProfile {
    /// Load from a TOML string.
    #[cfg(feature = "tuning-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, TuningError> {
        toml::from_str(s).map_err(TuningError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "tuning-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TuningError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "tuning-config")]
    pub fn from_json_str(s: &str) -> Result<Self, TuningError> {
        serde_json::from_str(s).map_err(TuningError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "tuning-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(TuningError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the
    /// profile is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.detection.trigger_distance <= 0.0 {
            errors.push(format!(
                "detection.trigger_distance must be > 0, got {}",
                self.detection.trigger_distance
            ));
        }
        if self.detection.max_cross_drift <= 0.0 {
            errors.push(format!(
                "detection.max_cross_drift must be > 0, got {}",
                self.detection.max_cross_drift
            ));
        }
        if self.detection.angle_threshold_deg <= 0.0 || self.detection.angle_threshold_deg > 90.0 {
            errors.push(format!(
                "detection.angle_threshold_deg must be in (0, 90], got {}",
                self.detection.angle_threshold_deg
            ));
        }
        if self.detection.deadzone < 0.0 {
            errors.push(format!(
                "detection.deadzone must be >= 0, got {}",
                self.detection.deadzone
            ));
        }

        if self.follow.damping_factor <= 0.0 || self.follow.damping_factor > 1.0 {
            errors.push(format!(
                "follow.damping_factor must be in (0, 1], got {}",
                self.follow.damping_factor
            ));
        }
        if self.follow.max_follow <= 0.0 {
            errors.push(format!(
                "follow.max_follow must be > 0, got {}",
                self.follow.max_follow
            ));
        }
        if self.follow.opacity_dip < 0.0 || self.follow.opacity_dip >= 1.0 {
            errors.push(format!(
                "follow.opacity_dip must be in [0, 1), got {}",
                self.follow.opacity_dip
            ));
        }
        if self.follow.hint_fraction <= 0.0 || self.follow.hint_fraction > 1.0 {
            errors.push(format!(
                "follow.hint_fraction must be in (0, 1], got {}",
                self.follow.hint_fraction
            ));
        }

        if self.transition.exit_distance <= 0.0 {
            errors.push(format!(
                "transition.exit_distance must be > 0, got {}",
                self.transition.exit_distance
            ));
        }
        if self.transition.entry_distance <= 0.0 {
            errors.push(format!(
                "transition.entry_distance must be > 0, got {}",
                self.transition.entry_distance
            ));
        }
        if self.transition.commit_duration_ms == 0 {
            errors.push("transition.commit_duration_ms must be > 0".into());
        }
        if self.transition.bounce_duration_ms == 0 {
            errors.push("transition.bounce_duration_ms must be > 0".into());
        }
        if self.transition.nav_fraction <= 0.0 || self.transition.nav_fraction > 1.0 {
            errors.push(format!(
                "transition.nav_fraction must be in (0, 1], got {}",
                self.transition.nav_fraction
            ));
        }

        // Zero release delays are a valid choice, so no checks here.

        errors
    }

    /// Build a [`SwipeConfig`] from this profile.
    #[must_use]
    pub fn to_swipe_config(&self) -> SwipeConfig {
        SwipeConfig {
            trigger_distance: self.detection.trigger_distance,
            max_cross_drift: self.detection.max_cross_drift,
            angle_threshold_deg: self.detection.angle_threshold_deg,
            deadzone: self.detection.deadzone,
            damping_factor: self.follow.damping_factor,
            max_follow: self.follow.max_follow,
            follow_opacity_dip: self.follow.opacity_dip,
            hint_fraction: self.follow.hint_fraction,
            exit_distance: self.transition.exit_distance,
            entry_distance: self.transition.entry_distance,
            commit_duration: Duration::from_millis(self.transition.commit_duration_ms),
            bounce_duration: Duration::from_millis(self.transition.bounce_duration_ms),
            nav_fraction: self.transition.nav_fraction,
            release_delay: Duration::from_millis(self.release.lock_delay_ms),
            indicator_linger: Duration::from_millis(self.release.indicator_linger_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-profiles (flat, serde-friendly)
// ---------------------------------------------------------------------------

/// Gesture qualification tuning parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "tuning-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "tuning-config", serde(default))]
pub struct DetectionTuning {
    /// Minimum horizontal travel (px) for a swipe to commit. Default: 50.
    pub trigger_distance: f32,
    /// Maximum vertical drift (px) tolerated on commit. Default: 100.
    pub max_cross_drift: f32,
    /// Maximum angle from horizontal (degrees) to enter the follow state.
    /// Default: 30.
    pub angle_threshold_deg: f32,
    /// Horizontal movement (px) before the follow state can engage.
    /// Default: 10.
    pub deadzone: f32,
}

impl Default for DetectionTuning {
    fn default() -> Self {
        let d = SwipeConfig::default();
        Self {
            trigger_distance: d.trigger_distance,
            max_cross_drift: d.max_cross_drift,
            angle_threshold_deg: d.angle_threshold_deg,
            deadzone: d.deadzone,
        }
    }
}

/// Finger-follow tuning parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "tuning-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "tuning-config", serde(default))]
pub struct FollowTuning {
    /// Multiplier applied to raw horizontal travel. Default: 0.4.
    pub damping_factor: f32,
    /// Clamp for the damped follow offset, either direction (px).
    /// Default: 60.
    pub max_follow: f32,
    /// Maximum opacity reduction at full follow offset. Default: 0.25.
    pub opacity_dip: f32,
    /// Fraction of `trigger_distance` at which the directional hint shows.
    /// Default: 0.6.
    pub hint_fraction: f32,
}

impl Default for FollowTuning {
    fn default() -> Self {
        let d = SwipeConfig::default();
        Self {
            damping_factor: d.damping_factor,
            max_follow: d.max_follow,
            opacity_dip: d.follow_opacity_dip,
            hint_fraction: d.hint_fraction,
        }
    }
}

/// Commit and bounce transition tuning parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "tuning-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "tuning-config", serde(default))]
pub struct TransitionTuning {
    /// Exit-stage translation target (px). Default: 120.
    pub exit_distance: f32,
    /// Entry-pose translation (px) on the far side. Default: 100.
    pub entry_distance: f32,
    /// Duration of each commit stage (ms). Default: 200.
    pub commit_duration_ms: u64,
    /// Duration of the bounce-back animation (ms). Default: 200.
    pub bounce_duration_ms: u64,
    /// Fraction of the exit stage after which navigation fires.
    /// Default: 0.6.
    pub nav_fraction: f32,
}

impl Default for TransitionTuning {
    fn default() -> Self {
        let d = SwipeConfig::default();
        Self {
            exit_distance: d.exit_distance,
            entry_distance: d.entry_distance,
            commit_duration_ms: d.commit_duration.as_millis() as u64,
            bounce_duration_ms: d.bounce_duration.as_millis() as u64,
            nav_fraction: d.nav_fraction,
        }
    }
}

/// Post-transition release tuning parameters.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "tuning-config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "tuning-config", serde(default))]
pub struct ReleaseTuning {
    /// Delay between animation settle and edit-flag restore (ms).
    /// Default: 50.
    pub lock_delay_ms: u64,
    /// How long the transient commit indicator stays (ms). Default: 400.
    pub indicator_linger_ms: u64,
}

impl Default for ReleaseTuning {
    fn default() -> Self {
        let d = SwipeConfig::default();
        Self {
            lock_delay_ms: d.release_delay.as_millis() as u64,
            indicator_linger_ms: d.indicator_linger.as_millis() as u64,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a tuning profile.
#[derive(Debug)]
pub enum TuningError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "tuning-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "tuning-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "tuning-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "tuning-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "tuning-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "tuning-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
