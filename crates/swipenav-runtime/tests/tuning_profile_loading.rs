#![forbid(unsafe_code)]

//! Loading tuning profiles from TOML and JSON.
//!
//! Covers:
//! 1. Partial TOML overrides named fields and keeps defaults elsewhere
//! 2. JSON loading mirrors TOML
//! 3. File loading for both formats
//! 4. Error surfaces: missing file, malformed input, validation failures
//! 5. A loaded profile builds a usable `SwipeConfig`
//!
//! Run:
//!   cargo test -p swipenav-runtime --test tuning_profile_loading \
//!     --features tuning-config

use web_time::Duration;

use swipenav_runtime::tuning::{TuningError, TuningProfile};

// ============================================================================
// 1/2. String loading
// ============================================================================

#[test]
fn partial_toml_overrides_named_fields_only() {
    let profile = TuningProfile::from_toml_str(
        r#"
        [detection]
        trigger_distance = 80.0

        [transition]
        commit_duration_ms = 300
        "#,
    )
    .unwrap();

    assert_eq!(profile.detection.trigger_distance, 80.0);
    assert_eq!(profile.transition.commit_duration_ms, 300);

    // Everything unnamed stays at its default.
    assert_eq!(profile.detection.deadzone, 10.0);
    assert_eq!(profile.follow.damping_factor, 0.4);
    assert_eq!(profile.transition.bounce_duration_ms, 200);
    assert_eq!(profile.release.indicator_linger_ms, 400);
}

#[test]
fn empty_toml_is_all_defaults() {
    let profile = TuningProfile::from_toml_str("").unwrap();
    let defaults = TuningProfile::default();
    assert_eq!(
        profile.detection.trigger_distance,
        defaults.detection.trigger_distance
    );
    assert_eq!(profile.release.lock_delay_ms, defaults.release.lock_delay_ms);
}

#[test]
fn json_loading_mirrors_toml() {
    let profile = TuningProfile::from_json_str(
        r#"{
            "follow": { "damping_factor": 0.5, "max_follow": 80.0 },
            "release": { "lock_delay_ms": 0 }
        }"#,
    )
    .unwrap();

    assert_eq!(profile.follow.damping_factor, 0.5);
    assert_eq!(profile.follow.max_follow, 80.0);
    assert_eq!(profile.release.lock_delay_ms, 0);
    assert_eq!(profile.detection.trigger_distance, 50.0);
}

#[test]
fn unknown_keys_are_ignored() {
    // Forward compatibility: older builds skip fields they do not know.
    let profile = TuningProfile::from_toml_str(
        r#"
        [detection]
        trigger_distance = 60.0
        future_knob = 1.0
        "#,
    )
    .unwrap();
    assert_eq!(profile.detection.trigger_distance, 60.0);
}

// ============================================================================
// 3. File loading
// ============================================================================

#[test]
fn toml_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tuning.toml");
    std::fs::write(
        &path,
        "[transition]\nexit_distance = 140.0\nnav_fraction = 0.5\n",
    )
    .unwrap();

    let profile = TuningProfile::from_toml_file(&path).unwrap();
    assert_eq!(profile.transition.exit_distance, 140.0);
    assert_eq!(profile.transition.nav_fraction, 0.5);
}

#[test]
fn json_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tuning.json");
    std::fs::write(&path, r#"{"detection": {"angle_threshold_deg": 45.0}}"#).unwrap();

    let profile = TuningProfile::from_json_file(&path).unwrap();
    assert_eq!(profile.detection.angle_threshold_deg, 45.0);
}

// ============================================================================
// 4. Error surfaces
// ============================================================================

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.toml");
    let err = TuningProfile::from_toml_file(&path).unwrap_err();
    assert!(matches!(err, TuningError::Io(_)), "got {err}");
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = TuningProfile::from_toml_str("[detection\ntrigger = ").unwrap_err();
    assert!(matches!(err, TuningError::Toml(_)));
    assert!(err.to_string().contains("TOML parse error"));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = TuningProfile::from_json_str("{\"detection\": ").unwrap_err();
    assert!(matches!(err, TuningError::Json(_)));
}

#[test]
fn out_of_range_profile_fails_validation() {
    let profile = TuningProfile::from_toml_str(
        r#"
        [detection]
        trigger_distance = -5.0

        [follow]
        damping_factor = 2.0
        "#,
    )
    .unwrap();

    let errors = profile.validate();
    assert!(errors.iter().any(|e| e.contains("trigger_distance")));
    assert!(errors.iter().any(|e| e.contains("damping_factor")));

    let err = TuningError::Validation(errors);
    assert!(err.to_string().contains("validation errors"));
}

// ============================================================================
// 5. Loaded profile drives the controller config
// ============================================================================

#[test]
fn loaded_profile_builds_swipe_config() {
    let profile = TuningProfile::from_toml_str(
        r#"
        [detection]
        trigger_distance = 70.0

        [transition]
        commit_duration_ms = 250
        nav_fraction = 0.4

        [release]
        lock_delay_ms = 100
        "#,
    )
    .unwrap();
    assert!(profile.validate().is_empty());

    let config = profile.to_swipe_config();
    assert_eq!(config.trigger_distance, 70.0);
    assert_eq!(config.commit_duration, Duration::from_millis(250));
    assert_eq!(config.release_delay, Duration::from_millis(100));
    assert_eq!(config.nav_point(), Duration::from_millis(100));
}
