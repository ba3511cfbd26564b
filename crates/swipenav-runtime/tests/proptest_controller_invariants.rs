#![forbid(unsafe_code)]

//! Property-based invariant tests for the swipe controller.
//!
//! Invariants verified:
//! 1. Any touch script, once the gesture is closed and timers drain,
//!    leaves the controller settled with every edit flag restored
//! 2. Navigation never fires more often than touches were released
//! 3. An `Ignored` disposition implies the surface saw nothing for that
//!    event
//! 4. Every navigation pairs with exactly one forced reflow
//! 5. Identical event/clock timelines replay to identical surface op
//!    sequences
//!
//! Run:
//!   cargo test -p swipenav-runtime --test proptest_controller_invariants

use proptest::prelude::*;

use web_time::{Duration, Instant};

use swipenav_core::config::SwipeConfig;
use swipenav_core::geometry::Rect;
use swipenav_core::lock::EditFlag;
use swipenav_core::session::Disposition;
use swipenav_core::touch::{TouchEvent, TouchPhase};

use swipenav_runtime::testkit::{FakeCalendar, RecordingSurface, SurfaceOp};
use swipenav_runtime::SwipeController;

// ── Strategies ──────────────────────────────────────────────────────────────

fn arb_phase() -> impl Strategy<Value = TouchPhase> {
    prop_oneof![
        2 => Just(TouchPhase::Start),
        5 => Just(TouchPhase::Move),
        2 => Just(TouchPhase::End),
        1 => Just(TouchPhase::Cancel),
    ]
}

fn arb_coord() -> impl Strategy<Value = f32> {
    prop_oneof![
        12 => -100.0f32..900.0,
        1 => Just(f32::NAN),
    ]
}

fn arb_contacts() -> impl Strategy<Value = u8> {
    prop_oneof![
        8 => Just(1u8),
        1 => 0u8..4,
    ]
}

fn arb_event() -> impl Strategy<Value = TouchEvent> {
    (arb_phase(), arb_coord(), arb_coord(), arb_contacts())
        .prop_map(|(phase, x, y, contacts)| TouchEvent::new(phase, x, y, contacts))
}

fn arb_script() -> impl Strategy<Value = Vec<(TouchEvent, u8)>> {
    prop::collection::vec((arb_event(), 0u8..50), 0..40)
}

fn fixture() -> SwipeController<FakeCalendar, RecordingSurface> {
    let mut controller = SwipeController::new(
        FakeCalendar::new(),
        RecordingSurface::new(),
        SwipeConfig::default(),
    );
    controller
        .regions_mut()
        .set_viewport(Rect::from_size(800.0, 600.0));
    controller.init();
    controller
}

/// Feed the script with its per-event clock advances, then close any open
/// gesture and tick until every animation and timer has drained.
fn drive(script: &[(TouchEvent, u8)]) -> SwipeController<FakeCalendar, RecordingSurface> {
    let mut controller = fixture();
    let mut now = Instant::now();

    for (event, advance_ms) in script {
        now += Duration::from_millis(u64::from(*advance_ms));
        controller.process(event, now);
        controller.tick(now);
    }

    now += Duration::from_millis(1);
    controller.process(&TouchEvent::cancel(0.0, 0.0), now);
    for _ in 0..80 {
        now += Duration::from_millis(32);
        controller.tick(now);
    }
    controller
}

// ── 1. Drained controllers settle with flags restored ───────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn drained_scripts_settle_with_flags_restored(script in arb_script()) {
        let controller = drive(&script);

        prop_assert!(controller.is_settled());
        for flag in EditFlag::ALL {
            prop_assert_eq!(controller.calendar().flag(flag), Some(true));
        }
    }
}

// ── 2. Navigation bounded by releases ───────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn nav_never_exceeds_releases(script in arb_script()) {
        let releases = script
            .iter()
            .filter(|(event, _)| event.phase == TouchPhase::End)
            .count() as u32;

        let controller = drive(&script);
        prop_assert!(controller.calendar().nav_calls() <= releases);
    }
}

// ── 3. Ignored events leave the surface untouched ───────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn ignored_events_leave_surface_untouched(script in arb_script()) {
        let mut controller = fixture();
        let mut now = Instant::now();

        for (event, advance_ms) in &script {
            now += Duration::from_millis(u64::from(*advance_ms));
            let before = controller.surface().ops().len();
            let disposition = controller.process(event, now);
            if disposition == Disposition::Ignored {
                prop_assert_eq!(
                    controller.surface().ops().len(),
                    before,
                    "ignored event produced surface ops: {:?}",
                    event
                );
            }
            controller.tick(now);
        }
    }
}

// ── 4. Navigation pairs with reflow ─────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_nav_pairs_with_one_reflow(script in arb_script()) {
        let controller = drive(&script);

        let reflows = controller
            .surface()
            .count(|op| matches!(op, SurfaceOp::ForceReflow)) as u32;
        prop_assert_eq!(controller.calendar().nav_calls(), reflows);
    }
}

// ── 5. Identical timelines replay identically ───────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn identical_timelines_replay_identically(script in arb_script()) {
        let first = drive(&script);
        let second = drive(&script);

        prop_assert_eq!(first.surface().ops(), second.surface().ops());
        prop_assert_eq!(
            first.calendar().nav_calls(),
            second.calendar().nav_calls()
        );
    }
}
