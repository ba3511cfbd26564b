#![forbid(unsafe_code)]

//! End-to-end swipe flows through the controller with an explicit clock.
//!
//! Covers:
//! 1. A committed swipe navigates exactly once, mid-exit, and restores the
//!    edit flags after the release delay
//! 2. A short swipe bounces back with no navigation
//! 3. A tap runs the bounce path without ever touching the flags
//! 4. Touch starts in blocked regions and outside the viewport are inert
//! 5. Extra contacts mid-gesture are ignored without disturbing the follow
//! 6. The controller is reusable for a second gesture after settling
//! 7. The controller's outcome agrees with a bare tracker fed the same script
//!
//! Run:
//!   cargo test -p swipenav-runtime --test swipe_flows

use web_time::{Duration, Instant};

use swipenav_core::config::SwipeConfig;
use swipenav_core::geometry::Rect;
use swipenav_core::lock::EditFlag;
use swipenav_core::region::BlockKind;
use swipenav_core::session::{Disposition, SwipeTracker};
use swipenav_core::swipe::{GestureVerdict, SwipeEvent};
use swipenav_core::touch::TouchEvent;

use swipenav_runtime::testkit::{FakeCalendar, RecordingSurface, SurfaceOp};
use swipenav_runtime::{ControllerPhase, SwipeController};

const STEP: Duration = Duration::from_millis(16);

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

/// Tick at 16ms steps until the controller settles. Panics if it never does.
fn settle(
    controller: &mut SwipeController<FakeCalendar, RecordingSurface>,
    mut now: Instant,
) -> Instant {
    for _ in 0..200 {
        if controller.is_settled() {
            return now;
        }
        now += STEP;
        controller.tick(now);
    }
    panic!("controller did not settle within 200 ticks");
}

fn all_flags(calendar: &FakeCalendar, expected: Option<bool>) -> bool {
    EditFlag::ALL.iter().all(|&f| calendar.flag(f) == expected)
}

// ============================================================================
// 1. Committed swipe: one navigation mid-exit, delayed flag restore
// ============================================================================

#[test]
fn committed_swipe_navigates_once_with_delayed_restore() {
    let mut c = fixture();
    let t0 = Instant::now();

    c.process(&TouchEvent::start(300.0, 200.0), t0);
    c.process(&TouchEvent::moved(320.0, 201.0), t0 + Duration::from_millis(20));
    c.process(&TouchEvent::moved(350.0, 202.0), t0 + Duration::from_millis(40));
    c.process(&TouchEvent::moved(385.0, 204.0), t0 + Duration::from_millis(60));

    // Mid-follow: flags forced off, view follows the finger.
    assert_eq!(c.phase(), ControllerPhase::Following);
    assert!(all_flags(c.calendar(), Some(false)));
    assert!(c.surface().indicator_visible());

    let released = t0 + Duration::from_millis(80);
    c.process(&TouchEvent::end(400.0, 205.0), released);
    assert_eq!(c.phase(), ControllerPhase::Committing);
    assert_eq!(c.calendar().nav_calls(), 0);

    // Navigation fires at 60% of the 200ms exit stage.
    c.tick(released + Duration::from_millis(119));
    assert_eq!(c.calendar().nav_calls(), 0);
    c.tick(released + Duration::from_millis(120));
    assert_eq!(c.calendar().prev_calls(), 1);
    assert_eq!(c.calendar().next_calls(), 0);
    assert_eq!(
        c.surface().count(|op| matches!(op, SurfaceOp::ForceReflow)),
        1
    );

    // The snap presented the entry pose on the far side at dip opacity.
    let snap = c.surface().last_present().unwrap();
    assert!((snap.translation_x + 100.0).abs() < 1e-3);
    assert!((snap.opacity - 0.6).abs() < 1e-3);

    // Entry animation starts on the following tick and runs 200ms.
    let mut now = released + Duration::from_millis(120);
    while now < released + Duration::from_millis(336) {
        now += STEP;
        c.tick(now);
    }
    assert_eq!(c.phase(), ControllerPhase::Idle);

    // Flags stay off through the release delay, then restore. The entry
    // settled on the 16ms tick grid at +344, so the restore is due at +394.
    c.tick(released + Duration::from_millis(350));
    assert!(all_flags(c.calendar(), Some(false)));
    c.tick(released + Duration::from_millis(394));
    assert!(all_flags(c.calendar(), Some(true)));

    // The transient indicator outlives the transition until the linger
    // point.
    assert!(c.surface().indicator_visible());
    c.tick(released + Duration::from_millis(400));
    assert!(!c.surface().indicator_visible());

    assert!(c.is_settled());
    assert_eq!(c.calendar().nav_calls(), 1);
}

#[test]
fn left_swipe_navigates_next() {
    let mut c = fixture();
    let t0 = Instant::now();

    c.process(&TouchEvent::start(500.0, 300.0), t0);
    c.process(&TouchEvent::moved(460.0, 300.0), t0);
    c.process(&TouchEvent::end(420.0, 302.0), t0);

    settle(&mut c, t0);

    assert_eq!(c.calendar().next_calls(), 1);
    assert_eq!(c.calendar().prev_calls(), 0);
    assert!(all_flags(c.calendar(), Some(true)));
}

// ============================================================================
// 2. Short swipe: bounce, no navigation
// ============================================================================

#[test]
fn short_swipe_bounces_without_navigation() {
    let mut c = fixture();
    let t0 = Instant::now();

    c.process(&TouchEvent::start(300.0, 200.0), t0);
    c.process(&TouchEvent::moved(335.0, 200.0), t0);
    assert!(c.surface().indicator_visible());

    c.process(&TouchEvent::end(335.0, 200.0), t0);
    assert_eq!(c.phase(), ControllerPhase::Bouncing);

    // The lock lifts and the hint clears as soon as the bounce starts.
    assert!(all_flags(c.calendar(), Some(true)));
    assert!(!c.surface().indicator_visible());

    let end = settle(&mut c, t0);
    assert!(end - t0 <= Duration::from_millis(250));

    assert_eq!(c.calendar().nav_calls(), 0);
    assert_eq!(
        c.surface().count(|op| matches!(op, SurfaceOp::ForceReflow)),
        0
    );

    // The bounce lands back at rest.
    let last = c.surface().last_present().unwrap();
    assert!(last.translation_x.abs() < 1e-3);
    assert!((last.opacity - 1.0).abs() < 1e-3);
}

#[test]
fn drifting_swipe_bounces() {
    let mut c = fixture();
    let t0 = Instant::now();

    // Long but diagonal: vertical drift disqualifies it.
    c.process(&TouchEvent::start(300.0, 100.0), t0);
    c.process(&TouchEvent::moved(380.0, 180.0), t0);
    c.process(&TouchEvent::end(450.0, 280.0), t0);

    assert_eq!(c.phase(), ControllerPhase::Bouncing);
    settle(&mut c, t0);
    assert_eq!(c.calendar().nav_calls(), 0);
}

// ============================================================================
// 3. Tap: bounce path, flags untouched
// ============================================================================

#[test]
fn tap_never_touches_flags() {
    let mut c = fixture();
    let t0 = Instant::now();

    c.process(&TouchEvent::start(50.0, 50.0), t0);
    assert!(all_flags(c.calendar(), Some(true)));
    c.process(&TouchEvent::end(50.0, 50.0), t0);

    assert_eq!(c.phase(), ControllerPhase::Bouncing);
    assert!(all_flags(c.calendar(), Some(true)));

    settle(&mut c, t0);
    assert_eq!(c.calendar().nav_calls(), 0);
    assert_eq!(
        c.surface()
            .count(|op| matches!(op, SurfaceOp::ShowIndicator(..))),
        0
    );
}

// ============================================================================
// 4. Region gating
// ============================================================================

#[test]
fn gesture_from_toolbar_is_inert() {
    let mut c = fixture();
    c.regions_mut()
        .block(Rect::new(0.0, 0.0, 800.0, 48.0), BlockKind::Toolbar);
    let t0 = Instant::now();

    assert_eq!(
        c.process(&TouchEvent::start(400.0, 20.0), t0),
        Disposition::Ignored
    );
    // Follow-up events have no session to act on.
    assert_eq!(
        c.process(&TouchEvent::moved(480.0, 22.0), t0),
        Disposition::Ignored
    );
    assert_eq!(
        c.process(&TouchEvent::end(520.0, 24.0), t0),
        Disposition::Ignored
    );

    assert_eq!(c.phase(), ControllerPhase::Idle);
    assert!(c.surface().ops().is_empty());
    assert!(all_flags(c.calendar(), Some(true)));
    assert_eq!(c.calendar().nav_calls(), 0);
}

#[test]
fn gesture_from_modal_is_inert() {
    let mut c = fixture();
    c.regions_mut()
        .block(Rect::new(200.0, 100.0, 400.0, 400.0), BlockKind::Modal);
    let t0 = Instant::now();

    assert_eq!(
        c.process(&TouchEvent::start(400.0, 300.0), t0),
        Disposition::Ignored
    );
    assert!(c.surface().ops().is_empty());

    // Outside the modal the same swipe works.
    c.process(&TouchEvent::start(100.0, 550.0), t0);
    assert_eq!(c.phase(), ControllerPhase::Tracking);
}

#[test]
fn start_outside_viewport_is_inert() {
    let mut c = fixture();
    let t0 = Instant::now();

    assert_eq!(
        c.process(&TouchEvent::start(900.0, 300.0), t0),
        Disposition::Ignored
    );
    assert_eq!(c.phase(), ControllerPhase::Idle);
}

#[test]
fn unblocking_reopens_a_region() {
    let mut c = fixture();
    c.regions_mut()
        .block(Rect::new(0.0, 0.0, 800.0, 48.0), BlockKind::Toolbar);
    let t0 = Instant::now();

    assert_eq!(
        c.process(&TouchEvent::start(400.0, 20.0), t0),
        Disposition::Ignored
    );

    c.regions_mut().unblock(BlockKind::Toolbar);
    c.process(&TouchEvent::start(400.0, 20.0), t0);
    assert_eq!(c.phase(), ControllerPhase::Tracking);
}

// ============================================================================
// 5. Multi-contact interference
// ============================================================================

#[test]
fn second_contact_is_ignored_and_gesture_completes() {
    let mut c = fixture();
    let t0 = Instant::now();

    c.process(&TouchEvent::start(300.0, 200.0), t0);
    c.process(&TouchEvent::moved(360.0, 200.0), t0);
    let presents_before = c.surface().presents().len();

    // A second finger lands and drags somewhere else entirely.
    let pinch = TouchEvent::moved(600.0, 400.0).with_contacts(2);
    assert_eq!(c.process(&pinch, t0), Disposition::Ignored);
    assert_eq!(c.surface().presents().len(), presents_before);
    assert_eq!(c.phase(), ControllerPhase::Following);

    // The original finger lifts; the verdict uses its travel only.
    c.process(&TouchEvent::end(400.0, 203.0), t0);
    settle(&mut c, t0);
    assert_eq!(c.calendar().prev_calls(), 1);
}

// ============================================================================
// 6. Reuse after settling
// ============================================================================

#[test]
fn controller_is_reusable_after_commit() {
    let mut c = fixture();
    let t0 = Instant::now();

    c.process(&TouchEvent::start(300.0, 200.0), t0);
    c.process(&TouchEvent::moved(360.0, 200.0), t0);
    c.process(&TouchEvent::end(400.0, 202.0), t0);
    let rested = settle(&mut c, t0);
    assert_eq!(c.calendar().prev_calls(), 1);

    let t1 = rested + Duration::from_millis(100);
    c.process(&TouchEvent::start(500.0, 300.0), t1);
    c.process(&TouchEvent::moved(440.0, 300.0), t1);
    c.process(&TouchEvent::end(400.0, 301.0), t1);
    settle(&mut c, t1);

    assert_eq!(c.calendar().prev_calls(), 1);
    assert_eq!(c.calendar().next_calls(), 1);
    assert!(all_flags(c.calendar(), Some(true)));
}

#[test]
fn disposition_suppresses_only_horizontal_moves() {
    let mut c = fixture();
    let t0 = Instant::now();

    c.process(&TouchEvent::start(300.0, 200.0), t0);

    // Horizontal-dominant move: consumed so the host suppresses scrolling.
    assert_eq!(
        c.process(&TouchEvent::moved(340.0, 210.0), t0),
        Disposition::Consumed
    );
    // Vertical-dominant move: passed through so native scroll can win.
    assert_eq!(
        c.process(&TouchEvent::moved(340.0, 260.0), t0),
        Disposition::Passthrough
    );
}

// ============================================================================
// 7. Controller outcome matches a bare tracker on the same script
// ============================================================================

// The controller embeds its own tracker; a standalone tracker handed the
// identical pointer path must reach the same commit-or-bounce conclusion.
#[test]
fn controller_navigation_matches_bare_tracker_verdict() {
    let scripts: [[TouchEvent; 3]; 2] = [
        [
            TouchEvent::start(300.0, 200.0),
            TouchEvent::moved(360.0, 201.0),
            TouchEvent::end(400.0, 202.0),
        ],
        [
            TouchEvent::start(300.0, 200.0),
            TouchEvent::moved(315.0, 200.0),
            TouchEvent::end(320.0, 200.0),
        ],
    ];

    for script in &scripts {
        let mut tracker = SwipeTracker::new(SwipeConfig::default());
        let verdict = tracker
            .drive(script, Instant::now())
            .last()
            .and_then(SwipeEvent::verdict);
        let expected_navs = match verdict {
            Some(GestureVerdict::Commit(_)) => 1,
            _ => 0,
        };

        let mut c = fixture();
        let t0 = Instant::now();
        for event in script {
            c.process(event, t0);
        }
        settle(&mut c, t0);

        assert_eq!(c.calendar().nav_calls(), expected_navs);
        assert!(all_flags(c.calendar(), Some(true)));
    }
}
