#![no_main]

use std::time::{Duration, Instant};

use libfuzzer_sys::fuzz_target;
use swipenav_core::config::SwipeConfig;
use swipenav_core::session::{SwipeTracker, TrackerState};
use swipenav_core::swipe::{FollowTransform, SwipeEvent};
use swipenav_core::touch::{TouchEvent, TouchPhase};

fuzz_target!(|data: &[u8]| {
    let config = SwipeConfig::default();
    let mut tracker = SwipeTracker::new(config.clone());
    let mut now = Instant::now();

    // Mirror of the session lifecycle, reconstructed from emitted events.
    let mut open = false;
    let mut engaged = false;

    for chunk in data.chunks_exact(6) {
        now += Duration::from_millis(u64::from(chunk[5] & 0x3F));
        let event = decode_event(chunk);
        let out = tracker.process(&event, now);

        for semantic in &out.events {
            match semantic {
                SwipeEvent::Began { x, y } => {
                    assert!(!open, "session began while one was open");
                    assert!(x.is_finite() && y.is_finite(), "Began with bad origin");
                    open = true;
                }
                SwipeEvent::FollowEngaged => {
                    assert!(open, "follow engaged without a session");
                    assert!(!engaged, "follow engaged twice in one session");
                    engaged = true;
                }
                SwipeEvent::FollowMoved { raw_dx, raw_dy } => {
                    assert!(engaged, "follow moved before engaging");
                    assert!(
                        raw_dx.is_finite() && raw_dy.is_finite(),
                        "non-finite follow delta"
                    );

                    // Any emitted delta must produce an in-range transform.
                    let t = FollowTransform::from_raw(*raw_dx, &config);
                    assert!(
                        t.offset.abs() <= config.max_follow,
                        "follow offset exceeds clamp"
                    );
                    assert!(
                        (1.0 - config.follow_opacity_dip..=1.0).contains(&t.opacity),
                        "follow opacity out of range"
                    );
                }
                SwipeEvent::Released { raw_dx, raw_dy, .. } => {
                    assert!(open, "release without a session");
                    assert!(
                        raw_dx.is_finite() && raw_dy.is_finite(),
                        "non-finite release delta"
                    );
                    open = false;
                    engaged = false;
                }
                SwipeEvent::Aborted { .. } => {
                    assert!(open, "abort without a session");
                    open = false;
                    engaged = false;
                }
            }
        }

        // Public state must agree with the event stream at every step.
        match tracker.state() {
            TrackerState::Idle => assert!(!open, "idle with an open session"),
            TrackerState::Tracking => assert!(open && !engaged, "tracking out of step"),
            TrackerState::Following => assert!(engaged, "following without engage"),
        }
    }

    // A cancel always lands the tracker back in idle.
    tracker.process(&TouchEvent::cancel(0.0, 0.0), now);
    assert_eq!(tracker.state(), TrackerState::Idle);
});

fn decode_event(chunk: &[u8]) -> TouchEvent {
    let phase = match chunk[0] & 0b11 {
        0 => TouchPhase::Start,
        1 => TouchPhase::Move,
        2 => TouchPhase::End,
        _ => TouchPhase::Cancel,
    };
    let contacts = (chunk[0] >> 2) & 0b11;
    let mut x = f32::from(i16::from_le_bytes([chunk[1], chunk[2]])) / 4.0;
    let mut y = f32::from(i16::from_le_bytes([chunk[3], chunk[4]])) / 4.0;

    // High bits opt into hostile coordinates; the tracker must shrug both
    // off without panicking.
    if chunk[0] & 0x40 != 0 {
        x = f32::NAN;
    }
    if chunk[0] & 0x80 != 0 {
        y = f32::INFINITY;
    }

    TouchEvent::new(phase, x, y, contacts)
}
