#![no_main]

use std::time::{Duration, Instant};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use swipenav_core::config::SwipeConfig;
use swipenav_core::geometry::Rect;
use swipenav_core::lock::EditFlag;
use swipenav_core::touch::TouchEvent;
use swipenav_runtime::{FakeCalendar, RecordingSurface, SwipeController};

#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    Start { x: i16, y: i16 },
    Move { x: i16, y: i16 },
    PoisonMove,
    End { x: i16, y: i16 },
    Cancel,
    MultiMove { x: i16, y: i16, contacts: u8 },
    Tick,
    Reinit,
}

#[derive(Arbitrary, Debug)]
struct Script {
    steps: Vec<(Op, u8)>,
}

fn scale(v: i16) -> f32 {
    f32::from(v) / 40.0
}

fuzz_target!(|script: Script| {
    if script.steps.len() > 256 {
        return;
    }

    let mut controller = SwipeController::new(
        FakeCalendar::new(),
        RecordingSurface::new(),
        SwipeConfig::default(),
    );
    controller
        .regions_mut()
        .set_viewport(Rect::from_size(800.0, 600.0));
    controller.init();

    let mut now = Instant::now();
    let mut releases: u32 = 0;

    for (op, advance) in script.steps {
        now += Duration::from_millis(u64::from(advance));
        match op {
            Op::Start { x, y } => {
                controller.process(&TouchEvent::start(scale(x), scale(y)), now);
            }
            Op::Move { x, y } => {
                controller.process(&TouchEvent::moved(scale(x), scale(y)), now);
            }
            Op::PoisonMove => {
                controller.process(&TouchEvent::moved(f32::NAN, 0.0), now);
            }
            Op::End { x, y } => {
                releases += 1;
                controller.process(&TouchEvent::end(scale(x), scale(y)), now);
            }
            Op::Cancel => {
                controller.process(&TouchEvent::cancel(0.0, 0.0), now);
            }
            Op::MultiMove { x, y, contacts } => {
                let event = TouchEvent::moved(scale(x), scale(y)).with_contacts(contacts % 4);
                controller.process(&event, now);
            }
            Op::Tick => controller.tick(now),
            Op::Reinit => {
                controller.destroy();
                controller.init();
            }
        }
    }

    // Drain: close any open gesture, then run the clock past every deferred
    // horizon.
    controller.process(&TouchEvent::cancel(0.0, 0.0), now);
    for _ in 0..100 {
        now += Duration::from_millis(32);
        controller.tick(now);
    }

    assert!(controller.is_settled(), "controller failed to settle");
    for flag in EditFlag::ALL {
        assert_eq!(
            controller.calendar().flag(flag),
            Some(true),
            "edit flag left disabled after drain"
        );
    }
    assert!(
        controller.calendar().nav_calls() <= releases,
        "navigated more often than the finger lifted"
    );
});
