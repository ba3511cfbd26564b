#![forbid(unsafe_code)]

//! Deterministic collaborator doubles for controller testing.
//!
//! The controller is generic over [`PagedView`] and [`SwipeSurface`], so
//! the whole choreography can be exercised headlessly: [`FakeCalendar`]
//! counts navigations and stores edit flags, [`RecordingSurface`] logs
//! every visual operation in order. Both live in the shipped crate (not
//! behind `cfg(test)`) so integration tests and downstream embedders get
//! the same doubles.

use swipenav_core::lock::EditFlag;
use swipenav_core::swipe::SwipeDirection;

use crate::paged_view::PagedView;
use crate::surface::{IndicatorMode, SurfaceFrame, SwipeSurface};

// ---------------------------------------------------------------------------
// FakeCalendar
// ---------------------------------------------------------------------------

/// In-memory paged view with four edit flags.
#[derive(Debug, Clone)]
pub struct FakeCalendar {
    flags: [Option<bool>; 4],
    prev_calls: u32,
    next_calls: u32,
}

impl FakeCalendar {
    /// A calendar with every edit flag present and on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: [Some(true); 4],
            prev_calls: 0,
            next_calls: 0,
        }
    }

    /// A calendar that reports every flag as absent, like a view whose
    /// widget has been torn down.
    #[must_use]
    pub fn without_flags() -> Self {
        Self {
            flags: [None; 4],
            prev_calls: 0,
            next_calls: 0,
        }
    }

    fn slot(flag: EditFlag) -> usize {
        flag.bit().bits().trailing_zeros() as usize
    }

    /// Current value of a flag, `None` when absent.
    #[must_use]
    pub fn flag(&self, flag: EditFlag) -> Option<bool> {
        self.flags[Self::slot(flag)]
    }

    /// Set a flag to a present value.
    pub fn set_flag(&mut self, flag: EditFlag, value: bool) {
        self.flags[Self::slot(flag)] = Some(value);
    }

    /// Make a flag absent.
    pub fn remove_flag(&mut self, flag: EditFlag) {
        self.flags[Self::slot(flag)] = None;
    }

    /// How many times `prev` was called.
    #[must_use]
    pub fn prev_calls(&self) -> u32 {
        self.prev_calls
    }

    /// How many times `next` was called.
    #[must_use]
    pub fn next_calls(&self) -> u32 {
        self.next_calls
    }

    /// Total navigations in either direction.
    #[must_use]
    pub fn nav_calls(&self) -> u32 {
        self.prev_calls + self.next_calls
    }
}

impl Default for FakeCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl PagedView for FakeCalendar {
    fn prev(&mut self) {
        self.prev_calls += 1;
    }

    fn next(&mut self) {
        self.next_calls += 1;
    }

    fn option(&self, flag: EditFlag) -> Option<bool> {
        self.flag(flag)
    }

    fn set_option(&mut self, flag: EditFlag, value: bool) {
        let slot = Self::slot(flag);
        // Absent flags swallow writes, like a missing widget.
        if self.flags[slot].is_some() {
            self.flags[slot] = Some(value);
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingSurface
// ---------------------------------------------------------------------------

/// One recorded surface operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    Present(SurfaceFrame),
    ShowIndicator(SwipeDirection, IndicatorMode),
    ClearIndicator,
    ForceReflow,
    ClearOverrides,
}

/// Surface that records every operation in call order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded operation, oldest first.
    #[must_use]
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.ops.clear();
    }

    /// All presented frames, oldest first.
    #[must_use]
    pub fn presents(&self) -> Vec<SurfaceFrame> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Present(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }

    /// The most recently presented frame.
    #[must_use]
    pub fn last_present(&self) -> Option<SurfaceFrame> {
        self.presents().last().copied()
    }

    /// Whether an indicator is showing after replaying the log.
    #[must_use]
    pub fn indicator_visible(&self) -> bool {
        let mut visible = false;
        for op in &self.ops {
            match op {
                SurfaceOp::ShowIndicator(..) => visible = true,
                SurfaceOp::ClearIndicator => visible = false,
                _ => {}
            }
        }
        visible
    }

    /// Count of operations matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&SurfaceOp) -> bool) -> usize {
        self.ops.iter().filter(|op| predicate(op)).count()
    }
}

impl SwipeSurface for RecordingSurface {
    fn present(&mut self, frame: SurfaceFrame) {
        self.ops.push(SurfaceOp::Present(frame));
    }

    fn show_indicator(&mut self, direction: SwipeDirection, mode: IndicatorMode) {
        self.ops.push(SurfaceOp::ShowIndicator(direction, mode));
    }

    fn clear_indicator(&mut self) {
        self.ops.push(SurfaceOp::ClearIndicator);
    }

    fn force_reflow(&mut self) {
        self.ops.push(SurfaceOp::ForceReflow);
    }

    fn clear_overrides(&mut self) {
        self.ops.push(SurfaceOp::ClearOverrides);
    }
}
