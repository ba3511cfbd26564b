#![forbid(unsafe_code)]

//! Edit-flag locking around an active swipe.
//!
//! While the view follows a finger, its editing affordances (drag-create,
//! select, event move, event resize) must not fire from the same touches.
//! [`InteractionLock`] captures the current value of every edit flag,
//! forces them all off, and restores the captured values when the gesture
//! settles.
//!
//! # Invariants
//!
//! 1. Engage is idempotent: a second engage without a release changes
//!    nothing and keeps the first snapshot.
//! 2. Release restores each flag at most once; a release without an engage
//!    is a no-op.
//! 3. Flags the view reports as absent are skipped on capture and restore;
//!    a view with no flags at all still locks and unlocks cleanly.

use swipenav_core::lock::{EditFlag, LockSnapshot};

use crate::paged_view::PagedView;

/// Captures, forces off, and restores the view's edit flags.
#[derive(Debug, Default)]
pub struct InteractionLock {
    snapshot: Option<LockSnapshot>,
}

impl InteractionLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a snapshot is currently held.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Capture the view's edit flags and force them off.
    ///
    /// Idempotent: if a snapshot is already held this does nothing.
    pub fn engage<V: PagedView + ?Sized>(&mut self, view: &mut V) {
        if self.snapshot.is_some() {
            return;
        }
        let mut snapshot = LockSnapshot::empty();
        for flag in EditFlag::ALL {
            let current = view.option(flag);
            snapshot.record(flag, current);
            if current.is_some() {
                view.set_option(flag, false);
            }
        }
        tracing::debug!(snapshot = ?snapshot, "interaction lock engaged");
        self.snapshot = Some(snapshot);
    }

    /// Restore the captured flags, if any.
    ///
    /// Returns `true` when a snapshot was actually restored.
    pub fn release<V: PagedView + ?Sized>(&mut self, view: &mut V) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        for flag in EditFlag::ALL {
            if let Some(value) = snapshot.value_of(flag) {
                view.set_option(flag, value);
            }
        }
        tracing::debug!("interaction lock released");
        true
    }
}
