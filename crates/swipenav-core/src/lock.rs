#![forbid(unsafe_code)]

//! Interaction-lock data model.
//!
//! While a swipe is being followed, the calendar's own pointer affordances
//! (event dragging, range selection, resize handles) must not fire. The
//! controller freezes the four edit flags for the duration of the gesture
//! and restores them afterward. This module is the pure data side: which
//! flags exist, and a snapshot of their pre-gesture values. The
//! engage/release discipline lives in the runtime crate.
//!
//! # Invariants
//!
//! 1. A snapshot never reports a value for a flag outside its `known` set.
//! 2. Snapshots are value types; capturing twice cannot blend two states.

use bitflags::bitflags;

/// One of the calendar's edit-interaction options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditFlag {
    /// Events may be dragged.
    Editable,
    /// Date ranges may be selected.
    Selectable,
    /// Event start times may be dragged.
    EventStartEditable,
    /// Event durations may be resized.
    EventDurationEditable,
}

impl EditFlag {
    /// All four flags, in capture order.
    pub const ALL: [EditFlag; 4] = [
        EditFlag::Editable,
        EditFlag::Selectable,
        EditFlag::EventStartEditable,
        EditFlag::EventDurationEditable,
    ];

    /// The single-bit set for this flag.
    #[must_use]
    pub fn bit(self) -> EditFlags {
        match self {
            Self::Editable => EditFlags::EDITABLE,
            Self::Selectable => EditFlags::SELECTABLE,
            Self::EventStartEditable => EditFlags::EVENT_START,
            Self::EventDurationEditable => EditFlags::EVENT_DURATION,
        }
    }

    /// Option name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Editable => "editable",
            Self::Selectable => "selectable",
            Self::EventStartEditable => "event_start_editable",
            Self::EventDurationEditable => "event_duration_editable",
        }
    }
}

bitflags! {
    /// Set of edit-interaction flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EditFlags: u8 {
        /// No flags.
        const NONE = 0b0000;
        /// Events may be dragged.
        const EDITABLE = 0b0001;
        /// Date ranges may be selected.
        const SELECTABLE = 0b0010;
        /// Event start times may be dragged.
        const EVENT_START = 0b0100;
        /// Event durations may be resized.
        const EVENT_DURATION = 0b1000;
    }
}

/// Pre-gesture values of the edit flags.
///
/// `known` records which flags the calendar actually reported; `enabled`
/// records which of those were on. Restore writes back only `known` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockSnapshot {
    /// Flags that were reported as enabled.
    pub enabled: EditFlags,
    /// Flags the calendar reported at all.
    pub known: EditFlags,
}

impl LockSnapshot {
    /// Empty snapshot: nothing known, nothing to restore.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record one flag's observed value. `None` means the calendar did not
    /// report the flag; it stays out of `known`.
    pub fn record(&mut self, flag: EditFlag, value: Option<bool>) {
        if let Some(on) = value {
            self.known |= flag.bit();
            self.enabled.set(flag.bit(), on);
        }
    }

    /// The captured value of a flag, if it was reported.
    #[must_use]
    pub fn value_of(&self, flag: EditFlag) -> Option<bool> {
        if self.known.contains(flag.bit()) {
            Some(self.enabled.contains(flag.bit()))
        } else {
            None
        }
    }

    /// Whether the snapshot captured nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}
