#![forbid(unsafe_code)]

//! Generation stamps for invalidating scheduled work.
//!
//! The controller defers work across animation stages (navigate at the hint
//! point, restore the edit lock after settle). When a new gesture starts or
//! the controller is torn down, everything previously scheduled must become
//! inert without being hunted down individually. [`GenerationSource`] hands
//! out [`Generation`] stamps; advancing the source strands every stamp
//! issued before it.
//!
//! Stamps are polled at drain time rather than signalled, so there is no
//! shared-state machinery here: the controller owns the source and checks
//! stamps on its own thread.

/// An opaque stamp tied to one controller epoch.
///
/// A stamp stays valid until the issuing [`GenerationSource`] advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

/// Issues and invalidates [`Generation`] stamps.
#[derive(Debug, Default)]
pub struct GenerationSource {
    current: u64,
}

impl GenerationSource {
    /// Create a source at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stamp new work should carry.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    /// Invalidate all outstanding stamps and return the new one.
    pub fn advance(&mut self) -> Generation {
        self.current = self.current.wrapping_add(1);
        Generation(self.current)
    }

    /// Whether `stamp` was issued in the current epoch.
    #[inline]
    #[must_use]
    pub fn is_current(&self, stamp: Generation) -> bool {
        stamp.0 == self.current
    }
}
