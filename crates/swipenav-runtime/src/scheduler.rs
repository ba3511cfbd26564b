#![forbid(unsafe_code)]

//! Time-ordered queue of deferred controller actions.
//!
//! Replaces ad-hoc timer callbacks with an explicit queue the controller
//! drains on every tick. Each entry carries a [`Generation`] stamp; entries
//! stranded by [`GenerationSource::advance`] are swept on the next drain
//! and never fire.
//!
//! # Invariants
//!
//! 1. An entry fires at most once.
//! 2. An entry never fires before its due instant.
//! 3. A stale entry never fires, due or not.
//! 4. Entries due at the same drain fire in due-time order; ties fire in
//!    schedule order.

use web_time::Instant;

use crate::cancellation::{Generation, GenerationSource};

#[derive(Debug)]
struct DeferredEntry<T> {
    due: Instant,
    stamp: Generation,
    payload: T,
}

/// Queue of stamped, time-ordered payloads.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    entries: Vec<DeferredEntry<T>>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> DeferredQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `payload` to fire once `due` has passed, provided `stamp`
    /// is still current at drain time.
    pub fn schedule(&mut self, due: Instant, stamp: Generation, payload: T) {
        self.entries.push(DeferredEntry {
            due,
            stamp,
            payload,
        });
    }

    /// Remove and return every payload due by `now`, sweeping stale entries.
    pub fn drain_due(&mut self, now: Instant, source: &GenerationSource) -> Vec<T> {
        let entries = std::mem::take(&mut self.entries);
        let mut due = Vec::new();
        for entry in entries {
            if !source.is_current(entry.stamp) {
                continue;
            }
            if entry.due <= now {
                due.push(entry);
            } else {
                self.entries.push(entry);
            }
        }
        due.sort_by_key(|entry| entry.due);
        due.into_iter().map(|entry| entry.payload).collect()
    }

    /// Number of entries still queued, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry without firing it.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_time::Duration;

    const MS50: Duration = Duration::from_millis(50);
    const MS100: Duration = Duration::from_millis(100);

    #[test]
    fn fires_at_due_time_not_before() {
        let source = GenerationSource::new();
        let mut queue = DeferredQueue::new();
        let t0 = Instant::now();
        queue.schedule(t0 + MS50, source.current(), "nav");

        assert!(queue.drain_due(t0, &source).is_empty());
        assert!(queue.drain_due(t0 + MS50 - Duration::from_millis(1), &source).is_empty());
        assert_eq!(queue.drain_due(t0 + MS50, &source), vec!["nav"]);
    }

    #[test]
    fn fires_at_most_once() {
        let source = GenerationSource::new();
        let mut queue = DeferredQueue::new();
        let t0 = Instant::now();
        queue.schedule(t0, source.current(), 1);

        assert_eq!(queue.drain_due(t0 + MS50, &source), vec![1]);
        assert!(queue.drain_due(t0 + MS100, &source).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn stale_entries_never_fire() {
        let mut source = GenerationSource::new();
        let mut queue = DeferredQueue::new();
        let t0 = Instant::now();
        queue.schedule(t0, source.current(), "stale");
        source.advance();
        queue.schedule(t0, source.current(), "live");

        assert_eq!(queue.drain_due(t0 + MS50, &source), vec!["live"]);
    }

    #[test]
    fn drain_sweeps_stale_entries_that_are_not_due() {
        let mut source = GenerationSource::new();
        let mut queue = DeferredQueue::new();
        let t0 = Instant::now();
        queue.schedule(t0 + MS100, source.current(), "far");
        source.advance();

        assert!(queue.drain_due(t0, &source).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn due_entries_fire_in_time_order() {
        let source = GenerationSource::new();
        let mut queue = DeferredQueue::new();
        let t0 = Instant::now();
        queue.schedule(t0 + MS100, source.current(), "second");
        queue.schedule(t0 + MS50, source.current(), "first");
        queue.schedule(t0 + MS100, source.current(), "third");

        assert_eq!(
            queue.drain_due(t0 + MS100, &source),
            vec!["first", "second", "third"]
        );
    }

    #[test]
    fn undue_entries_stay_queued() {
        let source = GenerationSource::new();
        let mut queue = DeferredQueue::new();
        let t0 = Instant::now();
        queue.schedule(t0 + MS50, source.current(), 1);
        queue.schedule(t0 + MS100, source.current(), 2);

        assert_eq!(queue.drain_due(t0 + MS50, &source), vec![1]);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_due(t0 + MS100, &source), vec![2]);
    }

    #[test]
    fn clear_drops_everything() {
        let source = GenerationSource::new();
        let mut queue = DeferredQueue::new();
        let t0 = Instant::now();
        queue.schedule(t0, source.current(), 1);
        queue.clear();
        assert!(queue.drain_due(t0 + MS50, &source).is_empty());
    }
}
