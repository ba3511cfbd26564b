#![forbid(unsafe_code)]

//! The paged view the controller navigates.
//!
//! [`PagedView`] abstracts the calendar-like collaborator: something with a
//! previous/next page and a set of editing toggles. The controller never
//! sees a concrete view type, so tests drive the full choreography against
//! an in-memory fake and embedders adapt whatever widget they render.

use swipenav_core::lock::EditFlag;
use swipenav_core::swipe::NavDirection;

/// A view with page navigation and per-flag edit settings.
///
/// The controller owns the invariant that `prev`/`next` is called at most
/// once per committed gesture. Implementations only perform the page turn;
/// any rendering happens through the surface.
pub trait PagedView {
    /// Navigate one page back.
    fn prev(&mut self);

    /// Navigate one page forward.
    fn next(&mut self);

    /// Current value of an edit setting.
    ///
    /// Returns `None` when the setting does not exist on this view (the
    /// underlying widget is gone or never supported the flag). The
    /// interaction lock skips unknown flags on both capture and restore.
    fn option(&self, flag: EditFlag) -> Option<bool>;

    /// Write an edit setting. A no-op is acceptable when the setting does
    /// not exist.
    fn set_option(&mut self, flag: EditFlag, value: bool);

    /// Dispatch a navigation direction to `prev`/`next`.
    fn navigate(&mut self, direction: NavDirection) {
        match direction {
            NavDirection::Prev => self.prev(),
            NavDirection::Next => self.next(),
        }
    }
}

impl<V: PagedView + ?Sized> PagedView for &mut V {
    fn prev(&mut self) {
        (**self).prev();
    }

    fn next(&mut self) {
        (**self).next();
    }

    fn option(&self, flag: EditFlag) -> Option<bool> {
        (**self).option(flag)
    }

    fn set_option(&mut self, flag: EditFlag, value: bool) {
        (**self).set_option(flag, value);
    }
}
