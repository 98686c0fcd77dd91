//! Refresh coalescing
//!
//! A refresh request does not re-fetch immediately: the first request
//! arms a single deadline a short fixed delay away, and requests arriving
//! before it fires fold into the same pending operation. The delay lets
//! editor-side state settle (an edit just applied, a watcher notification
//! still in flight) before the adapter re-queries the server. Pure state
//! machine; the caller owns the clock and the actual sleep.

use std::time::{Duration, Instant};

use super::adapter::RefreshTrigger;

/// Delay between a triggering event and the re-fetch it schedules.
pub const REFRESH_DELAY: Duration = Duration::from_millis(150);

/// The union of triggers folded into one pending refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerSet {
    pub document: bool,
    pub filesystem: bool,
    pub explicit: bool,
}

impl TriggerSet {
    pub fn insert(&mut self, trigger: RefreshTrigger) {
        match trigger {
            RefreshTrigger::Document => self.document = true,
            RefreshTrigger::Filesystem => self.filesystem = true,
            RefreshTrigger::Explicit => self.explicit = true,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.document || self.filesystem || self.explicit)
    }
}

/// Coalesces refresh requests into one pending re-fetch.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    due: Option<Instant>,
    pending: TriggerSet,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(REFRESH_DELAY)
    }
}

impl Debouncer {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            due: None,
            pending: TriggerSet::default(),
        }
    }

    /// Note a refresh request. Arms the deadline when nothing is pending;
    /// otherwise the request joins the already-pending operation without
    /// moving the deadline.
    pub fn request(&mut self, trigger: RefreshTrigger, now: Instant) {
        self.pending.insert(trigger);
        if self.due.is_none() {
            self.due = Some(now + self.delay);
        }
    }

    /// When the next pending refresh is due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.due
    }

    /// Drain the pending refresh if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> Option<TriggerSet> {
        let due = self.due?;
        if now < due {
            return None;
        }
        self.due = None;
        Some(std::mem::take(&mut self.pending))
    }
}
