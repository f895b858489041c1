// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render coalescing.
//!
//! Scroll events arrive in bursts far faster than the display refreshes.
//! The [`RenderScheduler`] collapses any number of render requests within
//! one scheduling opportunity into a single frame render: the first request
//! marks a render pending and tells the caller to schedule it; every
//! further request while pending is deduplicated, not queued. Nothing is
//! lost by deduplication — the in-flight frame reads the latest scroll
//! state at execution time, not the state captured when the first request
//! arrived.
//!
//! The pending flag is owned scheduler state, not ambient state, so
//! multiple engine instances (independent parallax groups on one page)
//! never interfere. The flag also suppresses re-entrant renders: a render
//! invoked while one from the same cycle is still pending is refused, not
//! queued.
//!
//! There is no backlog and no cancellation: a scheduled render always runs
//! to completion, and only "is a render in flight" is tracked.

/// Outcome of a [`RenderScheduler::request`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderRequest {
    /// No render was pending; the caller must now schedule exactly one
    /// frame render (on the next repaint opportunity, or synchronously if
    /// the platform has no such facility).
    Scheduled,
    /// A render is already in flight; this request was deduplicated.
    Coalesced,
}

/// Pending-flag state machine guaranteeing at most one frame render per
/// scheduling opportunity.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    pending: bool,
}

impl RenderScheduler {
    /// Creates a scheduler with no render pending.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: false }
    }

    /// Requests a frame render.
    ///
    /// Idempotent while a render is pending: the first call returns
    /// [`Scheduled`](RenderRequest::Scheduled), every subsequent call
    /// before [`complete`](Self::complete) returns
    /// [`Coalesced`](RenderRequest::Coalesced).
    pub fn request(&mut self) -> RenderRequest {
        if self.pending {
            RenderRequest::Coalesced
        } else {
            self.pending = true;
            RenderRequest::Scheduled
        }
    }

    /// Marks the in-flight render complete, clearing the pending flag.
    pub fn complete(&mut self) {
        self.pending = false;
    }

    /// Returns whether a render is currently in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_requests_schedules_once() {
        let mut sched = RenderScheduler::new();
        assert_eq!(sched.request(), RenderRequest::Scheduled);
        for _ in 0..100 {
            assert_eq!(sched.request(), RenderRequest::Coalesced);
        }
        assert!(sched.is_pending());
    }

    #[test]
    fn completion_allows_the_next_cycle() {
        let mut sched = RenderScheduler::new();
        assert_eq!(sched.request(), RenderRequest::Scheduled);
        sched.complete();
        assert!(!sched.is_pending());
        assert_eq!(sched.request(), RenderRequest::Scheduled);
    }

    #[test]
    fn independent_schedulers_do_not_interfere() {
        let mut a = RenderScheduler::new();
        let mut b = RenderScheduler::new();
        assert_eq!(a.request(), RenderRequest::Scheduled);
        assert_eq!(b.request(), RenderRequest::Scheduled);
        a.complete();
        assert!(!a.is_pending());
        assert!(b.is_pending());
    }
}
