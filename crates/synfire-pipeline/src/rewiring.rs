// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Rewiring attempt scheduler
//!
//! Structural-plasticity attempts are counted intent, not keyed work: the
//! dispatch engine claims one per free-slot event ahead of spike dispatch, so
//! rewiring occupies the shared DMA channel for at most one transfer at a
//! time and is re-considered on every event. The pending count saturates at
//! an explicit configured bound rather than growing without limit.

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::debug;

pub(crate) struct RewiringScheduler {
    pending: AtomicU32,
    max_pending: u32,
}

impl RewiringScheduler {
    pub(crate) fn new(max_pending: u32) -> Self {
        Self {
            pending: AtomicU32::new(0),
            max_pending,
        }
    }

    /// Queue up to `n` further attempts, saturating at the configured bound.
    /// Always reports acceptance: this schedules intent, it does not promise
    /// completion within the current step.
    pub(crate) fn request(&self, n: u32) -> bool {
        let max_pending = self.max_pending;
        let before = self
            .pending
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |pending| {
                Some(pending.saturating_add(n).min(max_pending))
            })
            .unwrap_or(0);
        let queued = before.saturating_add(n).min(max_pending) - before;
        if queued < n {
            debug!(
                requested = n,
                queued, max_pending, "rewiring request clamped at pending bound"
            );
        }
        true
    }

    /// Claim one pending attempt, if any.
    pub(crate) fn try_claim(&self) -> bool {
        self.pending
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |pending| {
                pending.checked_sub(1)
            })
            .is_ok()
    }

    pub(crate) fn pending(&self) -> u32 {
        self.pending.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_claim() {
        let scheduler = RewiringScheduler::new(16);
        assert!(scheduler.request(3));
        assert_eq!(scheduler.pending(), 3);
        assert!(scheduler.try_claim());
        assert!(scheduler.try_claim());
        assert!(scheduler.try_claim());
        assert!(!scheduler.try_claim());
    }

    #[test]
    fn test_request_saturates_at_bound() {
        let scheduler = RewiringScheduler::new(4);
        assert!(scheduler.request(10));
        assert_eq!(scheduler.pending(), 4);
        assert!(scheduler.request(1));
        assert_eq!(scheduler.pending(), 4);
    }

    #[test]
    fn test_zero_bound_accepts_but_never_claims() {
        let scheduler = RewiringScheduler::new(0);
        assert!(scheduler.request(5));
        assert_eq!(scheduler.pending(), 0);
        assert!(!scheduler.try_claim());
    }
}
