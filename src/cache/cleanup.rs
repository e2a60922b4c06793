//! Opportunistic Cleanup
//!
//! Sweeps expired entries as a side effect of a lookup once the configured
//! interval has passed. There is no background task: a cache that is never
//! queried is never swept.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::cache::Cache;

// == Sweep Report ==
/// Outcome of one cleanup sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SweepReport {
    /// Time since the previous sweep when this one was triggered
    pub last_run: Duration,
    /// Time spent scanning
    pub elapsed: Duration,
    /// Entries present before the sweep
    pub scanned: usize,
    /// Entries removed
    pub deleted: usize,
    /// Entries left after the sweep
    pub remaining: usize,
}

impl<V, E> Cache<V, E> {
    /// Runs a sweep at `begin` if more than the cleanup period has passed
    /// since the previous one. Returns `None` when no sweep happened.
    pub(super) fn cleanup_if_due(&mut self, begin: DateTime<Utc>) -> Option<SweepReport> {
        let period = self.cleanup_period?;
        let last_run = self.clock.since(self.last_cleanup);
        if last_run <= period {
            return None;
        }
        Some(self.sweep(begin, last_run))
    }

    /// Removes every entry whose deadline is not after `begin`.
    fn sweep(&mut self, begin: DateTime<Utc>, last_run: Duration) -> SweepReport {
        let scanned = self.entries.len();
        self.entries.retain(|_, entry| entry.is_alive(begin));
        let remaining = self.entries.len();

        let report = SweepReport {
            last_run,
            elapsed: self.clock.since(begin),
            scanned,
            deleted: scanned - remaining,
            remaining,
        };

        if self.debug_logging {
            debug!(
                cleanup_last_run = ?report.last_run,
                cleanup_elapsed = ?report.elapsed,
                scanned = report.scanned,
                deleted = report.deleted,
                remain = report.remaining,
                "cache cleanup"
            );
        }

        self.stats.record_cleanup(begin, report.deleted);
        self.stats.set_total_entries(remaining);
        self.last_cleanup = begin;
        report
    }
}
