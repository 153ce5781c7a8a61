use crate::config::{pool, retry, wait};
use std::{cmp::min, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Bound on every wait for an element to appear.
    pub wait_timeout: Duration,
    pub poll_delay: Duration,
    /// Sessions alive at once while extracting samples.
    pub workers: usize,
    /// `None` keeps scanning the problem listing until it yields links.
    pub link_attempts: Option<u32>,
    pub link_delay: Duration,
    pub max_link_delay: Duration,
}
impl Default for Options {
    fn default() -> Self {
        Options {
            wait_timeout: wait::TIMEOUT,
            poll_delay: wait::POLL_DELAY,
            workers: pool::WORKERS,
            link_attempts: None,
            link_delay: retry::LINK_DELAY,
            max_link_delay: retry::MAX_LINK_DELAY,
        }
    }
}
impl Options {
    pub(crate) fn workers(&self) -> usize {
        self.workers.max(1)
    }
    /// Delay before scan `attempt + 1`, doubling from `link_delay`.
    pub(crate) fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.min(31)).unwrap_or(u32::MAX);
        min(
            self.link_delay
                .checked_mul(factor)
                .unwrap_or(self.max_link_delay),
            self.max_link_delay,
        )
    }
    pub(crate) fn exhausted(&self, attempts: u32) -> bool {
        matches!(self.link_attempts, Some(max) if attempts >= max)
    }
}
