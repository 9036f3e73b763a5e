//! Spin policy for the blocking operations.

use crate::sync;

/// How a blocking operation waits for its slot to become ready.
///
/// The first `spin_limit` retries of a wait issue a CPU spin hint and stay
/// on-core for minimal latency; every retry after that yields to the OS
/// scheduler so a saturated queue does not starve other runnable work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    spin_limit: u32,
}

impl Backoff {
    /// Spin count used by [`Backoff::default`].
    pub const DEFAULT_SPIN_LIMIT: u32 = 64;

    /// A policy that spins `spin_limit` times before starting to yield.
    /// `Backoff::new(0)` yields on every retry.
    pub const fn new(spin_limit: u32) -> Self {
        Backoff { spin_limit }
    }

    /// One wait iteration; returns the updated spin count.
    #[inline]
    pub(crate) fn snooze(&self, spin: u32) -> u32 {
        if spin < self.spin_limit {
            sync::spin_loop();
            spin + 1
        } else {
            sync::yield_now();
            spin
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::new(Self::DEFAULT_SPIN_LIMIT)
    }
}
