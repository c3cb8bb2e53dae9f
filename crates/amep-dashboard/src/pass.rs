//! Stale-pass guard for uncoordinated refreshes.
//!
//! Two overlapping aggregation passes (a user refreshing twice quickly) are
//! not cancelled; instead the caller tags each pass with a monotonically
//! increasing token and only applies results from the newest one. This
//! closes the "slow request overwrites fast one" race without any in-flight
//! coordination.

use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pass(u64);

/// Issues pass tokens and answers whether a token is still the newest.
#[derive(Debug, Default)]
pub struct PassCounter {
    latest: AtomicU64,
}

impl PassCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Begin a new pass, superseding all earlier ones.
    pub fn begin(&self) -> Pass {
        Pass(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `pass` is still the newest — i.e., its results may be applied.
    pub fn is_current(&self, pass: Pass) -> bool {
        self.latest.load(Ordering::SeqCst) == pass.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_pass_is_current() {
        let counter = PassCounter::new();
        let pass = counter.begin();
        assert!(counter.is_current(pass));
    }

    #[test]
    fn superseded_pass_is_stale() {
        let counter = PassCounter::new();
        let first = counter.begin();
        let second = counter.begin();
        assert!(!counter.is_current(first));
        assert!(counter.is_current(second));
    }

    #[tokio::test]
    async fn slow_pass_result_is_ignored() {
        let counter = PassCounter::new();
        let mut displayed: Vec<&str> = Vec::new();

        // Slow pass starts first...
        let slow = counter.begin();
        // ...then a fast refresh supersedes it and lands.
        let fast = counter.begin();
        if counter.is_current(fast) {
            displayed = vec!["fresh"];
        }
        // The slow pass finishes last; its result must not be applied.
        if counter.is_current(slow) {
            displayed = vec!["stale"];
        }

        assert_eq!(displayed, vec!["fresh"]);
    }
}
