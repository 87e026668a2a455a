// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::mip::outcome::WaveCandidate;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ratio reported while no candidate has been accepted yet. Any feasible
/// candidate (ratio ≥ 0) beats it.
const EMPTY_RATIO: f64 = -1.0;

/// Best feasible candidate observed so far, shared by all sub-solves.
///
/// `offer` replaces the incumbent only on strictly greater ratio, so the
/// final result depends on the set of offered candidates, not their
/// arrival order, and the incumbent ratio sequence is non-decreasing.
#[derive(Debug)]
pub struct SharedIncumbent {
    best: Mutex<Option<WaveCandidate>>,
    best_ratio_bits: AtomicU64, // Avoid locking for simple reads
}

impl SharedIncumbent {
    #[inline]
    pub fn new() -> Self {
        Self {
            best: Mutex::new(None),
            best_ratio_bits: AtomicU64::new(EMPTY_RATIO.to_bits()),
        }
    }

    /// Lightweight best-known ratio without taking the lock.
    #[inline]
    pub fn peek_ratio(&self) -> f64 {
        f64::from_bits(self.best_ratio_bits.load(Ordering::Acquire))
    }

    /// Attempts to install `candidate` as the new incumbent. Quick
    /// race-tolerant pre-check on the atomic ratio, then the definitive
    /// comparison under the lock. Ties keep the incumbent.
    #[tracing::instrument(level = "debug", skip(self, candidate))]
    pub fn offer(&self, candidate: WaveCandidate) -> bool {
        let ratio = candidate.ratio();
        if ratio <= self.peek_ratio() {
            return false;
        }

        let mut guard = self.best.lock();
        let current = guard.as_ref().map_or(EMPTY_RATIO, WaveCandidate::ratio);
        if ratio > current {
            tracing::debug!(old_ratio = current, new_ratio = ratio, "new incumbent");
            self.best_ratio_bits.store(ratio.to_bits(), Ordering::Release);
            *guard = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Cloned snapshot of the incumbent, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<WaveCandidate> {
        self.best.lock().clone()
    }

    /// Consumes the tracker, yielding the final incumbent.
    #[inline]
    pub fn into_best(self) -> Option<WaveCandidate> {
        self.best.into_inner()
    }
}

impl Default for SharedIncumbent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::index::{CorridorIndex, OrderIndex};

    fn candidate(total_units: u64, corridors: usize) -> WaveCandidate {
        WaveCandidate::new(
            vec![OrderIndex::new(0)],
            (0..corridors).map(CorridorIndex::new).collect(),
            total_units,
        )
    }

    #[test]
    fn test_initial_state_is_empty() {
        let inc = SharedIncumbent::new();
        assert_eq!(inc.peek_ratio(), -1.0);
        assert!(inc.snapshot().is_none());
    }

    #[test]
    fn test_zero_ratio_candidate_beats_empty() {
        let inc = SharedIncumbent::new();
        assert!(inc.offer(candidate(0, 0)));
        assert_eq!(inc.peek_ratio(), 0.0);
    }

    #[test]
    fn test_strict_improvement_replaces() {
        let inc = SharedIncumbent::new();
        assert!(inc.offer(candidate(4, 2)));
        assert!(inc.offer(candidate(6, 2)));
        assert_eq!(inc.snapshot().unwrap().total_units(), 6);
    }

    #[test]
    fn test_equal_ratio_keeps_incumbent() {
        let inc = SharedIncumbent::new();
        assert!(inc.offer(candidate(4, 2)));
        assert!(!inc.offer(candidate(2, 1)));
        assert_eq!(inc.snapshot().unwrap().total_units(), 4);
    }

    #[test]
    fn test_worse_candidate_is_ignored() {
        let inc = SharedIncumbent::new();
        assert!(inc.offer(candidate(9, 1)));
        assert!(!inc.offer(candidate(3, 1)));
        assert_eq!(inc.peek_ratio(), 9.0);
    }

    #[test]
    fn test_concurrent_offers_keep_the_maximum() {
        let inc = SharedIncumbent::new();
        std::thread::scope(|scope| {
            for units in 1..=16u64 {
                let inc = &inc;
                scope.spawn(move || {
                    inc.offer(candidate(units, 1));
                });
            }
        });
        assert_eq!(inc.into_best().unwrap().total_units(), 16);
    }
}
