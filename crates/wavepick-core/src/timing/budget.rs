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

use crate::timing::stopwatch::Stopwatch;
use std::time::Duration;

/// Ten minutes minus a five-second teardown buffer.
pub const DEFAULT_MAX_WALL_CLOCK_MS: u64 = 10 * 60 * 1000 - 5_000;

/// Monotone remaining-time oracle over a shared [`Stopwatch`].
///
/// Every sub-solve consults the same budget to cap its own runtime;
/// `remaining_ms()` never grows and bottoms out at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeBudget {
    stopwatch: Stopwatch,
    deadline_ms: u64,
}

impl TimeBudget {
    #[inline]
    pub fn new(stopwatch: Stopwatch, deadline_ms: u64) -> Self {
        Self {
            stopwatch,
            deadline_ms,
        }
    }

    #[inline]
    pub fn with_default_deadline(stopwatch: Stopwatch) -> Self {
        Self::new(stopwatch, DEFAULT_MAX_WALL_CLOCK_MS)
    }

    #[inline]
    pub fn deadline_ms(&self) -> u64 {
        self.deadline_ms
    }

    #[inline]
    pub fn remaining_ms(&self) -> u64 {
        self.deadline_ms.saturating_sub(self.stopwatch.elapsed_ms())
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        Duration::from_millis(self.remaining_ms())
    }

    #[inline]
    pub fn has_at_least(&self, ms: u64) -> bool {
        self.remaining_ms() > ms
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining_ms() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_budget_is_exhausted_immediately() {
        let budget = TimeBudget::new(Stopwatch::start_new(), 0);
        assert!(budget.is_exhausted());
        assert_eq!(budget.remaining_ms(), 0);
        assert!(!budget.has_at_least(0));
    }

    #[test]
    fn test_remaining_never_increases() {
        let budget = TimeBudget::new(Stopwatch::start_new(), 1_000);
        let a = budget.remaining_ms();
        let b = budget.remaining_ms();
        assert!(b <= a);
        assert!(a <= 1_000);
    }

    #[test]
    fn test_default_deadline_is_ten_minutes_minus_buffer() {
        let budget = TimeBudget::with_default_deadline(Stopwatch::start_new());
        assert_eq!(budget.deadline_ms(), 595_000);
    }

    #[test]
    fn test_has_at_least_is_strict() {
        let budget = TimeBudget::new(Stopwatch::start_new(), 60_000);
        assert!(budget.has_at_least(2_000));
        assert!(!budget.has_at_least(60_000));
    }
}
