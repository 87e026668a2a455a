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

use std::time::Duration;
use wavepick_core::prelude::DEFAULT_MAX_WALL_CLOCK_MS;

/// Engine knobs. `Default` gives the competition settings; every field
/// can be overridden from the environment via [`SolverConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Global wall-clock deadline for one `solve` call.
    pub max_wall_clock_ms: u64,
    /// At most this many corridors selects the fixed-k enumeration
    /// branch; above it the parametric loop runs.
    pub small_corridor_threshold: usize,
    /// Worker count of the enumeration branch.
    pub parallel_pool_size: usize,
    /// Per-sub-solve time cap on the enumeration branch.
    pub per_subsolve_time_small: Duration,
    /// Internal solver threads available to one `solve` call.
    pub solver_threads: usize,
    /// Iteration cap of the integer parametric loop.
    pub max_dinkelbach_iters: usize,
    /// Iteration cap of the LP-relaxation seeding loop.
    pub lp_iter_cap: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_wall_clock_ms: DEFAULT_MAX_WALL_CLOCK_MS,
            small_corridor_threshold: 20,
            parallel_pool_size: 4,
            per_subsolve_time_small: Duration::from_secs(120),
            solver_threads: 8,
            max_dinkelbach_iters: 50,
            lp_iter_cap: 50,
        }
    }
}

impl SolverConfig {
    /// Defaults overridden by the process environment:
    /// `MAX_WALL_CLOCK_MS`, `SMALL_CORRIDOR_THRESHOLD`,
    /// `PARALLEL_POOL_SIZE`, `PER_SUBSOLVE_TIME_SMALL` (seconds),
    /// `SOLVER_THREADS`, `MAX_DINKELBACH_ITERS`, `LP_ITER_CAP`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        fn parse<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
            value.and_then(|s| s.trim().parse().ok())
        }

        if let Some(v) = parse(lookup("MAX_WALL_CLOCK_MS")) {
            config.max_wall_clock_ms = v;
        }
        if let Some(v) = parse(lookup("SMALL_CORRIDOR_THRESHOLD")) {
            config.small_corridor_threshold = v;
        }
        if let Some(v) = parse::<usize>(lookup("PARALLEL_POOL_SIZE")) {
            config.parallel_pool_size = v.max(1);
        }
        if let Some(v) = parse::<u64>(lookup("PER_SUBSOLVE_TIME_SMALL")) {
            config.per_subsolve_time_small = Duration::from_secs(v);
        }
        if let Some(v) = parse::<usize>(lookup("SOLVER_THREADS")) {
            config.solver_threads = v.max(1);
        }
        if let Some(v) = parse(lookup("MAX_DINKELBACH_ITERS")) {
            config.max_dinkelbach_iters = v;
        }
        if let Some(v) = parse(lookup("LP_ITER_CAP")) {
            config.lp_iter_cap = v;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_match_competition_settings() {
        let c = SolverConfig::default();
        assert_eq!(c.max_wall_clock_ms, 595_000);
        assert_eq!(c.small_corridor_threshold, 20);
        assert_eq!(c.parallel_pool_size, 4);
        assert_eq!(c.per_subsolve_time_small, Duration::from_secs(120));
        assert_eq!(c.solver_threads, 8);
        assert_eq!(c.max_dinkelbach_iters, 50);
        assert_eq!(c.lp_iter_cap, 50);
    }

    #[test]
    fn test_lookup_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("MAX_WALL_CLOCK_MS", "100"),
            ("SMALL_CORRIDOR_THRESHOLD", "5"),
            ("SOLVER_THREADS", "2"),
            ("PER_SUBSOLVE_TIME_SMALL", "30"),
        ]
        .into_iter()
        .collect();

        let c = SolverConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(c.max_wall_clock_ms, 100);
        assert_eq!(c.small_corridor_threshold, 5);
        assert_eq!(c.solver_threads, 2);
        assert_eq!(c.per_subsolve_time_small, Duration::from_secs(30));
        // Untouched knobs keep their defaults.
        assert_eq!(c.max_dinkelbach_iters, 50);
    }

    #[test]
    fn test_garbage_values_fall_back_to_defaults() {
        let c = SolverConfig::from_lookup(|k| {
            (k == "SOLVER_THREADS").then(|| "not-a-number".to_string())
        });
        assert_eq!(c.solver_threads, 8);
    }

    #[test]
    fn test_zero_threads_clamp_to_one() {
        let c = SolverConfig::from_lookup(|k| (k == "SOLVER_THREADS").then(|| "0".to_string()));
        assert_eq!(c.solver_threads, 1);
    }
}
