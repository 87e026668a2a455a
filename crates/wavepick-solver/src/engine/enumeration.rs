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

use crate::{
    engine::{config::SolverConfig, shared_incumbent::SharedIncumbent},
    mip::{backend::MilpBackend, formulator::MipFormulator, spec::SubsolveParams},
};
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};
use wavepick_core::prelude::TimeBudget;

const MIN_REMAINING_MS: u64 = 2_000;

/// Exhaustive sweep over the corridor-count dimension for the
/// small-corridor branch.
///
/// Every target `k ∈ 1..=C` gets an independent `FIXED_K(k)` sub-solve;
/// a fixed pool of workers pulls targets off a shared counter. The join
/// is bounded: each sub-solve caps its own time at the branch deadline
/// `T_k · ceil(C / P) + 1 s` (or the global budget, whichever is
/// tighter), so the scope ends shortly after the deadline at the latest.
#[derive(Debug)]
pub struct FixedKEnumerator<'a, 'm, 'p, B> {
    formulator: &'a MipFormulator<'m, 'p>,
    backend: &'a B,
    tracker: &'a SharedIncumbent,
    config: &'a SolverConfig,
}

impl<'a, 'm, 'p, B> FixedKEnumerator<'a, 'm, 'p, B>
where
    B: MilpBackend,
{
    pub fn new(
        formulator: &'a MipFormulator<'m, 'p>,
        backend: &'a B,
        tracker: &'a SharedIncumbent,
        config: &'a SolverConfig,
    ) -> Self {
        Self {
            formulator,
            backend,
            tracker,
            config,
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&self, budget: &TimeBudget) {
        let corridor_count = self.formulator.model().corridor_count();
        if corridor_count == 0 {
            return;
        }

        let pool = self.config.parallel_pool_size.max(1);
        let workers = pool.min(corridor_count);
        let threads_per_solve = (self.config.solver_threads / pool).max(1);
        let per_solve = self.config.per_subsolve_time_small;

        let rounds = corridor_count.div_ceil(pool) as u32;
        let join_cap = per_solve * rounds + Duration::from_secs(1);
        let deadline = Instant::now() + join_cap.min(budget.remaining());

        tracing::debug!(
            corridor_count,
            workers,
            threads_per_solve,
            "enumerating fixed corridor counts"
        );

        let next_target = AtomicUsize::new(1);
        std::thread::scope(|scope| {
            for worker in 0..workers {
                let next_target = &next_target;
                scope.spawn(move || {
                    loop {
                        let k = next_target.fetch_add(1, Ordering::Relaxed);
                        if k > corridor_count {
                            break;
                        }
                        if !budget.has_at_least(MIN_REMAINING_MS) {
                            tracing::debug!(worker, k, "time budget exhausted");
                            break;
                        }
                        let now = Instant::now();
                        if now >= deadline {
                            tracing::debug!(worker, k, "branch deadline reached");
                            break;
                        }

                        let cap = per_solve.min(deadline - now).min(budget.remaining());
                        let params =
                            SubsolveParams::with_time_limit(cap).threads(threads_per_solve);
                        let report = self
                            .backend
                            .solve(&self.formulator.fixed_corridor_count(k), &params);

                        match report.values() {
                            Some(values) => {
                                let candidate = self.formulator.extract_candidate(values);
                                tracing::debug!(worker, k, %candidate, "fixed-k candidate");
                                self.tracker.offer(candidate);
                            }
                            None => {
                                tracing::debug!(worker, k, "fixed-k sub-solve infeasible");
                            }
                        }
                    }
                });
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mip::{
            backend::{SolveReport, SolveStatus, VariableValues},
            spec::ModelVariant,
            testing::MockBackend,
        },
        model::solver_model::SolverModel,
    };
    use std::collections::BTreeMap;
    use wavepick_core::prelude::Stopwatch;
    use wavepick_model::prelude::{ItemId, Problem, ProblemBuilder};

    fn stock(pairs: &[(u32, u32)]) -> BTreeMap<ItemId, u32> {
        pairs
            .iter()
            .map(|&(item, qty)| (ItemId::new(item), qty))
            .collect()
    }

    fn problem(corridors: usize) -> Problem {
        let mut b = ProblemBuilder::new();
        b.item_count(1).wave_bounds(1, 100);
        b.add_order(stock(&[(0, 5)]));
        for _ in 0..corridors {
            b.add_corridor(stock(&[(0, 5)]));
        }
        b.build().unwrap()
    }

    fn budget() -> TimeBudget {
        TimeBudget::new(Stopwatch::start_new(), 60_000)
    }

    #[test]
    fn test_every_target_is_dispatched_exactly_once() {
        let p = problem(5);
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::always_infeasible();

        let config = SolverConfig::default();
        FixedKEnumerator::new(&f, &backend, &tracker, &config).run(&budget());

        let mut targets: Vec<usize> = backend
            .calls()
            .into_iter()
            .map(|c| match c.variant {
                ModelVariant::FixedCorridorCount { k } => k,
                other => panic!("unexpected variant {other:?}"),
            })
            .collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![1, 2, 3, 4, 5]);
        assert!(tracker.into_best().is_none());
    }

    #[test]
    fn test_best_ratio_wins_across_targets() {
        let p = problem(3);
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        // k corridors picked at 5 units: ratio 5/k, best at k = 1.
        let backend = MockBackend::new(|spec, _| {
            let ModelVariant::FixedCorridorCount { k } = spec.variant() else {
                panic!("enumeration must only emit fixed-k models");
            };
            let mut corridors = vec![0.0; spec.corridor_count()];
            for slot in corridors.iter_mut().take(k) {
                *slot = 1.0;
            }
            SolveReport::solved(
                SolveStatus::Optimal,
                VariableValues {
                    orders: vec![1.0],
                    corridors,
                },
            )
        });

        let config = SolverConfig::default();
        FixedKEnumerator::new(&f, &backend, &tracker, &config).run(&budget());

        let best = tracker.into_best().unwrap();
        assert_eq!(best.corridor_count(), 1);
        assert_eq!(best.ratio(), 5.0);
    }

    #[test]
    fn test_per_solve_time_is_capped_by_the_small_branch_limit() {
        let p = problem(2);
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::always_infeasible();

        let config = SolverConfig {
            per_subsolve_time_small: Duration::from_secs(7),
            ..SolverConfig::default()
        };
        FixedKEnumerator::new(&f, &backend, &tracker, &config).run(&budget());

        for call in backend.calls() {
            assert!(call.time_limit <= Duration::from_secs(7));
        }
    }

    #[test]
    fn test_no_corridors_is_a_noop() {
        let p = problem(0);
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::always_infeasible();

        let config = SolverConfig::default();
        FixedKEnumerator::new(&f, &backend, &tracker, &config).run(&budget());
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_exhausted_budget_dispatches_nothing() {
        let p = problem(4);
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::always_infeasible();

        let config = SolverConfig::default();
        let empty = TimeBudget::new(Stopwatch::start_new(), 0);
        FixedKEnumerator::new(&f, &backend, &tracker, &config).run(&empty);
        assert_eq!(backend.call_count(), 0);
    }
}
