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
    engine::{
        config::SolverConfig,
        relaxation::RelaxationSeeder,
        shared_incumbent::SharedIncumbent,
    },
    mip::{
        backend::MilpBackend,
        formulator::MipFormulator,
        spec::{SubsolveParams, WarmStart},
    },
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wavepick_core::prelude::TimeBudget;

/// Seed of the fallback λ sampler, kept for reproducibility.
const FALLBACK_LAMBDA_SEED: u64 = 2112;

const CONVERGENCE_EPS: f64 = 1e-3;
const MIN_REMAINING_MS: u64 = 2_000;

/// Outer parametric loop for the large-corridor branch.
///
/// Each iteration maximizes `Σ units·x − λ·Σ y` over the binaries, offers
/// the extracted candidate to the incumbent, and moves λ to the observed
/// ratio; the next iteration warm-starts from the previous selection.
/// Convergence of the update means the current λ equals the optimal
/// ratio, so the loop stops.
#[derive(Debug)]
pub struct DinkelbachDriver<'a, 'm, 'p, B> {
    formulator: &'a MipFormulator<'m, 'p>,
    backend: &'a B,
    tracker: &'a SharedIncumbent,
    config: &'a SolverConfig,
}

impl<'a, 'm, 'p, B> DinkelbachDriver<'a, 'm, 'p, B>
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
        let model = self.formulator.model();

        let seeder = RelaxationSeeder::new(
            self.formulator,
            self.backend,
            self.config.lp_iter_cap,
            self.config.solver_threads,
        );
        let (mut lambda, mut warm_start) = match seeder.run(budget) {
            Some(seed) => {
                tracing::debug!(lambda = seed.lambda, "seeded from the relaxation");
                (seed.lambda, Some(seed.warm_start))
            }
            None => {
                let lambda = Self::fallback_lambda(model.wave_bounds().upper());
                tracing::debug!(lambda, "no relaxation seed; drew a random lambda");
                (lambda, None)
            }
        };

        for iteration in 0..self.config.max_dinkelbach_iters {
            if !budget.has_at_least(MIN_REMAINING_MS) {
                tracing::debug!(iteration, "time budget exhausted");
                break;
            }

            let mut params = SubsolveParams::with_time_limit(budget.remaining())
                .threads(self.config.solver_threads);
            if let Some(ws) = warm_start.take() {
                params = params.warm_start(ws);
            }

            let report = self.backend.solve(&self.formulator.parametric(lambda), &params);
            let Some(values) = report.values() else {
                tracing::debug!(iteration, lambda, "parametric sub-solve infeasible");
                break;
            };

            let candidate = self.formulator.extract_candidate(values);
            tracing::debug!(iteration, lambda, %candidate, "parametric iteration");

            let corridors_used = candidate.corridor_count();
            let total_units = candidate.total_units();
            warm_start = Some(WarmStart::from_selection(
                model.order_count(),
                model.corridor_count(),
                candidate.orders(),
                candidate.corridors(),
            ));
            self.tracker.offer(candidate);

            if corridors_used == 0 {
                break;
            }
            let new_lambda = total_units as f64 / corridors_used as f64;
            if (new_lambda - lambda).abs() < CONVERGENCE_EPS {
                break;
            }
            lambda = new_lambda;
        }
    }

    /// Uniform draw from `[0, U)` with a fixed seed, used when the
    /// relaxation yields no usable λ.
    fn fallback_lambda(upper: u32) -> f64 {
        if upper == 0 {
            return 0.0;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(FALLBACK_LAMBDA_SEED);
        rng.random_range(0.0..upper as f64)
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

    fn problem() -> Problem {
        let mut b = ProblemBuilder::new();
        b.item_count(2).wave_bounds(1, 20);
        b.add_order(stock(&[(0, 4)]));
        b.add_order(stock(&[(1, 8)]));
        b.add_corridor(stock(&[(0, 4)]));
        b.add_corridor(stock(&[(1, 8)]));
        b.build().unwrap()
    }

    fn budget() -> TimeBudget {
        TimeBudget::new(Stopwatch::start_new(), 60_000)
    }

    fn select_all() -> SolveReport {
        SolveReport::solved(
            SolveStatus::Optimal,
            VariableValues {
                orders: vec![1.0, 1.0],
                corridors: vec![1.0, 1.0],
            },
        )
    }

    #[test]
    fn test_converges_and_installs_the_candidate() {
        let p = problem();
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::new(|spec, _| match spec.variant() {
            ModelVariant::Relaxation { .. } => SolveReport::infeasible(),
            _ => select_all(),
        });

        let config = SolverConfig::default();
        DinkelbachDriver::new(&f, &backend, &tracker, &config).run(&budget());

        let best = tracker.into_best().unwrap();
        assert_eq!(best.total_units(), 12);
        assert_eq!(best.corridor_count(), 2);
        assert_eq!(best.ratio(), 6.0);

        // One relaxation attempt, then parametric iterations until the
        // λ update converges on the observed ratio 6.
        let parametric: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c.variant, ModelVariant::Parametric { .. }))
            .collect();
        assert!((1..=2).contains(&parametric.len()));
    }

    #[test]
    fn test_warm_start_chains_between_iterations() {
        let p = problem();
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::new(|spec, _| match spec.variant() {
            ModelVariant::Relaxation { .. } => SolveReport::infeasible(),
            _ => select_all(),
        });

        let config = SolverConfig::default();
        DinkelbachDriver::new(&f, &backend, &tracker, &config).run(&budget());

        let parametric: Vec<_> = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c.variant, ModelVariant::Parametric { .. }))
            .collect();
        // No seed on the first iteration (the relaxation failed), then
        // the previous selection is carried forward.
        assert!(!parametric[0].had_warm_start);
        assert!(parametric.iter().skip(1).all(|c| c.had_warm_start));
    }

    #[test]
    fn test_relaxation_seed_becomes_first_warm_start() {
        let p = problem();
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::new(|spec, _| match spec.variant() {
            ModelVariant::Relaxation { .. } => select_all(),
            _ => select_all(),
        });

        let config = SolverConfig::default();
        DinkelbachDriver::new(&f, &backend, &tracker, &config).run(&budget());

        let first_parametric = backend
            .calls()
            .into_iter()
            .find(|c| matches!(c.variant, ModelVariant::Parametric { .. }))
            .unwrap();
        assert!(first_parametric.had_warm_start);
    }

    #[test]
    fn test_infeasible_first_iteration_leaves_tracker_empty() {
        let p = problem();
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::always_infeasible();

        let config = SolverConfig::default();
        DinkelbachDriver::new(&f, &backend, &tracker, &config).run(&budget());
        assert!(tracker.into_best().is_none());
    }

    #[test]
    fn test_zero_corridor_result_stops_the_loop() {
        let p = problem();
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::new(|spec, _| match spec.variant() {
            ModelVariant::Relaxation { .. } => SolveReport::infeasible(),
            _ => SolveReport::solved(
                SolveStatus::Optimal,
                VariableValues {
                    orders: vec![0.0, 0.0],
                    corridors: vec![0.0, 0.0],
                },
            ),
        });

        let config = SolverConfig::default();
        DinkelbachDriver::new(&f, &backend, &tracker, &config).run(&budget());

        let parametric = backend
            .calls()
            .into_iter()
            .filter(|c| matches!(c.variant, ModelVariant::Parametric { .. }))
            .count();
        assert_eq!(parametric, 1);
        // The empty candidate was still offered (ratio 0 beats -1).
        assert_eq!(tracker.into_best().unwrap().ratio(), 0.0);
    }

    #[test]
    fn test_fallback_lambda_is_deterministic_and_in_range() {
        let a = DinkelbachDriver::<MockBackend>::fallback_lambda(20);
        let b = DinkelbachDriver::<MockBackend>::fallback_lambda(20);
        assert_eq!(a, b);
        assert!((0.0..20.0).contains(&a));
        assert_eq!(DinkelbachDriver::<MockBackend>::fallback_lambda(0), 0.0);
    }

    #[test]
    fn test_exhausted_budget_runs_nothing() {
        let p = problem();
        let m = SolverModel::from_problem(&p);
        let f = MipFormulator::new(&m);
        let tracker = SharedIncumbent::new();
        let backend = MockBackend::new(|_, _| select_all());

        let config = SolverConfig::default();
        let empty = TimeBudget::new(Stopwatch::start_new(), 0);
        DinkelbachDriver::new(&f, &backend, &tracker, &config).run(&empty);

        assert_eq!(backend.call_count(), 0);
        assert!(tracker.into_best().is_none());
    }
}
