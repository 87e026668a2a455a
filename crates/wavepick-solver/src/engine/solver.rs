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
        config::SolverConfig, dinkelbach::DinkelbachDriver, enumeration::FixedKEnumerator,
        err::SolverError, shared_incumbent::SharedIncumbent,
    },
    mip::{backend::MilpBackend, formulator::MipFormulator, highs::HighsBackend},
    model::solver_model::SolverModel,
};
use std::collections::BTreeMap;
use wavepick_core::prelude::{Stopwatch, TimeBudget};
use wavepick_model::prelude::{ItemId, Problem, ProblemBuilder, WaveSolution};

/// Top-level driver: builds the index once, picks the branch by corridor
/// count, and reduces whatever the branch offered into a solution.
///
/// `solve` never fails: an instance with no feasible wave comes back as
/// the empty solution.
#[derive(Debug)]
pub struct Solver<B = HighsBackend> {
    config: SolverConfig,
    backend: B,
}

impl Solver<HighsBackend> {
    #[inline]
    pub fn new() -> Self {
        Self::with_backend(SolverConfig::default(), HighsBackend::new())
    }

    #[inline]
    pub fn with_config(config: SolverConfig) -> Self {
        Self::with_backend(config, HighsBackend::new())
    }
}

impl Default for Solver<HighsBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Solver<B>
where
    B: MilpBackend,
{
    #[inline]
    pub fn with_backend(config: SolverConfig, backend: B) -> Self {
        Self { config, backend }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    #[tracing::instrument(level = "info", skip_all)]
    pub fn solve(&self, problem: &Problem, stopwatch: Stopwatch) -> WaveSolution {
        let budget = TimeBudget::new(stopwatch, self.config.max_wall_clock_ms);
        let model = SolverModel::from_problem(problem);
        let formulator = MipFormulator::new(&model);
        let tracker = SharedIncumbent::new();

        tracing::info!(
            orders = model.order_count(),
            corridors = model.corridor_count(),
            items = model.item_count(),
            remaining_ms = budget.remaining_ms(),
            "starting wave optimization"
        );

        if model.corridor_count() <= self.config.small_corridor_threshold {
            FixedKEnumerator::new(&formulator, &self.backend, &tracker, &self.config)
                .run(&budget);
        } else {
            DinkelbachDriver::new(&formulator, &self.backend, &tracker, &self.config)
                .run(&budget);
        }

        match tracker.into_best() {
            Some(best) => {
                tracing::info!(%best, "finished");
                best.into_solution()
            }
            None => {
                tracing::info!("no feasible wave found");
                WaveSolution::empty()
            }
        }
    }
}

/// Programmatic entry point over raw sparse maps, mirroring the challenge
/// harness: sequences of `item → qty` maps plus the item count and the
/// wave-size window. Fails only on contract violations in the inputs.
pub fn solve_instance(
    orders: Vec<BTreeMap<ItemId, u32>>,
    corridors: Vec<BTreeMap<ItemId, u32>>,
    item_count: usize,
    lower: u32,
    upper: u32,
    stopwatch: Stopwatch,
) -> Result<WaveSolution, SolverError> {
    let mut builder = ProblemBuilder::new();
    builder.item_count(item_count).wave_bounds(lower, upper);
    for demand in orders {
        builder.add_order(demand);
    }
    for supply in corridors {
        builder.add_corridor(supply);
    }
    let problem = builder.build()?;
    Ok(Solver::with_backend(SolverConfig::from_env(), HighsBackend::new())
        .solve(&problem, stopwatch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mip::{spec::ModelVariant, testing::MockBackend};
    use wavepick_model::prelude::{CorridorId, OrderId, validate};

    fn stock(pairs: &[(u32, u32)]) -> BTreeMap<ItemId, u32> {
        pairs
            .iter()
            .map(|&(item, qty)| (ItemId::new(item), qty))
            .collect()
    }

    fn quick_config() -> SolverConfig {
        SolverConfig {
            max_wall_clock_ms: 60_000,
            solver_threads: 2,
            ..SolverConfig::default()
        }
    }

    #[test]
    fn test_small_instance_uses_the_enumeration_branch() {
        let mut b = ProblemBuilder::new();
        b.item_count(1).wave_bounds(1, 10);
        b.add_order(stock(&[(0, 2)]));
        for _ in 0..5 {
            b.add_corridor(stock(&[(0, 2)]));
        }
        let problem = b.build().unwrap();

        let backend = MockBackend::always_infeasible();
        let solver = Solver::with_backend(quick_config(), backend);
        let solution = solver.solve(&problem, Stopwatch::start_new());
        assert!(solution.is_empty());

        let mut targets: Vec<usize> = solver
            .backend
            .calls()
            .into_iter()
            .map(|c| match c.variant {
                ModelVariant::FixedCorridorCount { k } => k,
                other => panic!("small branch must only emit fixed-k models, got {other:?}"),
            })
            .collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_large_instance_uses_the_parametric_branch() {
        let mut b = ProblemBuilder::new();
        b.item_count(1).wave_bounds(1, 10);
        b.add_order(stock(&[(0, 2)]));
        for _ in 0..21 {
            b.add_corridor(stock(&[(0, 2)]));
        }
        let problem = b.build().unwrap();

        let backend = MockBackend::always_infeasible();
        let solver = Solver::with_backend(quick_config(), backend);
        let solution = solver.solve(&problem, Stopwatch::start_new());
        assert!(solution.is_empty());

        assert!(solver.backend.calls().iter().all(|c| matches!(
            c.variant,
            ModelVariant::Relaxation { .. } | ModelVariant::Parametric { .. }
        )));
        assert!(solver.backend.call_count() >= 1);
    }

    #[test]
    fn test_trivial_single_order_single_corridor() {
        // orders = [{0:3}], corridors = [{0:5}], I=1, L=1, U=10.
        let solution = solve_scenario(
            vec![stock(&[(0, 3)])],
            vec![stock(&[(0, 5)])],
            1,
            1,
            10,
        );
        assert_eq!(solution.orders().len(), 1);
        assert!(solution.orders().contains(&OrderId::new(0)));
        assert!(solution.corridors().contains(&CorridorId::new(0)));
    }

    #[test]
    fn test_two_orders_share_one_corridor() {
        // Both orders fit the single corridor: ratio 5.
        let solution = solve_scenario(
            vec![stock(&[(0, 2)]), stock(&[(1, 3)])],
            vec![stock(&[(0, 2), (1, 3)])],
            2,
            1,
            10,
        );
        assert_eq!(solution.orders().len(), 2);
        assert_eq!(solution.corridors().len(), 1);
    }

    #[test]
    fn test_union_corridor_beats_two_singletons() {
        // Serving the wave out of the union corridor dominates every
        // multi-corridor selection (ratio 4 at best).
        let solution = solve_scenario(
            vec![stock(&[(0, 4)]), stock(&[(1, 4)]), stock(&[(2, 4)])],
            vec![
                stock(&[(0, 4)]),
                stock(&[(1, 4)]),
                stock(&[(2, 4)]),
                stock(&[(0, 4), (1, 4), (2, 4)]),
            ],
            3,
            8,
            12,
        );
        let problem = scenario_problem(
            vec![stock(&[(0, 4)]), stock(&[(1, 4)]), stock(&[(2, 4)])],
            vec![
                stock(&[(0, 4)]),
                stock(&[(1, 4)]),
                stock(&[(2, 4)]),
                stock(&[(0, 4), (1, 4), (2, 4)]),
            ],
            3,
            8,
            12,
        );
        assert_eq!(solution.corridors().len(), 1);
        assert!(solution.corridors().contains(&CorridorId::new(3)));
        assert!(solution.orders().len() >= 2);
        assert!(solution.productivity(&problem) >= 8.0);
        assert!(validate(&problem, &solution).is_ok());
    }

    #[test]
    fn test_unreachable_lower_bound_yields_the_empty_solution() {
        // One 1-unit order cannot reach L = 5.
        let solution = solve_scenario(vec![stock(&[(0, 1)])], vec![stock(&[(0, 10)])], 1, 5, 10);
        assert!(solution.is_empty());
    }

    #[test]
    fn test_shortened_deadline_still_returns_in_time() {
        let mut b = ProblemBuilder::new();
        b.item_count(1).wave_bounds(1, 10);
        b.add_order(stock(&[(0, 3)]));
        b.add_corridor(stock(&[(0, 5)]));
        let problem = b.build().unwrap();

        let config = SolverConfig {
            max_wall_clock_ms: 100,
            ..SolverConfig::default()
        };
        let stopwatch = Stopwatch::start_new();
        let solution = Solver::with_config(config).solve(&problem, stopwatch);
        // Either outcome is fine; the call must come back promptly and
        // without panicking.
        assert!(stopwatch.elapsed_ms() < 5_000);
        assert!(validate(&problem, &solution).is_ok());
    }

    #[test]
    fn test_permuting_the_inputs_preserves_the_ratio() {
        let orders = vec![stock(&[(0, 4)]), stock(&[(1, 4)]), stock(&[(2, 4)])];
        let corridors = vec![
            stock(&[(0, 4)]),
            stock(&[(1, 4)]),
            stock(&[(2, 4)]),
            stock(&[(0, 4), (1, 4), (2, 4)]),
        ];
        let problem = scenario_problem(orders.clone(), corridors.clone(), 3, 8, 12);
        let solution = Solver::with_config(quick_config()).solve(&problem, Stopwatch::start_new());

        let mut orders_rev = orders;
        orders_rev.reverse();
        let mut corridors_rev = corridors;
        corridors_rev.reverse();
        let problem_rev = scenario_problem(orders_rev, corridors_rev, 3, 8, 12);
        let solution_rev =
            Solver::with_config(quick_config()).solve(&problem_rev, Stopwatch::start_new());

        assert_eq!(
            solution.productivity(&problem),
            solution_rev.productivity(&problem_rev)
        );
    }

    #[test]
    fn test_solve_instance_rejects_out_of_range_items() {
        let err = solve_instance(
            vec![stock(&[(9, 1)])],
            vec![],
            1,
            0,
            10,
            Stopwatch::start_new(),
        )
        .unwrap_err();
        let SolverError::Problem(_) = err;
    }

    fn scenario_problem(
        orders: Vec<BTreeMap<ItemId, u32>>,
        corridors: Vec<BTreeMap<ItemId, u32>>,
        item_count: usize,
        lower: u32,
        upper: u32,
    ) -> Problem {
        let mut builder = ProblemBuilder::new();
        builder.item_count(item_count).wave_bounds(lower, upper);
        for demand in orders {
            builder.add_order(demand);
        }
        for supply in corridors {
            builder.add_corridor(supply);
        }
        builder.build().unwrap()
    }

    fn solve_scenario(
        orders: Vec<BTreeMap<ItemId, u32>>,
        corridors: Vec<BTreeMap<ItemId, u32>>,
        item_count: usize,
        lower: u32,
        upper: u32,
    ) -> WaveSolution {
        let problem = scenario_problem(orders, corridors, item_count, lower, upper);
        Solver::with_config(quick_config()).solve(&problem, Stopwatch::start_new())
    }
}
