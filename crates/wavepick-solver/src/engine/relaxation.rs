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

use crate::mip::{
    backend::MilpBackend,
    formulator::MipFormulator,
    outcome::RelaxedPoint,
    spec::{SubsolveParams, WarmStart},
};
use wavepick_core::prelude::TimeBudget;

const CONVERGENCE_EPS: f64 = 1e-6;
const DENOMINATOR_EPS: f64 = 1e-6;
const MIN_REMAINING_MS: u64 = 100;

/// A `(λ, x*, y*)` seed for the integer parametric loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationSeed {
    pub lambda: f64,
    pub warm_start: WarmStart,
}

/// Dinkelbach on the LP relaxation.
///
/// The feasible region never changes between iterations: every solve
/// replays the formulator's shared constraint skeleton with a fresh
/// objective for the current λ. Returns `None` when the relaxation
/// fails outright or the denominator collapses (λ → ∞); the caller
/// falls back to a random λ.
#[derive(Debug)]
pub struct RelaxationSeeder<'a, 'm, 'p, B> {
    formulator: &'a MipFormulator<'m, 'p>,
    backend: &'a B,
    iter_cap: usize,
    threads: usize,
}

impl<'a, 'm, 'p, B> RelaxationSeeder<'a, 'm, 'p, B>
where
    B: MilpBackend,
{
    pub fn new(
        formulator: &'a MipFormulator<'m, 'p>,
        backend: &'a B,
        iter_cap: usize,
        threads: usize,
    ) -> Self {
        Self {
            formulator,
            backend,
            iter_cap,
            threads,
        }
    }

    pub fn run(&self, budget: &TimeBudget) -> Option<RelaxationSeed> {
        let mut lambda = 0.0_f64;
        let mut point: Option<RelaxedPoint> = None;

        for iteration in 0..self.iter_cap {
            if !budget.has_at_least(MIN_REMAINING_MS) {
                break;
            }

            let params =
                SubsolveParams::with_time_limit(budget.remaining()).threads(self.threads);
            let report = self
                .backend
                .solve(&self.formulator.relaxation(lambda), &params);
            let Some(values) = report.values() else {
                tracing::debug!(iteration, lambda, "relaxation solve failed");
                break;
            };

            let p = self.formulator.extract_point(values);
            if p.corridor_mass < DENOMINATOR_EPS {
                // Denominator collapses; the ratio is unbounded here.
                lambda = f64::INFINITY;
                point = Some(p);
                break;
            }

            let new_lambda = p.items_value / p.corridor_mass;
            let converged = (new_lambda - lambda).abs() < CONVERGENCE_EPS;
            tracing::debug!(iteration, lambda, new_lambda, "relaxation iteration");
            lambda = new_lambda;
            point = Some(p);
            if converged {
                break;
            }
        }

        let point = point?;
        if !lambda.is_finite() {
            return None;
        }
        Some(RelaxationSeed {
            lambda,
            warm_start: WarmStart::new(point.orders, point.corridors),
        })
    }
}
