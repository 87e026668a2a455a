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
    backend::{MilpBackend, SolveReport, SolveStatus, VariableValues},
    formulator::ModelSpec,
    spec::{MipEmphasis, ModelVariant, SubsolveParams},
};
use good_lp::solvers::highs::highs;
use good_lp::*;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// `good_lp` + HiGHS implementation of the backend contract.
///
/// Every call builds a fresh model from the spec's shared skeleton, so
/// each sub-solve exclusively owns its solver handle and the handle is
/// released on every exit path. Panics inside the native solver are
/// contained and surface as a failed report.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighsBackend;

impl HighsBackend {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl MilpBackend for HighsBackend {
    fn solve(&self, spec: &ModelSpec<'_>, params: &SubsolveParams) -> SolveReport {
        match catch_unwind(AssertUnwindSafe(|| run_model(spec, params))) {
            Ok(report) => report,
            Err(_) => {
                tracing::warn!(variant = %spec.variant(), "solver backend panicked");
                SolveReport::failed()
            }
        }
    }
}

fn run_model(spec: &ModelSpec<'_>, params: &SubsolveParams) -> SolveReport {
    let relaxed = spec.variant().is_relaxation();

    let mut vars = variables!();
    let xs: Vec<Variable> = (0..spec.order_count())
        .map(|o| {
            let def = if relaxed {
                variable().min(0.0).max(1.0)
            } else {
                variable().binary()
            };
            vars.add(def.name(format!("ord_{o}")))
        })
        .collect();
    let ys: Vec<Variable> = (0..spec.corridor_count())
        .map(|c| {
            let def = if relaxed {
                variable().min(0.0).max(1.0)
            } else {
                variable().binary()
            };
            vars.add(def.name(format!("cor_{c}")))
        })
        .collect();

    let units_expr = xs
        .iter()
        .enumerate()
        .fold(Expression::from(0.0), |acc, (o, &x)| {
            acc + spec.order_units()[o] as f64 * x
        });

    let objective = match spec.variant() {
        ModelVariant::FixedCorridorCount { .. } => units_expr.clone(),
        ModelVariant::Parametric { lambda } | ModelVariant::Relaxation { lambda } => ys
            .iter()
            .fold(units_expr.clone(), |acc, &y| acc - lambda * y),
    };

    let mut prob = vars
        .maximise(objective)
        .using(highs)
        .with_time_limit(params.time_limit.as_secs_f64());
    if let Some(threads) = params.threads {
        prob = prob.set_threads(threads as u32);
    }
    if params.emphasis != MipEmphasis::Balanced {
        // Hint only; HiGHS exposes no matching control.
        tracing::debug!(emphasis = ?params.emphasis, "emphasis hint ignored by backend");
    }

    if let Some(ws) = &params.warm_start {
        if !relaxed
            && ws.orders().len() == xs.len()
            && ws.corridors().len() == ys.len()
        {
            let start = xs
                .iter()
                .copied()
                .zip(ws.orders().iter().copied())
                .chain(ys.iter().copied().zip(ws.corridors().iter().copied()));
            prob = prob.with_initial_solution(start);
        } else {
            tracing::debug!("warm start dropped (relaxation or dimension mismatch)");
        }
    }

    let bounds = spec.bounds();
    prob.add_constraint(units_expr.clone().geq(bounds.lower() as f64));
    prob.add_constraint(units_expr.leq(bounds.upper() as f64));

    for row in spec.balance_rows() {
        let demand = row
            .demand()
            .iter()
            .fold(Expression::from(0.0), |acc, &(o, qty)| {
                acc + qty as f64 * xs[o.get()]
            });
        let balance = row
            .supply()
            .iter()
            .fold(demand, |acc, &(c, qty)| acc - qty as f64 * ys[c.get()]);
        prob.add_constraint(balance.leq(0.0));
    }

    if let ModelVariant::FixedCorridorCount { k } = spec.variant() {
        let corridor_sum = ys
            .iter()
            .fold(Expression::from(0.0), |acc, &y| acc + y);
        prob.add_constraint(corridor_sum.eq(k as f64));
    }

    match prob.solve() {
        Ok(sol) => {
            let orders = xs.iter().map(|&x| sol.value(x)).collect();
            let corridors = ys.iter().map(|&y| sol.value(y)).collect();
            SolveReport::solved(SolveStatus::Optimal, VariableValues { orders, corridors })
        }
        Err(ResolutionError::Infeasible) => SolveReport::infeasible(),
        Err(err) => {
            tracing::debug!(variant = %spec.variant(), error = %err, "sub-solve failed");
            SolveReport::failed()
        }
    }
}
