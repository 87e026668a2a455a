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

pub mod err;

use crate::{
    problem::{ItemId, Problem},
    solution::WaveSolution,
};
use err::{
    ItemShortageError, UnknownCorridorError, UnknownOrderError, ValidationError, WaveSizeError,
};
use std::collections::BTreeSet;

/// Checks a non-empty wave against the instance: index ranges, the
/// wave-size window, and per-item balance between selected demand and
/// visited supply.
///
/// The empty solution is accepted as-is; it is the designated "no feasible
/// wave" signal, not a wave.
pub fn validate(problem: &Problem, solution: &WaveSolution) -> Result<(), ValidationError> {
    if solution.is_empty() {
        return Ok(());
    }

    for &order in solution.orders() {
        if order.index() >= problem.order_count() {
            return Err(UnknownOrderError::new(order, problem.order_count()).into());
        }
    }
    for &corridor in solution.corridors() {
        if corridor.index() >= problem.corridor_count() {
            return Err(UnknownCorridorError::new(corridor, problem.corridor_count()).into());
        }
    }

    let total_units = solution.total_units(problem);
    let bounds = problem.bounds();
    if !bounds.contains(total_units) {
        return Err(WaveSizeError::new(total_units, bounds.lower(), bounds.upper()).into());
    }

    let required_items: BTreeSet<ItemId> = solution
        .orders()
        .iter()
        .flat_map(|o| problem.orders()[o.index()].demand().keys().copied())
        .collect();

    for item in required_items {
        let required: u64 = solution
            .orders()
            .iter()
            .map(|o| problem.orders()[o.index()].demand_for(item) as u64)
            .sum();
        let available: u64 = solution
            .corridors()
            .iter()
            .map(|c| problem.corridors()[c.index()].supply_for(item) as u64)
            .sum();
        if required > available {
            return Err(ItemShortageError::new(item, required, available).into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{CorridorId, OrderId, builder::ProblemBuilder};
    use std::collections::BTreeMap;

    fn stock(pairs: &[(u32, u32)]) -> BTreeMap<ItemId, u32> {
        pairs
            .iter()
            .map(|&(item, qty)| (ItemId::new(item), qty))
            .collect()
    }

    fn problem() -> Problem {
        let mut b = ProblemBuilder::new();
        b.item_count(2).wave_bounds(2, 5);
        b.add_order(stock(&[(0, 2)]));
        b.add_order(stock(&[(1, 3)]));
        b.add_corridor(stock(&[(0, 2)]));
        b.add_corridor(stock(&[(1, 3)]));
        b.build().unwrap()
    }

    fn sol(orders: &[u32], corridors: &[u32]) -> WaveSolution {
        WaveSolution::new(
            orders.iter().map(|&o| OrderId::new(o)).collect(),
            corridors.iter().map(|&c| CorridorId::new(c)).collect(),
        )
    }

    #[test]
    fn test_empty_solution_is_accepted() {
        assert!(validate(&problem(), &WaveSolution::empty()).is_ok());
    }

    #[test]
    fn test_feasible_wave_passes() {
        assert!(validate(&problem(), &sol(&[0, 1], &[0, 1])).is_ok());
    }

    #[test]
    fn test_unknown_order_is_rejected() {
        let err = validate(&problem(), &sol(&[7], &[0])).unwrap_err();
        match err {
            ValidationError::UnknownOrder(e) => assert_eq!(e.order(), OrderId::new(7)),
            other => panic!("expected UnknownOrder, got {other:?}"),
        }
    }

    #[test]
    fn test_wave_below_lower_bound_is_rejected() {
        // Bounds are [2, 5]; order 0 alone picks 2 units, fine; nothing picks 1.
        let p = {
            let mut b = ProblemBuilder::new();
            b.item_count(1).wave_bounds(3, 5);
            b.add_order(stock(&[(0, 2)]));
            b.add_corridor(stock(&[(0, 5)]));
            b.build().unwrap()
        };
        let err = validate(&p, &sol(&[0], &[0])).unwrap_err();
        match err {
            ValidationError::WaveSize(e) => assert_eq!(e.total_units(), 2),
            other => panic!("expected WaveSize, got {other:?}"),
        }
    }

    #[test]
    fn test_item_shortage_is_rejected() {
        // Order 1 needs 3 units of item 1, but only corridor 0 is visited.
        let err = validate(&problem(), &sol(&[0, 1], &[0])).unwrap_err();
        match err {
            ValidationError::ItemShortage(e) => {
                assert_eq!(e.item(), ItemId::new(1));
                assert_eq!(e.required(), 3);
                assert_eq!(e.available(), 0);
            }
            other => panic!("expected ItemShortage, got {other:?}"),
        }
    }
}
