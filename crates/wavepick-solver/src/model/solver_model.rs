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

use crate::model::index::{CorridorIndex, OrderIndex};
use wavepick_model::prelude::{ItemId, Problem, WaveBounds};

/// Immutable sparse projection of an instance, built once at solver
/// construction and shared read-only by every sub-solve.
///
/// Precomputes the per-order unit totals and, for every item type, the
/// orders demanding it and the corridors stocking it, so that model
/// assembly never hashes into the raw maps on the hot path.
#[derive(Debug)]
pub struct SolverModel<'problem> {
    problem: &'problem Problem,
    units_per_order: Vec<u64>,
    orders_with_item: Vec<Vec<OrderIndex>>,
    corridors_with_item: Vec<Vec<CorridorIndex>>,
}

impl<'problem> SolverModel<'problem> {
    pub fn from_problem(problem: &'problem Problem) -> Self {
        let units_per_order = problem
            .iter_orders()
            .map(|order| order.total_units())
            .collect();

        let mut orders_with_item = vec![Vec::new(); problem.item_count()];
        for (o, order) in problem.iter_orders().enumerate() {
            for item in order.demand().keys() {
                orders_with_item[item.index()].push(OrderIndex::new(o));
            }
        }

        let mut corridors_with_item = vec![Vec::new(); problem.item_count()];
        for (c, corridor) in problem.iter_corridors().enumerate() {
            for item in corridor.supply().keys() {
                corridors_with_item[item.index()].push(CorridorIndex::new(c));
            }
        }

        Self {
            problem,
            units_per_order,
            orders_with_item,
            corridors_with_item,
        }
    }

    #[inline]
    pub fn problem(&self) -> &'problem Problem {
        self.problem
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.units_per_order.len()
    }

    #[inline]
    pub fn corridor_count(&self) -> usize {
        self.problem.corridor_count()
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.orders_with_item.len()
    }

    #[inline]
    pub fn wave_bounds(&self) -> WaveBounds {
        self.problem.bounds()
    }

    #[inline]
    pub fn units_per_order(&self, order: OrderIndex) -> u64 {
        self.units_per_order[order.get()]
    }

    #[inline]
    pub fn units(&self) -> &[u64] {
        &self.units_per_order
    }

    /// Orders with nonzero demand for `item`, in ascending index order.
    #[inline]
    pub fn orders_with_item(&self, item: ItemId) -> &[OrderIndex] {
        &self.orders_with_item[item.index()]
    }

    /// Corridors with nonzero supply of `item`, in ascending index order.
    #[inline]
    pub fn corridors_with_item(&self, item: ItemId) -> &[CorridorIndex] {
        &self.corridors_with_item[item.index()]
    }

    #[inline]
    pub fn demand(&self, order: OrderIndex, item: ItemId) -> u32 {
        self.problem.orders()[order.get()].demand_for(item)
    }

    #[inline]
    pub fn supply(&self, corridor: CorridorIndex, item: ItemId) -> u32 {
        self.problem.corridors()[corridor.get()].supply_for(item)
    }

    #[inline]
    pub fn iter_items(&self) -> impl Iterator<Item = ItemId> {
        (0..self.item_count() as u32).map(ItemId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use wavepick_model::prelude::ProblemBuilder;

    fn stock(pairs: &[(u32, u32)]) -> BTreeMap<ItemId, u32> {
        pairs
            .iter()
            .map(|&(item, qty)| (ItemId::new(item), qty))
            .collect()
    }

    fn problem() -> Problem {
        let mut b = ProblemBuilder::new();
        b.item_count(3).wave_bounds(1, 20);
        b.add_order(stock(&[(0, 2), (1, 1)]));
        b.add_order(stock(&[(1, 3)]));
        b.add_order(stock(&[]));
        b.add_corridor(stock(&[(0, 4)]));
        b.add_corridor(stock(&[(1, 4), (2, 1)]));
        b.build().unwrap()
    }

    #[test]
    fn test_units_per_order_are_precomputed() {
        let p = problem();
        let m = SolverModel::from_problem(&p);
        assert_eq!(m.units(), &[3, 3, 0]);
        assert_eq!(m.units_per_order(OrderIndex::new(1)), 3);
    }

    #[test]
    fn test_item_indices_are_consistent_with_demand() {
        let p = problem();
        let m = SolverModel::from_problem(&p);

        for item in m.iter_items() {
            for o in 0..m.order_count() {
                let idx = OrderIndex::new(o);
                let listed = m.orders_with_item(item).contains(&idx);
                assert_eq!(listed, m.demand(idx, item) > 0);
            }
            for c in 0..m.corridor_count() {
                let idx = CorridorIndex::new(c);
                let listed = m.corridors_with_item(item).contains(&idx);
                assert_eq!(listed, m.supply(idx, item) > 0);
            }
        }
    }

    #[test]
    fn test_item_appearing_nowhere_has_empty_lists() {
        let p = {
            let mut b = ProblemBuilder::new();
            b.item_count(4).wave_bounds(0, 10);
            b.add_order(stock(&[(0, 1)]));
            b.add_corridor(stock(&[(0, 1)]));
            b.build().unwrap()
        };
        let m = SolverModel::from_problem(&p);
        assert!(m.orders_with_item(ItemId::new(3)).is_empty());
        assert!(m.corridors_with_item(ItemId::new(3)).is_empty());
    }

    #[test]
    fn test_empty_instance_builds() {
        let p = {
            let mut b = ProblemBuilder::new();
            b.item_count(0).wave_bounds(0, 0);
            b.build().unwrap()
        };
        let m = SolverModel::from_problem(&p);
        assert_eq!(m.order_count(), 0);
        assert_eq!(m.corridor_count(), 0);
        assert_eq!(m.item_count(), 0);
    }
}
