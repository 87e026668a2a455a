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
use wavepick_model::prelude::WaveSolution;

/// A feasible integral selection extracted from one sub-solve, with its
/// derived scalars. Distinct from an *infeasible* sub-solve outcome: a
/// candidate always came from a terminal OPTIMAL/FEASIBLE status.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveCandidate {
    orders: Vec<OrderIndex>,
    corridors: Vec<CorridorIndex>,
    total_units: u64,
    ratio: f64,
}

impl WaveCandidate {
    pub fn new(orders: Vec<OrderIndex>, corridors: Vec<CorridorIndex>, total_units: u64) -> Self {
        let ratio = total_units as f64 / corridors.len().max(1) as f64;
        Self {
            orders,
            corridors,
            total_units,
            ratio,
        }
    }

    #[inline]
    pub fn orders(&self) -> &[OrderIndex] {
        &self.orders
    }

    #[inline]
    pub fn corridors(&self) -> &[CorridorIndex] {
        &self.corridors
    }

    #[inline]
    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    #[inline]
    pub fn total_units(&self) -> u64 {
        self.total_units
    }

    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn into_solution(self) -> WaveSolution {
        WaveSolution::new(
            self.orders.iter().map(OrderIndex::to_id).collect(),
            self.corridors.iter().map(CorridorIndex::to_id).collect(),
        )
    }
}

impl std::fmt::Display for WaveCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} units over {} corridors (ratio {:.5})",
            self.total_units,
            self.corridors.len(),
            self.ratio
        )
    }
}

/// A fractional point of the LP relaxation, kept as a seed for the
/// integer iterations.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxedPoint {
    pub items_value: f64,
    pub corridor_mass: f64,
    pub orders: Vec<f64>,
    pub corridors: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_guards_against_empty_selection() {
        let c = WaveCandidate::new(vec![], vec![], 0);
        assert_eq!(c.ratio(), 0.0);
        assert_eq!(c.corridor_count(), 0);
    }

    #[test]
    fn test_ratio_is_units_per_corridor() {
        let c = WaveCandidate::new(
            vec![OrderIndex::new(0)],
            vec![CorridorIndex::new(0), CorridorIndex::new(1)],
            9,
        );
        assert_eq!(c.ratio(), 4.5);
    }

    #[test]
    fn test_into_solution_maps_indices_to_ids() {
        let c = WaveCandidate::new(vec![OrderIndex::new(2)], vec![CorridorIndex::new(1)], 5);
        let s = c.into_solution();
        assert_eq!(s.orders().len(), 1);
        assert_eq!(s.corridors().len(), 1);
    }
}
