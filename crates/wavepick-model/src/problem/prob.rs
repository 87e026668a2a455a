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

use crate::problem::{
    corridor::Corridor,
    err::{InvertedWaveBoundsError, ItemOutOfRangeError, ProblemError, StockSide},
    item::ItemId,
    order::Order,
};

/// Inclusive bounds `[lower, upper]` on the total number of units in a
/// wave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaveBounds {
    lower: u32,
    upper: u32,
}

impl WaveBounds {
    pub fn new(lower: u32, upper: u32) -> Result<Self, InvertedWaveBoundsError> {
        if lower > upper {
            return Err(InvertedWaveBoundsError::new(lower, upper));
        }
        Ok(Self { lower, upper })
    }

    #[inline]
    pub fn lower(&self) -> u32 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> u32 {
        self.upper
    }

    #[inline]
    pub fn contains(&self, total_units: u64) -> bool {
        self.lower as u64 <= total_units && total_units <= self.upper as u64
    }
}

impl std::fmt::Display for WaveBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// An immutable wave-picking instance: orders, corridors, the number of
/// item types, and the wave-size bounds.
///
/// Construction validates that every referenced item id is below
/// `item_count`; downstream code may therefore index per-item structures
/// without further checks.
#[derive(Debug, Clone)]
pub struct Problem {
    orders: Vec<Order>,
    corridors: Vec<Corridor>,
    item_count: usize,
    bounds: WaveBounds,
}

impl Problem {
    pub fn new(
        orders: Vec<Order>,
        corridors: Vec<Corridor>,
        item_count: usize,
        bounds: WaveBounds,
    ) -> Result<Self, ProblemError> {
        for order in &orders {
            if let Some(&item) = order.demand().keys().find(|i| i.index() >= item_count) {
                return Err(ProblemError::from(ItemOutOfRangeError::new(
                    StockSide::OrderDemand,
                    order.id().value(),
                    item,
                    item_count,
                )));
            }
        }
        for corridor in &corridors {
            if let Some(&item) = corridor.supply().keys().find(|i| i.index() >= item_count) {
                return Err(ProblemError::from(ItemOutOfRangeError::new(
                    StockSide::CorridorSupply,
                    corridor.id().value(),
                    item,
                    item_count,
                )));
            }
        }

        Ok(Self {
            orders,
            corridors,
            item_count,
            bounds,
        })
    }

    #[inline]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[inline]
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    #[inline]
    pub fn bounds(&self) -> WaveBounds {
        self.bounds
    }

    #[inline]
    pub fn iter_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    #[inline]
    pub fn iter_corridors(&self) -> impl Iterator<Item = &Corridor> {
        self.corridors.iter()
    }

    /// Total supply of `item` across all corridors.
    #[inline]
    pub fn total_supply_of(&self, item: ItemId) -> u64 {
        self.corridors
            .iter()
            .map(|c| c.supply_for(item) as u64)
            .sum()
    }
}
