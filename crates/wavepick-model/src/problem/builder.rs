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
    corridor::{Corridor, CorridorId},
    err::ProblemError,
    item::ItemId,
    order::{Order, OrderId},
    prob::{Problem, WaveBounds},
};
use std::collections::BTreeMap;

/// Push-style constructor for [`Problem`]. Orders and corridors receive
/// their ids from insertion position, matching the instance file layout.
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    orders: Vec<BTreeMap<ItemId, u32>>,
    corridors: Vec<BTreeMap<ItemId, u32>>,
    item_count: usize,
    lower: u32,
    upper: u32,
}

impl ProblemBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_order(&mut self, demand: BTreeMap<ItemId, u32>) -> &mut Self {
        self.orders.push(demand);
        self
    }

    pub fn add_corridor(&mut self, supply: BTreeMap<ItemId, u32>) -> &mut Self {
        self.corridors.push(supply);
        self
    }

    pub fn item_count(&mut self, item_count: usize) -> &mut Self {
        self.item_count = item_count;
        self
    }

    pub fn wave_bounds(&mut self, lower: u32, upper: u32) -> &mut Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn build(self) -> Result<Problem, ProblemError> {
        let bounds = WaveBounds::new(self.lower, self.upper)?;
        let orders = self
            .orders
            .into_iter()
            .enumerate()
            .map(|(i, demand)| Order::new(OrderId::new(i as u32), demand))
            .collect();
        let corridors = self
            .corridors
            .into_iter()
            .enumerate()
            .map(|(i, supply)| Corridor::new(CorridorId::new(i as u32), supply))
            .collect();
        Problem::new(orders, corridors, self.item_count, bounds)
    }
}
