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

use crate::problem::item::ItemId;
use std::collections::BTreeMap;

/// Identifier of a customer order, `0..order_count`, matching the order's
/// position in the instance file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(u32);

impl OrderId {
    #[inline]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.0
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer order: a sparse multiset of item quantities.
///
/// Zero-quantity entries are dropped on construction, so `demand()` holds
/// strictly positive quantities only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    demand: BTreeMap<ItemId, u32>,
    total_units: u64,
}

impl Order {
    pub fn new(id: OrderId, demand: BTreeMap<ItemId, u32>) -> Self {
        let demand: BTreeMap<ItemId, u32> =
            demand.into_iter().filter(|&(_, qty)| qty > 0).collect();
        let total_units = demand.values().map(|&q| q as u64).sum();
        Self {
            id,
            demand,
            total_units,
        }
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn demand(&self) -> &BTreeMap<ItemId, u32> {
        &self.demand
    }

    #[inline]
    pub fn demand_for(&self, item: ItemId) -> u32 {
        self.demand.get(&item).copied().unwrap_or(0)
    }

    /// Total number of units across all items, used both as objective
    /// coefficient and as the order's wave-size contribution.
    #[inline]
    pub fn total_units(&self) -> u64 {
        self.total_units
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }
}
