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

/// Identifier of a corridor (aisle), `0..corridor_count`, matching the
/// corridor's position in the instance file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CorridorId(u32);

impl CorridorId {
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

impl std::fmt::Display for CorridorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A corridor: a sparse multiset of item quantities available on its
/// shelves. Zero-quantity entries are dropped on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    id: CorridorId,
    supply: BTreeMap<ItemId, u32>,
}

impl Corridor {
    pub fn new(id: CorridorId, supply: BTreeMap<ItemId, u32>) -> Self {
        let supply: BTreeMap<ItemId, u32> =
            supply.into_iter().filter(|&(_, qty)| qty > 0).collect();
        Self { id, supply }
    }

    #[inline]
    pub fn id(&self) -> CorridorId {
        self.id
    }

    #[inline]
    pub fn supply(&self) -> &BTreeMap<ItemId, u32> {
        &self.supply
    }

    #[inline]
    pub fn supply_for(&self, item: ItemId) -> u32 {
        self.supply.get(&item).copied().unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.supply.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_lookup() {
        let mut m = BTreeMap::new();
        m.insert(ItemId::new(2), 7);
        m.insert(ItemId::new(5), 0);
        let corridor = Corridor::new(CorridorId::new(3), m);
        assert_eq!(corridor.supply_for(ItemId::new(2)), 7);
        assert_eq!(corridor.supply_for(ItemId::new(5)), 0);
        assert_eq!(corridor.supply().len(), 1);
    }
}
