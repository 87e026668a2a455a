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

use crate::problem::{CorridorId, ItemId, OrderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownOrderError {
    order: OrderId,
    order_count: usize,
}

impl UnknownOrderError {
    pub fn new(order: OrderId, order_count: usize) -> Self {
        Self { order, order_count }
    }

    pub fn order(&self) -> OrderId {
        self.order
    }
}

impl std::fmt::Display for UnknownOrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Selected order {} does not exist (instance has {} orders)",
            self.order, self.order_count
        )
    }
}

impl std::error::Error for UnknownOrderError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownCorridorError {
    corridor: CorridorId,
    corridor_count: usize,
}

impl UnknownCorridorError {
    pub fn new(corridor: CorridorId, corridor_count: usize) -> Self {
        Self {
            corridor,
            corridor_count,
        }
    }

    pub fn corridor(&self) -> CorridorId {
        self.corridor
    }
}

impl std::fmt::Display for UnknownCorridorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Visited corridor {} does not exist (instance has {} corridors)",
            self.corridor, self.corridor_count
        )
    }
}

impl std::error::Error for UnknownCorridorError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WaveSizeError {
    total_units: u64,
    lower: u32,
    upper: u32,
}

impl WaveSizeError {
    pub fn new(total_units: u64, lower: u32, upper: u32) -> Self {
        Self {
            total_units,
            lower,
            upper,
        }
    }

    pub fn total_units(&self) -> u64 {
        self.total_units
    }
}

impl std::fmt::Display for WaveSizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wave picks {} units, outside the bounds [{}, {}]",
            self.total_units, self.lower, self.upper
        )
    }
}

impl std::error::Error for WaveSizeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemShortageError {
    item: ItemId,
    required: u64,
    available: u64,
}

impl ItemShortageError {
    pub fn new(item: ItemId, required: u64, available: u64) -> Self {
        Self {
            item,
            required,
            available,
        }
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn required(&self) -> u64 {
        self.required
    }

    pub fn available(&self) -> u64 {
        self.available
    }
}

impl std::fmt::Display for ItemShortageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Item {}: selected orders require {} units but visited corridors supply only {}",
            self.item, self.required, self.available
        )
    }
}

impl std::error::Error for ItemShortageError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnknownOrder(UnknownOrderError),
    UnknownCorridor(UnknownCorridorError),
    WaveSize(WaveSizeError),
    ItemShortage(ItemShortageError),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownOrder(e) => write!(f, "{}", e),
            ValidationError::UnknownCorridor(e) => write!(f, "{}", e),
            ValidationError::WaveSize(e) => write!(f, "{}", e),
            ValidationError::ItemShortage(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<UnknownOrderError> for ValidationError {
    fn from(err: UnknownOrderError) -> Self {
        ValidationError::UnknownOrder(err)
    }
}

impl From<UnknownCorridorError> for ValidationError {
    fn from(err: UnknownCorridorError) -> Self {
        ValidationError::UnknownCorridor(err)
    }
}

impl From<WaveSizeError> for ValidationError {
    fn from(err: WaveSizeError) -> Self {
        ValidationError::WaveSize(err)
    }
}

impl From<ItemShortageError> for ValidationError {
    fn from(err: ItemShortageError) -> Self {
        ValidationError::ItemShortage(err)
    }
}
