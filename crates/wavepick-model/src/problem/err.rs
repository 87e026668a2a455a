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
use std::num::ParseIntError;

/// Which side of the stock relation referenced the offending item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockSide {
    OrderDemand,
    CorridorSupply,
}

impl std::fmt::Display for StockSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockSide::OrderDemand => write!(f, "order"),
            StockSide::CorridorSupply => write!(f, "corridor"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemOutOfRangeError {
    side: StockSide,
    owner: u32,
    item: ItemId,
    item_count: usize,
}

impl ItemOutOfRangeError {
    pub fn new(side: StockSide, owner: u32, item: ItemId, item_count: usize) -> Self {
        Self {
            side,
            owner,
            item,
            item_count,
        }
    }

    pub fn side(&self) -> StockSide {
        self.side
    }

    pub fn owner(&self) -> u32 {
        self.owner
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }
}

impl std::fmt::Display for ItemOutOfRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} references item {} but the instance has only {} item types",
            self.side, self.owner, self.item, self.item_count
        )
    }
}

impl std::error::Error for ItemOutOfRangeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvertedWaveBoundsError {
    lower: u32,
    upper: u32,
}

impl InvertedWaveBoundsError {
    pub fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper }
    }

    pub fn lower(&self) -> u32 {
        self.lower
    }

    pub fn upper(&self) -> u32 {
        self.upper
    }
}

impl std::fmt::Display for InvertedWaveBoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Wave-size lower bound {} exceeds upper bound {}",
            self.lower, self.upper
        )
    }
}

impl std::error::Error for InvertedWaveBoundsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    ItemOutOfRange(ItemOutOfRangeError),
    InvertedWaveBounds(InvertedWaveBoundsError),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::ItemOutOfRange(e) => write!(f, "{}", e),
            ProblemError::InvertedWaveBounds(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<ItemOutOfRangeError> for ProblemError {
    fn from(err: ItemOutOfRangeError) -> Self {
        ProblemError::ItemOutOfRange(err)
    }
}

impl From<InvertedWaveBoundsError> for ProblemError {
    fn from(err: InvertedWaveBoundsError) -> Self {
        ProblemError::InvertedWaveBounds(err)
    }
}

#[derive(Debug)]
pub enum ProblemLoaderError {
    Io(std::io::Error),
    ParseInt(ParseIntError),
    UnexpectedEof,
    Problem(ProblemError),
}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemLoaderError::Io(e) => write!(f, "I/O error: {}", e),
            ProblemLoaderError::ParseInt(e) => write!(f, "Malformed integer token: {}", e),
            ProblemLoaderError::UnexpectedEof => write!(f, "Unexpected end of input"),
            ProblemLoaderError::Problem(e) => write!(f, "Invalid instance: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {}

impl From<ProblemError> for ProblemLoaderError {
    fn from(err: ProblemError) -> Self {
        ProblemLoaderError::Problem(err)
    }
}
