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

use crate::problem::{CorridorId, OrderId, Problem};
use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// A wave: the set of selected orders and the set of corridors visited to
/// pick them. The empty solution signals that no feasible wave was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveSolution {
    orders: BTreeSet<OrderId>,
    corridors: BTreeSet<CorridorId>,
}

impl WaveSolution {
    #[inline]
    pub fn new(orders: BTreeSet<OrderId>, corridors: BTreeSet<CorridorId>) -> Self {
        Self { orders, corridors }
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() && self.corridors.is_empty()
    }

    #[inline]
    pub fn orders(&self) -> &BTreeSet<OrderId> {
        &self.orders
    }

    #[inline]
    pub fn corridors(&self) -> &BTreeSet<CorridorId> {
        &self.corridors
    }

    #[inline]
    pub fn corridor_count(&self) -> usize {
        self.corridors.len()
    }

    /// Total units picked by the selected orders.
    pub fn total_units(&self, problem: &Problem) -> u64 {
        self.orders
            .iter()
            .map(|o| problem.orders()[o.index()].total_units())
            .sum()
    }

    /// Units picked per corridor visited; zero for the empty selection.
    pub fn productivity(&self, problem: &Problem) -> f64 {
        if self.corridors.is_empty() {
            return 0.0;
        }
        self.total_units(problem) as f64 / self.corridors.len() as f64
    }

    /// Writes the challenge output format: the number of selected orders,
    /// one order id per line, then the number of visited corridors and one
    /// corridor id per line.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "{}", self.orders.len())?;
        for order in &self.orders {
            writeln!(w, "{}", order)?;
        }
        writeln!(w, "{}", self.corridors.len())?;
        for corridor in &self.corridors {
            writeln!(w, "{}", corridor)?;
        }
        Ok(())
    }

    pub fn write_to_path(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()
    }
}
