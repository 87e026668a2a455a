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
    builder::ProblemBuilder, err::ProblemLoaderError, item::ItemId, prob::Problem,
};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Reader for the wave-picking instance format:
///
/// ```text
/// o i a
/// <o order lines:    d item qty item qty ...>
/// <a corridor lines: d item qty item qty ...>
/// LB UB
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProblemLoader;

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_bufread<R: BufRead>(&self, mut br: R) -> Result<Problem, ProblemLoaderError> {
        let mut sc = Scanner::new(&mut br);
        let order_count = sc.next_u32()? as usize;
        let item_count = sc.next_u32()? as usize;
        let corridor_count = sc.next_u32()? as usize;

        let mut builder = ProblemBuilder::new();
        builder.item_count(item_count);

        for _ in 0..order_count {
            builder.add_order(Self::read_stock_line(&mut sc)?);
        }
        for _ in 0..corridor_count {
            builder.add_corridor(Self::read_stock_line(&mut sc)?);
        }

        let lower = sc.next_u32()?;
        let upper = sc.next_u32()?;
        builder.wave_bounds(lower, upper);

        Ok(builder.build()?)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Problem, ProblemLoaderError> {
        let file = File::open(path).map_err(ProblemLoaderError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Problem, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Problem, ProblemLoaderError> {
        self.from_reader(s.as_bytes())
    }

    fn read_stock_line<R: BufRead>(
        sc: &mut Scanner<R>,
    ) -> Result<BTreeMap<ItemId, u32>, ProblemLoaderError> {
        let entries = sc.next_u32()? as usize;
        let mut stock = BTreeMap::new();
        for _ in 0..entries {
            let item = ItemId::new(sc.next_u32()?);
            let qty = sc.next_u32()?;
            // Duplicate item lines accumulate.
            *stock.entry(item).or_insert(0) += qty;
        }
        Ok(stock)
    }
}

#[derive(Debug)]
struct Scanner<R: BufRead> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    #[inline]
    fn fill_line(&mut self) -> Result<(), ProblemLoaderError> {
        self.buf.clear();
        self.pos = 0;
        let n = self
            .rdr
            .read_line(&mut self.buf)
            .map_err(ProblemLoaderError::Io)?;
        if n == 0 {
            return Err(ProblemLoaderError::UnexpectedEof);
        }
        Ok(())
    }

    #[inline]
    fn skip_ws(&mut self) -> Result<(), ProblemLoaderError> {
        loop {
            if self.pos >= self.buf.len() {
                self.fill_line()?;
                continue;
            }
            while self.pos < self.buf.len() && self.buf.as_bytes()[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.buf.len() {
                continue;
            }
            return Ok(());
        }
    }

    #[inline]
    fn next_u32(&mut self) -> Result<u32, ProblemLoaderError> {
        self.skip_ws()?;
        let start = self.pos;
        while self.pos < self.buf.len() && !self.buf.as_bytes()[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        let tok = &self.buf[start..self.pos];
        tok.parse::<u32>().map_err(ProblemLoaderError::ParseInt)
    }
}
