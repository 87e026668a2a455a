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

use crate::{
    mip::{
        backend::VariableValues,
        outcome::{RelaxedPoint, WaveCandidate},
        spec::ModelVariant,
    },
    model::{
        index::{CorridorIndex, OrderIndex},
        solver_model::SolverModel,
    },
};
use wavepick_model::prelude::{ItemId, WaveBounds};

/// One per-item balance constraint:
/// `Σ demand·x  ≤  Σ supply·y` over the item's sparse columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceRow {
    item: ItemId,
    demand: Vec<(OrderIndex, u32)>,
    supply: Vec<(CorridorIndex, u32)>,
}

impl BalanceRow {
    #[inline]
    pub fn item(&self) -> ItemId {
        self.item
    }

    #[inline]
    pub fn demand(&self) -> &[(OrderIndex, u32)] {
        &self.demand
    }

    #[inline]
    pub fn supply(&self) -> &[(CorridorIndex, u32)] {
        &self.supply
    }
}

/// Complete data-level description of one sub-solve model, handed to a
/// backend. Rows and coefficient slices are borrowed from the formulator;
/// building a spec allocates nothing.
#[derive(Debug, Clone)]
pub struct ModelSpec<'f> {
    variant: ModelVariant,
    order_units: &'f [u64],
    corridor_count: usize,
    bounds: WaveBounds,
    balance_rows: &'f [BalanceRow],
}

impl<'f> ModelSpec<'f> {
    #[inline]
    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    #[inline]
    pub fn order_units(&self) -> &'f [u64] {
        self.order_units
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.order_units.len()
    }

    #[inline]
    pub fn corridor_count(&self) -> usize {
        self.corridor_count
    }

    #[inline]
    pub fn bounds(&self) -> WaveBounds {
        self.bounds
    }

    #[inline]
    pub fn balance_rows(&self) -> &'f [BalanceRow] {
        self.balance_rows
    }
}

/// Assembles the three model variants over a shared constraint skeleton.
///
/// The skeleton (wave-size coefficients plus one balance row per item
/// with nonzero demand) is derived from the index once; the variants only
/// differ in objective and in the corridor-count equality, so emitting a
/// spec is free and repeated solves replay the same rows.
#[derive(Debug)]
pub struct MipFormulator<'m, 'p> {
    model: &'m SolverModel<'p>,
    balance_rows: Vec<BalanceRow>,
}

impl<'m, 'p> MipFormulator<'m, 'p> {
    pub fn new(model: &'m SolverModel<'p>) -> Self {
        let mut balance_rows = Vec::new();
        for item in model.iter_items() {
            let orders = model.orders_with_item(item);
            if orders.is_empty() {
                continue;
            }
            let demand = orders
                .iter()
                .map(|&o| (o, model.demand(o, item)))
                .collect();
            let supply = model
                .corridors_with_item(item)
                .iter()
                .map(|&c| (c, model.supply(c, item)))
                .collect();
            balance_rows.push(BalanceRow {
                item,
                demand,
                supply,
            });
        }

        Self {
            model,
            balance_rows,
        }
    }

    #[inline]
    pub fn model(&self) -> &'m SolverModel<'p> {
        self.model
    }

    #[inline]
    pub fn balance_rows(&self) -> &[BalanceRow] {
        &self.balance_rows
    }

    #[inline]
    fn spec(&self, variant: ModelVariant) -> ModelSpec<'_> {
        ModelSpec {
            variant,
            order_units: self.model.units(),
            corridor_count: self.model.corridor_count(),
            bounds: self.model.wave_bounds(),
            balance_rows: &self.balance_rows,
        }
    }

    #[inline]
    pub fn fixed_corridor_count(&self, k: usize) -> ModelSpec<'_> {
        self.spec(ModelVariant::FixedCorridorCount { k })
    }

    #[inline]
    pub fn parametric(&self, lambda: f64) -> ModelSpec<'_> {
        self.spec(ModelVariant::Parametric { lambda })
    }

    #[inline]
    pub fn relaxation(&self, lambda: f64) -> ModelSpec<'_> {
        self.spec(ModelVariant::Relaxation { lambda })
    }

    /// Reads an integral selection out of raw variable values: anything
    /// above 0.5 counts as selected, `totalItems` is the rounded activity
    /// of the wave-size expression.
    pub fn extract_candidate(&self, values: &VariableValues) -> WaveCandidate {
        let orders: Vec<OrderIndex> = values
            .orders
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0.5)
            .map(|(o, _)| OrderIndex::new(o))
            .collect();
        let corridors: Vec<CorridorIndex> = values
            .corridors
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v > 0.5)
            .map(|(c, _)| CorridorIndex::new(c))
            .collect();

        let activity: f64 = values
            .orders
            .iter()
            .enumerate()
            .map(|(o, &v)| self.model.units()[o] as f64 * v)
            .sum();
        let total_units = activity.round().max(0.0) as u64;

        WaveCandidate::new(orders, corridors, total_units)
    }

    /// Reads a fractional relaxation point out of raw variable values.
    pub fn extract_point(&self, values: &VariableValues) -> RelaxedPoint {
        let items_value: f64 = values
            .orders
            .iter()
            .enumerate()
            .map(|(o, &v)| self.model.units()[o] as f64 * v)
            .sum();
        let corridor_mass: f64 = values.corridors.iter().sum();
        RelaxedPoint {
            items_value,
            corridor_mass,
            orders: values.orders.clone(),
            corridors: values.corridors.clone(),
        }
    }
}
