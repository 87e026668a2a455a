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
use std::time::Duration;

/// The three model variants assembled by the formulator.
///
/// All share the wave-size window and the per-item balance rows; they
/// differ in objective and in the optional corridor-count equality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelVariant {
    /// `Σ y_c = k`; maximize picked units.
    FixedCorridorCount { k: usize },
    /// Maximize `Σ units·x − λ·Σ y` over binaries.
    Parametric { lambda: f64 },
    /// Same objective as `Parametric`, variables continuous on `[0, 1]`.
    Relaxation { lambda: f64 },
}

impl ModelVariant {
    #[inline]
    pub fn is_relaxation(&self) -> bool {
        matches!(self, ModelVariant::Relaxation { .. })
    }

    #[inline]
    pub fn lambda(&self) -> Option<f64> {
        match self {
            ModelVariant::FixedCorridorCount { .. } => None,
            ModelVariant::Parametric { lambda } | ModelVariant::Relaxation { lambda } => {
                Some(*lambda)
            }
        }
    }
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelVariant::FixedCorridorCount { k } => write!(f, "fixed-k({})", k),
            ModelVariant::Parametric { lambda } => write!(f, "parametric({:.5})", lambda),
            ModelVariant::Relaxation { lambda } => write!(f, "relaxation({:.5})", lambda),
        }
    }
}

/// Search-emphasis hint forwarded to the backend. Backends without a
/// matching control may ignore it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MipEmphasis {
    Feasibility,
    #[default]
    Balanced,
    Optimality,
}

/// A starting assignment in `[0, 1]` per variable, handed to the backend
/// as a MIP start. Values above 0.5 are read as 1. Non-binding: the
/// backend may reject it silently.
#[derive(Debug, Clone, PartialEq)]
pub struct WarmStart {
    orders: Vec<f64>,
    corridors: Vec<f64>,
}

impl WarmStart {
    #[inline]
    pub fn new(orders: Vec<f64>, corridors: Vec<f64>) -> Self {
        Self { orders, corridors }
    }

    /// Indicator vectors for an integral selection.
    pub fn from_selection(
        order_count: usize,
        corridor_count: usize,
        orders: &[OrderIndex],
        corridors: &[CorridorIndex],
    ) -> Self {
        let mut x = vec![0.0; order_count];
        for o in orders {
            x[o.get()] = 1.0;
        }
        let mut y = vec![0.0; corridor_count];
        for c in corridors {
            y[c.get()] = 1.0;
        }
        Self::new(x, y)
    }

    #[inline]
    pub fn orders(&self) -> &[f64] {
        &self.orders
    }

    #[inline]
    pub fn corridors(&self) -> &[f64] {
        &self.corridors
    }
}

/// Per-sub-solve parameters.
#[derive(Debug, Clone)]
pub struct SubsolveParams {
    pub time_limit: Duration,
    pub threads: Option<usize>,
    pub emphasis: MipEmphasis,
    pub warm_start: Option<WarmStart>,
}

impl SubsolveParams {
    #[inline]
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit,
            threads: None,
            emphasis: MipEmphasis::default(),
            warm_start: None,
        }
    }

    #[inline]
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    #[inline]
    pub fn emphasis(mut self, emphasis: MipEmphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    #[inline]
    pub fn warm_start(mut self, warm_start: WarmStart) -> Self {
        self.warm_start = Some(warm_start);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_start_from_selection_builds_indicators() {
        let ws = WarmStart::from_selection(
            3,
            2,
            &[OrderIndex::new(0), OrderIndex::new(2)],
            &[CorridorIndex::new(1)],
        );
        assert_eq!(ws.orders(), &[1.0, 0.0, 1.0]);
        assert_eq!(ws.corridors(), &[0.0, 1.0]);
    }

    #[test]
    fn test_variant_lambda_accessor() {
        assert_eq!(ModelVariant::FixedCorridorCount { k: 3 }.lambda(), None);
        assert_eq!(ModelVariant::Parametric { lambda: 2.5 }.lambda(), Some(2.5));
        assert!(ModelVariant::Relaxation { lambda: 0.0 }.is_relaxation());
    }

    #[test]
    fn test_params_builder_clamps_threads() {
        let p = SubsolveParams::with_time_limit(Duration::from_secs(1)).threads(0);
        assert_eq!(p.threads, Some(1));
    }
}
