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

use crate::mip::{formulator::ModelSpec, spec::SubsolveParams};

/// Terminal status of one backend solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    /// Unbounded, solver error, or timeout without an incumbent. Treated
    /// exactly like `Infeasible` by the drivers.
    Other,
}

impl SolveStatus {
    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Raw variable values of a terminal OPTIMAL/FEASIBLE solve.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableValues {
    pub orders: Vec<f64>,
    pub corridors: Vec<f64>,
}

/// What a backend hands back. `values` is present iff
/// `status.has_solution()`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    status: SolveStatus,
    values: Option<VariableValues>,
}

impl SolveReport {
    #[inline]
    pub fn solved(status: SolveStatus, values: VariableValues) -> Self {
        debug_assert!(status.has_solution());
        Self {
            status,
            values: Some(values),
        }
    }

    #[inline]
    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            values: None,
        }
    }

    #[inline]
    pub fn failed() -> Self {
        Self {
            status: SolveStatus::Other,
            values: None,
        }
    }

    #[inline]
    pub fn status(&self) -> SolveStatus {
        self.status
    }

    #[inline]
    pub fn values(&self) -> Option<&VariableValues> {
        self.values.as_ref()
    }
}

/// The minimal contract the driver needs from a MIP/LP engine.
///
/// Implementations solve synchronously, enforce the configured time limit
/// themselves, may silently drop the warm start, and must never let an
/// engine failure escape as a panic or error: anything non-terminal comes
/// back as `Infeasible`/`Other`. Each call owns its model exclusively and
/// releases it on every exit path.
pub trait MilpBackend: Send + Sync {
    fn solve(&self, spec: &ModelSpec<'_>, params: &SubsolveParams) -> SolveReport;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(SolveStatus::Optimal.has_solution());
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Infeasible.has_solution());
        assert!(!SolveStatus::Other.has_solution());
    }

    #[test]
    fn test_failed_report_has_no_values() {
        let r = SolveReport::failed();
        assert_eq!(r.status(), SolveStatus::Other);
        assert!(r.values().is_none());
    }
}
