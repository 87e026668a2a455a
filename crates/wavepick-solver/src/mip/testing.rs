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

use crate::mip::{
    backend::{MilpBackend, SolveReport},
    formulator::ModelSpec,
    spec::{ModelVariant, SubsolveParams},
};
use parking_lot::Mutex;
use std::time::Duration;

/// What a [`MockBackend`] remembers about one solve call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub variant: ModelVariant,
    pub had_warm_start: bool,
    pub time_limit: Duration,
}

type ResponseFn = dyn Fn(&ModelSpec<'_>, &SubsolveParams) -> SolveReport + Send + Sync;

/// Scripted backend for driver-logic tests: records every call and
/// answers through the provided closure. No native solver involved.
pub struct MockBackend {
    calls: Mutex<Vec<RecordedCall>>,
    respond: Box<ResponseFn>,
}

impl MockBackend {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&ModelSpec<'_>, &SubsolveParams) -> SolveReport + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Backend that reports every sub-solve as infeasible.
    pub fn always_infeasible() -> Self {
        Self::new(|_, _| SolveReport::infeasible())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl MilpBackend for MockBackend {
    fn solve(&self, spec: &ModelSpec<'_>, params: &SubsolveParams) -> SolveReport {
        self.calls.lock().push(RecordedCall {
            variant: spec.variant(),
            had_warm_start: params.warm_start.is_some(),
            time_limit: params.time_limit,
        });
        (self.respond)(spec, params)
    }
}
