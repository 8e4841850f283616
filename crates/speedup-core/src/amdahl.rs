// Speedup - parallel search benchmark result reduction
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Amdahl's-law reference series.

use crate::error::{PipelineError, Result};
use crate::stats::SpeedupStatistics;
use std::collections::BTreeMap;

/// Theoretical speedup with `threads` workers when a fraction `parallel_fraction`
/// of the work parallelizes perfectly.
pub fn amdahl(parallel_fraction: f64, threads: f64) -> f64 {
    1.0 / ((1.0 - parallel_fraction) + parallel_fraction / threads)
}

/// Projects the Amdahl curve over `threads`, scaled by `base`.
///
/// Every point has zero-width bounds. `t = 1` always yields `base`; large
/// thread counts approach `base / (1 - parallel_fraction)`.
///
/// # Examples
///
/// ```
/// use speedup_core::amdahl::project;
///
/// let curve = project(0.714, 1.0, &[1]).unwrap();
/// assert!((curve[&1].p50 - 1.0).abs() < 1e-12);
/// ```
pub fn project(
    parallel_fraction: f64,
    base: f64,
    threads: &[u32],
) -> Result<BTreeMap<u32, SpeedupStatistics>> {
    if !(parallel_fraction > 0.0 && parallel_fraction <= 1.0) {
        return Err(PipelineError::invalid_parameter(
            "parallel_fraction",
            format!("{} is outside (0, 1]", parallel_fraction),
        ));
    }
    if !(base.is_finite() && base > 0.0) {
        return Err(PipelineError::invalid_parameter(
            "base",
            format!("{} is not a positive speedup", base),
        ));
    }
    if threads.contains(&0) {
        return Err(PipelineError::invalid_parameter(
            "threads",
            "thread counts must be positive",
        ));
    }

    Ok(threads
        .iter()
        .map(|&t| {
            let speedup = base * amdahl(parallel_fraction, f64::from(t));
            (t, SpeedupStatistics::exact(speedup))
        })
        .collect())
}
