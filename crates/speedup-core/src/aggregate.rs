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

//! Reduction of sample groups to summary statistics.
//!
//! Two independent reductions run over the same sample groups: quartiles of
//! the elapsed times ([`aggregate`]) and the arithmetic mean of attempt counts
//! ([`mean_attempts`]).

use crate::key::ConfigKey;
use crate::sample::SampleStore;
use crate::stats::{Statistics, StatisticsMap};
use std::collections::BTreeMap;
use tracing::debug;

/// Computes a percentile of sorted values using linear interpolation.
///
/// The rank of percentile `p` is `p / 100 * (n - 1)`; fractional ranks
/// interpolate between the two neighbouring values. Returns `None` for an
/// empty slice.
///
/// # Examples
///
/// ```
/// use speedup_core::aggregate::percentile;
///
/// let sorted = [10.0, 20.0, 30.0, 40.0];
/// assert_eq!(percentile(&sorted, 50.0), Some(25.0));
/// assert_eq!(percentile(&sorted, 25.0), Some(17.5));
/// assert_eq!(percentile(&[], 50.0), None);
/// ```
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (p.clamp(0.0, 100.0) / 100.0) * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let (low, high) = (sorted[lo], sorted[hi]);
    let value = low + (high - low) * (rank - lo as f64);
    // rounding must never leave the bracketing pair
    Some(value.clamp(low, high))
}

/// Computes quartiles of an unsorted set of values.
pub fn quartiles(values: &[f64]) -> Option<Statistics> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(Statistics::new(
        percentile(&sorted, 25.0)?,
        percentile(&sorted, 50.0)?,
        percentile(&sorted, 75.0)?,
    ))
}

/// Reduces every sample group to quartiles of its elapsed times.
///
/// Keys without samples are absent from the result.
pub fn aggregate(store: &SampleStore) -> StatisticsMap {
    let mut stats = StatisticsMap::new();

    for (key, samples) in store.groups() {
        let times: Vec<f64> = samples.iter().map(|s| s.elapsed).collect();
        if let Some(q) = quartiles(&times) {
            stats.insert(key, q);
        }
    }

    debug!(
        samples = store.len(),
        keys = stats.len(),
        "aggregated sample groups"
    );
    stats
}

/// Averages attempt counts per key over samples that carry one.
///
/// Keys whose samples carry no attempt counts are absent from the result.
pub fn mean_attempts(store: &SampleStore) -> BTreeMap<ConfigKey, f64> {
    let mut means = BTreeMap::new();

    for (key, samples) in store.groups() {
        let attempts: Vec<f64> = samples.iter().filter_map(|s| s.attempts).collect();
        if !attempts.is_empty() {
            let mean = attempts.iter().sum::<f64>() / attempts.len() as f64;
            means.insert(key, mean);
        }
    }

    debug!(keys = means.len(), "averaged attempt counts");
    means
}
