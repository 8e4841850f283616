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

//! Layout primitives shared by the report and chart descriptors.

use serde::Serialize;

/// Collapses repeated labels.
///
/// Position `i` shows its value only when it differs from the value at
/// position `i - 1`. Absent values always show as an empty label.
///
/// # Examples
///
/// ```
/// use speedup_core::report::collapse_labels;
///
/// let t = [1, 1, 2, 2, 2, 4].map(|t: u32| Some(t.to_string()));
/// assert_eq!(collapse_labels(&t), ["1", "", "2", "", "", "4"]);
/// ```
pub fn collapse_labels(values: &[Option<String>]) -> Vec<String> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| match value {
            Some(label) if i == 0 || values[i - 1].as_ref() != Some(label) => label.clone(),
            _ => String::new(),
        })
        .collect()
}

/// Shows every present value; absent values show as an empty label.
pub fn plain_labels(values: &[Option<String>]) -> Vec<String> {
    values.iter().map(|v| v.clone().unwrap_or_default()).collect()
}

/// A rule spanning one maximal run of positions sharing a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bracket {
    /// Category shown under the rule.
    pub label: String,
    /// First position of the run.
    pub start: usize,
    /// Number of positions in the run.
    pub len: usize,
    /// Rule length in points, never negative.
    pub rule_length: f64,
}

/// Splits `categories` into maximal runs of equal values.
///
/// Each run gets a rule of `len * position_width - margin` points.
pub fn brackets(categories: &[&str], position_width: f64, margin: f64) -> Vec<Bracket> {
    let mut runs: Vec<Bracket> = Vec::new();

    for (i, category) in categories.iter().enumerate() {
        match runs.last_mut() {
            Some(run) if run.label == *category => run.len += 1,
            _ => runs.push(Bracket {
                label: category.to_string(),
                start: i,
                len: 1,
                rule_length: 0.0,
            }),
        }
    }

    for run in &mut runs {
        run.rule_length = (run.len as f64 * position_width - margin).max(0.0);
    }
    runs
}

/// Upper bound on the number of ticks of a value axis.
pub const MAX_AXIS_TICKS: usize = 50;

/// Multipliers walking a step along 1, 2, 5, 10, 20, 50, ...
const STEP_FACTORS: [f64; 3] = [2.0, 2.5, 2.0];

/// A value axis snapped to a tick step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    /// Lowest value shown.
    pub min: f64,
    /// Highest value shown.
    pub max: f64,
    /// Distance between ticks.
    pub step: f64,
    /// Tick positions from `min` to `max` inclusive.
    pub ticks: Vec<f64>,
}

impl Axis {
    /// Builds the smallest step-aligned axis covering `[lower, upper]`.
    ///
    /// A degenerate range is widened by one step. When the range would need
    /// more than [`MAX_AXIS_TICKS`] ticks, the step grows along the 1-2-5
    /// sequence until it fits. Returns `None` unless both bounds are finite
    /// and `step` is finite and positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use speedup_core::report::Axis;
    ///
    /// let axis = Axis::snapped(57_000.0, 58_000.0, 0.5).unwrap();
    /// assert_eq!(axis.step, 25.0);
    /// assert_eq!(axis.ticks.len(), 41);
    /// ```
    pub fn snapped(lower: f64, upper: f64, step: f64) -> Option<Self> {
        if !(lower.is_finite() && upper.is_finite() && step.is_finite() && step > 0.0) {
            return None;
        }
        let (lower, upper) = (lower.min(upper), lower.max(upper));

        let mut step = step;
        let mut factors = STEP_FACTORS.iter().cycle();
        while (upper / step).ceil() - (lower / step).floor() >= MAX_AXIS_TICKS as f64 {
            step *= factors.next().copied().unwrap_or(2.0);
        }

        let low = (lower / step).floor() as i64;
        let mut high = (upper / step).ceil() as i64;
        if high <= low {
            high = low + 1;
        }

        Some(Self {
            min: low as f64 * step,
            max: high as f64 * step,
            step,
            ticks: (low..=high).map(|i| i as f64 * step).collect(),
        })
    }

    /// Axis covering every `(lower, upper)` pair.
    ///
    /// `None` when there are no pairs or [`Axis::snapped`] rejects the range.
    pub fn covering<I>(bounds: I, step: f64) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (lower, upper) = bounds
            .into_iter()
            .fold(None, |acc: Option<(f64, f64)>, (lo, hi)| match acc {
                Some((l, h)) => Some((l.min(lo), h.max(hi))),
                None => Some((lo, hi)),
            })?;
        Self::snapped(lower, upper, step)
    }
}
