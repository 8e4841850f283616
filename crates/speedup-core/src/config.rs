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

//! Pipeline configuration.
//!
//! Every field has a default matching the published benchmark setup, so an
//! empty configuration file is valid. Files are deserialized with serde; any
//! subset of fields may be given.
//!
//! # Example
//!
//! ```
//! use speedup_core::config::PipelineConfig;
//!
//! let config = PipelineConfig::default().with_parallel_fraction(0.8);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.layout.ordering.len(), 20);
//! ```

use crate::error::{PipelineError, Result};
use crate::key::{ConfigKey, KeyField, Variant};
use serde::{Deserialize, Serialize};

/// Fraction of the sequential run spent in the parallelizable expansion step.
pub const DEFAULT_PARALLEL_FRACTION: f64 = 0.714;

/// Horizontal space taken by one report position, in points.
pub const DEFAULT_POSITION_WIDTH: f64 = 17.0;

/// Space subtracted from each bracket rule to leave room for its label.
pub const DEFAULT_RULE_MARGIN: f64 = 50.0;

/// Spacing of value-axis ticks.
pub const DEFAULT_Y_TICK_STEP: f64 = 0.5;

/// Thread counts the Amdahl reference is projected over.
pub const DEFAULT_AMDAHL_THREADS: &[u32] = &[1, 2, 4, 8, 16, 32, 64, 128, 256];

/// Outer parallelism degrees shown in the speedup chart.
pub const DEFAULT_CHART_THREADS: &[u32] = &[1, 2, 4, 8, 16, 32, 64];

/// Complete configuration of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Key whose median time all speedups divide by.
    pub baseline: ConfigKey,
    /// Measured parallelizable fraction for the Amdahl projection.
    pub parallel_fraction: f64,
    /// Key whose median speedup scales the Amdahl projection.
    pub amdahl_reference: ConfigKey,
    /// Thread counts of the Amdahl projection.
    pub amdahl_threads: Vec<u32>,
    /// Layout of the per-configuration report.
    pub layout: LayoutConfig,
    /// Layout of the speedup chart.
    pub chart: ChartConfig,
}

impl PipelineConfig {
    /// Sets the baseline key.
    pub fn with_baseline(mut self, baseline: ConfigKey) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the parallelizable fraction.
    pub fn with_parallel_fraction(mut self, fraction: f64) -> Self {
        self.parallel_fraction = fraction;
        self
    }

    /// Sets the report ordering.
    pub fn with_ordering(mut self, ordering: Vec<ConfigKey>) -> Self {
        self.layout.ordering = ordering;
        self
    }

    /// Checks every numeric field against its domain.
    pub fn validate(&self) -> Result<()> {
        if !(self.parallel_fraction > 0.0 && self.parallel_fraction <= 1.0) {
            return Err(PipelineError::invalid_parameter(
                "parallel_fraction",
                format!("{} is outside (0, 1]", self.parallel_fraction),
            ));
        }
        positive_counts("amdahl_threads", &self.amdahl_threads)?;
        self.layout.validate()?;
        self.chart.validate()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            baseline: ConfigKey::baseline(),
            parallel_fraction: DEFAULT_PARALLEL_FRACTION,
            amdahl_reference: ConfigKey::new(Variant::Pbfs, 1, Some(1)),
            amdahl_threads: DEFAULT_AMDAHL_THREADS.to_vec(),
            layout: LayoutConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

/// One row of labels under the report positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRowSpec {
    /// Caption printed before the row.
    pub title: String,
    /// Key field the labels show.
    pub field: KeyField,
    /// Suppress a label equal to its left neighbour.
    pub collapse: bool,
}

/// Layout of the per-configuration report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Width of one position, in points.
    pub position_width: f64,
    /// Subtracted from every bracket rule, in points.
    pub rule_margin: f64,
    /// Value-axis tick spacing.
    pub y_tick_step: f64,
    /// Label rows, top to bottom.
    pub label_rows: Vec<LabelRowSpec>,
    /// Keys shown, left to right.
    pub ordering: Vec<ConfigKey>,
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        positive("layout.position_width", self.position_width)?;
        positive("layout.y_tick_step", self.y_tick_step)?;
        if !(self.rule_margin.is_finite() && self.rule_margin >= 0.0) {
            return Err(PipelineError::invalid_parameter(
                "layout.rule_margin",
                format!("{} is negative", self.rule_margin),
            ));
        }
        if self.ordering.is_empty() {
            return Err(PipelineError::EmptyOrdering);
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            position_width: DEFAULT_POSITION_WIDTH,
            rule_margin: DEFAULT_RULE_MARGIN,
            y_tick_step: DEFAULT_Y_TICK_STEP,
            label_rows: vec![
                LabelRowSpec {
                    title: "t:".to_string(),
                    field: KeyField::T,
                    collapse: true,
                },
                LabelRowSpec {
                    title: "p:".to_string(),
                    field: KeyField::A,
                    collapse: false,
                },
            ],
            ordering: default_ordering(),
        }
    }
}

/// The attempts report ordering: every sequential thread count, then the
/// parallel configurations with at most 16 threads in total, grouped by `t`.
pub fn default_ordering() -> Vec<ConfigKey> {
    let mut ordering: Vec<ConfigKey> = [1, 2, 4, 8, 16]
        .into_iter()
        .map(|t| ConfigKey::new(Variant::Original, t, None))
        .collect();

    for t in [1u32, 2, 4, 8, 16] {
        for a in [1u32, 2, 4, 8, 16] {
            if t * a <= 16 {
                ordering.push(ConfigKey::new(Variant::Pbfs, t, Some(a)));
            }
        }
    }
    ordering
}

/// One line of the speedup chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSpec {
    /// Variant plotted.
    pub variant: Variant,
    /// Partition count; keys without partitions count as 1.
    pub a: u32,
    /// Legend text.
    pub label: String,
}

impl SeriesSpec {
    /// Creates a series.
    pub fn new(variant: Variant, a: u32, label: impl Into<String>) -> Self {
        Self {
            variant,
            a,
            label: label.into(),
        }
    }
}

/// Layout of the speedup chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Outer parallelism degrees plotted.
    pub threads: Vec<u32>,
    /// Ticks of the thread axis.
    pub x_ticks: Vec<u32>,
    /// Speedup-axis tick spacing.
    pub y_tick_step: f64,
    /// Lines, in legend order.
    pub series: Vec<SeriesSpec>,
}

impl ChartConfig {
    fn validate(&self) -> Result<()> {
        positive_counts("chart.threads", &self.threads)?;
        positive_counts("chart.x_ticks", &self.x_ticks)?;
        positive("chart.y_tick_step", self.y_tick_step)?;
        if self.series.iter().any(|s| s.a == 0) {
            return Err(PipelineError::invalid_parameter(
                "chart.series",
                "partition counts must be positive",
            ));
        }
        let largest_t = self.threads.iter().copied().max().unwrap_or(1);
        for spec in self.series.iter().filter(|s| s.variant != Variant::Amdahl) {
            if largest_t.checked_mul(spec.a).is_none() {
                return Err(total_threads_overflow(largest_t, spec.a));
            }
        }
        Ok(())
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_CHART_THREADS.to_vec(),
            x_ticks: DEFAULT_AMDAHL_THREADS.to_vec(),
            y_tick_step: DEFAULT_Y_TICK_STEP,
            series: vec![
                SeriesSpec::new(Variant::Amdahl, 1, "Theor. max (Amdahl's law)"),
                SeriesSpec::new(Variant::Original, 1, "Sequential search"),
                SeriesSpec::new(Variant::Pbfs, 1, "Parallel search, 1 partition"),
                SeriesSpec::new(Variant::Pbfs, 2, "Parallel search, 2 partitions"),
                SeriesSpec::new(Variant::Pbfs, 4, "Parallel search, 4 partitions"),
                SeriesSpec::new(Variant::Pbfs, 8, "Parallel search, 8 partitions"),
                SeriesSpec::new(Variant::Pbfs, 16, "Parallel search, 16 partitions"),
            ],
        }
    }
}

pub(crate) fn total_threads_overflow(t: u32, a: u32) -> PipelineError {
    PipelineError::invalid_parameter(
        "chart.series",
        format!("{} threads times {} partitions does not fit in a thread count", t, a),
    )
}

fn positive(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PipelineError::invalid_parameter(
            parameter,
            format!("{} is not positive", value),
        ))
    }
}

fn positive_counts(parameter: &str, values: &[u32]) -> Result<()> {
    if values.is_empty() {
        return Err(PipelineError::invalid_parameter(parameter, "must not be empty"));
    }
    if values.contains(&0) {
        return Err(PipelineError::invalid_parameter(
            parameter,
            "thread counts must be positive",
        ));
    }
    Ok(())
}
