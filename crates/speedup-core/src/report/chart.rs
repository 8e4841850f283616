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

//! Speedup-versus-threads chart descriptor.

use super::layout::Axis;
use crate::amdahl::project;
use crate::config::{total_threads_overflow, PipelineConfig, SeriesSpec};
use crate::error::{PipelineError, Result};
use crate::key::{ConfigKey, Variant};
use crate::stats::{SpeedupMap, SpeedupStatistics};
use serde::Serialize;
use tracing::debug;

/// One point of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Outer parallelism degree.
    pub t: u32,
    /// Total threads, `t` times the partition count.
    pub threads: u32,
    /// Median speedup.
    pub median: f64,
    /// Distance from the median to the lower quartile.
    pub error_low: f64,
    /// Distance from the median to the upper quartile.
    pub error_high: f64,
}

impl ChartPoint {
    fn new(t: u32, threads: u32, s: &SpeedupStatistics) -> Self {
        Self {
            t,
            threads,
            median: s.p50,
            error_low: s.error_below(),
            error_high: s.error_above(),
        }
    }
}

/// A line of the chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Variant plotted.
    pub variant: Variant,
    /// Partition count.
    pub a: u32,
    /// Legend text.
    pub label: String,
    /// Points in ascending `t`.
    pub points: Vec<ChartPoint>,
}

/// Everything a renderer needs to draw the speedup chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupChart {
    /// Lines, in legend order.
    pub series: Vec<ChartSeries>,
    /// Ticks of the thread axis.
    pub x_ticks: Vec<u32>,
    /// Speedup axis.
    pub y_axis: Axis,
}

/// Builds the chart from speedup statistics.
///
/// Measured series take the configured `t` values whose partition count
/// matches the series; an absent partition count counts as 1. Points with no
/// statistics are skipped. The Amdahl series is projected from the median
/// speedup of the configured reference key, which must be present.
pub fn build_speedup_chart(speedups: &SpeedupMap, config: &PipelineConfig) -> Result<SpeedupChart> {
    let series = config
        .chart
        .series
        .iter()
        .map(|spec| -> Result<ChartSeries> {
            let points = if spec.variant == Variant::Amdahl {
                amdahl_points(speedups, config)?
            } else {
                measured_points(speedups, spec, &config.chart.threads)?
            };
            Ok(ChartSeries {
                variant: spec.variant,
                a: spec.a,
                label: spec.label.clone(),
                points,
            })
        })
        .collect::<Result<Vec<ChartSeries>>>()?;

    let bounds = series.iter().flat_map(|s| {
        s.points
            .iter()
            .map(|p| (p.median - p.error_low, p.median + p.error_high))
    });
    let y_axis = Axis::covering(bounds, config.chart.y_tick_step).ok_or_else(|| {
        PipelineError::invalid_parameter("chart.series", "no series has finite points to plot")
    })?;

    debug!(series = series.len(), "built speedup chart");
    Ok(SpeedupChart {
        series,
        x_ticks: config.chart.x_ticks.clone(),
        y_axis,
    })
}

fn amdahl_points(speedups: &SpeedupMap, config: &PipelineConfig) -> Result<Vec<ChartPoint>> {
    let reference = speedups
        .get(&config.amdahl_reference)
        .ok_or_else(|| PipelineError::missing_key(config.amdahl_reference, "amdahl reference"))?;

    let curve = project(config.parallel_fraction, reference.p50, &config.amdahl_threads)?;
    Ok(curve
        .iter()
        .map(|(t, s)| ChartPoint::new(*t, *t, s))
        .collect())
}

fn measured_points(
    speedups: &SpeedupMap,
    spec: &SeriesSpec,
    threads: &[u32],
) -> Result<Vec<ChartPoint>> {
    let mut points = Vec::with_capacity(threads.len());

    for &t in threads {
        let total = t
            .checked_mul(spec.a)
            .ok_or_else(|| total_threads_overflow(t, spec.a))?;
        match lookup(speedups, spec.variant, t, spec.a) {
            Some(s) => points.push(ChartPoint::new(t, total, s)),
            None => debug!(variant = %spec.variant, t, a = spec.a, "no speedup for chart point"),
        }
    }
    Ok(points)
}

fn lookup(speedups: &SpeedupMap, variant: Variant, t: u32, a: u32) -> Option<&SpeedupStatistics> {
    speedups
        .get(&ConfigKey::new(variant, t, Some(a)))
        .or_else(|| match a {
            1 => speedups.get(&ConfigKey::new(variant, t, None)),
            _ => None,
        })
}
