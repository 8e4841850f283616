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

//! Summary statistic types.
//!
//! [`Statistics`] summarizes times and [`SpeedupStatistics`] summarizes
//! speedups. They are kept as distinct types so a speedup triple can never be
//! mistaken for a time triple: the two are related by a reciprocal transform
//! that swaps the roles of the quartiles.

use crate::key::ConfigKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Time statistics per configuration.
pub type StatisticsMap = BTreeMap<ConfigKey, Statistics>;

/// Speedup statistics per configuration.
pub type SpeedupMap = BTreeMap<ConfigKey, SpeedupStatistics>;

/// Quartiles of the measured times of one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Lower quartile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// Upper quartile.
    pub p75: f64,
}

impl Statistics {
    /// Creates a triple.
    pub const fn new(p25: f64, p50: f64, p75: f64) -> Self {
        Self { p25, p50, p75 }
    }

    /// A triple with all three statistics equal.
    pub const fn single(value: f64) -> Self {
        Self::new(value, value, value)
    }
}

/// Quartiles of the speedup of one configuration relative to a baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedupStatistics {
    /// Lower quartile, derived from the upper time quartile.
    pub p25: f64,
    /// Median.
    pub p50: f64,
    /// Upper quartile, derived from the lower time quartile.
    pub p75: f64,
}

impl SpeedupStatistics {
    /// Creates a triple.
    pub const fn new(p25: f64, p50: f64, p75: f64) -> Self {
        Self { p25, p50, p75 }
    }

    /// A triple with zero-width bounds.
    pub const fn exact(value: f64) -> Self {
        Self::new(value, value, value)
    }

    /// Distance from the median down to the lower quartile.
    pub fn error_below(&self) -> f64 {
        self.p50 - self.p25
    }

    /// Distance from the median up to the upper quartile.
    pub fn error_above(&self) -> f64 {
        self.p75 - self.p50
    }
}

/// A per-configuration value that can be placed on a report axis.
///
/// Implemented by both statistic triples and by plain means, so the report
/// builder does not care which reduction produced its input.
pub trait Summary {
    /// Lower bound of the error bar.
    fn lower(&self) -> f64;
    /// Central value.
    fn center(&self) -> f64;
    /// Upper bound of the error bar.
    fn upper(&self) -> f64;
}

impl Summary for Statistics {
    fn lower(&self) -> f64 {
        self.p25
    }

    fn center(&self) -> f64 {
        self.p50
    }

    fn upper(&self) -> f64 {
        self.p75
    }
}

impl Summary for SpeedupStatistics {
    fn lower(&self) -> f64 {
        self.p25
    }

    fn center(&self) -> f64 {
        self.p50
    }

    fn upper(&self) -> f64 {
        self.p75
    }
}

impl Summary for f64 {
    fn lower(&self) -> f64 {
        *self
    }

    fn center(&self) -> f64 {
        *self
    }

    fn upper(&self) -> f64 {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_bars() {
        let s = SpeedupStatistics::new(1.6, 2.0, 2.4);
        assert!((s.error_below() - 0.4).abs() < 1e-12);
        assert!((s.error_above() - 0.4).abs() < 1e-12);
        assert_eq!(SpeedupStatistics::exact(1.5).error_above(), 0.0);
    }

    #[test]
    fn test_summary_for_mean() {
        let mean = 1.25_f64;
        assert_eq!(mean.lower(), 1.25);
        assert_eq!(mean.center(), 1.25);
        assert_eq!(mean.upper(), 1.25);
    }
}
