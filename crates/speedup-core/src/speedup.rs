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

//! Baseline-relative speedups.
//!
//! Speedup is `base / time` with `base` the baseline's median time. The map
//! `x -> base / x` is decreasing, so the quartiles trade places: the upper
//! time quartile becomes the lower speedup quartile and vice versa.

use crate::error::{PipelineError, Result};
use crate::key::{ConfigKey, Variant};
use crate::stats::{SpeedupMap, SpeedupStatistics, Statistics, StatisticsMap};
use serde::Serialize;
use tracing::debug;

/// Converts time statistics to speedups relative to `baseline`.
///
/// Fails for the whole batch when the baseline is absent or when any time
/// statistic used as a divisor is not strictly positive.
///
/// # Examples
///
/// ```
/// use speedup_core::{to_speedup, ConfigKey, Statistics, StatisticsMap, Variant};
///
/// let pbfs = ConfigKey::new(Variant::Pbfs, 2, Some(4));
/// let mut stats = StatisticsMap::new();
/// stats.insert(ConfigKey::baseline(), Statistics::single(24.0));
/// stats.insert(pbfs, Statistics::new(10.0, 12.0, 15.0));
///
/// let speedups = to_speedup(&stats, &ConfigKey::baseline()).unwrap();
/// let s = speedups[&pbfs];
/// assert_eq!((s.p25, s.p50, s.p75), (1.6, 2.0, 2.4));
/// ```
pub fn to_speedup(stats: &StatisticsMap, baseline: &ConfigKey) -> Result<SpeedupMap> {
    let base = stats
        .get(baseline)
        .ok_or(PipelineError::MissingBaseline { key: *baseline })?
        .p50;
    if !(base.is_finite() && base > 0.0) {
        return Err(PipelineError::NonPositiveDivisor {
            key: *baseline,
            value: base,
        });
    }

    let speedups = stats
        .iter()
        .map(|(key, time)| invert(base, key, time).map(|s| (*key, s)))
        .collect::<Result<SpeedupMap>>()?;

    debug!(base, keys = speedups.len(), "derived speedups");
    Ok(speedups)
}

/// Applies `base / x` to a time triple, swapping the quartile roles.
fn invert(base: f64, key: &ConfigKey, time: &Statistics) -> Result<SpeedupStatistics> {
    let divide = |value: f64| {
        if value.is_finite() && value > 0.0 {
            Ok(base / value)
        } else {
            Err(PipelineError::NonPositiveDivisor { key: *key, value })
        }
    };

    Ok(SpeedupStatistics {
        p25: divide(time.p75)?,
        p50: divide(time.p50)?,
        p75: divide(time.p25)?,
    })
}

/// The best median speedup reached by one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaxSpeedup {
    /// Variant.
    pub variant: Variant,
    /// Configuration reaching the best median speedup.
    pub key: ConfigKey,
    /// Its median speedup.
    pub speedup: f64,
}

/// Finds the configuration with the highest median speedup per variant.
///
/// Results are ordered by variant. Ties keep the smallest key.
pub fn max_speedups(speedups: &SpeedupMap) -> Vec<MaxSpeedup> {
    let mut best: Vec<MaxSpeedup> = Vec::new();

    for (key, s) in speedups {
        match best.iter_mut().find(|m| m.variant == key.variant) {
            Some(current) if s.p50 > current.speedup => {
                current.key = *key;
                current.speedup = s.p50;
            }
            Some(_) => {}
            None => best.push(MaxSpeedup {
                variant: key.variant,
                key: *key,
                speedup: s.p50,
            }),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pbfs(t: u32, a: u32) -> ConfigKey {
        ConfigKey::new(Variant::Pbfs, t, Some(a))
    }

    fn stats(entries: &[(ConfigKey, Statistics)]) -> StatisticsMap {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_quartiles_are_swapped() {
        let map = stats(&[
            (ConfigKey::baseline(), Statistics::new(20.0, 24.0, 30.0)),
            (pbfs(2, 4), Statistics::new(10.0, 12.0, 15.0)),
        ]);
        let speedups = to_speedup(&map, &ConfigKey::baseline()).unwrap();

        let s = speedups[&pbfs(2, 4)];
        assert_eq!(s, SpeedupStatistics::new(1.6, 2.0, 2.4));
        assert!(s.p25 <= s.p50 && s.p50 <= s.p75);

        let b = speedups[&ConfigKey::baseline()];
        assert_eq!(b.p50, 1.0);
        assert_eq!(b.p25, 24.0 / 30.0);
        assert_eq!(b.p75, 24.0 / 20.0);
    }

    #[test]
    fn test_missing_baseline_is_fatal() {
        let map = stats(&[(pbfs(2, 4), Statistics::single(40.0))]);
        let err = to_speedup(&map, &ConfigKey::baseline()).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingBaseline {
                key: ConfigKey::baseline()
            }
        );
    }

    #[test]
    fn test_non_positive_divisor_is_fatal() {
        let map = stats(&[
            (ConfigKey::baseline(), Statistics::single(100.0)),
            (pbfs(1, 1), Statistics::new(0.0, 5.0, 6.0)),
        ]);
        let err = to_speedup(&map, &ConfigKey::baseline()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NonPositiveDivisor { key, value } if key == pbfs(1, 1) && value == 0.0
        ));
    }

    #[test]
    fn test_end_to_end_values() {
        let map = stats(&[
            (ConfigKey::baseline(), Statistics::single(100.0)),
            (pbfs(2, 4), Statistics::single(40.0)),
        ]);
        let speedups = to_speedup(&map, &ConfigKey::baseline()).unwrap();
        assert_eq!(speedups[&pbfs(2, 4)], SpeedupStatistics::exact(2.5));
        assert_eq!(speedups[&ConfigKey::baseline()], SpeedupStatistics::exact(1.0));
    }

    #[test]
    fn test_max_speedups_per_variant() {
        let mut speedups = SpeedupMap::new();
        speedups.insert(ConfigKey::baseline(), SpeedupStatistics::exact(1.0));
        speedups.insert(
            ConfigKey::new(Variant::Original, 16, None),
            SpeedupStatistics::exact(1.2),
        );
        speedups.insert(pbfs(1, 1), SpeedupStatistics::exact(0.71));
        speedups.insert(pbfs(8, 16), SpeedupStatistics::new(1.9, 2.04, 2.1));
        speedups.insert(pbfs(16, 1), SpeedupStatistics::exact(1.5));

        let best = max_speedups(&speedups);
        assert_eq!(best.len(), 2);
        assert_eq!(best[0].variant, Variant::Original);
        assert_eq!(best[0].key, ConfigKey::new(Variant::Original, 16, None));
        assert_eq!(best[1].key, pbfs(8, 16));
        assert_eq!(best[1].speedup, 2.04);
    }
}
