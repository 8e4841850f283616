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

//! Property-based tests for the reduction pipeline using proptest.
//!
//! - Quartile order: every aggregated group satisfies p25 <= p50 <= p75
//! - Speedup order: inverting positive time quartiles keeps the order
//! - Label collapsing: a label is shown exactly where the value changes
//! - Descriptor ordering: entries follow the requested keys one-to-one

use proptest::prelude::*;
use speedup_core::config::LayoutConfig;
use speedup_core::report::{brackets, build_descriptor, collapse_labels};
use speedup_core::{
    aggregate, to_speedup, ConfigKey, Sample, SampleStore, Statistics, StatisticsMap, Variant,
};
use std::collections::BTreeMap;

// ===== Generators =====

fn config_key() -> impl Strategy<Value = ConfigKey> {
    prop_oneof![
        (1u32..=16).prop_map(|t| ConfigKey::new(Variant::Original, t, None)),
        (1u32..=16, 1u32..=16).prop_map(|(t, a)| ConfigKey::new(Variant::Pbfs, t, Some(a))),
    ]
}

fn elapsed() -> impl Strategy<Value = f64> {
    0.001f64..1.0e6
}

fn sample_set() -> impl Strategy<Value = Vec<(ConfigKey, f64)>> {
    prop::collection::vec((config_key(), elapsed()), 1..200)
}

fn time_triple() -> impl Strategy<Value = Statistics> {
    prop::collection::vec(elapsed(), 3).prop_map(|mut v| {
        v.sort_by(|a, b| a.total_cmp(b));
        Statistics::new(v[0], v[1], v[2])
    })
}

fn store(samples: &[(ConfigKey, f64)]) -> SampleStore {
    samples
        .iter()
        .enumerate()
        .map(|(i, (key, t))| Sample::new(*key, i as u32, *t).expect("positive sample"))
        .collect()
}

// ===== Properties =====

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: every aggregated group is ordered and within its samples
    #[test]
    fn prop_quartiles_are_ordered(samples in sample_set()) {
        let stats = aggregate(&store(&samples));

        for (key, s) in &stats {
            let times: Vec<f64> = samples.iter().filter(|(k, _)| k == key).map(|(_, t)| *t).collect();
            let min = times.iter().copied().fold(f64::INFINITY, f64::min);
            let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(s.p25 <= s.p50 && s.p50 <= s.p75, "unordered {:?}", s);
            prop_assert!(min <= s.p25 && s.p75 <= max);
        }
    }

    /// Property: every key with samples has statistics and no other key does
    #[test]
    fn prop_aggregate_covers_sampled_keys(samples in sample_set()) {
        let stats = aggregate(&store(&samples));
        let mut keys: Vec<ConfigKey> = samples.iter().map(|(k, _)| *k).collect();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(stats.keys().copied().collect::<Vec<_>>(), keys);
    }

    /// Property: the speedup transform keeps p25 <= p50 <= p75
    #[test]
    fn prop_speedup_inversion_keeps_order(base in elapsed(), triples in prop::collection::vec(time_triple(), 1..20)) {
        let mut stats = StatisticsMap::new();
        stats.insert(ConfigKey::baseline(), Statistics::single(base));
        for (i, triple) in triples.iter().enumerate() {
            stats.insert(ConfigKey::new(Variant::Pbfs, i as u32 + 1, Some(1)), *triple);
        }

        let speedups = to_speedup(&stats, &ConfigKey::baseline()).expect("baseline present");
        prop_assert_eq!(speedups.len(), stats.len());
        for (key, s) in &speedups {
            let time = stats[key];
            prop_assert!(s.p25 <= s.p50 && s.p50 <= s.p75, "unordered {:?}", s);
            prop_assert_eq!(s.p25, base / time.p75);
            prop_assert_eq!(s.p75, base / time.p25);
        }
    }

    /// Property: the transform fails whenever the baseline is missing
    #[test]
    fn prop_missing_baseline_always_fails(triples in prop::collection::vec(time_triple(), 0..10)) {
        let stats: StatisticsMap = triples
            .iter()
            .enumerate()
            .map(|(i, s)| (ConfigKey::new(Variant::Pbfs, i as u32 + 1, Some(2)), *s))
            .collect();
        prop_assert!(to_speedup(&stats, &ConfigKey::baseline()).is_err());
    }

    /// Property: a label is non-empty exactly where a present value changes
    #[test]
    fn prop_collapse_marks_changes(values in prop::collection::vec(prop::option::of(1u32..4), 0..40)) {
        let labels: Vec<Option<String>> = values.iter().map(|v| v.map(|v| v.to_string())).collect();
        let collapsed = collapse_labels(&labels);

        prop_assert_eq!(collapsed.len(), values.len());
        for (i, label) in collapsed.iter().enumerate() {
            let changed = i == 0 || values[i - 1] != values[i];
            match values[i] {
                Some(v) if changed => {
                    prop_assert_eq!(label, &v.to_string());
                }
                _ => {
                    prop_assert!(label.is_empty());
                }
            }
        }
    }

    /// Property: bracket runs partition the positions
    #[test]
    fn prop_brackets_partition_positions(groups in prop::collection::vec(prop::bool::ANY, 1..40)) {
        let categories: Vec<&str> = groups.iter().map(|g| if *g { "parallel" } else { "sequential" }).collect();
        let runs = brackets(&categories, 17.0, 50.0);

        prop_assert_eq!(runs.iter().map(|r| r.len).sum::<usize>(), categories.len());
        for pair in runs.windows(2) {
            prop_assert_eq!(pair[0].start + pair[0].len, pair[1].start);
            prop_assert_ne!(&pair[0].label, &pair[1].label);
        }
    }

    /// Property: descriptor entries follow the requested ordering exactly
    #[test]
    fn prop_descriptor_keeps_ordering(ordering in prop::collection::vec(config_key(), 1..30)) {
        let values: BTreeMap<ConfigKey, f64> = ordering.iter().map(|k| (*k, f64::from(k.t))).collect();
        let report = build_descriptor(&ordering, &values, &LayoutConfig::default()).expect("all keys present");

        prop_assert_eq!(report.entries.len(), ordering.len());
        for (entry, key) in report.entries.iter().zip(&ordering) {
            prop_assert_eq!(entry.key, *key);
            prop_assert!(report.y_axis.min <= entry.lower && entry.upper <= report.y_axis.max);
        }
    }
}
