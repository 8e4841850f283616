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

//! Per-configuration report descriptor.

use super::layout::{brackets, collapse_labels, plain_labels, Axis, Bracket};
use crate::config::LayoutConfig;
use crate::error::{PipelineError, Result};
use crate::key::{ConfigKey, KeyField};
use crate::stats::Summary;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// One plotted position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    /// Index along the category axis.
    pub position: usize,
    /// Configuration shown.
    pub key: ConfigKey,
    /// Lower bound of the error bar.
    pub lower: f64,
    /// Plotted value.
    pub center: f64,
    /// Upper bound of the error bar.
    pub upper: f64,
}

/// A row of labels aligned with the positions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRow {
    /// Row caption.
    pub title: String,
    /// Field the labels show.
    pub field: KeyField,
    /// One label per position, possibly empty.
    pub labels: Vec<String>,
}

/// Everything a renderer needs to draw the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDescriptor {
    /// Entries in the requested order.
    pub entries: Vec<ReportEntry>,
    /// Category-axis tick positions.
    pub x_ticks: Vec<usize>,
    /// Value axis.
    pub y_axis: Axis,
    /// Width of one position, in points.
    pub position_width: f64,
    /// Label rows, top to bottom.
    pub label_rows: Vec<LabelRow>,
    /// Variant group rules.
    pub brackets: Vec<Bracket>,
}

/// Builds a report over `ordering`, looking every key up in `values`.
///
/// The entries follow `ordering` exactly. A key missing from `values` fails
/// the whole report.
///
/// # Examples
///
/// ```
/// use speedup_core::config::LayoutConfig;
/// use speedup_core::report::build_descriptor;
/// use speedup_core::{ConfigKey, Variant};
/// use std::collections::BTreeMap;
///
/// let ordering = vec![
///     ConfigKey::baseline(),
///     ConfigKey::new(Variant::Pbfs, 1, Some(2)),
/// ];
/// let means: BTreeMap<ConfigKey, f64> = ordering.iter().map(|k| (*k, 1.25)).collect();
///
/// let report = build_descriptor(&ordering, &means, &LayoutConfig::default()).unwrap();
/// assert_eq!(report.entries.len(), 2);
/// assert_eq!(report.brackets[0].label, "sequential");
/// ```
pub fn build_descriptor<S: Summary>(
    ordering: &[ConfigKey],
    values: &BTreeMap<ConfigKey, S>,
    layout: &LayoutConfig,
) -> Result<ReportDescriptor> {
    if ordering.is_empty() {
        return Err(PipelineError::EmptyOrdering);
    }

    let entries = ordering
        .iter()
        .enumerate()
        .map(|(position, key)| -> Result<ReportEntry> {
            let value = values
                .get(key)
                .ok_or_else(|| PipelineError::missing_key(*key, "report ordering"))?;
            Ok(ReportEntry {
                position,
                key: *key,
                lower: value.lower(),
                center: value.center(),
                upper: value.upper(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let y_axis = Axis::covering(entries.iter().map(|e| (e.lower, e.upper)), layout.y_tick_step)
        .ok_or_else(|| {
            PipelineError::invalid_parameter(
                "layout.y_tick_step",
                "values and tick step must be finite to lay out the value axis",
            )
        })?;

    let label_rows = layout
        .label_rows
        .iter()
        .map(|row| {
            let values: Vec<Option<String>> = ordering.iter().map(|k| row.field.label(k)).collect();
            LabelRow {
                title: row.title.clone(),
                field: row.field,
                labels: if row.collapse {
                    collapse_labels(&values)
                } else {
                    plain_labels(&values)
                },
            }
        })
        .collect();

    let groups: Vec<&str> = ordering.iter().map(|k| k.variant.group_label()).collect();

    debug!(positions = entries.len(), "built report descriptor");
    Ok(ReportDescriptor {
        x_ticks: (0..entries.len()).collect(),
        entries,
        y_axis,
        position_width: layout.position_width,
        label_rows,
        brackets: brackets(&groups, layout.position_width, layout.rule_margin),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_ordering;
    use crate::key::Variant;
    use crate::stats::{SpeedupStatistics, Statistics};

    fn pbfs(t: u32, a: u32) -> ConfigKey {
        ConfigKey::new(Variant::Pbfs, t, Some(a))
    }

    #[test]
    fn test_entries_follow_ordering() {
        let ordering = vec![pbfs(2, 1), ConfigKey::baseline(), pbfs(1, 1)];
        let mut values = BTreeMap::new();
        values.insert(ConfigKey::baseline(), Statistics::single(100.0));
        values.insert(pbfs(1, 1), Statistics::new(130.0, 140.0, 150.0));
        values.insert(pbfs(2, 1), Statistics::single(80.0));
        values.insert(pbfs(4, 1), Statistics::single(50.0));

        let report = build_descriptor(&ordering, &values, &LayoutConfig::default()).unwrap();
        let keys: Vec<ConfigKey> = report.entries.iter().map(|e| e.key).collect();
        assert_eq!(keys, ordering);
        assert_eq!(report.x_ticks, vec![0, 1, 2]);
        assert_eq!(report.entries[2].lower, 130.0);
        assert_eq!(report.entries[2].upper, 150.0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let ordering = vec![ConfigKey::baseline(), ConfigKey::baseline()];
        let mut values = BTreeMap::new();
        values.insert(ConfigKey::baseline(), 1.0);

        let report = build_descriptor(&ordering, &values, &LayoutConfig::default()).unwrap();
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.label_rows[0].labels, vec!["1", ""]);
    }

    #[test]
    fn test_missing_key_is_fatal() {
        let ordering = vec![ConfigKey::baseline(), pbfs(1, 1)];
        let mut values = BTreeMap::new();
        values.insert(ConfigKey::baseline(), SpeedupStatistics::exact(1.0));

        let err = build_descriptor(&ordering, &values, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MissingKey { key, .. } if key == pbfs(1, 1)));
    }

    #[test]
    fn test_empty_ordering_is_rejected() {
        let values: BTreeMap<ConfigKey, f64> = BTreeMap::new();
        let err = build_descriptor(&[], &values, &LayoutConfig::default()).unwrap_err();
        assert_eq!(err, PipelineError::EmptyOrdering);
    }

    #[test]
    fn test_default_layout_over_attempts_ordering() {
        let ordering = default_ordering();
        let values: BTreeMap<ConfigKey, f64> = ordering
            .iter()
            .enumerate()
            .map(|(i, k)| (*k, 1.0 + i as f64 * 0.05))
            .collect();

        let report = build_descriptor(&ordering, &values, &LayoutConfig::default()).unwrap();

        let t_row = &report.label_rows[0];
        assert_eq!(t_row.title, "t:");
        assert_eq!(
            &t_row.labels[..10],
            &["1", "2", "4", "8", "16", "1", "", "", "", ""]
        );
        assert_eq!(&t_row.labels[10..], &["2", "", "", "", "4", "", "", "8", "", "16"]);

        let p_row = &report.label_rows[1];
        assert_eq!(&p_row.labels[..5], &["", "", "", "", ""]);
        assert_eq!(&p_row.labels[5..10], &["1", "2", "4", "8", "16"]);

        assert_eq!(report.brackets.len(), 2);
        assert_eq!(report.brackets[0].rule_length, 35.0);
        assert_eq!(report.brackets[1].label, "parallel");
        assert_eq!(report.brackets[1].len, 15);

        assert_eq!(report.y_axis.min, 1.0);
        assert_eq!(report.y_axis.max, 2.0);
    }
}
