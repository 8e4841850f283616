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

//! Writing per-sample and statistics CSV files.

use crate::error::{CsvError, Result};
use speedup_core::{ConfigKey, SampleStore, SpeedupMap, StatisticsMap, Summary};
use std::io::Write;

/// Header of a per-sample file.
pub const SAMPLE_HEADER: [&str; 5] = ["variant", "t", "a", "i", "time (ms)"];

/// Extra column of a per-sample file carrying attempt counts.
pub const ATTEMPTS_COLUMN: &str = "attempts";

/// Header of a statistics or speedup file.
pub const STATS_HEADER: [&str; 6] = ["variant", "t", "a", "25", "median", "75"];

/// Writes samples in store order.
///
/// The `attempts` column is added when any sample carries an attempt count;
/// samples without one then leave the column out.
///
/// # Examples
///
/// ```
/// use speedup_core::{ConfigKey, Sample, SampleStore};
/// use speedup_csv::samples_to_csv;
///
/// let mut store = SampleStore::new();
/// store.push(Sample::new(ConfigKey::baseline(), 0, 100.0).unwrap());
///
/// let csv = samples_to_csv(&store).unwrap();
/// assert_eq!(csv, "variant,t,a,i,time (ms)\noriginal,1,None,0,100.0\n");
/// ```
pub fn samples_to_csv(store: &SampleStore) -> Result<String> {
    let mut buffer = Vec::new();
    samples_to_csv_writer(store, &mut buffer)?;
    into_string(buffer, "sample CSV")
}

/// Writes samples to any writer.
pub fn samples_to_csv_writer<W: Write>(store: &SampleStore, writer: W) -> Result<()> {
    let with_attempts = store.iter().any(|s| s.attempts.is_some());
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    if with_attempts {
        wtr.write_record(SAMPLE_HEADER.iter().chain(&[ATTEMPTS_COLUMN]))?;
    } else {
        wtr.write_record(SAMPLE_HEADER)?;
    }

    for sample in store {
        let mut record = vec![
            sample.key.variant.to_string(),
            sample.key.t.to_string(),
            sample.key.a_field(),
            sample.iteration.to_string(),
            format_float(sample.elapsed),
        ];
        if let Some(attempts) = sample.attempts {
            record.push(format_float(attempts));
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes time statistics sorted by key.
///
/// # Examples
///
/// ```
/// use speedup_core::{ConfigKey, Statistics, StatisticsMap};
/// use speedup_csv::stats_to_csv;
///
/// let mut stats = StatisticsMap::new();
/// stats.insert(ConfigKey::baseline(), Statistics::new(95.0, 100.0, 110.0));
///
/// let csv = stats_to_csv(&stats).unwrap();
/// assert_eq!(csv, "variant,t,a,25,median,75\noriginal,1,None,95.0,100.0,110.0\n");
/// ```
pub fn stats_to_csv(stats: &StatisticsMap) -> Result<String> {
    triples_to_csv(stats.iter(), "statistics CSV")
}

/// Writes speedup statistics sorted by key.
pub fn speedups_to_csv(speedups: &SpeedupMap) -> Result<String> {
    triples_to_csv(speedups.iter(), "speedup CSV")
}

fn triples_to_csv<'a, S, I>(rows: I, context: &str) -> Result<String>
where
    S: Summary + 'a,
    I: Iterator<Item = (&'a ConfigKey, &'a S)>,
{
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(STATS_HEADER)?;

    for (key, value) in rows {
        wtr.write_record([
            key.variant.to_string(),
            key.t.to_string(),
            key.a_field(),
            format_float(value.lower()),
            format_float(value.center()),
            format_float(value.upper()),
        ])?;
    }

    let buffer = wtr
        .into_inner()
        .map_err(|e| CsvError::Io(e.into_error()))?;
    into_string(buffer, context)
}

/// Formats a float so integral values keep a trailing `.0`.
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

fn into_string(buffer: Vec<u8>, context: &str) -> Result<String> {
    String::from_utf8(buffer).map_err(|_| CsvError::InvalidUtf8 {
        context: context.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_csv::{read_speedups_csv, read_stats_csv, samples_from_csv};
    use speedup_core::{Sample, SpeedupStatistics, Statistics, Variant};

    fn pbfs(t: u32, a: u32) -> ConfigKey {
        ConfigKey::new(Variant::Pbfs, t, Some(a))
    }

    #[test]
    fn test_stats_sorted_by_key() {
        let mut stats = StatisticsMap::new();
        stats.insert(pbfs(2, 4), Statistics::single(40.0));
        stats.insert(pbfs(1, 16), Statistics::single(60.0));
        stats.insert(ConfigKey::new(Variant::Original, 16, None), Statistics::single(90.0));
        stats.insert(ConfigKey::baseline(), Statistics::single(100.0));

        let csv = stats_to_csv(&stats).unwrap();
        assert_eq!(
            csv.lines().skip(1).collect::<Vec<_>>(),
            vec![
                "original,1,None,100.0,100.0,100.0",
                "original,16,None,90.0,90.0,90.0",
                "pbfs,1,16,60.0,60.0,60.0",
                "pbfs,2,4,40.0,40.0,40.0",
            ]
        );
    }

    #[test]
    fn test_speedups_written_with_quartiles() {
        let mut speedups = SpeedupMap::new();
        speedups.insert(pbfs(2, 4), SpeedupStatistics::new(1.6, 2.0, 2.4));

        let csv = speedups_to_csv(&speedups).unwrap();
        assert_eq!(csv, "variant,t,a,25,median,75\npbfs,2,4,1.6,2.0,2.4\n");
        assert_eq!(read_speedups_csv(&csv).unwrap(), speedups);
    }

    #[test]
    fn test_stats_read_back() {
        let mut stats = StatisticsMap::new();
        stats.insert(ConfigKey::baseline(), Statistics::new(1.0 / 3.0, 0.5, 2.0 / 3.0));
        let csv = stats_to_csv(&stats).unwrap();
        assert_eq!(read_stats_csv(&csv).unwrap(), stats);
    }

    #[test]
    fn test_samples_with_attempts_column() {
        let mut store = SampleStore::new();
        store.push(
            Sample::new(pbfs(1, 2), 0, 12.5)
                .unwrap()
                .with_attempts(2.0)
                .unwrap(),
        );
        store.push(Sample::new(ConfigKey::baseline(), 3, 20.0).unwrap());

        let csv = samples_to_csv(&store).unwrap();
        assert_eq!(
            csv,
            "variant,t,a,i,time (ms),attempts\npbfs,1,2,0,12.5,2.0\noriginal,1,None,3,20.0\n"
        );

        let ingested = samples_from_csv(&csv, "attempts.csv").unwrap();
        assert!(ingested.diagnostics.is_empty());
        assert_eq!(ingested.store.len(), 2);
    }

    #[test]
    fn test_empty_store_writes_header_only() {
        let csv = samples_to_csv(&SampleStore::new()).unwrap();
        assert_eq!(csv, "variant,t,a,i,time (ms)\n");
    }
}
