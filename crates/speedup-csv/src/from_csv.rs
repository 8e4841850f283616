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

//! Reading per-sample and statistics CSV files.

use crate::error::{CsvError, Result};
use crate::STATS_HEADER;
use speedup_core::ingest::{parse_sample_fields, Ingested};
use speedup_core::{ConfigKey, SpeedupMap, SpeedupStatistics, Statistics, StatisticsMap};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

/// Default maximum number of rows read from one file (10 million).
pub const DEFAULT_MAX_ROWS: usize = 10_000_000;

/// Configuration for reading per-sample CSV data.
///
/// # Examples
///
/// ```
/// use speedup_csv::FromCsvConfig;
///
/// let config = FromCsvConfig {
///     delimiter: b';',
///     ..Default::default()
/// };
/// assert!(config.has_headers);
/// ```
#[derive(Debug, Clone)]
pub struct FromCsvConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Whether the first row is a header to skip (default: `true`).
    pub has_headers: bool,
    /// Rows read before giving up with [`CsvError::SecurityLimit`].
    pub max_rows: usize,
}

impl Default for FromCsvConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

/// Reads per-sample CSV text.
///
/// Each row is `variant,t,a,i,time[,attempts]`; the header row is skipped
/// without inspection. A malformed row is skipped with a diagnostic naming
/// `source` and the row's line.
///
/// # Examples
///
/// ```
/// use speedup_csv::samples_from_csv;
///
/// let csv = "variant,t,a,i,time (ms)\noriginal,1,None,0,100.0\npbfs,2,x,0,40.0\n";
/// let ingested = samples_from_csv(csv, "run.csv").unwrap();
/// assert_eq!(ingested.store.len(), 1);
/// assert_eq!(ingested.diagnostics.len(), 1);
/// ```
pub fn samples_from_csv(csv: &str, source: &str) -> Result<Ingested> {
    samples_from_csv_reader(csv.as_bytes(), source, &FromCsvConfig::default())
}

/// Reads per-sample CSV from any reader.
pub fn samples_from_csv_reader<R: Read>(
    reader: R,
    source: &str,
    config: &FromCsvConfig,
) -> Result<Ingested> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut ingested = Ingested::default();

    for (record_idx, result) in csv_reader.records().enumerate() {
        if record_idx >= config.max_rows {
            return Err(CsvError::SecurityLimit {
                limit: config.max_rows,
                actual: record_idx + 1,
            });
        }

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize);
                ingested.diagnostics.error(source, line, e.to_string());
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize);

        let fields: Vec<&str> = record.iter().collect();
        match parse_sample_fields(&fields) {
            Ok(sample) => ingested.store.push(sample),
            Err(e) => ingested.diagnostics.error(source, line, e.to_string()),
        }
    }

    debug!(
        source,
        samples = ingested.store.len(),
        diagnostics = ingested.diagnostics.len(),
        "read sample CSV"
    );
    Ok(ingested)
}

/// Reads a statistics CSV written by [`stats_to_csv`](crate::stats_to_csv).
///
/// Unlike per-sample input this is a derived file, so a wrong header, a
/// malformed row or a repeated key fails the whole read.
pub fn read_stats_csv(csv: &str) -> Result<StatisticsMap> {
    read_triples(csv, Statistics::new)
}

/// Reads a speedup CSV written by [`speedups_to_csv`](crate::speedups_to_csv).
pub fn read_speedups_csv(csv: &str) -> Result<SpeedupMap> {
    read_triples(csv, SpeedupStatistics::new)
}

fn read_triples<S>(csv: &str, make: fn(f64, f64, f64) -> S) -> Result<BTreeMap<ConfigKey, S>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(csv.as_bytes());

    let headers = csv_reader.headers()?;
    if headers.iter().ne(STATS_HEADER.iter().copied()) {
        return Err(CsvError::InvalidHeader {
            expected: STATS_HEADER.join(","),
            actual: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut map = BTreeMap::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line() as usize);
        let parse_error = |message: String| CsvError::ParseError { line, message };

        let key = ConfigKey::parse(&record[0], &record[1], &record[2])
            .map_err(|e| parse_error(e.to_string()))?;
        let mut values = [0.0; 3];
        for (value, raw) in values.iter_mut().zip(record.iter().skip(3)) {
            *value = raw
                .parse::<f64>()
                .map_err(|_| parse_error(format!("invalid statistic '{}'", raw)))?;
        }
        let [p25, p50, p75] = values;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(parse_error(format!("non-finite statistic for {}", key)));
        }
        if !(p25 <= p50 && p50 <= p75) {
            return Err(parse_error(format!(
                "statistics for {} are not ordered: {} <= {} <= {} does not hold",
                key, p25, p50, p75
            )));
        }

        match map.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(make(p25, p50, p75));
            }
            Entry::Occupied(_) => return Err(parse_error(format!("duplicate key {}", key))),
        }
    }

    debug!(keys = map.len(), "read statistics CSV");
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use speedup_core::ingest::Severity;
    use speedup_core::Variant;

    #[test]
    fn test_from_csv_config_default() {
        let config = FromCsvConfig::default();
        assert_eq!(config.delimiter, b',');
        assert!(config.has_headers);
        assert_eq!(config.max_rows, DEFAULT_MAX_ROWS);
    }

    #[test]
    fn test_samples_basic() {
        let csv = "variant,t,a,i,time (ms)\n\
                   original,1,None,0,100.0\n\
                   pbfs,2,4,0,40.0\n\
                   pbfs,2,4,1,  42.5\n";
        let ingested = samples_from_csv(csv, "run.csv").unwrap();
        assert_eq!(ingested.store.len(), 3);
        assert!(ingested.diagnostics.is_empty());

        let last = ingested.store.iter().last().unwrap();
        assert_eq!(last.key, ConfigKey::new(Variant::Pbfs, 2, Some(4)));
        assert_eq!(last.iteration, 1);
        assert_eq!(last.elapsed, 42.5);
    }

    #[test]
    fn test_samples_with_attempts() {
        let csv = "variant,t,a,i,time (ms),attempts\npbfs,1,2,0,40.0,1.5\n";
        let ingested = samples_from_csv(csv, "attempts.csv").unwrap();
        assert_eq!(ingested.store.iter().next().unwrap().attempts, Some(1.5));
    }

    #[test]
    fn test_malformed_rows_become_diagnostics() {
        let csv = "variant,t,a,i,time (ms)\n\
                   original,1,None,0,100.0\n\
                   pbfs,2,4\n\
                   turbo,1,None,0,5.0\n\
                   pbfs,2,4,0,-1.0\n\
                   pbfs,2,4,1,41.0\n";
        let ingested = samples_from_csv(csv, "run.csv").unwrap();

        assert_eq!(ingested.store.len(), 2);
        assert_eq!(ingested.diagnostics.error_count(), 3);

        let lines: Vec<Option<usize>> = ingested.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![Some(3), Some(4), Some(5)]);
        let first = ingested.diagnostics.iter().next().unwrap();
        assert_eq!(first.severity, Severity::Error);
        assert_eq!(first.source, "run.csv");
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let csv = "variant,t,a,i,time (ms)\n\noriginal,1,None,0,100.0\n\n";
        let ingested = samples_from_csv(csv, "run.csv").unwrap();
        assert_eq!(ingested.store.len(), 1);
        assert!(ingested.diagnostics.is_empty());
    }

    #[test]
    fn test_max_rows_limit() {
        let csv = "h\noriginal,1,None,0,1\noriginal,1,None,1,1\noriginal,1,None,2,1\n";
        let config = FromCsvConfig {
            max_rows: 2,
            ..Default::default()
        };
        let err = samples_from_csv_reader(csv.as_bytes(), "big.csv", &config).unwrap_err();
        assert!(matches!(err, CsvError::SecurityLimit { limit: 2, actual: 3 }));
    }

    #[test]
    fn test_read_stats() {
        let csv = "variant,t,a,25,median,75\n\
                   original,1,None,95.0,100.0,110.0\n\
                   pbfs,2,4,38,40,41\n";
        let stats = read_stats_csv(csv).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(
            stats[&ConfigKey::baseline()],
            Statistics::new(95.0, 100.0, 110.0)
        );
    }

    #[test]
    fn test_read_stats_rejects_wrong_header() {
        let err = read_stats_csv("variant,t,a,median\noriginal,1,None,1\n").unwrap_err();
        assert!(matches!(err, CsvError::InvalidHeader { .. }));
    }

    #[test]
    fn test_read_stats_rejects_bad_rows() {
        let csv = "variant,t,a,25,median,75\noriginal,one,None,1,1,1\n";
        let err = read_stats_csv(csv).unwrap_err();
        assert!(matches!(err, CsvError::ParseError { line: 2, .. }));

        let csv = "variant,t,a,25,median,75\noriginal,1,None,1,x,1\n";
        assert!(matches!(
            read_stats_csv(csv).unwrap_err(),
            CsvError::ParseError { .. }
        ));
    }

    #[test]
    fn test_read_stats_rejects_unordered_rows() {
        let csv = "variant,t,a,25,median,75\n\
                   original,1,None,100,100,100\n\
                   pbfs,2,4,50,40,30\n";
        let err = read_stats_csv(csv).unwrap_err();
        assert!(matches!(err, CsvError::ParseError { line: 3, .. }));
        assert!(err.to_string().contains("not ordered"));

        let csv = "variant,t,a,25,median,75\npbfs,1,1,1.2,1.0,1.4\n";
        assert!(matches!(
            read_speedups_csv(csv).unwrap_err(),
            CsvError::ParseError { line: 2, .. }
        ));
    }

    #[test]
    fn test_read_stats_rejects_non_finite_values() {
        for row in ["NaN,1,2", "1,2,inf", "-inf,1,2"] {
            let csv = format!("variant,t,a,25,median,75\noriginal,1,None,{}\n", row);
            let err = read_stats_csv(&csv).unwrap_err();
            assert!(
                matches!(err, CsvError::ParseError { line: 2, .. }),
                "row {} gave {:?}",
                row,
                err
            );
        }
    }

    #[test]
    fn test_read_stats_rejects_duplicates() {
        let csv = "variant,t,a,25,median,75\n\
                   original,1,None,1,1,1\n\
                   original,1,None,2,2,2\n";
        let err = read_stats_csv(csv).unwrap_err();
        assert!(matches!(err, CsvError::ParseError { line: 3, .. }));
    }

    #[test]
    fn test_read_speedups() {
        let csv = "variant,t,a,25,median,75\npbfs,2,4,1.6,2.0,2.4\n";
        let speedups = read_speedups_csv(csv).unwrap();
        let key = ConfigKey::new(Variant::Pbfs, 2, Some(4));
        assert_eq!(speedups[&key], SpeedupStatistics::new(1.6, 2.0, 2.4));
    }
}
