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

use crate::error::RecordError;
use crate::key::ConfigKey;
use crate::sample::Sample;

/// Field count of a timing record: `variant, t, a, i, elapsed`.
pub const SAMPLE_FIELDS: usize = 5;

/// Field count of an attempt-count record: a timing record plus `attempts`.
pub const ATTEMPTS_FIELDS: usize = 6;

/// Builds a [`Sample`] from the fields of one delimited record.
///
/// Numeric fields tolerate surrounding whitespace, including the trailing
/// newline some writers leave on the last field.
///
/// # Examples
///
/// ```
/// use speedup_core::ingest::parse_sample_fields;
///
/// let sample = parse_sample_fields(&["pbfs", "2", "4", "0", "40.0\n"]).unwrap();
/// assert_eq!(sample.elapsed, 40.0);
/// assert_eq!(sample.attempts, None);
///
/// assert!(parse_sample_fields(&["pbfs", "2", "4"]).is_err());
/// ```
pub fn parse_sample_fields(fields: &[&str]) -> Result<Sample, RecordError> {
    if fields.len() != SAMPLE_FIELDS && fields.len() != ATTEMPTS_FIELDS {
        return Err(RecordError::FieldCount {
            expected: format!("{} or {}", SAMPLE_FIELDS, ATTEMPTS_FIELDS),
            actual: fields.len(),
        });
    }

    let key = ConfigKey::parse(fields[0], fields[1], fields[2])?;
    let iteration = fields[3].trim().parse::<u32>().map_err(|_| {
        RecordError::invalid_field("iteration", fields[3].trim(), "not a non-negative integer")
    })?;
    let elapsed = parse_float("elapsed", fields[4])?;
    let sample = Sample::new(key, iteration, elapsed)?;

    match fields.get(5) {
        Some(raw) => sample.with_attempts(parse_float("attempts", raw)?),
        None => Ok(sample),
    }
}

fn parse_float(field: &'static str, raw: &str) -> Result<f64, RecordError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| RecordError::invalid_field(field, trimmed, "not a number"))
}
