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

//! Raw samples and the in-memory sample store.

use crate::error::RecordError;
use crate::key::ConfigKey;
use std::collections::BTreeMap;

/// One raw observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Configuration the run belongs to.
    pub key: ConfigKey,
    /// Iteration index of the run.
    pub iteration: u32,
    /// Elapsed time, strictly positive.
    pub elapsed: f64,
    /// Average attempts per transaction, only in attempt-count datasets.
    pub attempts: Option<f64>,
}

impl Sample {
    /// Creates a sample, rejecting non-positive or non-finite times.
    pub fn new(key: ConfigKey, iteration: u32, elapsed: f64) -> Result<Self, RecordError> {
        if !elapsed.is_finite() || elapsed <= 0.0 {
            return Err(RecordError::invalid_field(
                "elapsed",
                elapsed.to_string(),
                "must be a positive duration",
            ));
        }
        Ok(Self {
            key,
            iteration,
            elapsed,
            attempts: None,
        })
    }

    /// Attaches an attempt count, which must be at least one.
    pub fn with_attempts(mut self, attempts: f64) -> Result<Self, RecordError> {
        if !attempts.is_finite() || attempts < 1.0 {
            return Err(RecordError::invalid_field(
                "attempts",
                attempts.to_string(),
                "must be at least 1",
            ));
        }
        self.attempts = Some(attempts);
        Ok(self)
    }
}

/// Validated samples of one pipeline run.
///
/// Samples are kept in ingestion order and never deduplicated: repeated
/// iterations under the same key are all retained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleStore {
    samples: Vec<Sample>,
}

impl SampleStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample.
    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns whether the store holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterates samples in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Groups samples by key. Keys without samples never appear.
    pub fn groups(&self) -> BTreeMap<ConfigKey, Vec<&Sample>> {
        let mut groups: BTreeMap<ConfigKey, Vec<&Sample>> = BTreeMap::new();
        for sample in &self.samples {
            groups.entry(sample.key).or_default().push(sample);
        }
        groups
    }
}

impl FromIterator<Sample> for SampleStore {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SampleStore {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
