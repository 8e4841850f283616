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

//! Error types for the reduction pipeline.
//!
//! Two families of errors exist:
//!
//! - [`PipelineError`] aborts a whole pipeline invocation (missing baseline,
//!   missing report key, non-positive divisor, invalid configuration).
//! - [`RecordError`] describes why a single input record was rejected. It is
//!   never propagated out of ingestion; it is turned into a
//!   [`Diagnostic`](crate::ingest::Diagnostic) and the record is skipped.

use crate::key::ConfigKey;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Batch-level failures.
///
/// # Examples
///
/// ```
/// use speedup_core::{ConfigKey, PipelineError};
///
/// let err = PipelineError::MissingBaseline {
///     key: ConfigKey::baseline(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "baseline (original, 1, None) is missing from the statistics"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    /// The baseline key has no statistics, so no speedup can be derived.
    #[error("baseline {key} is missing from the statistics")]
    MissingBaseline {
        /// The baseline that was looked up.
        key: ConfigKey,
    },

    /// A key required by a report ordering or chart has no statistics.
    #[error("no statistics for {key} ({context})")]
    MissingKey {
        /// The key that was looked up.
        key: ConfigKey,
        /// What needed the key.
        context: String,
    },

    /// A time statistic that would be used as a divisor is zero or negative.
    #[error("cannot divide by non-positive time {value} for {key}")]
    NonPositiveDivisor {
        /// The key owning the offending statistic.
        key: ConfigKey,
        /// The offending value.
        value: f64,
    },

    /// A numeric parameter is out of its valid domain.
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A report was requested over an empty key ordering.
    #[error("report ordering is empty")]
    EmptyOrdering,
}

impl PipelineError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing key error.
    pub fn missing_key(key: ConfigKey, context: impl Into<String>) -> Self {
        Self::MissingKey {
            key,
            context: context.into(),
        }
    }
}

/// Reasons a single record is rejected during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record does not split into the expected number of fields.
    #[error("expected {expected} fields but found {actual}")]
    FieldCount {
        /// Accepted field counts, human readable (e.g. "5 or 6").
        expected: String,
        /// Number of fields found.
        actual: usize,
    },

    /// A field could not be parsed or is out of range.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Raw field text.
        value: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl RecordError {
    pub(crate) fn invalid_field(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
