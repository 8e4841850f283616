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

//! Ingestion of raw benchmark records.
//!
//! Ingestion never aborts on a bad record. Every rejected record yields a
//! [`Diagnostic`] and processing continues with the rest; the caller receives
//! the [`SampleStore`] together with all [`Diagnostics`] and decides how to
//! surface them.
//!
//! # Modules
//!
//! - `record`: splitting a delimited record into a `Sample`
//! - `report`: per-run report files and the run `info.txt`

mod record;
pub mod report;

pub use record::{parse_sample_fields, ATTEMPTS_FIELDS, SAMPLE_FIELDS};
pub use report::{
    check_directory_name, ingest_reports, parse_input_id, parse_report, parse_run_info,
    InputSize, ReportBody, ReportName, RunInfo, INFO_FILE_NAME,
};

use crate::sample::SampleStore;
use serde::Serialize;
use std::fmt;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Noted without rejecting a sample.
    Warning,
    /// The record was rejected.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("Warning"),
            Severity::Error => f.write_str("Error"),
        }
    }
}

/// A human-readable note about one input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// File or stream the record came from.
    pub source: String,
    /// 1-based line, when the source is line oriented.
    pub line: Option<usize>,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(
                f,
                "{}: {} line {}: {}",
                self.severity, self.source, line, self.message
            ),
            None => write!(f, "{}: {}: {}", self.severity, self.source, self.message),
        }
    }
}

/// Diagnostics accumulated during one ingestion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rejected record.
    pub fn error(
        &mut self,
        source: impl Into<String>,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Error, source.into(), line, message.into());
    }

    /// Records a note that did not reject a sample.
    pub fn warning(
        &mut self,
        source: impl Into<String>,
        line: Option<usize>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Warning, source.into(), line, message.into());
    }

    fn push(&mut self, severity: Severity, source: String, line: Option<usize>, message: String) {
        let diagnostic = Diagnostic {
            severity,
            source,
            line,
            message,
        };
        tracing::debug!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    /// Appends every diagnostic of `other`.
    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of rejected records.
    pub fn error_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Iterates diagnostics in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }
}

/// Result of one ingestion pass.
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Accepted samples.
    pub store: SampleStore,
    /// Notes about rejected or suspicious records.
    pub diagnostics: Diagnostics,
}
