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

//! CSV input and output for benchmark samples and statistics.
//!
//! Two file shapes are handled:
//!
//! - **Per-sample files**: `variant,t,a,i,time (ms)[,attempts]`, one row per
//!   measured run. Malformed rows are skipped and reported as diagnostics.
//! - **Statistics files**: `variant,t,a,25,median,75`, one row per
//!   configuration sorted by key. The same shape carries time statistics and
//!   speedups.
//!
//! # Examples
//!
//! ```
//! use speedup_core::{aggregate, to_speedup, ConfigKey};
//! use speedup_csv::{samples_from_csv, speedups_to_csv};
//!
//! let csv = "variant,t,a,i,time (ms)\noriginal,1,None,0,100.0\npbfs,2,4,0,40.0\n";
//! let ingested = samples_from_csv(csv, "run.csv").unwrap();
//!
//! let stats = aggregate(&ingested.store);
//! let speedups = to_speedup(&stats, &ConfigKey::baseline()).unwrap();
//! let out = speedups_to_csv(&speedups).unwrap();
//! assert!(out.ends_with("pbfs,2,4,2.5,2.5,2.5\n"));
//! ```

mod error;
mod from_csv;
mod to_csv;

// Re-export public API
pub use error::{CsvError, Result};
pub use from_csv::{
    read_speedups_csv, read_stats_csv, samples_from_csv, samples_from_csv_reader, FromCsvConfig,
    DEFAULT_MAX_ROWS,
};
pub use to_csv::{
    samples_to_csv, samples_to_csv_writer, speedups_to_csv, stats_to_csv, ATTEMPTS_COLUMN,
    SAMPLE_HEADER, STATS_HEADER,
};
