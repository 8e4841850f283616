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

//! Reduction of parallel-search benchmark measurements.
//!
//! This crate turns raw per-run timings into per-configuration statistics,
//! baseline-relative speedups and layout descriptors for plotting.
//!
//! # Pipeline
//!
//! 1. **Ingestion** ([`ingest`]) parses run reports into [`Sample`]s, collecting
//!    [`ingest::Diagnostics`] for every rejected record instead of failing.
//! 2. **Aggregation** ([`aggregate()`]) reduces each configuration to quartiles.
//! 3. **Speedup** ([`to_speedup`]) divides the baseline median by each
//!    quartile, swapping the lower and upper bounds.
//! 4. **Amdahl projection** ([`amdahl`]) adds the theoretical reference curve.
//! 5. **Descriptors** ([`report`]) lay the results out for a renderer.
//!
//! # Example
//!
//! ```
//! use speedup_core::{aggregate, to_speedup, ConfigKey, Sample, SampleStore, Variant};
//!
//! let pbfs = ConfigKey::new(Variant::Pbfs, 2, Some(4));
//! let mut store = SampleStore::new();
//! store.push(Sample::new(ConfigKey::baseline(), 0, 100.0).unwrap());
//! store.push(Sample::new(pbfs, 0, 40.0).unwrap());
//!
//! let stats = aggregate(&store);
//! let speedups = to_speedup(&stats, &ConfigKey::baseline()).unwrap();
//! assert_eq!(speedups[&pbfs].p50, 2.5);
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod amdahl;
pub mod config;
mod error;
pub mod ingest;
mod key;
pub mod report;
mod sample;
pub mod speedup;
mod stats;

pub use aggregate::{aggregate, mean_attempts};
pub use config::PipelineConfig;
pub use error::{PipelineError, RecordError, Result};
pub use key::{parse_partitions, parse_positive, ConfigKey, KeyField, Variant, ABSENT};
pub use sample::{Sample, SampleStore};
pub use speedup::{max_speedups, to_speedup, MaxSpeedup};
pub use stats::{SpeedupMap, SpeedupStatistics, Statistics, StatisticsMap, Summary};
