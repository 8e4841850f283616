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

//! Aggregate command - per-sample CSV to quartile statistics

use super::{derived_output, ensure_output_free, output_path, print_diagnostics, read_file, write_new};
use crate::error::CliError;
use speedup_csv::{samples_from_csv, stats_to_csv};
use std::path::Path;
use tracing::info;

/// Reduce a per-sample CSV to one quartile row per configuration.
///
/// # Arguments
///
/// * `input` - Per-sample CSV
/// * `output` - Output path (defaults to `<stem>-medians.csv`)
///
/// # Errors
///
/// Returns `Err` if the output exists or a file cannot be read or written.
/// Malformed rows are skipped and listed after the output is written.
pub fn aggregate(input: &str, output: Option<&str>) -> Result<(), CliError> {
    let input_path = Path::new(input);
    let out = output_path(output, || derived_output(input_path, None, "-medians.csv"));
    ensure_output_free(&out)?;

    let ingested = samples_from_csv(&read_file(input_path)?, input)?;
    let stats = speedup_core::aggregate(&ingested.store);

    write_new(&out, &stats_to_csv(&stats)?)?;
    info!(keys = stats.len(), output = %out.display(), "aggregated samples");

    print_diagnostics(&ingested.diagnostics);
    Ok(())
}
