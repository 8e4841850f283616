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

//! Attempts command - attempt counts to a scatter report descriptor

use super::{
    derived_output, ensure_output_free, load_config, output_path, print_diagnostics, read_file,
    write_new,
};
use crate::error::CliError;
use speedup_core::mean_attempts;
use speedup_core::report::build_descriptor;
use speedup_csv::samples_from_csv;
use std::path::Path;
use tracing::info;

/// Average attempt counts per configuration and lay them out as a report.
///
/// # Arguments
///
/// * `input` - Per-sample CSV with an `attempts` column
/// * `output` - Output path (defaults to `<stem>-attempts.json`)
/// * `config` - Optional configuration file with the report layout
///
/// # Errors
///
/// Returns `Err` if the output exists or any configuration of the report
/// ordering has no attempt counts.
pub fn attempts(input: &str, output: Option<&str>, config: Option<&str>) -> Result<(), CliError> {
    let input_path = Path::new(input);
    let out = output_path(output, || derived_output(input_path, None, "-attempts.json"));
    ensure_output_free(&out)?;

    let config = load_config(config)?;
    let ingested = samples_from_csv(&read_file(input_path)?, input)?;
    let means = mean_attempts(&ingested.store);
    let report = build_descriptor(&config.layout.ordering, &means, &config.layout)?;

    write_new(&out, &serde_json::to_string_pretty(&report)?)?;
    info!(positions = report.entries.len(), output = %out.display(), "built attempts report");

    print_diagnostics(&ingested.diagnostics);
    Ok(())
}
