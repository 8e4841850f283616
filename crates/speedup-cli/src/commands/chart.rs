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

//! Chart command - speedup CSV to a speedup chart descriptor

use super::{derived_output, ensure_output_free, load_config, output_path, read_file, write_new};
use crate::error::CliError;
use speedup_core::report::build_speedup_chart;
use speedup_csv::read_speedups_csv;
use std::path::Path;
use tracing::info;

/// Lay out speedups against total threads, with the Amdahl reference.
///
/// # Arguments
///
/// * `input` - Speedup CSV written by `speedups`
/// * `output` - Output path (defaults to `<stem>.json`, with a trailing
///   `-speedups` removed from the stem)
/// * `config` - Optional configuration file with the chart layout
pub fn chart(input: &str, output: Option<&str>, config: Option<&str>) -> Result<(), CliError> {
    let input_path = Path::new(input);
    let out = output_path(output, || derived_output(input_path, Some("-speedups"), ".json"));
    ensure_output_free(&out)?;

    let config = load_config(config)?;
    let speedups = read_speedups_csv(&read_file(input_path)?)?;
    let chart = build_speedup_chart(&speedups, &config)?;

    write_new(&out, &serde_json::to_string_pretty(&chart)?)?;
    info!(series = chart.series.len(), output = %out.display(), "built speedup chart");
    Ok(())
}
