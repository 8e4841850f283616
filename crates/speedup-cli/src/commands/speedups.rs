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

//! Speedups command - statistics CSV to baseline-relative speedups

use super::{derived_output, ensure_output_free, load_config, output_path, read_file, write_new};
use crate::error::CliError;
use speedup_core::{max_speedups, to_speedup};
use speedup_csv::{read_stats_csv, speedups_to_csv};
use std::path::Path;
use tracing::info;

/// Convert time statistics to speedups and print the best per variant.
///
/// # Arguments
///
/// * `input` - Statistics CSV written by `aggregate`
/// * `output` - Output path (defaults to `<stem>-speedups.csv`, with a
///   trailing `-medians` removed from the stem)
/// * `config` - Optional configuration file naming the baseline
///
/// # Errors
///
/// Returns `Err` if the output exists, the statistics file is malformed, the
/// baseline is missing or any time is not positive. Nothing is written then.
pub fn speedups(input: &str, output: Option<&str>, config: Option<&str>) -> Result<(), CliError> {
    let input_path = Path::new(input);
    let out = output_path(output, || {
        derived_output(input_path, Some("-medians"), "-speedups.csv")
    });
    ensure_output_free(&out)?;

    let config = load_config(config)?;
    let stats = read_stats_csv(&read_file(input_path)?)?;
    let speedups = to_speedup(&stats, &config.baseline)?;

    write_new(&out, &speedups_to_csv(&speedups)?)?;
    info!(keys = speedups.len(), output = %out.display(), "derived speedups");

    for best in max_speedups(&speedups) {
        println!(
            "{}: max speedup = {:.3} for {}",
            best.variant, best.speedup, best.key
        );
    }
    Ok(())
}
