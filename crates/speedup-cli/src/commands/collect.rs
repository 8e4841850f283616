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

//! Collect command - report directory to per-sample CSV

use super::{ensure_output_free, output_path, print_diagnostics, read_file, write_new};
use crate::error::CliError;
use speedup_core::ingest::{
    check_directory_name, ingest_reports, parse_run_info, Diagnostics, Ingested, INFO_FILE_NAME,
};
use speedup_csv::samples_to_csv;
use std::fs;
use std::path::Path;
use tracing::info;

/// Collect every run report in `dir` into one per-sample CSV.
///
/// The run description `info.txt` is checked against the directory name and
/// against each report's input identifier. Reports that cannot be read or
/// do not validate are skipped and listed once the CSV is written.
///
/// # Arguments
///
/// * `dir` - Results directory
/// * `output` - Output path (defaults to `<dir>.csv` beside the directory)
///
/// # Errors
///
/// Returns `Err` if the output exists, `dir` is not a directory, or the
/// directory listing or output write fails.
pub fn collect(dir: &str, output: Option<&str>) -> Result<(), CliError> {
    let dir_path = Path::new(dir);
    let dir_name = dir_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::invalid_input(format!("'{}' does not name a directory", dir)))?;

    let out = output_path(output, || dir_path.with_file_name(format!("{}.csv", dir_name)));
    ensure_output_free(&out)?;

    if !dir_path.is_dir() {
        return Err(CliError::invalid_input(format!("'{}' is not a directory", dir)));
    }

    let mut diagnostics = Diagnostics::new();
    let info_path = dir_path.join(INFO_FILE_NAME);
    let run_info = if info_path.is_file() {
        let run_info = parse_run_info(&read_file(&info_path)?);
        match &run_info {
            Some(run_info) => check_directory_name(&dir_name, run_info, &mut diagnostics),
            None => diagnostics.error(INFO_FILE_NAME, None, "does not match the expected format"),
        }
        run_info
    } else {
        diagnostics.warning(
            INFO_FILE_NAME,
            None,
            "not found; input identifiers are not checked",
        );
        None
    };

    let mut files = Vec::new();
    let entries = fs::read_dir(dir_path).map_err(|e| CliError::io_error(dir_path, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| CliError::io_error(dir_path, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        match read_file(&path) {
            Ok(contents) => files.push((name, contents)),
            Err(e) => diagnostics.error(name, None, e.to_string()),
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let Ingested {
        store,
        diagnostics: report_diagnostics,
    } = ingest_reports(
        files.iter().map(|(name, contents)| (name.as_str(), contents.as_str())),
        run_info.as_ref(),
    );
    diagnostics.extend(report_diagnostics);

    write_new(&out, &samples_to_csv(&store)?)?;
    info!(samples = store.len(), output = %out.display(), "collected run reports");

    print_diagnostics(&diagnostics);
    Ok(())
}
