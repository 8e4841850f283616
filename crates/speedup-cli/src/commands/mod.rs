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

//! CLI command implementations
//!
//! Every command follows the same shape: refuse an existing output before
//! doing any work, read its input, run the pipeline stages, write the
//! artifact exactly once, then print collected diagnostics.

mod aggregate;
mod attempts;
mod chart;
mod collect;
mod speedups;

pub use aggregate::aggregate;
pub use attempts::attempts;
pub use chart::chart;
pub use collect::collect;
pub use speedups::speedups;

use crate::error::CliError;
use colored::Colorize;
use speedup_core::ingest::{Diagnostics, Severity};
use speedup_core::PipelineConfig;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Default maximum file size to prevent OOM attacks (1 GB)
/// Can be overridden via SPEEDUP_MAX_FILE_SIZE environment variable
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "SPEEDUP_MAX_FILE_SIZE";

fn get_max_file_size() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file from disk with size validation.
///
/// Files larger than the configured maximum are rejected before reading.
///
/// # Errors
///
/// Returns `Err` if the metadata cannot be read, the file is too large, the
/// file cannot be read or it is not valid UTF-8.
pub fn read_file(path: impl AsRef<Path>) -> Result<String, CliError> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max_file_size = get_max_file_size();
    if metadata.len() > max_file_size {
        return Err(CliError::file_too_large(path, metadata.len(), max_file_size));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Fails when `path` already exists.
///
/// Called before any input is read so a conflicting output costs no work.
pub fn ensure_output_free(path: &Path) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::output_exists(path));
    }
    Ok(())
}

/// Writes `content` to a file that must not exist yet.
///
/// The content goes to a temporary file in the same directory, which is
/// moved into place only once fully written. On any failure `path` is left
/// untouched and the temporary file is removed.
pub fn write_new(path: &Path, content: &str) -> Result<(), CliError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| CliError::io_error(path, e))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| CliError::io_error(path, e))?;

    file.persist_noclobber(path).map_err(|e| match e.error.kind() {
        ErrorKind::AlreadyExists => CliError::output_exists(path),
        _ => CliError::io_error(path, e.error),
    })?;
    info!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(())
}

/// Derives an output path next to `input`.
///
/// The file stem of `input` loses `strip` when it ends with it, then gets
/// `suffix` appended.
///
/// ```
/// use speedup_cli::commands::derived_output;
/// use std::path::{Path, PathBuf};
///
/// let out = derived_output(Path::new("runs/a-medians.csv"), Some("-medians"), "-speedups.csv");
/// assert_eq!(out, PathBuf::from("runs/a-speedups.csv"));
/// ```
pub fn derived_output(input: &Path, strip: Option<&str>, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = strip
        .and_then(|s| stem.strip_suffix(s))
        .unwrap_or(&stem);
    input.with_file_name(format!("{}{}", stem, suffix))
}

/// Resolves the output path from an explicit option or a derived default.
pub(crate) fn output_path(output: Option<&str>, default: impl FnOnce() -> PathBuf) -> PathBuf {
    output.map(PathBuf::from).unwrap_or_else(default)
}

/// Loads and validates the pipeline configuration.
///
/// Without a path the defaults are used. Files ending in `.yaml` or `.yml`
/// are read as YAML, anything else as JSON.
pub fn load_config(path: Option<&str>) -> Result<PipelineConfig, CliError> {
    let config = match path {
        None => PipelineConfig::default(),
        Some(path) => {
            let content = read_file(path)?;
            let is_yaml = Path::new(path)
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if is_yaml {
                serde_yaml::from_str(&content)
                    .map_err(|e| CliError::config(format!("{}: {}", path, e)))?
            } else {
                serde_json::from_str(&content)
                    .map_err(|e| CliError::config(format!("{}: {}", path, e)))?
            }
        }
    };

    config
        .validate()
        .map_err(|e| CliError::config(e.to_string()))?;
    debug!(?path, "loaded configuration");
    Ok(config)
}

/// Prints diagnostics to stderr, followed by a one-line summary.
pub fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }

    for diagnostic in diagnostics.iter() {
        let severity = match diagnostic.severity {
            Severity::Warning => "Warning".yellow().bold(),
            Severity::Error => "Error".red().bold(),
        };
        match diagnostic.line {
            Some(line) => eprintln!(
                "{}: {} line {}: {}",
                severity, diagnostic.source, line, diagnostic.message
            ),
            None => eprintln!("{}: {}: {}", severity, diagnostic.source, diagnostic.message),
        }
    }

    let errors = diagnostics.error_count();
    eprintln!(
        "{} diagnostic(s), {} record(s) skipped",
        diagnostics.len(),
        errors
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_derived_output_without_strip() {
        let out = derived_output(Path::new("dir/run.csv"), None, "-medians.csv");
        assert_eq!(out, PathBuf::from("dir/run-medians.csv"));
    }

    #[test]
    fn test_derived_output_strip_only_suffix() {
        let out = derived_output(Path::new("run-speedups.csv"), Some("-speedups"), ".json");
        assert_eq!(out, PathBuf::from("run.json"));

        let out = derived_output(Path::new("run.csv"), Some("-speedups"), ".json");
        assert_eq!(out, PathBuf::from("run.json"));
    }

    #[test]
    fn test_write_new_refuses_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_new(&path, "first").unwrap();
        let err = write_new(&path, "second").unwrap_err();
        assert!(matches!(err, CliError::OutputExists { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
        assert!(ensure_output_free(&path).is_err());
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_new_leaves_no_temporary_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_new(&path, "first").unwrap();
        assert_eq!(dir_entries(dir.path()), vec!["out.csv"]);

        assert!(write_new(&path, "second").is_err());
        assert_eq!(dir_entries(dir.path()), vec!["out.csv"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }

    #[test]
    fn test_failed_write_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.csv");

        let err = write_new(&path, "content").unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(!path.exists());
        assert!(dir_entries(dir.path()).is_empty());
    }

    #[test]
    fn test_load_config_formats() {
        let dir = TempDir::new().unwrap();

        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"parallel_fraction": 0.5}"#).unwrap();
        let config = load_config(json.to_str()).unwrap();
        assert_eq!(config.parallel_fraction, 0.5);

        let yaml = dir.path().join("config.yaml");
        fs::write(&yaml, "layout:\n  rule_margin: 35.0\n").unwrap();
        let config = load_config(yaml.to_str()).unwrap();
        assert_eq!(config.layout.rule_margin, 35.0);

        assert_eq!(load_config(None).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("config.json");
        fs::write(&json, r#"{"parallel_fraction": 2.0}"#).unwrap();
        assert!(matches!(
            load_config(json.to_str()),
            Err(CliError::Config(_))
        ));
    }
}
