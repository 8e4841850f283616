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

//! Per-run report files.
//!
//! A results directory holds one report per benchmark run plus an `info.txt`
//! describing the whole run. Report file names encode the configuration:
//!
//! ```text
//! <input>-<variant>-t<T>[-a<A>]-i<I>.txt
//! random-x32-y32-z3-n64-pbfs-t4-a2-i0.txt
//! ```
//!
//! and the input identifier itself encodes the maze size (`-x<X>-y<Y>-z<Z>-n<N>`).
//! Each report body repeats the variant and the maze size, which are
//! cross-checked against the file name before the elapsed time is accepted.
//!
//! Listing the directory is left to the caller: [`ingest_reports`] takes
//! `(file name, contents)` pairs.

use super::{Diagnostics, Ingested};
use crate::key::ConfigKey;
use crate::sample::Sample;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

/// Name of the run description file inside a results directory.
pub const INFO_FILE_NAME: &str = "info.txt";

const SUCCESS_MARKER: &str = "Verification passed.";

static REPORT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<input>.+)-(?P<variant>original|pbfs)-t(?P<t>\d+)(?:-a(?P<a>\d+))?-i(?P<i>\d+)\.txt$",
    )
    .expect("valid report name pattern")
});

static INPUT_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-x(?P<x>\d+)-y(?P<y>\d+)-z(?P<z>\d+)-n(?P<n>\d+)").expect("valid input pattern")
});

static REPORT_BODY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)Variant[ \t]*=[ \t]*:(?P<variant>[^\n]*)\n",
        r"Maze dimensions[ \t]*=[ \t]*(?P<x>\d+) x (?P<y>\d+) x (?P<z>\d+)[^\n]*\n",
        r"Paths to route[ \t]*=[ \t]*(?P<n>\d+)[^\n]*\n",
        r"Paths routed[ \t]*=[ \t]*(?P<routed>\d+)[^\n]*\n",
        r"Elapsed time[ \t]*=[ \t]*(?P<elapsed>[\d.]+) milliseconds[^\n]*\n",
        r"(?P<details>.*)Verification passed\.",
    ))
    .expect("valid report body pattern")
});

static RUN_INFO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"Input: (?P<input>[^\n]*)\n",
        r"Parameters: (?P<parameters>[^\n]*)\n",
        r"Benchmark parameters: (?P<benchmark>[^\n]*)\n",
        r"Revision: (?P<revision>[^\n]*)\n",
        r"Clojure version: (?P<runtime>[^\n]*)\n",
        r"Date: (?P<date>[^\n]*)",
    ))
    .expect("valid info pattern")
});

/// Description of a whole benchmark run, read from `info.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    /// Input identifier every report must have been produced from.
    pub input: String,
    /// Input generator parameters.
    pub parameters: String,
    /// Parameters passed to the benchmark driver.
    pub benchmark_parameters: String,
    /// Source revision that was benchmarked.
    pub revision: String,
    /// Runtime version.
    pub runtime_version: String,
    /// Run timestamp.
    pub timestamp: String,
}

impl RunInfo {
    /// Directory name a run is expected to be stored under.
    pub fn expected_directory(&self) -> String {
        format!("{}-{}", self.timestamp, self.revision)
    }
}

/// Maze size encoded in an input identifier and repeated in every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSize {
    /// Width.
    pub x: u32,
    /// Height.
    pub y: u32,
    /// Depth.
    pub z: u32,
    /// Number of paths to route.
    pub paths: u32,
}

/// Configuration decoded from a report file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportName {
    /// Input identifier prefix.
    pub input: String,
    /// Configuration of the run.
    pub key: ConfigKey,
    /// Iteration index.
    pub iteration: u32,
}

impl ReportName {
    /// Decodes a report file name, `None` if it does not follow the pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use speedup_core::ingest::ReportName;
    /// use speedup_core::{ConfigKey, Variant};
    ///
    /// let name = ReportName::parse("random-x32-y32-z3-n64-pbfs-t4-a2-i0.txt").unwrap();
    /// assert_eq!(name.input, "random-x32-y32-z3-n64");
    /// assert_eq!(name.key, ConfigKey::new(Variant::Pbfs, 4, Some(2)));
    ///
    /// assert!(ReportName::parse("notes.txt").is_none());
    /// ```
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = REPORT_NAME.captures(file_name)?;
        let variant = caps.name("variant")?.as_str();
        let t = caps.name("t")?.as_str();
        let a = caps.name("a").map_or(crate::key::ABSENT, |m| m.as_str());
        let key = ConfigKey::parse(variant, t, a).ok()?;
        let iteration = caps.name("i")?.as_str().parse().ok()?;

        Some(Self {
            input: caps.name("input")?.as_str().to_string(),
            key,
            iteration,
        })
    }
}

/// Fields extracted from a report body.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBody {
    /// Variant declared by the benchmark itself.
    pub variant: String,
    /// Maze size declared by the benchmark.
    pub size: InputSize,
    /// Number of paths actually routed.
    pub paths_routed: u32,
    /// Elapsed time in milliseconds.
    pub elapsed: f64,
}

/// Parses the run description file.
pub fn parse_run_info(contents: &str) -> Option<RunInfo> {
    let caps = RUN_INFO.captures(contents)?;
    let field = |name: &str| caps.name(name).map(|m| m.as_str().trim().to_string());

    Some(RunInfo {
        input: field("input")?,
        parameters: field("parameters")?,
        benchmark_parameters: field("benchmark")?,
        revision: field("revision")?,
        runtime_version: field("runtime")?,
        timestamp: field("date")?,
    })
}

/// Warns when a results directory is not named `<timestamp>-<revision>`.
pub fn check_directory_name(dir_name: &str, info: &RunInfo, diagnostics: &mut Diagnostics) {
    let expected = info.expected_directory();
    if dir_name != expected {
        diagnostics.warning(
            INFO_FILE_NAME,
            None,
            format!(
                "expected directory name to be {} (timestamp-revision) but is {}",
                expected, dir_name
            ),
        );
    }
}

/// Extracts the maze size from an input identifier.
///
/// # Examples
///
/// ```
/// use speedup_core::ingest::parse_input_id;
///
/// let size = parse_input_id("random-x32-y48-z3-n64").unwrap();
/// assert_eq!((size.x, size.y, size.z, size.paths), (32, 48, 3, 64));
/// ```
pub fn parse_input_id(input: &str) -> Option<InputSize> {
    let caps = INPUT_ID.captures(input)?;
    input_size(&caps)
}

/// Parses a report body. Reports without the success marker do not match.
pub fn parse_report(contents: &str) -> Option<ReportBody> {
    let caps = REPORT_BODY.captures(contents)?;

    Some(ReportBody {
        variant: caps.name("variant")?.as_str().trim().to_string(),
        size: input_size(&caps)?,
        paths_routed: caps.name("routed")?.as_str().parse().ok()?,
        elapsed: caps.name("elapsed")?.as_str().parse().ok()?,
    })
}

fn input_size(caps: &Captures<'_>) -> Option<InputSize> {
    let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok());
    Some(InputSize {
        x: number("x")?,
        y: number("y")?,
        z: number("z")?,
        paths: number("n")?,
    })
}

/// Ingests report files given as `(file name, contents)` pairs.
///
/// `info.txt` is skipped. When `info` is given, each report's input identifier
/// is compared with it; a mismatch is reported but the sample is kept. Every
/// other validation failure rejects the report.
pub fn ingest_reports<'a, I>(files: I, info: Option<&RunInfo>) -> Ingested
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut ingested = Ingested::default();

    for (name, contents) in files {
        if name == INFO_FILE_NAME {
            continue;
        }
        if let Some(sample) = ingest_report(name, contents, info, &mut ingested.diagnostics) {
            ingested.store.push(sample);
        }
    }

    debug!(
        samples = ingested.store.len(),
        diagnostics = ingested.diagnostics.len(),
        "ingested report files"
    );
    ingested
}

fn ingest_report(
    name: &str,
    contents: &str,
    info: Option<&RunInfo>,
    diagnostics: &mut Diagnostics,
) -> Option<Sample> {
    let Some(report_name) = ReportName::parse(name) else {
        diagnostics.warning(name, None, "ignoring result file: wrong file name");
        return None;
    };

    if let Some(info) = info {
        if report_name.input != info.input {
            diagnostics.warning(
                name,
                None,
                format!(
                    "input files do not match ({} says {} but result file name starts with {})",
                    INFO_FILE_NAME, info.input, report_name.input
                ),
            );
        }
    }

    if !contents.contains(SUCCESS_MARKER) {
        diagnostics.error(name, None, "verification did not pass (no success marker)");
        return None;
    }

    let Some(body) = parse_report(contents) else {
        diagnostics.error(
            name,
            None,
            "did not match expected output; verify its contents to make sure the verification passed",
        );
        return None;
    };

    let declared = report_name.key.variant;
    if body.variant != declared.as_str() {
        diagnostics.error(
            name,
            None,
            format!(
                "expected variant to be {} but is {}",
                declared, body.variant
            ),
        );
        return None;
    }

    let Some(expected) = parse_input_id(&report_name.input) else {
        diagnostics.error(
            name,
            None,
            format!(
                "input identifier {} does not encode the maze size",
                report_name.input
            ),
        );
        return None;
    };

    let mismatches = size_mismatches(&expected, &body.size);
    if !mismatches.is_empty() {
        for (field, want, got) in mismatches {
            diagnostics.error(
                name,
                None,
                format!("expected {} to be {} but is {}", field, want, got),
            );
        }
        return None;
    }

    match Sample::new(report_name.key, report_name.iteration, body.elapsed) {
        Ok(sample) => Some(sample),
        Err(e) => {
            diagnostics.error(name, None, e.to_string());
            None
        }
    }
}

fn size_mismatches(expected: &InputSize, actual: &InputSize) -> Vec<(&'static str, u32, u32)> {
    [
        ("x", expected.x, actual.x),
        ("y", expected.y, actual.y),
        ("z", expected.z, actual.z),
        ("n", expected.paths, actual.paths),
    ]
    .into_iter()
    .filter(|(_, want, got)| want != got)
    .collect()
}
