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

//! CLI command definitions and argument parsing.
//!
//! Commands are grouped by the pipeline stage they start from:
//!
//! - [`IngestCommands`]: raw measurements in (collect, aggregate)
//! - [`ReportCommands`]: statistics in, speedups and descriptors out
//!   (speedups, attempts, chart)

mod ingest;
mod report;

use crate::error::CliError;
use clap::Subcommand;

pub use ingest::IngestCommands;
pub use report::ReportCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Ingest (collect, aggregate)
/// └── Report (speedups, attempts, chart)
/// ```
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use speedup_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Ingestion commands - flattened to appear at top level
    #[command(flatten)]
    Ingest(IngestCommands),

    // Report commands - flattened to appear at top level
    #[command(flatten)]
    Report(ReportCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// `config` is the optional pipeline configuration file; commands that
    /// need no configuration ignore it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the output already exists, an input cannot be read,
    /// or a pipeline stage rejects the batch.
    pub fn execute(self, config: Option<&str>) -> Result<(), CliError> {
        match self {
            Commands::Ingest(cmd) => cmd.execute(),
            Commands::Report(cmd) => cmd.execute(config),
        }
    }
}
