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

//! Commands that read raw measurements.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Ingestion commands.
#[derive(Subcommand)]
pub enum IngestCommands {
    /// Collect run reports into a per-sample CSV
    ///
    /// Reads every `<input>-<variant>-t<T>[-a<A>]-i<I>.txt` report in a results
    /// directory, checks it against `info.txt`, and writes one row per run.
    Collect {
        /// Results directory
        #[arg(value_name = "DIR")]
        dir: String,

        /// Output file path (defaults to <DIR>.csv)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Reduce a per-sample CSV to quartiles per configuration
    Aggregate {
        /// Per-sample CSV file
        #[arg(value_name = "CSV")]
        file: String,

        /// Output file path (defaults to <stem>-medians.csv)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl IngestCommands {
    /// Execute the ingestion command.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            IngestCommands::Collect { dir, output } => commands::collect(&dir, output.as_deref()),
            IngestCommands::Aggregate { file, output } => {
                commands::aggregate(&file, output.as_deref())
            }
        }
    }
}
