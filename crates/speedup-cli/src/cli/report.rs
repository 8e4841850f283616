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

//! Commands that derive speedups and layout descriptors.

use crate::commands;
use crate::error::CliError;
use clap::Subcommand;

/// Report commands.
///
/// These honour the global `--config` option.
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Convert a statistics CSV to speedups and print the maximum per variant
    Speedups {
        /// Statistics CSV written by `aggregate`
        #[arg(value_name = "STATS_CSV")]
        file: String,

        /// Output file path (defaults to <stem>-speedups.csv)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build the attempts report descriptor as JSON
    ///
    /// Averages the `attempts` column per configuration and lays the means out
    /// in the configured report ordering.
    Attempts {
        /// Per-sample CSV with an attempts column
        #[arg(value_name = "CSV")]
        file: String,

        /// Output file path (defaults to <stem>-attempts.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Build the speedup chart descriptor as JSON
    Chart {
        /// Speedup CSV written by `speedups`
        #[arg(value_name = "SPEEDUP_CSV")]
        file: String,

        /// Output file path (defaults to <stem>.json)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl ReportCommands {
    /// Execute the report command.
    pub fn execute(self, config: Option<&str>) -> Result<(), CliError> {
        match self {
            ReportCommands::Speedups { file, output } => {
                commands::speedups(&file, output.as_deref(), config)
            }
            ReportCommands::Attempts { file, output } => {
                commands::attempts(&file, output.as_deref(), config)
            }
            ReportCommands::Chart { file, output } => {
                commands::chart(&file, output.as_deref(), config)
            }
        }
    }
}
