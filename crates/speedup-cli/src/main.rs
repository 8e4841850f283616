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

//! Speedup Command Line Interface

use clap::Parser;
use speedup_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Speedup - parallel search benchmark result reduction
///
/// # Examples
///
/// ```bash
/// # Collect run reports into one CSV
/// speedup collect 20190817T1454-1cc19b18
///
/// # Quartiles, then speedups against the sequential baseline
/// speedup aggregate 20190817T1454-1cc19b18.csv
/// speedup speedups 20190817T1454-1cc19b18-medians.csv
///
/// # Chart descriptor with a custom layout
/// speedup --config layout.yaml chart 20190817T1454-1cc19b18-speedups.csv
/// ```
#[derive(Parser)]
#[command(name = "speedup")]
#[command(author, version, about = "Parallel search benchmark result reduction", long_about = None)]
struct Cli {
    /// Log pipeline stages at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Pipeline configuration file (JSON, or YAML by .yaml/.yml extension)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "speedup=debug"
    } else {
        "speedup=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(directive.parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.execute(cli.config.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
