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

//! Speedup CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! - **collect**: run report directory → per-sample CSV
//! - **aggregate**: per-sample CSV → quartile statistics CSV
//! - **speedups**: statistics CSV → speedup CSV, printing the best per variant
//! - **attempts**: per-sample CSV with attempt counts → report descriptor JSON
//! - **chart**: speedup CSV → speedup chart descriptor JSON
//!
//! Every command refuses to overwrite an existing output, writes its artifact
//! once at the end, and then lists the diagnostics collected on the way.
//!
//! # Examples
//!
//! ```no_run
//! use speedup_cli::commands::{aggregate, speedups};
//!
//! # fn main() -> Result<(), speedup_cli::error::CliError> {
//! aggregate("20190817T1454-1cc19b18.csv", None)?;
//! speedups("20190817T1454-1cc19b18-medians.csv", None, None)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
