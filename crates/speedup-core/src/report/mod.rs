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

//! Layout descriptors handed to an external renderer.
//!
//! Two descriptors are built here: the per-configuration report
//! ([`build_descriptor`]), which places one value per configuration along a
//! category axis in a fixed order, and the speedup chart
//! ([`build_speedup_chart`]), which plots speedup against total threads.
//! Neither carries any markup; both serialize with serde.

mod chart;
mod descriptor;
mod layout;

pub use chart::{build_speedup_chart, ChartPoint, ChartSeries, SpeedupChart};
pub use descriptor::{build_descriptor, LabelRow, ReportDescriptor, ReportEntry};
pub use layout::{brackets, collapse_labels, plain_labels, Axis, Bracket};
