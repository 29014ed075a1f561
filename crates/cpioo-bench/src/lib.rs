// Dweve cpioo-bench - Simulation Benchmark Reporting
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

//! cpioo Simulation Benchmark Reporting
//!
//! Turns Google Benchmark output of the `SharedPtr` and `ManagedEntity`
//! simulations into a markdown comparison table and grouped SVG bar charts,
//! and keeps the benchmark sections of a project README up to date.
//!
//! ## Pipeline
//!
//! 1. [`parser`]: JSON report or console text into a [`ResultSet`]
//! 2. [`reporters::table`]: markdown table with per-metric percent change
//! 3. [`reporters::chart`]: one SVG chart per metric
//! 4. [`document`]: replace or append the `## Benchmark Results` and
//!    `## Benchmark Charts` sections
//!
//! ## Usage
//!
//! ```no_run
//! use cpioo_bench::config::{InputFormat, ReportConfig};
//! use cpioo_bench::{document, parser, reporters};
//!
//! # fn main() -> cpioo_bench::Result<()> {
//! let config = ReportConfig::new("/work/cpioo");
//! let input = std::fs::read_to_string("bench.json").unwrap();
//!
//! let results = parser::parse_benchmarks(&input, InputFormat::Auto)?;
//! let table = reporters::render_table(&results);
//! let charts = reporters::render_charts(&results, &config.charts_dir())?;
//! document::update_document(&config.document_path(), &table, &charts)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod reporters;

pub use config::{InputFormat, ReportConfig};
pub use error::{ReportError, Result};
pub use metrics::{format_value, percent_change};
pub use model::{BenchmarkKey, Metric, MetricSample, Rate, ResultSet, SourceForm, Variant};
pub use parser::parse_benchmarks;
pub use reporters::{render_charts, render_table, ChartRef};
