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

//! Console output parser.
//!
//! Only lines starting with `BM_SharedPtrSimulation` or
//! `BM_ManagedEntitySimulation` are considered. A line must look like
//!
//! ```text
//! BM_ManagedEntitySimulation/4/1000/real_time 100 ns 100 ns 5 Tick_Rate=500k/s Visit_Rate=1.2M/s
//! ```
//!
//! Rates keep the text printed by the benchmark (`500k`, `1.2M`). Lines that
//! do not match are skipped.

use crate::model::{BenchmarkKey, MetricSample, Rate, ResultSet, SourceForm, Variant};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const LINE_PREFIXES: [&str; 2] = ["BM_ManagedEntitySimulation", "BM_SharedPtrSimulation"];

static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^BM_(\w+)Simulation/(\d+)/(\d+)/real_time\s+",
        r"\d+\s+ns\s+\d+\s+ns\s+\d+\s+",
        r"Tick_Rate=([\d.]+[kM]?)/s\s+Visit_Rate=([\d.]+[kM]?)/s"
    ))
    .expect("valid benchmark line regex")
});

/// Parses console benchmark output.
///
/// Never fails: unrecognised lines are skipped.
///
/// # Examples
///
/// ```
/// use cpioo_bench::model::{BenchmarkKey, Variant};
/// use cpioo_bench::parser::text;
///
/// let line = "BM_ManagedEntitySimulation/4/1000/real_time 100 ns 100 ns 5 Tick_Rate=500k/s Visit_Rate=1.2M/s";
/// let results = text::parse(line);
/// let sample = results.get(BenchmarkKey::new(4, 1000), Variant::ManagedEntity).unwrap();
/// assert_eq!(sample.tick_rate.display(), "500k");
/// assert_eq!(sample.visit_rate.display(), "1.2M");
/// ```
pub fn parse(input: &str) -> ResultSet {
    let mut results = ResultSet::new(SourceForm::Text);

    for line in super::strip_bom(input).lines() {
        if !LINE_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            continue;
        }
        let Some((key, variant, sample)) = parse_line(line) else {
            debug!(line, "skipping unrecognised benchmark line");
            continue;
        };
        if results.insert(key, variant, sample).is_some() {
            debug!(%key, %variant, "duplicate benchmark line replaces earlier one");
        }
    }

    results
}

/// Parses a single console line into its key, variant and sample.
pub fn parse_line(line: &str) -> Option<(BenchmarkKey, Variant, MetricSample)> {
    let caps = LINE_PATTERN.captures(line)?;

    let variant = caps[1].parse::<Variant>().ok()?;
    let depth = caps[2].parse::<u64>().ok()?;
    let ticks = caps[3].parse::<u64>().ok()?;
    let sample = MetricSample {
        tick_rate: Rate::from_scaled(&caps[4])?,
        visit_rate: Rate::from_scaled(&caps[5])?,
        objects_created: None,
    };

    Some((BenchmarkKey::new(depth, ticks), variant, sample))
}
