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

//! Structured benchmark report parser.
//!
//! Entry names follow
//! `BM_<Variant>Simulation/<depth>/<ticks>/iterations:<N>/real_time`. Other
//! entries (aggregates, unrelated benchmarks) are ignored, as are entries
//! whose name is missing or not a string. Missing counters default to zero.

use crate::error::Result;
use crate::model::{BenchmarkKey, MetricSample, Rate, ResultSet, SourceForm, Variant};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^BM_(\w+)Simulation/(\d+)/(\d+)/iterations:\d+/real_time$")
        .expect("valid benchmark name regex")
});

/// Top-level container; only the `benchmarks` list is read.
#[derive(Debug, Deserialize)]
struct BenchmarkReport {
    benchmarks: Vec<Value>,
}

/// Parses a structured benchmark report.
///
/// # Errors
///
/// Returns [`crate::ReportError::InvalidJson`] if the input is not JSON or has no
/// `benchmarks` list.
///
/// # Examples
///
/// ```
/// use cpioo_bench::model::{BenchmarkKey, Variant};
/// use cpioo_bench::parser::json;
///
/// let input = r#"{"benchmarks":[{"name":"BM_SharedPtrSimulation/4/1000/iterations:10/real_time","Tick_Rate":500000}]}"#;
/// let results = json::parse(input).unwrap();
/// let sample = results.get(BenchmarkKey::new(4, 1000), Variant::SharedPtr).unwrap();
/// assert_eq!(sample.tick_rate.display(), "500.00k");
/// ```
pub fn parse(input: &str) -> Result<ResultSet> {
    let report: BenchmarkReport = serde_json::from_str(super::strip_bom(input))?;
    let mut results = ResultSet::new(SourceForm::Json);

    for entry in &report.benchmarks {
        let Some(name) = entry.get("name").and_then(Value::as_str) else {
            debug!("skipping benchmark entry without a name");
            continue;
        };
        let Some((key, variant)) = parse_name(name) else {
            continue;
        };

        let sample = MetricSample {
            tick_rate: Rate::Raw(counter(entry, "Tick_Rate")),
            visit_rate: Rate::Raw(counter(entry, "Visit_Rate")),
            objects_created: Some(Rate::Raw(counter(entry, "Objects_Creation_Rate"))),
        };

        if results.insert(key, variant, sample).is_some() {
            debug!(%key, %variant, "duplicate benchmark entry replaces earlier one");
        }
    }

    Ok(results)
}

/// Extracts key and variant from a benchmark name.
///
/// Returns `None` for names outside the grammar and for unknown variants.
pub fn parse_name(name: &str) -> Option<(BenchmarkKey, Variant)> {
    let Some(caps) = NAME_PATTERN.captures(name) else {
        debug!(name, "skipping non-simulation benchmark");
        return None;
    };

    let variant = match caps[1].parse::<Variant>() {
        Ok(variant) => variant,
        Err(reason) => {
            warn!(name, "{}", reason);
            return None;
        }
    };
    let depth = caps[2].parse::<u64>().ok()?;
    let ticks = caps[3].parse::<u64>().ok()?;

    Some((BenchmarkKey::new(depth, ticks), variant))
}

fn counter(entry: &Value, field: &str) -> f64 {
    entry.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}
