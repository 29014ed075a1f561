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

//! Normalized benchmark results.
//!
//! A [`ResultSet`] maps each `(depth, ticks)` configuration to the samples
//! measured for each simulation [`Variant`]. Keys order numerically, so
//! iterating the set always yields rows in output order.

use crate::metrics::{parse_scaled, Measure};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A benchmark configuration: tree depth and number of simulated ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BenchmarkKey {
    /// Depth of the simulated entity tree.
    pub depth: u64,
    /// Number of ticks the simulation ran.
    pub ticks: u64,
}

impl BenchmarkKey {
    /// Creates a new key.
    pub fn new(depth: u64, ticks: u64) -> Self {
        Self { depth, ticks }
    }
}

impl fmt::Display for BenchmarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.depth, self.ticks)
    }
}

/// The two simulation implementations under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    /// Reference-counted baseline.
    SharedPtr,
    /// Managed entity implementation.
    ManagedEntity,
}

impl Variant {
    /// All variants, baseline first.
    pub const ALL: [Variant; 2] = [Variant::SharedPtr, Variant::ManagedEntity];

    /// Name as it appears in benchmark names and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::SharedPtr => "SharedPtr",
            Variant::ManagedEntity => "ManagedEntity",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SharedPtr" => Ok(Variant::SharedPtr),
            "ManagedEntity" => Ok(Variant::ManagedEntity),
            other => Err(format!("unknown simulation variant '{}'", other)),
        }
    }
}

/// Throughput metrics reported per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Simulation ticks per second.
    TickRate,
    /// Entity visits per second.
    VisitRate,
    /// Objects created per second (structured input only).
    ObjectsCreated,
}

impl Metric {
    /// Short label used in table column headers.
    pub fn column_label(&self) -> &'static str {
        match self {
            Metric::TickRate => "Tick/s",
            Metric::VisitRate => "Visit/s",
            Metric::ObjectsCreated => "Objects/s",
        }
    }

    /// Section title used for charts and document headings.
    pub fn title(&self) -> &'static str {
        match self {
            Metric::TickRate => "Tick Rate Comparison",
            Metric::VisitRate => "Visit Rate Comparison",
            Metric::ObjectsCreated => "Object Creation Rate Comparison",
        }
    }

    /// File name of the chart rendered for this metric.
    pub fn chart_file_name(&self) -> &'static str {
        match self {
            Metric::TickRate => "tick_rate_comparison.svg",
            Metric::VisitRate => "visit_rate_comparison.svg",
            Metric::ObjectsCreated => "objects_created_comparison.svg",
        }
    }
}

/// Which input form produced a result set.
///
/// The form decides the metric set, and with it the table columns and the
/// charts that are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceForm {
    /// Structured JSON records.
    Json,
    /// Line-oriented console output.
    Text,
}

impl SourceForm {
    /// Metrics available from this form, in column order.
    pub fn metrics(&self) -> &'static [Metric] {
        match self {
            SourceForm::Json => &[Metric::TickRate, Metric::VisitRate, Metric::ObjectsCreated],
            SourceForm::Text => &[Metric::TickRate, Metric::VisitRate],
        }
    }
}

/// A single rate as reported by the benchmark.
#[derive(Debug, Clone, PartialEq)]
pub enum Rate {
    /// Plain operations per second, from structured input.
    Raw(f64),
    /// Pre-scaled text such as `"1.2M"`, from console output.
    Scaled {
        /// Parsed operations per second.
        value: f64,
        /// Text as printed by the benchmark.
        text: String,
    },
}

impl Rate {
    /// Rate from a pre-scaled string such as `"1.2M"`.
    ///
    /// Returns `None` if the text is not a number.
    pub fn from_scaled(text: &str) -> Option<Self> {
        parse_scaled(text).map(|value| Rate::Scaled {
            value,
            text: text.to_string(),
        })
    }

    /// Numeric value in operations per second.
    pub fn value(&self) -> f64 {
        match self {
            Rate::Raw(value) => *value,
            Rate::Scaled { value, .. } => *value,
        }
    }

    /// Text shown in tables: raw rates are scaled with `format_value`,
    /// pre-scaled rates are shown as printed.
    pub fn display(&self) -> String {
        self.measure().to_string()
    }

    /// The measure used for percent change.
    pub fn measure(&self) -> Measure<'_> {
        match self {
            Rate::Raw(value) => Measure::Raw(*value),
            Rate::Scaled { text, .. } => Measure::Scaled(text),
        }
    }
}

/// One variant's measurements for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    /// Tick rate.
    pub tick_rate: Rate,
    /// Visit rate.
    pub visit_rate: Rate,
    /// Object creation rate, absent for text input.
    pub objects_created: Option<Rate>,
}

impl MetricSample {
    /// Returns the rate recorded for a metric, if any.
    pub fn rate(&self, metric: Metric) -> Option<&Rate> {
        match metric {
            Metric::TickRate => Some(&self.tick_rate),
            Metric::VisitRate => Some(&self.visit_rate),
            Metric::ObjectsCreated => self.objects_created.as_ref(),
        }
    }
}

/// Both variants' samples for a single key.
#[derive(Debug, Clone, Copy)]
pub struct ComparisonRow<'a> {
    /// The configuration.
    pub key: BenchmarkKey,
    /// Baseline sample.
    pub shared_ptr: &'a MetricSample,
    /// Sample being compared against the baseline.
    pub managed_entity: &'a MetricSample,
}

/// All samples from one benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    form: SourceForm,
    entries: BTreeMap<BenchmarkKey, BTreeMap<Variant, MetricSample>>,
}

impl ResultSet {
    /// Creates an empty result set for the given input form.
    pub fn new(form: SourceForm) -> Self {
        Self {
            form,
            entries: BTreeMap::new(),
        }
    }

    /// The input form that produced these results.
    pub fn form(&self) -> SourceForm {
        self.form
    }

    /// Records a sample, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: BenchmarkKey,
        variant: Variant,
        sample: MetricSample,
    ) -> Option<MetricSample> {
        self.entries.entry(key).or_default().insert(variant, sample)
    }

    /// Looks up the sample for a key and variant.
    pub fn get(&self, key: BenchmarkKey, variant: Variant) -> Option<&MetricSample> {
        self.entries.get(&key).and_then(|samples| samples.get(&variant))
    }

    /// Number of distinct keys, complete or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no samples were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in ascending `(depth, ticks)` order.
    pub fn keys(&self) -> impl Iterator<Item = BenchmarkKey> + '_ {
        self.entries.keys().copied()
    }

    /// Keys that have both variants, each with its pair of samples, in
    /// ascending `(depth, ticks)` order.
    pub fn complete_rows(&self) -> impl Iterator<Item = ComparisonRow<'_>> + '_ {
        self.entries.iter().filter_map(|(key, samples)| {
            Some(ComparisonRow {
                key: *key,
                shared_ptr: samples.get(&Variant::SharedPtr)?,
                managed_entity: samples.get(&Variant::ManagedEntity)?,
            })
        })
    }
}
