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

//! Markdown comparison table.
//!
//! One row per configuration that has both variants, ordered by
//! `(depth, ticks)`. For every metric the table shows the SharedPtr rate, the
//! ManagedEntity rate and the change of ManagedEntity relative to SharedPtr.

use crate::metrics::percent_change;
use crate::model::{ComparisonRow, Metric, ResultSet, SourceForm};

const JSON_HEADER: &str = "| Depth/Ticks | Tick/s (SharedPtr) | Tick/s (ManagedEntity) | %-Change (Tick/s) | Visit/s (SharedPtr) | Visit/s (ManagedEntity) | %-Change (Visit/s) | Objects/s (SharedPtr) | Objects/s (ManagedEntity) | %-Change (Objects/s) |";
const JSON_ALIGNMENT: &str = "|-------------|--------------------|-----------------------|-------------------|---------------------|-------------------------|--------------------|----------------------|--------------------------|----------------------|";

const TEXT_HEADER: &str = "| Depth/Ticks | Tick/s (SharedPtr) | Tick/s (ManagedEntity) | %-Change (Tick/s) | Visit/s (SharedPtr) | Visit/s (ManagedEntity) | %-Change (Visit/s) |";
const TEXT_ALIGNMENT: &str = "|-------------|--------------------|-----------------------|-------------------|---------------------|-------------------------|--------------------|";

/// Header and alignment rows for the column schema of a source form.
pub fn table_header(form: SourceForm) -> (&'static str, &'static str) {
    match form {
        SourceForm::Json => (JSON_HEADER, JSON_ALIGNMENT),
        SourceForm::Text => (TEXT_HEADER, TEXT_ALIGNMENT),
    }
}

/// Renders the comparison table.
///
/// The result has no trailing newline. Configurations missing either variant
/// are left out.
///
/// # Examples
///
/// ```
/// use cpioo_bench::parser::text;
/// use cpioo_bench::reporters::render_table;
///
/// let results = text::parse(
///     "BM_SharedPtrSimulation/1/10/real_time 1 ns 1 ns 1 Tick_Rate=100/s Visit_Rate=1k/s\n\
///      BM_ManagedEntitySimulation/1/10/real_time 1 ns 1 ns 1 Tick_Rate=150/s Visit_Rate=500/s\n",
/// );
/// let table = render_table(&results);
/// assert!(table.ends_with("| 1/10 | 100 | 150 | +50.00% | 1k | 500 | -50.00% |"));
/// ```
pub fn render_table(results: &ResultSet) -> String {
    let form = results.form();
    let (header, alignment) = table_header(form);

    let mut table = String::with_capacity(header.len() * 2);
    table.push_str(header);
    table.push('\n');
    table.push_str(alignment);

    for row in results.complete_rows() {
        table.push('\n');
        table.push_str(&render_row(&row, form.metrics()));
    }

    table
}

fn render_row(row: &ComparisonRow<'_>, metrics: &[Metric]) -> String {
    let mut line = format!("| {} |", row.key);
    for &metric in metrics {
        let (Some(old), Some(new)) = (row.shared_ptr.rate(metric), row.managed_entity.rate(metric))
        else {
            line.push_str(" N/A | N/A | N/A |");
            continue;
        };
        line.push_str(&format!(
            " {} | {} | {} |",
            old.display(),
            new.display(),
            percent_change(old.measure(), new.measure())
        ));
    }
    line
}
