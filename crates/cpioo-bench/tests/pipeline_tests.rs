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

//! End-to-end tests: benchmark output through table, charts and README.

use cpioo_bench::config::{InputFormat, ReportConfig};
use cpioo_bench::document::{self, CHARTS_HEADING, RESULTS_HEADING};
use cpioo_bench::metrics::percent_change;
use cpioo_bench::model::{BenchmarkKey, Metric, SourceForm, Variant};
use cpioo_bench::reporters::{self, ChartRef};
use cpioo_bench::{parse_benchmarks, ReportError};
use std::fs;
use tempfile::TempDir;

const JSON_REPORT: &str = r#"{
  "context": {"executable": "./cpioo_benchmark", "num_cpus": 8},
  "benchmarks": [
    {"name": "BM_ManagedEntitySimulation/8/1000/iterations:10/real_time", "Tick_Rate": 300000, "Visit_Rate": 3000000, "Objects_Creation_Rate": 12000},
    {"name": "BM_SharedPtrSimulation/8/1000/iterations:10/real_time", "Tick_Rate": 200000, "Visit_Rate": 2000000, "Objects_Creation_Rate": 16000},
    {"name": "BM_SharedPtrSimulation/4/1000/iterations:10/real_time", "Tick_Rate": 500000, "Visit_Rate": 1000000, "Objects_Creation_Rate": 0},
    {"name": "BM_ManagedEntitySimulation/4/1000/iterations:10/real_time", "Tick_Rate": 750000, "Visit_Rate": 1000000, "Objects_Creation_Rate": 800},
    {"name": "BM_SharedPtrSimulation/16/1000/iterations:10/real_time", "Tick_Rate": 1000},
    {"name": "BM_ManagedEntitySimulation/4/1000/iterations:10/real_time_mean", "Tick_Rate": 1}
  ]
}"#;

const CONSOLE_OUTPUT: &str = "\
Running ./cpioo_benchmark
----------------------------------------------------------------
Benchmark                 Time             CPU   Iterations UserCounters...
----------------------------------------------------------------
BM_SharedPtrSimulation/10/100/real_time       120 ns   119 ns   5 Tick_Rate=400k/s Visit_Rate=1M/s
BM_ManagedEntitySimulation/10/100/real_time   100 ns   100 ns   5 Tick_Rate=500k/s Visit_Rate=1.2M/s
BM_SharedPtrSimulation/2/100/real_time        20 ns    20 ns    5 Tick_Rate=2M/s Visit_Rate=4M/s
BM_ManagedEntitySimulation/2/100/real_time    10 ns    10 ns    5 Tick_Rate=4M/s Visit_Rate=4M/s
BM_ManagedEntitySimulation/3/100/real_time    10 ns    10 ns    5 Tick_Rate=4M/s Visit_Rate=4M/s
";

fn row_cells(row: &str) -> Vec<String> {
    row.trim_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}

#[test]
fn test_json_table() {
    let results = parse_benchmarks(JSON_REPORT, InputFormat::Auto).unwrap();
    assert_eq!(results.form(), SourceForm::Json);
    assert_eq!(results.len(), 3);

    let table = reporters::render_table(&results);
    let rows: Vec<&str> = table.lines().collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(
        rows[2],
        "| 4/1000 | 500.00k | 750.00k | +50.00% | 1.00M | 1.00M | 0.00% | 0.00 | 800.00 | N/A |"
    );
    assert_eq!(
        rows[3],
        "| 8/1000 | 200.00k | 300.00k | +50.00% | 2.00M | 3.00M | +50.00% | 16.00k | 12.00k | -25.00% |"
    );
}

#[test]
fn test_console_table() {
    let results = parse_benchmarks(CONSOLE_OUTPUT, InputFormat::Auto).unwrap();
    assert_eq!(results.form(), SourceForm::Text);

    let table = reporters::render_table(&results);
    let rows: Vec<&str> = table.lines().skip(2).collect();
    assert_eq!(
        rows,
        vec![
            "| 2/100 | 2M | 4M | +100.00% | 4M | 4M | 0.00% |",
            "| 10/100 | 400k | 500k | +25.00% | 1M | 1.2M | +20.00% |",
        ]
    );
}

#[test]
fn test_table_percentages_reproducible_from_cells() {
    let results = parse_benchmarks(JSON_REPORT, InputFormat::Json).unwrap();
    let table = reporters::render_table(&results);

    for row in table.lines().skip(2) {
        let cells = row_cells(row);
        for metric in 0..3 {
            let old = &cells[1 + metric * 3];
            let new = &cells[2 + metric * 3];
            let change = &cells[3 + metric * 3];
            assert_eq!(&percent_change(old.as_str(), new.as_str()), change);
        }
    }
}

#[test]
fn test_full_run_updates_readme() {
    let dir = TempDir::new().unwrap();
    let config = ReportConfig::new(dir.path());
    let readme = config.document_path();
    fs::write(&readme, "# cpioo\n\nManaged entities for C++.\n").unwrap();

    let results = parse_benchmarks(JSON_REPORT, config.input_format).unwrap();
    let table = reporters::render_table(&results);
    let charts = reporters::render_charts(&results, &config.charts_dir()).unwrap();
    assert_eq!(charts.len(), 3);
    for chart in &charts {
        assert!(chart.path.starts_with(dir.path().join("charts")));
        assert!(chart.path.is_file());
    }

    document::update_document(&readme, &table, &charts).unwrap();
    let first = fs::read_to_string(&readme).unwrap();
    assert!(first.starts_with("# cpioo\n\nManaged entities for C++.\n"));
    assert!(first.contains(&format!("{}\n\n{}", RESULTS_HEADING, table)));
    assert!(first.contains("![Object Creation Rate Comparison](charts/objects_created_comparison.svg)"));
    assert!(!first.contains(&dir.path().display().to_string()));

    document::update_document(&readme, &table, &charts).unwrap();
    assert_eq!(fs::read_to_string(&readme).unwrap(), first);
}

#[test]
fn test_console_run_has_two_charts() {
    let dir = TempDir::new().unwrap();
    let results = parse_benchmarks(CONSOLE_OUTPUT, InputFormat::Text).unwrap();

    let charts = reporters::render_charts(&results, &dir.path().join("charts")).unwrap();
    let metrics: Vec<Metric> = charts.iter().map(|chart| chart.metric).collect();
    assert_eq!(metrics, vec![Metric::TickRate, Metric::VisitRate]);
    assert!(!dir.path().join("charts/objects_created_comparison.svg").exists());

    let updated = document::apply_update("# cpioo\n", &reporters::render_table(&results), &charts);
    assert_eq!(updated.matches(CHARTS_HEADING).count(), 1);
    assert!(!updated.contains("Object Creation Rate"));
}

#[test]
fn test_partial_key_excluded_everywhere() {
    let results = parse_benchmarks(JSON_REPORT, InputFormat::Json).unwrap();
    let partial = BenchmarkKey::new(16, 1000);
    assert!(results.get(partial, Variant::SharedPtr).is_some());

    let table = reporters::render_table(&results);
    assert!(!table.contains("16/1000"));
    assert!(results.complete_rows().all(|row| row.key != partial));
}

#[test]
fn test_missing_readme_keeps_charts() {
    let dir = TempDir::new().unwrap();
    let config = ReportConfig::new(dir.path());
    let results = parse_benchmarks(JSON_REPORT, InputFormat::Json).unwrap();

    let charts = reporters::render_charts(&results, &config.charts_dir()).unwrap();
    let err = document::update_document(
        &config.document_path(),
        &reporters::render_table(&results),
        &charts,
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::DocumentNotFound { .. }));
    assert!(charts.iter().all(|chart| chart.path.is_file()));
}

#[test]
fn test_invalid_json_is_fatal() {
    let err = parse_benchmarks("{\"benchmarks\": [", InputFormat::Auto).unwrap_err();
    assert!(matches!(err, ReportError::InvalidJson(_)));
}

#[test]
fn test_chart_refs_link_by_file_name() {
    let chart = ChartRef::in_dir(Metric::TickRate, std::path::Path::new("/some/where/charts"));
    let section = document::chart_section(&[chart]);
    assert_eq!(
        section,
        "## Benchmark Charts\n\n### Tick Rate Comparison\n\n![Tick Rate Comparison](charts/tick_rate_comparison.svg)\n\n"
    );
}
