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

//! Grouped SVG bar charts.
//!
//! One chart per metric: configurations along the x axis, a SharedPtr and a
//! ManagedEntity bar for each, and the formatted value above every bar.

use crate::error::{ReportError, Result};
use crate::metrics::{format_axis_value, format_value};
use crate::model::{BenchmarkKey, Metric, MetricSample, ResultSet, Variant};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CHART_SIZE: (u32, u32) = (1200, 600);

const TITLE_FONT_SIZE: u32 = 28;
const AXIS_LABEL_FONT_SIZE: u32 = 18;
const TICK_LABEL_FONT_SIZE: u32 = 14;
const DATA_LABEL_FONT_SIZE: u32 = 12;

/// Width of a single bar; a group is two bars wide.
pub const BAR_WIDTH: f64 = 0.35;

/// Bar labels sit this factor above the bar top.
const LABEL_LIFT: f64 = 1.02;

/// Headroom above the tallest bar for its label.
const Y_HEADROOM: f64 = 1.15;

const SHARED_PTR_COLOR: RGBColor = RGBColor(31, 119, 180);
const MANAGED_ENTITY_COLOR: RGBColor = RGBColor(255, 127, 14);

fn variant_color(variant: Variant) -> RGBColor {
    match variant {
        Variant::SharedPtr => SHARED_PTR_COLOR,
        Variant::ManagedEntity => MANAGED_ENTITY_COLOR,
    }
}

/// A rendered chart and the metric it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRef {
    /// Metric plotted in the chart.
    pub metric: Metric,
    /// Path of the SVG file.
    pub path: PathBuf,
}

impl ChartRef {
    /// Creates a chart reference.
    pub fn new(metric: Metric, path: impl Into<PathBuf>) -> Self {
        Self {
            metric,
            path: path.into(),
        }
    }

    /// The expected chart for `metric` inside `charts_dir`.
    pub fn in_dir(metric: Metric, charts_dir: &Path) -> Self {
        Self::new(metric, charts_dir.join(metric.chart_file_name()))
    }

    /// File name of the chart, used for portable document links.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.metric.chart_file_name().to_string())
    }
}

/// Series values of one metric for the complete configurations.
struct ChartData {
    keys: Vec<BenchmarkKey>,
    shared_ptr: Vec<f64>,
    managed_entity: Vec<f64>,
}

impl ChartData {
    fn collect(results: &ResultSet, metric: Metric) -> Self {
        let mut data = ChartData {
            keys: Vec::new(),
            shared_ptr: Vec::new(),
            managed_entity: Vec::new(),
        };
        for row in results.complete_rows() {
            let value = |sample: &MetricSample| {
                sample.rate(metric).map_or(0.0, |rate| rate.value())
            };
            data.keys.push(row.key);
            data.shared_ptr.push(value(row.shared_ptr));
            data.managed_entity.push(value(row.managed_entity));
        }
        data
    }

    fn series(&self, variant: Variant) -> &[f64] {
        match variant {
            Variant::SharedPtr => &self.shared_ptr,
            Variant::ManagedEntity => &self.managed_entity,
        }
    }

    fn max_value(&self) -> f64 {
        self.shared_ptr
            .iter()
            .chain(&self.managed_entity)
            .copied()
            .fold(0.0_f64, f64::max)
    }
}

/// Renders every chart available for the result set into `charts_dir`.
///
/// The directory is created if needed. Metrics without any complete
/// configuration produce no file and no entry in the returned list.
pub fn render_charts(results: &ResultSet, charts_dir: &Path) -> Result<Vec<ChartRef>> {
    fs::create_dir_all(charts_dir).map_err(|e| ReportError::io_error(charts_dir, e))?;

    let mut rendered = Vec::new();
    for &metric in results.form().metrics() {
        let path = charts_dir.join(metric.chart_file_name());
        if let Some(path) = render_chart(results, metric, &path)? {
            rendered.push(ChartRef::new(metric, path));
        }
    }
    Ok(rendered)
}

/// Renders the chart for one metric to `path`.
///
/// Returns `Ok(None)` without touching the file system when no configuration
/// has both variants.
pub fn render_chart(results: &ResultSet, metric: Metric, path: &Path) -> Result<Option<PathBuf>> {
    let data = ChartData::collect(results, metric);
    if data.keys.is_empty() {
        debug!(?metric, "no complete configurations, skipping chart");
        return Ok(None);
    }

    draw(&data, metric, path)?;
    info!(path = %path.display(), "generated chart");
    Ok(Some(path.to_path_buf()))
}

fn draw(data: &ChartData, metric: Metric, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ReportError::chart)?;

    let groups = data.keys.len();
    let y_max = (data.max_value() * Y_HEADROOM).max(1.0);
    let labels: Vec<String> = data.keys.iter().map(ToString::to_string).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} (ops/sec)", metric.title()),
            ("sans-serif", TITLE_FONT_SIZE),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5..(groups as f64 - 0.5), 0.0..y_max)
        .map_err(ReportError::chart)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups)
        .x_label_formatter(&|x| {
            let idx = x.round();
            if idx >= 0.0 && (x - idx).abs() < 0.3 {
                labels.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .y_label_formatter(&|y| format_axis_value(*y))
        .x_desc("Configuration (Depth/Ticks)")
        .y_desc("Operations per second")
        .label_style(("sans-serif", TICK_LABEL_FONT_SIZE))
        .axis_desc_style(("sans-serif", AXIS_LABEL_FONT_SIZE))
        .draw()
        .map_err(ReportError::chart)?;

    let bar_offsets = [-BAR_WIDTH / 2.0, BAR_WIDTH / 2.0];
    for (variant, offset) in Variant::ALL.into_iter().zip(bar_offsets) {
        let color = variant_color(variant);
        let values = data.series(variant);

        chart
            .draw_series(values.iter().enumerate().map(|(i, &v)| {
                let center = i as f64 + offset;
                Rectangle::new(
                    [(center - BAR_WIDTH / 2.0, 0.0), (center + BAR_WIDTH / 2.0, v)],
                    color.filled(),
                )
            }))
            .map_err(ReportError::chart)?
            .label(variant.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));

        chart
            .draw_series(values.iter().enumerate().map(|(i, &v)| {
                Text::new(
                    format_value(v),
                    (i as f64 + offset, v * LABEL_LIFT),
                    ("sans-serif", DATA_LABEL_FONT_SIZE)
                        .into_font()
                        .color(&BLACK)
                        .pos(Pos::new(HPos::Center, VPos::Bottom)),
                )
            }))
            .map_err(ReportError::chart)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(ReportError::chart)?;

    root.present().map_err(ReportError::chart)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Rate, SourceForm};
    use tempfile::TempDir;

    fn sample(tick: f64) -> MetricSample {
        MetricSample {
            tick_rate: Rate::Raw(tick),
            visit_rate: Rate::Raw(tick * 3.0),
            objects_created: Some(Rate::Raw(tick / 2.0)),
        }
    }

    fn results() -> ResultSet {
        let mut results = ResultSet::new(SourceForm::Json);
        let key = BenchmarkKey::new(4, 1000);
        results.insert(key, Variant::SharedPtr, sample(500_000.0));
        results.insert(key, Variant::ManagedEntity, sample(750_000.0));
        results.insert(BenchmarkKey::new(8, 1000), Variant::SharedPtr, sample(1.0));
        results
    }

    #[test]
    fn test_render_chart_writes_svg_with_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tick.svg");

        let written = render_chart(&results(), Metric::TickRate, &path).unwrap();
        assert_eq!(written, Some(path.clone()));

        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("500.00k"));
        assert!(svg.contains("750.00k"));
        assert!(svg.contains("SharedPtr"));
        assert!(svg.contains("ManagedEntity"));
        // 8/1000 has a SharedPtr sample only
        assert!(!svg.contains("8/1000"));
    }

    #[test]
    fn test_render_chart_skips_without_complete_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tick.svg");
        let mut results = ResultSet::new(SourceForm::Json);
        results.insert(BenchmarkKey::new(1, 1), Variant::SharedPtr, sample(1.0));

        assert_eq!(render_chart(&results, Metric::TickRate, &path).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn test_render_charts_per_form() {
        let dir = TempDir::new().unwrap();
        let charts_dir = dir.path().join("charts");

        let rendered = render_charts(&results(), &charts_dir).unwrap();
        let names: Vec<String> = rendered.iter().map(ChartRef::file_name).collect();
        assert_eq!(
            names,
            vec![
                "tick_rate_comparison.svg",
                "visit_rate_comparison.svg",
                "objects_created_comparison.svg"
            ]
        );
        assert!(rendered.iter().all(|chart| chart.path.exists()));
    }

    #[test]
    fn test_render_does_not_mutate_results() {
        let dir = TempDir::new().unwrap();
        let before = results();
        let after = before.clone();
        render_charts(&after, dir.path()).unwrap();
        assert_eq!(before, after);
    }
}
