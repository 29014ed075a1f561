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

//! In-place update of the benchmark sections of a markdown document.
//!
//! Two sections are maintained:
//!
//! - `## Benchmark Results`: the heading, optional blank lines, and a table
//!   (header row, alignment row, data rows). Only a heading directly followed
//!   by a table counts as the section.
//! - `## Benchmark Charts`: everything from the heading up to the next level
//!   one or two heading, or the end of the document. `###` subheadings are
//!   part of the section.
//!
//! A section that is found is replaced; one that is missing is appended. The
//! sections are located with small line scanners whose output depends only on
//! the replaced text, so applying the same update twice gives the same
//! document.

use crate::error::{ReportError, Result};
use crate::reporters::ChartRef;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;
use tracing::info;

/// Heading of the results table section.
pub const RESULTS_HEADING: &str = "## Benchmark Results";

/// Heading of the charts section.
pub const CHARTS_HEADING: &str = "## Benchmark Charts";

/// Directory prefix used in chart links, relative to the document.
pub const CHART_LINK_DIR: &str = "charts";

/// A line of the document with its byte span, line terminator excluded.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

impl Line<'_> {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    fn is_heading(&self, heading: &str) -> bool {
        self.text.trim_end() == heading
    }

    fn is_table_row(&self) -> bool {
        self.text.trim_start().starts_with('|')
    }

    fn is_alignment_row(&self) -> bool {
        let text = self.text.trim();
        text.starts_with('|')
            && text.contains('-')
            && text.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
    }

    /// Level one or two ATX heading.
    fn is_top_level_heading(&self) -> bool {
        let hashes = self.text.chars().take_while(|&c| c == '#').count();
        let rest = &self.text[hashes..];
        (1..=2).contains(&hashes) && (rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t'))
    }
}

fn lines(doc: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    doc.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        let text = text.strip_suffix('\r').unwrap_or(text);
        Line {
            start,
            end: start + text.len(),
            text,
        }
    })
}

/// Scanner state for the results section.
#[derive(Debug, Clone, Copy)]
enum ResultsScan {
    BeforeSection,
    Heading { start: usize },
    TableHeader { start: usize },
    InTable { start: usize, end: usize },
}

/// Locates the results section: heading through the last table row.
///
/// The span ends before the terminator of the last table row.
fn find_results_section(doc: &str) -> Option<Range<usize>> {
    use ResultsScan::*;

    let mut state = BeforeSection;
    for line in lines(doc) {
        state = match state {
            InTable { start, end } => {
                if line.is_table_row() {
                    InTable {
                        start,
                        end: line.end,
                    }
                } else {
                    return Some(start..end);
                }
            }
            _ if line.is_heading(RESULTS_HEADING) => Heading { start: line.start },
            BeforeSection => BeforeSection,
            Heading { start } if line.is_blank() => Heading { start },
            Heading { start } if line.is_table_row() => TableHeader { start },
            Heading { .. } => BeforeSection,
            TableHeader { start } if line.is_alignment_row() => InTable {
                start,
                end: line.end,
            },
            TableHeader { .. } => BeforeSection,
        };
    }

    match state {
        InTable { start, end } => Some(start..end),
        _ => None,
    }
}

/// Scanner state for the charts section.
#[derive(Debug, Clone, Copy)]
enum ChartsScan {
    BeforeSection,
    InChartSection { start: usize },
}

/// Locates the charts section: heading up to the next top-level heading.
fn find_charts_section(doc: &str) -> Option<Range<usize>> {
    use ChartsScan::*;

    let mut state = BeforeSection;
    for line in lines(doc) {
        state = match state {
            BeforeSection if line.is_heading(CHARTS_HEADING) => InChartSection { start: line.start },
            BeforeSection => BeforeSection,
            InChartSection { start }
                if line.is_top_level_heading() && !line.is_heading(CHARTS_HEADING) =>
            {
                return Some(start..line.start);
            }
            InChartSection { start } => InChartSection { start },
        };
    }

    match state {
        InChartSection { start } => Some(start..doc.len()),
        BeforeSection => None,
    }
}

/// Builds the charts section, one subsection per chart.
///
/// Links use only the chart's file name under `charts/`, so the document
/// stays valid wherever the output root lives.
pub fn chart_section(charts: &[ChartRef]) -> String {
    let mut section = format!("{}\n\n", CHARTS_HEADING);
    for chart in charts {
        let title = chart.metric.title();
        section.push_str(&format!(
            "### {title}\n\n![{title}]({dir}/{file})\n\n",
            title = title,
            dir = CHART_LINK_DIR,
            file = chart.file_name()
        ));
    }
    section
}

/// Returns `doc` with the results and charts sections replaced or appended.
///
/// # Examples
///
/// ```
/// use cpioo_bench::document::apply_update;
///
/// let table = "| A |\n|---|\n| 1 |";
/// let once = apply_update("# Project\n", table, &[]);
/// assert!(once.contains("## Benchmark Results\n\n| A |\n|---|\n| 1 |"));
/// assert_eq!(apply_update(&once, table, &[]), once);
/// ```
pub fn apply_update(doc: &str, table: &str, charts: &[ChartRef]) -> String {
    let results_section = format!("{}\n\n{}", RESULTS_HEADING, table);

    let mut updated = match find_results_section(doc) {
        Some(range) => {
            let mut text = String::with_capacity(doc.len() + results_section.len());
            text.push_str(&doc[..range.start]);
            text.push_str(&results_section);
            text.push_str(&doc[range.end..]);
            text
        }
        None => format!("{}\n\n{}\n", doc, results_section),
    };

    let charts_section = chart_section(charts);
    match find_charts_section(&updated) {
        Some(range) => updated.replace_range(range, &charts_section),
        None => {
            updated.push_str("\n\n");
            updated.push_str(&charts_section);
        }
    }

    updated
}

/// Rewrites the benchmark sections of the document at `path`.
///
/// # Errors
///
/// Returns [`ReportError::DocumentNotFound`] if the document does not exist;
/// it is never created. I/O failures are reported as [`ReportError::Io`].
pub fn update_document(path: &Path, table: &str, charts: &[ChartRef]) -> Result<()> {
    if !path.is_file() {
        return Err(ReportError::DocumentNotFound {
            path: path.to_path_buf(),
        });
    }

    let current = fs::read_to_string(path).map_err(|e| ReportError::io_error(path, e))?;
    let updated = apply_update(&current, table, charts);

    let file = File::create(path).map_err(|e| ReportError::io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(updated.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ReportError::io_error(path, e))?;

    info!(
        "Updated {} with benchmark results and charts",
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metric;
    use tempfile::TempDir;

    const TABLE: &str = "| Depth/Ticks | X |\n|-------------|---|\n| 1/10 | 5 |";

    fn charts() -> Vec<ChartRef> {
        vec![
            ChartRef::new(Metric::TickRate, "/abs/out/charts/tick_rate_comparison.svg"),
            ChartRef::new(Metric::VisitRate, "/abs/out/charts/visit_rate_comparison.svg"),
        ]
    }

    #[test]
    fn test_appends_both_sections() {
        let updated = apply_update("# Project\n\nIntro.\n", TABLE, &charts());
        assert_eq!(
            updated,
            "# Project\n\nIntro.\n\n\n## Benchmark Results\n\n| Depth/Ticks | X |\n|-------------|---|\n| 1/10 | 5 |\n\
             \n\n## Benchmark Charts\n\n\
             ### Tick Rate Comparison\n\n![Tick Rate Comparison](charts/tick_rate_comparison.svg)\n\n\
             ### Visit Rate Comparison\n\n![Visit Rate Comparison](charts/visit_rate_comparison.svg)\n\n"
        );
    }

    #[test]
    fn test_replaces_existing_table_in_place() {
        let doc = "# Project\n\n## Benchmark Results\n\n| Old | Cols |\n|-----|------|\n| a | b |\n| c | d |\n\n## License\n\nMIT\n";
        let updated = apply_update(doc, TABLE, &[]);

        assert!(updated.starts_with(&format!(
            "# Project\n\n## Benchmark Results\n\n{}\n\n## License\n\nMIT\n",
            TABLE
        )));
        assert!(!updated.contains("| Old | Cols |"));
        assert_eq!(updated.matches(RESULTS_HEADING).count(), 1);
    }

    #[test]
    fn test_heading_without_table_is_not_a_section() {
        let doc = "## Benchmark Results\n\nComing soon.\n";
        let updated = apply_update(doc, TABLE, &[]);
        assert!(updated.starts_with("## Benchmark Results\n\nComing soon.\n"));
        assert_eq!(updated.matches(RESULTS_HEADING).count(), 2);
        assert_eq!(apply_update(&updated, TABLE, &[]), updated);
    }

    #[test]
    fn test_charts_section_keeps_following_sections() {
        let doc = "# P\n\n## Benchmark Charts\n\n### Old Chart\n\n![x](charts/old.svg)\n\n## Contributing\n\nPRs welcome.\n";
        let updated = apply_update(doc, TABLE, &charts());

        assert!(!updated.contains("old.svg"));
        assert!(updated.contains(
            "![Visit Rate Comparison](charts/visit_rate_comparison.svg)\n\n## Contributing\n\nPRs welcome.\n"
        ));
        assert_eq!(updated.matches(CHARTS_HEADING).count(), 1);
    }

    #[test]
    fn test_duplicate_chart_headings_are_absorbed() {
        let doc = "## Benchmark Charts\n\na\n\n## Benchmark Charts\n\nb\n";
        let updated = apply_update(doc, TABLE, &charts());
        assert_eq!(updated.matches(CHARTS_HEADING).count(), 1);
    }

    #[test]
    fn test_update_is_idempotent() {
        let docs = [
            "",
            "# Project\n",
            "# Project\n\n## Benchmark Charts\n\nold\n",
            "## Benchmark Results\n| a |\n|---|\n\n# Other\n",
            "# P\r\n\r\n## Benchmark Results\r\n\r\n| a |\r\n|---|\r\n| 1 |\r\n\r\n## End\r\n",
        ];
        for doc in docs {
            let once = apply_update(doc, TABLE, &charts());
            let twice = apply_update(&once, TABLE, &charts());
            assert_eq!(once, twice, "not idempotent for {:?}", doc);
        }
    }

    #[test]
    fn test_top_level_heading_detection() {
        let line = |text| Line {
            start: 0,
            end: 0,
            text,
        };
        assert!(line("# Title").is_top_level_heading());
        assert!(line("## Section").is_top_level_heading());
        assert!(!line("### Sub").is_top_level_heading());
        assert!(!line("#hashtag").is_top_level_heading());
        assert!(line("|:---|---:|").is_alignment_row());
        assert!(!line("| a | b |").is_alignment_row());
    }

    #[test]
    fn test_update_document_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Project\n").unwrap();

        update_document(&path, TABLE, &charts()).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert!(first.contains(TABLE));

        update_document(&path, TABLE, &charts()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn test_update_document_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.md");

        let err = update_document(&path, TABLE, &[]).unwrap_err();
        assert_eq!(err, ReportError::DocumentNotFound { path: path.clone() });
        assert!(!path.exists());
    }
}
