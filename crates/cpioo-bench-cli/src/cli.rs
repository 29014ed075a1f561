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

//! Command-line arguments.

use crate::commands;
use clap::{Parser, ValueEnum};
use cpioo_bench::config::{InputFormat, ReportConfig};
use cpioo_bench::Result;
use std::path::PathBuf;

/// Input format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Detect from the input (JSON if it starts with `{` or `[`)
    Auto,
    /// Google Benchmark JSON report
    Json,
    /// Google Benchmark console output
    Text,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Auto => InputFormat::Auto,
            FormatArg::Json => InputFormat::Json,
            FormatArg::Text => InputFormat::Text,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "cpioo-bench-report")]
#[command(author, version, about = "Compare SharedPtr and ManagedEntity simulation benchmarks", long_about = None)]
pub struct Cli {
    /// Benchmark output file (reads stdin when omitted or `-`)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Input format
    #[arg(short, long, value_enum, default_value = "auto")]
    pub format: FormatArg,

    /// Directory receiving `charts/` and containing the README
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_root: PathBuf,

    /// Document to update (defaults to `<output-root>/README.md`)
    #[arg(short, long, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// Do not render SVG charts
    #[arg(long)]
    pub no_charts: bool,

    /// Do not update the document
    #[arg(long)]
    pub no_update: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the report configuration from the arguments.
    pub fn config(&self) -> ReportConfig {
        let mut config = ReportConfig::new(&self.output_root).with_input_format(self.format.into());
        if let Some(document) = &self.document {
            config = config.with_document_path(document);
        }
        if self.no_charts {
            config = config.without_charts();
        }
        if self.no_update {
            config = config.without_document_update();
        }
        config
    }

    /// The input file, or `None` for standard input.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|path| path.as_os_str() != "-")
    }

    /// Runs the report generation.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the input cannot be read or parsed, a chart cannot be
    /// written, or the document is missing.
    pub fn execute(self) -> Result<()> {
        let config = self.config();
        commands::generate(self.input_path().map(PathBuf::as_path), &config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["cpioo-bench-report"]);
        let config = cli.config();
        assert_eq!(config.input_format, InputFormat::Auto);
        assert_eq!(config.document_path(), PathBuf::from("./README.md"));
        assert!(config.render_charts);
        assert!(config.update_document);
        assert!(cli.input_path().is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "cpioo-bench-report",
            "-",
            "--format",
            "text",
            "--output-root",
            "/work",
            "--document",
            "/docs/BENCH.md",
            "--no-charts",
            "--no-update",
        ]);
        assert!(cli.input_path().is_none());

        let config = cli.config();
        assert_eq!(config.input_format, InputFormat::Text);
        assert_eq!(config.charts_dir(), PathBuf::from("/work/charts"));
        assert_eq!(config.document_path(), PathBuf::from("/docs/BENCH.md"));
        assert!(!config.render_charts);
        assert!(!config.update_document);
    }
}
