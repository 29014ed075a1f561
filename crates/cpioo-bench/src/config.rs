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

//! Report configuration.
//!
//! Output locations are explicit: charts go to `<output_root>/charts` and the
//! document defaults to `<output_root>/README.md`. Nothing is derived from the
//! location of the running executable.

use crate::error::{ReportError, Result};
use std::path::PathBuf;

/// Directory, relative to the output root, that receives chart files.
pub const CHARTS_DIR: &str = "charts";

/// Default document name, relative to the output root.
pub const DEFAULT_DOCUMENT: &str = "README.md";

/// Default maximum input size (64 MiB).
pub const DEFAULT_MAX_INPUT_SIZE: u64 = 64 * 1024 * 1024;

/// Environment variable overriding [`DEFAULT_MAX_INPUT_SIZE`], in bytes.
pub const MAX_INPUT_SIZE_ENV: &str = "CPIOO_BENCH_MAX_INPUT_SIZE";

/// How the benchmark input should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputFormat {
    /// Decide from the input itself.
    #[default]
    Auto,
    /// Structured JSON records.
    Json,
    /// Line-oriented console output.
    Text,
}

impl InputFormat {
    /// Returns the format as a string.
    pub fn as_str(&self) -> &str {
        match self {
            InputFormat::Auto => "auto",
            InputFormat::Json => "json",
            InputFormat::Text => "text",
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "json" => Ok(InputFormat::Json),
            "text" | "console" => Ok(InputFormat::Text),
            other => Err(ReportError::invalid_config(
                "input_format",
                format!("expected auto, json or text, got '{}'", other),
            )),
        }
    }
}

/// Configuration for one report run.
///
/// # Example
///
/// ```no_run
/// use cpioo_bench::config::{InputFormat, ReportConfig};
///
/// let config = ReportConfig::default()
///     .with_output_root("/work/cpioo")
///     .with_input_format(InputFormat::Json)
///     .without_document_update();
/// ```
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Root directory for generated files.
    pub output_root: PathBuf,
    /// Document to update; `None` means `<output_root>/README.md`.
    pub document_path: Option<PathBuf>,
    /// Input interpretation.
    pub input_format: InputFormat,
    /// Whether to render SVG charts.
    pub render_charts: bool,
    /// Whether to rewrite the benchmark sections of the document.
    pub update_document: bool,
    /// Inputs larger than this are rejected.
    pub max_input_size: u64,
}

impl ReportConfig {
    /// Creates a configuration rooted at `output_root`.
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            document_path: None,
            input_format: InputFormat::Auto,
            render_charts: true,
            update_document: true,
            max_input_size: max_input_size_from_env(),
        }
    }

    /// Sets the output root.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Sets an explicit document path.
    pub fn with_document_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.document_path = Some(path.into());
        self
    }

    /// Sets the input format.
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input_format = format;
        self
    }

    /// Disables chart rendering.
    pub fn without_charts(mut self) -> Self {
        self.render_charts = false;
        self
    }

    /// Disables the document update.
    pub fn without_document_update(mut self) -> Self {
        self.update_document = false;
        self
    }

    /// Sets the maximum accepted input size in bytes.
    pub fn with_max_input_size(mut self, bytes: u64) -> Self {
        self.max_input_size = bytes;
        self
    }

    /// Directory receiving chart files.
    pub fn charts_dir(&self) -> PathBuf {
        self.output_root.join(CHARTS_DIR)
    }

    /// Document that receives the table and chart sections.
    pub fn document_path(&self) -> PathBuf {
        self.document_path
            .clone()
            .unwrap_or_else(|| self.output_root.join(DEFAULT_DOCUMENT))
    }

    /// Checks the configuration for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        if self.output_root.as_os_str().is_empty() {
            return Err(ReportError::invalid_config(
                "output_root",
                "must not be empty",
            ));
        }
        if self.max_input_size == 0 {
            return Err(ReportError::invalid_config(
                "max_input_size",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Rejects an input whose size exceeds the configured limit.
    pub fn check_input_size(&self, name: &str, size: u64) -> Result<()> {
        if size > self.max_input_size {
            return Err(ReportError::InputTooLarge {
                path: name.to_string(),
                actual: size,
                max: self.max_input_size,
            });
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

fn max_input_size_from_env() -> u64 {
    std::env::var(MAX_INPUT_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_INPUT_SIZE)
}
