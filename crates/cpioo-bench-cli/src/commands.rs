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

//! Report generation command.

use cpioo_bench::config::ReportConfig;
use cpioo_bench::error::{ReportError, Result};
use cpioo_bench::reporters::{self, ChartRef};
use cpioo_bench::{document, parser};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::warn;

/// Name used for standard input in messages.
pub const STDIN_NAME: &str = "<stdin>";

/// Reads the whole input, enforcing the configured size limit.
pub fn read_input(path: Option<&Path>, config: &ReportConfig) -> Result<String> {
    match path {
        Some(path) => {
            let metadata = fs::metadata(path).map_err(|e| ReportError::io_error(path, e))?;
            config.check_input_size(&path.display().to_string(), metadata.len())?;
            fs::read_to_string(path).map_err(|e| ReportError::io_error(path, e))
        }
        None => read_limited(io::stdin().lock(), STDIN_NAME, config),
    }
}

/// Reads a stream of unknown length, holding at most one byte past the limit.
pub fn read_limited<R: Read>(reader: R, name: &str, config: &ReportConfig) -> Result<String> {
    let mut bytes = Vec::new();
    reader
        .take(config.max_input_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| ReportError::io_error(name, e))?;
    // checked before decoding: the cut may split a multi-byte character
    config.check_input_size(name, bytes.len() as u64)?;
    String::from_utf8(bytes)
        .map_err(|e| ReportError::io_error(name, io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Parses the input, prints the table, writes charts and updates the document.
///
/// The table and charts are produced before the document is touched, so they
/// survive a missing document; the missing document is still returned as an
/// error.
pub fn generate(input: Option<&Path>, config: &ReportConfig) -> Result<()> {
    config.validate()?;

    let text = read_input(input, config)?;
    let results = parser::parse_benchmarks(&text, config.input_format)?;
    let table = reporters::render_table(&results);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", table)
        .and_then(|_| stdout.flush())
        .map_err(|e| ReportError::io_error("<stdout>", e))?;

    let charts_dir = config.charts_dir();
    if config.render_charts {
        reporters::render_charts(&results, &charts_dir)?;
    }

    if config.update_document {
        let charts: Vec<ChartRef> = results
            .form()
            .metrics()
            .iter()
            .map(|&metric| ChartRef::in_dir(metric, &charts_dir))
            .collect();
        let path = config.document_path();
        if let Err(e) = document::update_document(&path, &table, &charts) {
            if matches!(e, ReportError::DocumentNotFound { .. }) {
                warn!("README file not found at {}", path.display());
            }
            return Err(e);
        }
    }

    Ok(())
}
