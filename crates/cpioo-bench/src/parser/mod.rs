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

//! Benchmark output parsers.
//!
//! Two output shapes are accepted, each with its own grammar:
//!
//! - [`json`]: the structured report (`--benchmark_format=json`), a
//!   `benchmarks` list whose entries carry `Tick_Rate`, `Visit_Rate` and
//!   `Objects_Creation_Rate` counters.
//! - [`text`]: the console table, one benchmark per line with `Tick_Rate` and
//!   `Visit_Rate` printed as scaled rates.
//!
//! Both produce a [`ResultSet`] tagged with the form it came from. Entries
//! that do not match the grammar are skipped; only an unreadable JSON
//! container is an error.

pub mod json;
pub mod text;

use crate::config::InputFormat;
use crate::error::Result;
use crate::model::{ResultSet, SourceForm};
use tracing::debug;

/// Unicode byte order mark some tools write at the start of UTF-8 files.
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Drops a leading byte order mark, which `str::trim_start` keeps.
pub(crate) fn strip_bom(input: &str) -> &str {
    input.strip_prefix(BYTE_ORDER_MARK).unwrap_or(input)
}

/// Picks the input form from the content.
///
/// Anything that opens like a JSON value (`{` or `[`) is treated as a JSON
/// report, so a malformed report fails loudly instead of parsing as an empty
/// console run.
pub fn detect_form(input: &str) -> SourceForm {
    match strip_bom(input).trim_start().as_bytes().first() {
        Some(b'{' | b'[') => SourceForm::Json,
        _ => SourceForm::Text,
    }
}

/// Resolves the configured input format against the actual input.
pub fn resolve_form(format: InputFormat, input: &str) -> SourceForm {
    match format {
        InputFormat::Json => SourceForm::Json,
        InputFormat::Text => SourceForm::Text,
        InputFormat::Auto => detect_form(input),
    }
}

/// Parses benchmark output in the given form.
pub fn parse_as(form: SourceForm, input: &str) -> Result<ResultSet> {
    match form {
        SourceForm::Json => json::parse(input),
        SourceForm::Text => Ok(text::parse(input)),
    }
}

/// Parses benchmark output according to the configured format.
///
/// # Errors
///
/// Returns [`crate::ReportError::InvalidJson`] if the input is treated as JSON
/// and is not a benchmark container.
pub fn parse_benchmarks(input: &str, format: InputFormat) -> Result<ResultSet> {
    let form = resolve_form(format, input);
    debug!(format = format.as_str(), ?form, "parsing benchmark output");
    parse_as(form, input)
}
