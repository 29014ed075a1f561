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

//! Error types for benchmark report generation.
//!
//! Individual benchmark entries that fail to match the expected grammar are
//! never errors; they are skipped by the parsers. The variants here cover the
//! failures that abort a run or that the caller must be told about.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that can occur while building a benchmark report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReportError {
    /// The structured (JSON) input could not be parsed as a benchmark container.
    #[error("Invalid benchmark JSON: {0}")]
    InvalidJson(String),

    /// I/O operation failed (file read, write, or directory creation).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The document to update does not exist.
    ///
    /// The document is never created from scratch; a missing file usually
    /// means the output root points at the wrong directory.
    #[error("Document not found at '{path}'")]
    DocumentNotFound {
        /// The expected document path
        path: PathBuf,
    },

    /// Input exceeds the configured size limit.
    #[error("Input '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    InputTooLarge {
        /// Input name (file path or `<stdin>`)
        path: String,
        /// The actual input size in bytes
        actual: u64,
        /// The configured limit in bytes
        max: u64,
    },

    /// Chart drawing backend failure.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Invalid configuration parameter
    #[error("Invalid configuration parameter '{parameter}': {reason}")]
    InvalidConfig {
        /// Parameter name
        parameter: String,
        /// Reason for invalidity
        reason: String,
    },
}

impl ReportError {
    /// Create an I/O error with path context.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cpioo_bench::error::ReportError;
    /// use std::fs;
    ///
    /// let result = fs::read_to_string("bench.json")
    ///     .map_err(|e| ReportError::io_error("bench.json", e));
    /// ```
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a chart rendering error from any displayable backend error.
    pub fn chart(source: impl std::fmt::Display) -> Self {
        Self::Chart(source.to_string())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(source: serde_json::Error) -> Self {
        Self::InvalidJson(source.to_string())
    }
}
