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

//! Rate formatting and relative change.
//!
//! Rates are shown scaled to `k` (thousands) or `M` (millions) with two
//! decimals. Percent change accepts either raw numbers or strings already
//! carrying one of those suffixes, so the text benchmark output can be
//! compared without re-parsing it into a separate representation.

use std::fmt;

/// Threshold above which a rate is shown in millions.
pub const MEGA: f64 = 1_000_000.0;

/// Threshold above which a rate is shown in thousands.
pub const KILO: f64 = 1_000.0;

/// Returned by [`percent_change`] when no meaningful change exists.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a rate with a `k`/`M` suffix and two decimals.
///
/// Negative values keep their sign and are scaled by magnitude.
///
/// # Examples
///
/// ```
/// use cpioo_bench::metrics::format_value;
///
/// assert_eq!(format_value(1_500_000.0), "1.50M");
/// assert_eq!(format_value(999_999.0), "1000.00k");
/// assert_eq!(format_value(500.0), "500.00");
/// ```
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if magnitude >= MEGA {
        format!("{}{:.2}M", sign, magnitude / MEGA)
    } else if magnitude >= KILO {
        format!("{}{:.2}k", sign, magnitude / KILO)
    } else {
        let text = format!("{:.2}", magnitude);
        // values that round to zero print unsigned
        if text == "0.00" {
            text
        } else {
            format!("{}{}", sign, text)
        }
    }
}

/// Format a value for a chart axis tick.
///
/// Identical to [`format_value`] except the thousands suffix is upper case.
pub fn format_axis_value(value: f64) -> String {
    format_value(value).replace('k', "K")
}

/// A measurement as it appears in benchmark output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure<'a> {
    /// Plain number of operations per second.
    Raw(f64),
    /// Number with an optional `k` or `M` suffix, e.g. `"1.2M"`.
    Scaled(&'a str),
}

impl Measure<'_> {
    /// Resolve the measure to a plain number.
    ///
    /// Returns `None` for a scaled string that is not a number and for values
    /// that are not finite.
    pub fn to_f64(self) -> Option<f64> {
        match self {
            Measure::Raw(value) => Some(value).filter(|v| v.is_finite()),
            Measure::Scaled(text) => parse_scaled(text),
        }
    }
}

impl From<f64> for Measure<'_> {
    fn from(value: f64) -> Self {
        Measure::Raw(value)
    }
}

impl<'a> From<&'a str> for Measure<'a> {
    fn from(text: &'a str) -> Self {
        Measure::Scaled(text)
    }
}

impl fmt::Display for Measure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Raw(value) => f.write_str(&format_value(*value)),
            Measure::Scaled(text) => f.write_str(text),
        }
    }
}

/// Parse a number with an optional `k` (x1e3) or `M` (x1e6) suffix.
///
/// # Examples
///
/// ```
/// use cpioo_bench::metrics::parse_scaled;
///
/// assert_eq!(parse_scaled("500k"), Some(500_000.0));
/// assert_eq!(parse_scaled("1.2M"), Some(1_200_000.0));
/// assert_eq!(parse_scaled("42"), Some(42.0));
/// assert_eq!(parse_scaled("fast"), None);
/// assert_eq!(parse_scaled("NaN"), None);
/// ```
pub fn parse_scaled(text: &str) -> Option<f64> {
    let text = text.trim();
    let (number, factor) = if let Some(stripped) = text.strip_suffix('k') {
        (stripped, KILO)
    } else if let Some(stripped) = text.strip_suffix('M') {
        (stripped, MEGA)
    } else {
        (text, 1.0)
    };

    number
        .parse::<f64>()
        .ok()
        .map(|n| n * factor)
        .filter(|n| n.is_finite())
}

/// Signed relative change of `new` against the `old` baseline.
///
/// The result has two decimals and a `%` sign; strictly positive changes get
/// a leading `+`. A zero baseline, or an input that is not a number, yields
/// `"N/A"`.
///
/// # Examples
///
/// ```
/// use cpioo_bench::metrics::percent_change;
///
/// assert_eq!(percent_change(100.0, 150.0), "+50.00%");
/// assert_eq!(percent_change("1.00k", "500.00"), "-50.00%");
/// assert_eq!(percent_change(0.0, 100.0), "N/A");
/// ```
pub fn percent_change<'a, 'b>(old: impl Into<Measure<'a>>, new: impl Into<Measure<'b>>) -> String {
    let (Some(old), Some(new)) = (old.into().to_f64(), new.into().to_f64()) else {
        return NOT_AVAILABLE.to_string();
    };

    if old == 0.0 {
        return NOT_AVAILABLE.to_string();
    }

    let change = (new - old) / old * 100.0;
    if !change.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if change > 0.0 {
        format!("+{:.2}%", change)
    } else if change == 0.0 {
        // -0.0 would otherwise print as "-0.00%"
        "0.00%".to_string()
    } else {
        format!("{:.2}%", change)
    }
}
