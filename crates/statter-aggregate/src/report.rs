// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report building and rendering
//!
//! A report is a sorted, filtered view over the aggregates. By default it
//! lists only targets that had at least one failed attempt.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::aggregate::AggregateResult;
use crate::error::AggregateError;

// ============================================================================
// Options
// ============================================================================

/// Order in which report rows are listed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Target name, ascending
    #[default]
    Name,
    /// Lowest success ratio first
    Failures,
    /// Highest success ratio first
    Successes,
    /// Longest average duration first
    Longest,
    /// Shortest average duration first
    Shortest,
}

impl SortOrder {
    /// All sort orders
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Failures,
        Self::Successes,
        Self::Longest,
        Self::Shortest,
    ];

    /// The name used on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Failures => "failures",
            Self::Successes => "successes",
            Self::Longest => "longest",
            Self::Shortest => "shortest",
        }
    }

    fn compare(self, a: &AggregateResult, b: &AggregateResult) -> Ordering {
        let ratio = |r: &AggregateResult| r.success_ratio().unwrap_or(0.0);
        let average = |r: &AggregateResult| r.average_duration().unwrap_or(Duration::ZERO);

        let primary = match self {
            Self::Name => Ordering::Equal,
            Self::Failures => ratio(a).total_cmp(&ratio(b)),
            Self::Successes => ratio(b).total_cmp(&ratio(a)),
            Self::Longest => average(b).cmp(&average(a)),
            Self::Shortest => average(a).cmp(&average(b)),
        };
        primary.then_with(|| a.target_name.cmp(&b.target_name))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AggregateError::UnknownSortOrder {
                value: s.to_string(),
            })
    }
}

/// Options controlling which targets a report lists and in what order
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Row order
    pub sort: SortOrder,
    /// Also list targets whose every attempt succeeded
    pub include_successful: bool,
}

// ============================================================================
// Report
// ============================================================================

/// One line of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Target label
    pub target: String,
    /// Attempts counted
    pub total: u64,
    /// Successful attempts
    pub successes: u64,
    /// Failed attempts
    pub failures: u64,
    /// Success percentage, absent when nothing was counted
    pub success_ratio: Option<f64>,
    /// Mean duration per attempt, absent when nothing was counted
    #[serde(rename = "average_duration_ms", serialize_with = "serialize_millis")]
    pub average_duration: Option<Duration>,
}

impl From<&AggregateResult> for ReportRow {
    fn from(aggregate: &AggregateResult) -> Self {
        Self {
            target: aggregate.target_name.clone(),
            total: aggregate.total,
            successes: aggregate.successes,
            failures: aggregate.failures,
            success_ratio: aggregate.success_ratio(),
            average_duration: aggregate.average_duration(),
        }
    }
}

fn serialize_millis<S: Serializer>(
    duration: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match duration {
        Some(d) => serializer.serialize_some(&u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        None => serializer.serialize_none(),
    }
}

/// A sorted, filtered report over target aggregates
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    rows: Vec<ReportRow>,
    hidden_successful: usize,
}

impl Report {
    /// Build a report from aggregates
    #[must_use]
    pub fn build(
        results: impl IntoIterator<Item = AggregateResult>,
        options: &ReportOptions,
    ) -> Self {
        let mut shown = Vec::new();
        let mut hidden_successful = 0;

        for aggregate in results {
            if options.include_successful || !aggregate.all_successes() {
                shown.push(aggregate);
            } else {
                hidden_successful += 1;
            }
        }

        shown.sort_by(|a, b| options.sort.compare(a, b));

        Self {
            rows: shown.iter().map(ReportRow::from).collect(),
            hidden_successful,
        }
    }

    /// Rows in display order
    #[must_use]
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// Number of fully-successful targets left out of the report
    #[must_use]
    pub fn hidden_successful(&self) -> usize {
        self.hidden_successful
    }

    /// Whether the report has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as a fixed-width text table, one target per line
    ///
    /// `<target> <ratio>% success in <total> tries <average>`, with the
    /// target and tries columns padded to their widest value.
    #[must_use]
    pub fn render_table(&self) -> String {
        let name_width = self.rows.iter().map(|r| r.target.len()).max().unwrap_or(0);
        let tries_width = self
            .rows
            .iter()
            .map(|r| r.total.to_string().len())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for row in &self.rows {
            let ratio = row
                .success_ratio
                .map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}%"));
            let average = row
                .average_duration
                .map_or_else(|| "n/a".to_string(), |d| format!("{d:?}"));

            out.push_str(&format!(
                "{:<name_width$} {ratio} success in {:>tries_width$} tries {average}\n",
                row.target, row.total,
            ));
        }
        out
    }

    /// Render as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns `AggregateError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String, AggregateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
