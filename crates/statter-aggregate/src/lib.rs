// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! statter-aggregate: per-target rollup of Bazel test results
//!
//! Records from any number of logs are folded into one [`AggregateResult`]
//! per target. Folding is order-insensitive, so records may arrive from
//! parallel readers in any order, and per-worker [`Aggregator`]s can be
//! merged at the end.
//!
//! # Example
//!
//! ```
//! use statter_aggregate::{Aggregator, Report, ReportOptions};
//! use statter_log::LinePatterns;
//!
//! let patterns = LinePatterns::new();
//! let mut aggregator = Aggregator::new();
//! for line in [
//!     "//pkg:test   PASSED in 1.0s",
//!     "//pkg:test   FLAKY, failed in 1 out of 2 in 13.5s",
//! ] {
//!     if let Ok(Some(record)) = patterns.parse_line(line) {
//!         aggregator.add(&record);
//!     }
//! }
//!
//! let result = aggregator.get("//pkg:test").unwrap();
//! assert_eq!(result.total, 3);
//!
//! let report = Report::build(aggregator.into_results(), &ReportOptions::default());
//! println!("{}", report.render_table());
//! ```

pub mod aggregate;
pub mod error;
pub mod report;

pub use aggregate::{AggregateResult, Aggregator, fold};
pub use error::AggregateError;
pub use report::{Report, ReportOptions, ReportRow, SortOrder};
