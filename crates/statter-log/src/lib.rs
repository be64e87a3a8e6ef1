// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! statter-log: Bazel test log parsing for bazel-statter
//!
//! This library crate classifies the per-target summary lines that
//! `bazel test` prints at the end of a run and turns them into
//! [`TargetRecord`]s for aggregation.
//!
//! # Example
//!
//! ```
//! use statter_log::{LinePatterns, TestStatus, parse_log};
//!
//! let patterns = LinePatterns::new();
//!
//! // Classify a single line
//! let record = patterns
//!     .parse_line("//pkg:test   FLAKY, failed in 1 out of 2 in 13.5s")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(record.status, TestStatus::Flaky);
//!
//! // Or parse a whole log, skipping noise and collecting malformed lines
//! let parsed = parse_log(&patterns, "INFO: Build completed\n//pkg:test   PASSED in 0.3s\n");
//! assert_eq!(parsed.records.len(), 1);
//! ```

pub mod error;
pub mod log;
pub mod parser;
pub mod record;

pub use error::LogError;
pub use log::{LineError, LogStream, ParsedLog, parse_log};
pub use parser::{LinePatterns, LineShape, parse_duration};
pub use record::{TargetRecord, TestStatus};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::LogError;
    pub use crate::log::{LogStream, parse_log};
    pub use crate::parser::LinePatterns;
    pub use crate::record::{TargetRecord, TestStatus};
}
