// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Bazel summary line classification
//!
//! At the end of a `bazel test` run every test target gets one summary line:
//!
//! ```text
//! //admin/server:go_default_test            (cached) PASSED in 0.3s
//! //social-graph/worker:go_default_test              PASSED in 53.8s
//! //summons/integration:go_default_test              NO STATUS
//! //autobahn/stream:go_default_test   (1/2 cached) FLAKY, failed in 1 out of 2 in 14.9s
//! //autobahn/stream:go_default_test                  FLAKY, failed in 1 out of 2 in 13.5s
//! //payments/ledger:go_default_test                  FAILED in 3 out of 3 in 20.1s
//! //search/indexer:go_default_test                   TIMEOUT in 300.0s
//! ```
//!
//! [`LinePatterns`] holds one compiled pattern per line shape, in the order
//! they must be tried. The first shape that matches decides the record.

use std::time::Duration;

use regex::{Captures, Regex};

use crate::error::LogError;
use crate::record::{TargetRecord, TestStatus};

// ============================================================================
// Line Shapes
// ============================================================================

/// The recognized summary line shapes, in match precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineShape {
    /// `<target>  (cached) PASSED in <secs>s`
    CachedPass,
    /// `<target>  PASSED|FAILED in <secs>s`
    Uncached,
    /// `<target>  NO STATUS`
    NoStatus,
    /// `<target>  (<n>/<m> cached) FLAKY, failed in <f> out of <t> in <secs>s`
    FlakyCached,
    /// `<target>  FLAKY, failed in <f> out of <t> in <secs>s`
    Flaky,
    /// `<target>  FAILED in <f> out of <t> in <secs>s`
    FailedMultiple,
    /// `<target>  TIMEOUT in <secs>s`
    Timeout,
}

const TARGET: &str = r"^\s*(?P<target>//\S+)\s+";
const SECONDS: &str = r"in (?P<secs>\S+?)s\s*$";
const ATTEMPTS: &str = r"in (?P<failed>\S+) out of (?P<attempts>\S+) ";

impl LineShape {
    /// All shapes, in the order they are tried
    pub const ALL: [Self; 7] = [
        Self::CachedPass,
        Self::Uncached,
        Self::NoStatus,
        Self::FlakyCached,
        Self::Flaky,
        Self::FailedMultiple,
        Self::Timeout,
    ];

    fn pattern(self) -> String {
        match self {
            Self::CachedPass => format!(r"{TARGET}\(cached\) PASSED {SECONDS}"),
            Self::Uncached => format!(r"{TARGET}(?P<status>PASSED|FAILED) {SECONDS}"),
            Self::NoStatus => format!(r"{TARGET}NO STATUS\s*$"),
            Self::FlakyCached => format!(
                r"{TARGET}\((?P<cached>[^/\s]+)/(?P<cached_of>[^)\s]+) cached\) FLAKY, failed {ATTEMPTS}{SECONDS}"
            ),
            Self::Flaky => format!(r"{TARGET}FLAKY, failed {ATTEMPTS}{SECONDS}"),
            Self::FailedMultiple => format!(r"{TARGET}FAILED {ATTEMPTS}{SECONDS}"),
            Self::Timeout => format!(r"{TARGET}TIMEOUT {SECONDS}"),
        }
    }

    /// Build a record from the captures of this shape's pattern
    fn extract(self, caps: &Captures<'_>) -> Result<TargetRecord, LogError> {
        let name = caps["target"].trim();

        match self {
            Self::CachedPass => {
                let duration = parse_duration(&caps["secs"])?;
                Ok(TargetRecord::passed(name, duration).cached())
            }
            Self::Uncached => {
                let duration = parse_duration(&caps["secs"])?;
                if &caps["status"] == "PASSED" {
                    Ok(TargetRecord::passed(name, duration))
                } else {
                    Ok(TargetRecord::failed(name, duration))
                }
            }
            Self::NoStatus => Ok(TargetRecord::no_status(name)),
            Self::FlakyCached => {
                let cached_times = parse_count("cached", &caps["cached"])?;
                let cached_of = parse_count("cached_of", &caps["cached_of"])?;
                if cached_times > cached_of {
                    return Err(LogError::malformed(
                        "cached",
                        &caps["cached"],
                        format!("exceeds total of {cached_of}"),
                    ));
                }
                let mut record = attempts_record(name, TestStatus::Flaky, caps)?;
                record.cached_times = cached_times;
                record.cached = cached_times > 0 && cached_times == cached_of;
                Ok(record)
            }
            Self::Flaky => attempts_record(name, TestStatus::Flaky, caps),
            Self::FailedMultiple => attempts_record(name, TestStatus::Failed, caps),
            Self::Timeout => {
                let duration = parse_duration(&caps["secs"])?;
                let mut record = TargetRecord::failed(name, duration);
                record.timed_out = true;
                Ok(record)
            }
        }
    }
}

fn attempts_record(
    name: &str,
    status: TestStatus,
    caps: &Captures<'_>,
) -> Result<TargetRecord, LogError> {
    let failed = parse_count("failed", &caps["failed"])?;
    let attempts = parse_count("attempts", &caps["attempts"])?;
    let duration = parse_duration(&caps["secs"])?;

    if status == TestStatus::Failed && failed == 0 {
        return Err(LogError::malformed(
            "failed",
            &caps["failed"],
            "a FAILED target must fail at least once",
        ));
    }

    TargetRecord::with_attempts(name, status, failed, attempts, duration).ok_or_else(|| {
        LogError::malformed(
            "failed",
            &caps["failed"],
            format!("exceeds attempt count of {attempts}"),
        )
    })
}

// ============================================================================
// Field Parsing
// ============================================================================

/// Parse a Bazel seconds field (e.g. `"13.5"`) into a duration
///
/// The value is rounded to the nearest millisecond.
///
/// # Errors
///
/// Returns `LogError::MalformedField` if the text is not a finite,
/// non-negative number.
pub fn parse_duration(secs: &str) -> Result<Duration, LogError> {
    let value: f64 = secs
        .parse()
        .map_err(|e| LogError::malformed("duration", secs, e))?;

    if !value.is_finite() || value < 0.0 {
        return Err(LogError::malformed(
            "duration",
            secs,
            "expected a finite, non-negative number of seconds",
        ));
    }

    Ok(Duration::from_millis((value * 1000.0).round() as u64))
}

fn parse_count(field: &'static str, value: &str) -> Result<u32, LogError> {
    value
        .parse()
        .map_err(|e| LogError::malformed(field, value, e))
}

// ============================================================================
// Pattern Set
// ============================================================================

/// The compiled, ordered set of line shape patterns
///
/// Build it once and share it by reference; it holds no mutable state and
/// is safe to use from any number of threads.
#[derive(Debug, Clone)]
pub struct LinePatterns {
    shapes: Vec<(LineShape, Regex)>,
}

impl LinePatterns {
    /// Compile all line shape patterns
    #[must_use]
    pub fn new() -> Self {
        let shapes = LineShape::ALL
            .into_iter()
            .map(|shape| {
                let regex = Regex::new(&shape.pattern()).expect("line shape patterns are valid");
                (shape, regex)
            })
            .collect();
        Self { shapes }
    }

    /// Classify a single log line
    ///
    /// Returns `Ok(None)` when no shape matches, so callers can skip log
    /// noise without treating it as an error.
    ///
    /// # Errors
    ///
    /// Returns `LogError::MalformedField` if a shape matches but one of its
    /// numeric fields cannot be parsed.
    pub fn parse_line(&self, line: &str) -> Result<Option<TargetRecord>, LogError> {
        if !line.trim_start().starts_with("//") {
            return Ok(None);
        }

        for (shape, regex) in &self.shapes {
            if let Some(caps) = regex.captures(line) {
                return shape.extract(&caps).map(Some);
            }
        }

        Ok(None)
    }

    /// Return the first shape matching `line`, without extracting fields
    #[must_use]
    pub fn classify(&self, line: &str) -> Option<LineShape> {
        self.shapes
            .iter()
            .find(|(_, regex)| regex.is_match(line))
            .map(|(shape, _)| *shape)
    }
}

impl Default for LinePatterns {
    fn default() -> Self {
        Self::new()
    }
}
