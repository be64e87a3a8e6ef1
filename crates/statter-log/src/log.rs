// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Whole-log parsing
//!
//! A Bazel log mixes target summary lines with build progress, warnings and
//! test output. [`parse_log`] and [`LogStream`] run every line through the
//! line parser, keep the records, and set malformed lines aside without
//! stopping.

use tracing::warn;

use crate::error::LogError;
use crate::parser::LinePatterns;
use crate::record::TargetRecord;

/// A line that matched a known shape but could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number within the log
    pub line_number: usize,
    /// The offending line
    pub line: String,
    /// What was wrong with it
    pub error: LogError,
}

/// Records and per-line errors collected from one log
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLog {
    /// Recognized target records, in log order
    pub records: Vec<TargetRecord>,
    /// Lines that were dropped because a field was malformed
    pub malformed: Vec<LineError>,
    /// Total number of lines seen
    pub lines_seen: usize,
}

impl ParsedLog {
    /// Whether every recognized line parsed cleanly
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Parse every line of a log
///
/// Unrecognized lines are skipped. Malformed lines are logged, recorded in
/// [`ParsedLog::malformed`], and dropped.
#[must_use]
pub fn parse_log(patterns: &LinePatterns, text: &str) -> ParsedLog {
    let mut stream = LogStream::new(patterns);
    for line in text.lines() {
        stream.process_line(line);
    }
    stream.finish()
}

/// Incremental log parser, fed one line at a time
pub struct LogStream<'p> {
    patterns: &'p LinePatterns,
    parsed: ParsedLog,
}

impl<'p> LogStream<'p> {
    /// Create a new stream over the given patterns
    #[must_use]
    pub fn new(patterns: &'p LinePatterns) -> Self {
        Self {
            patterns,
            parsed: ParsedLog::default(),
        }
    }

    /// Process a single line
    ///
    /// Returns the record for this line, if it produced one.
    pub fn process_line(&mut self, line: &str) -> Option<&TargetRecord> {
        self.parsed.lines_seen += 1;
        let line_number = self.parsed.lines_seen;

        match self.patterns.parse_line(line) {
            Ok(Some(record)) => {
                self.parsed.records.push(record);
                self.parsed.records.last()
            }
            Ok(None) => None,
            Err(error) => {
                warn!(line_number, error = %error, "Dropping malformed log line");
                self.parsed.malformed.push(LineError {
                    line_number,
                    line: line.to_string(),
                    error,
                });
                None
            }
        }
    }

    /// Records collected so far
    #[must_use]
    pub fn records(&self) -> &[TargetRecord] {
        &self.parsed.records
    }

    /// Finish and return everything collected
    #[must_use]
    pub fn finish(self) -> ParsedLog {
        self.parsed
    }
}
