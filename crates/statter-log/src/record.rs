// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Target result types

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of a test target as reported in a Bazel summary line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    /// Target was built but never reported a result
    NoStatus,
    /// Target passed
    Passed,
    /// Target failed (includes timeouts)
    Failed,
    /// Target passed on some attempts and failed on others
    Flaky,
}

impl TestStatus {
    /// The keyword Bazel prints for this status
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::NoStatus => "NO STATUS",
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
            Self::Flaky => "FLAKY",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A single target outcome extracted from one log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRecord {
    /// Target label, e.g. `//admin/server:go_default_test`
    pub name: String,
    /// Whether the result was served from the remote or local cache
    pub cached: bool,
    /// Reported status
    pub status: TestStatus,
    /// Elapsed time as printed by Bazel
    pub duration: Duration,
    /// Number of successful attempts
    pub successes: u32,
    /// Number of attempts
    pub attempts: u32,
    /// Number of attempts served from cache (flaky runs only)
    pub cached_times: u32,
    /// Whether the failure was a `TIMEOUT`
    pub timed_out: bool,
}

impl TargetRecord {
    /// A single passing attempt
    #[must_use]
    pub fn passed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            cached: false,
            status: TestStatus::Passed,
            duration,
            successes: 1,
            attempts: 1,
            cached_times: 0,
            timed_out: false,
        }
    }

    /// A single failing attempt
    #[must_use]
    pub fn failed(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            status: TestStatus::Failed,
            successes: 0,
            ..Self::passed(name, duration)
        }
    }

    /// A target that reported no status
    #[must_use]
    pub fn no_status(name: impl Into<String>) -> Self {
        Self {
            status: TestStatus::NoStatus,
            successes: 0,
            attempts: 0,
            ..Self::passed(name, Duration::ZERO)
        }
    }

    /// A run with several attempts where `failures` of `attempts` failed
    ///
    /// Returns `None` when `failures` exceeds `attempts`.
    #[must_use]
    pub fn with_attempts(
        name: impl Into<String>,
        status: TestStatus,
        failures: u32,
        attempts: u32,
        duration: Duration,
    ) -> Option<Self> {
        let successes = attempts.checked_sub(failures)?;
        Some(Self {
            status,
            successes,
            attempts,
            ..Self::passed(name, duration)
        })
    }

    /// Mark this record as served from cache
    #[must_use]
    pub fn cached(mut self) -> Self {
        self.cached = true;
        self
    }

    /// Number of failed attempts
    #[must_use]
    pub fn failures(&self) -> u32 {
        self.attempts.saturating_sub(self.successes)
    }

    /// Whether this record carries an outcome that counts towards totals
    #[must_use]
    pub fn is_counted(&self) -> bool {
        self.status != TestStatus::NoStatus
    }
}
