// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Per-target accumulation
//!
//! Every status contributes differently:
//!
//! | status   | total        | successes   | failures             |
//! |----------|--------------|-------------|----------------------|
//! | NoStatus | -            | -           | -                    |
//! | Passed   | +1           | +1          | -                    |
//! | Failed   | +attempts    | +successes  | +attempts−successes  |
//! | Flaky    | +attempts    | +successes  | +attempts−successes  |
//!
//! A single failed attempt is the Failed case with one attempt and no
//! successes. Durations add up for every status except NoStatus.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use statter_log::{TargetRecord, TestStatus};

/// Rolled-up statistics for one target across all processed logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// Target label
    pub target_name: String,
    /// Attempts counted
    pub total: u64,
    /// Successful attempts
    pub successes: u64,
    /// Failed attempts
    pub failures: u64,
    /// Sum of reported durations
    pub total_duration: Duration,
}

impl AggregateResult {
    /// Create an empty aggregate for a target
    #[must_use]
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            total: 0,
            successes: 0,
            failures: 0,
            total_duration: Duration::ZERO,
        }
    }

    /// Fold one record into this aggregate
    pub fn add(&mut self, record: &TargetRecord) {
        let (attempts, successes) = match record.status {
            TestStatus::NoStatus => return,
            TestStatus::Passed => (1, 1),
            TestStatus::Failed => {
                let attempts = record.attempts.max(1);
                (attempts, record.successes.min(attempts))
            }
            TestStatus::Flaky => (record.attempts, record.successes.min(record.attempts)),
        };

        self.total += u64::from(attempts);
        self.successes += u64::from(successes);
        self.failures += u64::from(attempts - successes);
        self.total_duration += record.duration;
    }

    /// Add another aggregate's counts to this one
    pub fn merge(&mut self, other: &AggregateResult) {
        self.total += other.total;
        self.successes += other.successes;
        self.failures += other.failures;
        self.total_duration += other.total_duration;
    }

    /// Whether every counted attempt succeeded
    ///
    /// A target with no counted attempts is trivially fully successful.
    #[must_use]
    pub fn all_successes(&self) -> bool {
        self.successes == self.total
    }

    /// Percentage of successful attempts, `None` if nothing was counted
    #[must_use]
    pub fn success_ratio(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.successes as f64 * 100.0 / self.total as f64)
    }

    /// Mean duration per counted attempt, `None` if nothing was counted
    #[must_use]
    pub fn average_duration(&self) -> Option<Duration> {
        if self.total == 0 {
            return None;
        }
        let nanos = self.total_duration.as_nanos() / u128::from(self.total);
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }
}

/// Fold a record into an optional existing aggregate
///
/// Creates the aggregate on first sighting of a target.
#[must_use]
pub fn fold(existing: Option<AggregateResult>, record: &TargetRecord) -> AggregateResult {
    let mut aggregate = existing.unwrap_or_else(|| AggregateResult::new(record.name.as_str()));
    aggregate.add(record);
    aggregate
}

/// Keyed collection of aggregates, one per target name
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    results: HashMap<String, AggregateResult>,
    ignore_cached: bool,
    skipped_cached: usize,
}

impl Aggregator {
    /// Create an aggregator that counts every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator that skips results served from cache
    #[must_use]
    pub fn ignoring_cached() -> Self {
        Self {
            ignore_cached: true,
            ..Self::default()
        }
    }

    /// Fold one record in
    ///
    /// Returns `false` if the record was skipped because it was cached.
    pub fn add(&mut self, record: &TargetRecord) -> bool {
        if self.ignore_cached && record.cached {
            self.skipped_cached += 1;
            return false;
        }

        match self.results.get_mut(&record.name) {
            Some(aggregate) => aggregate.add(record),
            None => {
                self.results
                    .insert(record.name.clone(), fold(None, record));
            }
        }
        true
    }

    /// Fold many records in, returning how many were not skipped
    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a TargetRecord>) -> usize {
        records
            .into_iter()
            .filter(|record| self.add(record))
            .count()
    }

    /// Merge another aggregator's results into this one
    pub fn merge(&mut self, other: Aggregator) {
        self.skipped_cached += other.skipped_cached;
        for (name, aggregate) in other.results {
            match self.results.get_mut(&name) {
                Some(existing) => existing.merge(&aggregate),
                None => {
                    self.results.insert(name, aggregate);
                }
            }
        }
    }

    /// Look up the aggregate for a target
    #[must_use]
    pub fn get(&self, target_name: &str) -> Option<&AggregateResult> {
        self.results.get(target_name)
    }

    /// Number of distinct targets seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no target has been seen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of records skipped because they were cached
    #[must_use]
    pub fn skipped_cached(&self) -> usize {
        self.skipped_cached
    }

    /// Iterate over all aggregates, in no particular order
    pub fn results(&self) -> impl Iterator<Item = &AggregateResult> {
        self.results.values()
    }

    /// Consume the aggregator and return all aggregates
    #[must_use]
    pub fn into_results(self) -> Vec<AggregateResult> {
        self.results.into_values().collect()
    }
}
