// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for statter-log

use thiserror::Error;

/// Errors that can occur while classifying a log line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// A line matched a known shape but one of its numeric fields is invalid
    #[error("Malformed {field} field {value:?}: {reason}")]
    MalformedField {
        /// Name of the offending field (e.g. "duration", "attempts")
        field: &'static str,
        /// The raw text captured for the field
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}

impl LogError {
    pub(crate) fn malformed(
        field: &'static str,
        value: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::MalformedField {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
