// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for statter-aggregate

use thiserror::Error;

/// Errors that can occur while building or rendering a report
#[derive(Debug, Error)]
pub enum AggregateError {
    /// Sort order name not recognized
    #[error("Unknown sort order: {value} (expected name, failures, successes, longest or shortest)")]
    UnknownSortOrder {
        /// The value that was given
        value: String,
    },

    /// Error serializing the report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
