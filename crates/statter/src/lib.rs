//! bazel-statter library
//!
//! This module exports the command-line configuration and the concurrent log
//! ingestion used by the `bazel-statter` binary, for use in integration
//! tests and as a library.

pub mod config;
pub mod ingest;
