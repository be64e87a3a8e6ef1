// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for bazel-statter
//!
//! These tests verify flag parsing for the build range, log directory,
//! sort order, report filters and logging level.

use std::path::PathBuf;

use clap::Parser;
use statter::config::{Config, ConfigError};
use statter_aggregate::SortOrder;
use tracing::Level;

// ============================================================================
// Build range
// ============================================================================

#[test]
fn test_start_and_end_required() {
    assert!(Config::try_parse_from(["bazel-statter"]).is_err());
    assert!(Config::try_parse_from(["bazel-statter", "--start", "1"]).is_err());
    assert!(Config::try_parse_from(["bazel-statter", "--end", "5"]).is_err());
}

#[test]
fn test_range_short_flags() {
    let config = Config::try_parse_from(["bazel-statter", "-s", "1200", "-e", "1250"])
        .expect("parse should succeed");
    assert_eq!(config.start, 1200);
    assert_eq!(config.end, 1250);
    assert_eq!(config.build_count(), 51);
}

#[test]
fn test_range_rejects_non_numeric() {
    let result = Config::try_parse_from(["bazel-statter", "--start", "abc", "--end", "5"]);
    assert!(result.is_err());
}

#[test]
fn test_zero_start_fails_validation() {
    let config = Config::try_parse_from(["bazel-statter", "--start", "0", "--end", "5"])
        .expect("parse should succeed");
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRange { start: 0, end: 5 })
    ));
}

// ============================================================================
// Log directory
// ============================================================================

#[test]
fn test_log_dir_defaults_to_current_directory() {
    let config = Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2"])
        .expect("parse should succeed");
    if std::env::var_os("STATTER_LOG_DIR").is_none() {
        assert_eq!(config.log_dir, PathBuf::from("."));
    }
}

#[test]
fn test_log_dir_flag() {
    let config =
        Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2", "-d", "/var/ci/logs"])
            .expect("parse should succeed");
    assert_eq!(config.log_dir, PathBuf::from("/var/ci/logs"));
    assert_eq!(
        config.log_sources()[0],
        PathBuf::from("/var/ci/logs/1.txt")
    );
}

// ============================================================================
// Report flags
// ============================================================================

#[test]
fn test_sort_flag_values() {
    for (value, expected) in [
        ("name", SortOrder::Name),
        ("failures", SortOrder::Failures),
        ("successes", SortOrder::Successes),
        ("longest", SortOrder::Longest),
        ("shortest", SortOrder::Shortest),
    ] {
        let config =
            Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2", "--sort", value])
                .expect("parse should succeed");
        assert_eq!(config.sort, expected);
    }
}

#[test]
fn test_sort_flag_rejects_unknown() {
    let result = Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2", "--sort", "slowest"]);
    assert!(result.is_err());
}

#[test]
fn test_report_flags_default_off() {
    let config = Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2"])
        .expect("parse should succeed");
    assert_eq!(config.sort, SortOrder::Name);
    assert!(!config.ignore_cached);
    assert!(!config.all);
    assert!(!config.json);
}

#[test]
fn test_report_flags() {
    let config = Config::try_parse_from([
        "bazel-statter",
        "-s",
        "1",
        "-e",
        "2",
        "--ignore-cached",
        "--all",
        "--json",
    ])
    .expect("parse should succeed");
    assert!(config.ignore_cached);
    assert!(config.all);
    assert!(config.json);
    assert!(config.report_options().include_successful);
}

// ============================================================================
// Logging flags
// ============================================================================

#[test]
fn test_verbose_sets_debug_log_level() {
    let config = Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2", "-v"])
        .expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_sets_warn_log_level() {
    let config = Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2", "--quiet"])
        .expect("parse should succeed");
    assert_eq!(config.log_level(), Level::WARN);
}

#[test]
fn test_verbose_takes_precedence_over_quiet() {
    let config = Config::try_parse_from(["bazel-statter", "-s", "1", "-e", "2", "-v", "-q"])
        .expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}
