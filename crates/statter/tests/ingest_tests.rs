// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Ingestion tests
//!
//! These tests write build logs to a temporary directory and run them
//! through the concurrent ingestor, including missing and unreadable files.


use std::time::Duration;

use similar_asserts::assert_eq;
use statter::config::Config;
use statter::ingest::{IngestError, Ingestor, read_log};
use statter_aggregate::{Report, ReportOptions, SortOrder};
use statter_log::LinePatterns;
use test_utils::{TempTestDir, bazel_log};

fn write_three_builds(dir: &TempTestDir) {
    dir.write_build_log(
        101,
        &bazel_log(&[
            "//admin/server:go_default_test        (cached) PASSED in 0.3s",
            "//autobahn/stream:go_default_test     FLAKY, failed in 1 out of 2 in 13.5s",
            "//summons/integration:go_default_test NO STATUS",
        ]),
    );
    dir.write_build_log(
        102,
        &bazel_log(&[
            "//admin/server:go_default_test        PASSED in 0.5s",
            "//autobahn/stream:go_default_test     PASSED in 6.5s",
            "//payments/ledger:go_default_test     FAILED in 21.0s",
        ]),
    );
    dir.write_build_log(
        103,
        &bazel_log(&[
            "//admin/server:go_default_test        (cached) PASSED in 0.3s",
            "//autobahn/stream:go_default_test     TIMEOUT in 60.0s",
            "//payments/ledger:go_default_test     PASSED in abcs",
        ]),
    );
}

fn config_for(dir: &TempTestDir, start: u32, end: u32) -> Config {
    Config {
        start,
        end,
        log_dir: dir.path().to_path_buf(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_ingest_range_of_builds() {
    let dir = TempTestDir::new("ingest_range");
    write_three_builds(&dir);
    let config = config_for(&dir, 101, 103);

    let summary = Ingestor::new(LinePatterns::new())
        .ingest(config.log_sources())
        .await;

    assert_eq!(summary.files_read, 3);
    assert!(summary.failed_sources.is_empty());
    assert_eq!(summary.records, 8);
    assert_eq!(summary.malformed_lines, 1);
    assert_eq!(summary.aggregator.len(), 4);

    let stream = summary
        .aggregator
        .get("//autobahn/stream:go_default_test")
        .expect("present");
    assert_eq!(stream.total, 4);
    assert_eq!(stream.successes, 2);
    assert_eq!(stream.average_duration(), Some(Duration::from_secs(20)));

    let ledger = summary
        .aggregator
        .get("//payments/ledger:go_default_test")
        .expect("present");
    assert_eq!(ledger.total, 1, "malformed line is dropped");
    assert_eq!(ledger.failures, 1);
}

#[tokio::test]
async fn test_missing_build_does_not_abort_the_batch() {
    let dir = TempTestDir::new("ingest_missing");
    write_three_builds(&dir);
    let config = config_for(&dir, 100, 103);

    let summary = Ingestor::new(LinePatterns::new())
        .ingest(config.log_sources())
        .await;

    assert_eq!(summary.files_read, 3);
    assert_eq!(summary.failed_sources.len(), 1);
    match &summary.failed_sources[0] {
        IngestError::SourceUnavailable { path, .. } => {
            assert!(path.ends_with("100.txt"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(summary.aggregator.len(), 4);
}

#[tokio::test]
async fn test_unreadable_file_contributes_no_records() {
    let dir = TempTestDir::new("ingest_invalid_utf8");
    dir.write_build_log(1, &bazel_log(&["//a:ok   PASSED in 1.0s"]));
    let mut bad = b"//a:bad   FAILED in 1.0s\n".to_vec();
    bad.extend_from_slice(&[0xff, 0xfe, b'\n']);
    bad.extend_from_slice(b"//a:bad   FAILED in 2.0s\n");
    dir.write_bytes("2.txt", &bad);

    let summary = Ingestor::new(LinePatterns::new())
        .ingest(config_for(&dir, 1, 2).log_sources())
        .await;

    assert_eq!(summary.files_read, 1);
    assert_eq!(summary.failed_sources.len(), 1);
    assert!(summary.aggregator.get("//a:ok").is_some());
    assert!(summary.aggregator.get("//a:bad").is_none());
}

#[tokio::test]
async fn test_ignore_cached_ingestion() {
    let dir = TempTestDir::new("ingest_ignore_cached");
    write_three_builds(&dir);

    let summary = Ingestor::new(LinePatterns::new())
        .ignore_cached(true)
        .ingest(config_for(&dir, 101, 103).log_sources())
        .await;

    let admin = summary
        .aggregator
        .get("//admin/server:go_default_test")
        .expect("present");
    assert_eq!(admin.total, 1);
    assert_eq!(summary.aggregator.skipped_cached(), 2);
    assert_eq!(summary.records, 6);
}

#[tokio::test]
async fn test_small_channel_gives_same_result() {
    let dir = TempTestDir::new("ingest_small_channel");
    write_three_builds(&dir);
    let sources = config_for(&dir, 101, 103).log_sources();

    let wide = Ingestor::new(LinePatterns::new())
        .ingest(sources.clone())
        .await;
    let narrow = Ingestor::new(LinePatterns::new())
        .channel_capacity(1)
        .ingest(sources)
        .await;

    for aggregate in wide.aggregator.results() {
        assert_eq!(
            Some(aggregate),
            narrow.aggregator.get(&aggregate.target_name)
        );
    }
    assert_eq!(wide.aggregator.len(), narrow.aggregator.len());
}

#[tokio::test]
async fn test_read_log_stats() {
    let dir = TempTestDir::new("read_log_stats");
    let path = dir.write_build_log(
        5,
        &bazel_log(&[
            "//a:b   PASSED in 1.0s",
            "//a:c   FAILED in 2 out of 3 in 9.0s",
            "//a:d   PASSED in ?s",
        ]),
    );

    let (records, stats) = read_log(&path, &LinePatterns::new())
        .await
        .expect("readable");

    assert_eq!(records.len(), 2);
    assert_eq!(stats.records, 2);
    assert_eq!(stats.malformed, 1);
    assert_eq!(stats.lines, 8);
}

#[tokio::test]
async fn test_end_to_end_failures_report() {
    let dir = TempTestDir::new("end_to_end");
    write_three_builds(&dir);
    let config = Config {
        sort: SortOrder::Failures,
        ..config_for(&dir, 101, 103)
    };

    let summary = Ingestor::new(LinePatterns::new())
        .ingest(config.log_sources())
        .await;
    let report = Report::build(summary.aggregator.into_results(), &config.report_options());

    assert_eq!(
        report.render_table(),
        "//payments/ledger:go_default_test 0.00% success in 1 tries 21s\n\
         //autobahn/stream:go_default_test 50.00% success in 4 tries 20s\n"
    );

    let all = Report::build(
        Ingestor::new(LinePatterns::new())
            .ingest(config.log_sources())
            .await
            .aggregator
            .into_results(),
        &ReportOptions {
            include_successful: true,
            ..config.report_options()
        },
    );
    assert_eq!(all.rows().len(), 4);
}
