//! Concurrent log ingestion
//!
//! Each log file is read and parsed by its own task. Parsed records are sent
//! over a channel to a single consumer that owns the [`Aggregator`], so the
//! aggregate map has exactly one writer. A file that cannot be opened or read
//! is reported in [`IngestSummary::failed_sources`] and contributes no
//! records; the other files are unaffected.
//!
//! # Example
//!
//! ```no_run
//! use statter::ingest::Ingestor;
//! use statter_log::LinePatterns;
//!
//! # async fn run() {
//! let ingestor = Ingestor::new(LinePatterns::new()).ignore_cached(true);
//! let summary = ingestor
//!     .ingest(vec!["logs/101.txt".into(), "logs/102.txt".into()])
//!     .await;
//! println!("Read {} logs, {} failed", summary.files_read, summary.failed_sources.len());
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use statter_aggregate::Aggregator;
use statter_log::{LinePatterns, LogStream, TargetRecord};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{Instrument, debug, info, info_span, warn};

// ============================================================================
// Error Types
// ============================================================================

/// Ingestion errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// A log file could not be opened or read
    #[error("Log source unavailable: {path}: {source}")]
    SourceUnavailable {
        /// The log file path
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A reader task ended without returning a result
    #[error("Log reader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IngestError {
    fn unavailable(path: &Path, source: std::io::Error) -> Self {
        Self::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// What a single log file contributed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogStats {
    /// Lines read
    pub lines: usize,
    /// Target records extracted
    pub records: usize,
    /// Lines dropped because a field was malformed
    pub malformed: usize,
}

/// Outcome of ingesting a batch of log files
#[derive(Debug, Default)]
pub struct IngestSummary {
    /// Per-target aggregates over every readable file
    pub aggregator: Aggregator,
    /// Files read successfully
    pub files_read: usize,
    /// Target records folded into the aggregator, excluding skipped cached ones
    pub records: usize,
    /// Lines dropped because a field was malformed
    pub malformed_lines: usize,
    /// Files that could not be read, one error each
    pub failed_sources: Vec<IngestError>,
}

// ============================================================================
// Ingestor
// ============================================================================

/// A batch of records parsed from one file
struct Batch {
    path: PathBuf,
    records: Vec<TargetRecord>,
}

/// Reads log files concurrently and aggregates their records
#[derive(Debug, Clone)]
pub struct Ingestor {
    patterns: Arc<LinePatterns>,
    ignore_cached: bool,
    channel_capacity: usize,
}

impl Ingestor {
    /// Create an ingestor sharing the given patterns across reader tasks
    #[must_use]
    pub fn new(patterns: LinePatterns) -> Self {
        Self {
            patterns: Arc::new(patterns),
            ignore_cached: false,
            channel_capacity: 64,
        }
    }

    /// Skip records served from cache
    #[must_use]
    pub fn ignore_cached(mut self, ignore: bool) -> Self {
        self.ignore_cached = ignore;
        self
    }

    /// Bound on parsed batches waiting for the aggregator
    #[must_use]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Read, parse and aggregate every log in `sources`
    ///
    /// Never fails as a whole: unreadable files are collected in
    /// [`IngestSummary::failed_sources`].
    pub async fn ingest(&self, sources: Vec<PathBuf>) -> IngestSummary {
        info!(files = sources.len(), "Starting log ingestion");

        let (tx, mut rx) = mpsc::channel::<Batch>(self.channel_capacity);
        let mut readers = JoinSet::new();

        for path in sources {
            let tx = tx.clone();
            let patterns = Arc::clone(&self.patterns);
            let span = info_span!("log", path = %path.display());
            readers.spawn(
                async move {
                    let (records, stats) = read_log(&path, &patterns).await?;
                    if let Err(e) = tx.send(Batch { path, records }).await {
                        debug!(path = %e.0.path.display(), "Aggregator closed, dropping batch");
                    }
                    Ok::<_, IngestError>(stats)
                }
                .instrument(span),
            );
        }
        drop(tx);

        let mut summary = IngestSummary {
            aggregator: if self.ignore_cached {
                Aggregator::ignoring_cached()
            } else {
                Aggregator::new()
            },
            ..Default::default()
        };

        while let Some(batch) = rx.recv().await {
            debug!(path = %batch.path.display(), records = batch.records.len(), "Aggregating log");
            summary.records += summary.aggregator.extend(&batch.records);
        }

        while let Some(joined) = readers.join_next().await {
            match joined.map_err(IngestError::from).and_then(|result| result) {
                Ok(stats) => {
                    summary.files_read += 1;
                    summary.malformed_lines += stats.malformed;
                }
                Err(e) => {
                    warn!(error = %e, "Skipping log");
                    summary.failed_sources.push(e);
                }
            }
        }

        info!(
            files_read = summary.files_read,
            files_failed = summary.failed_sources.len(),
            records = summary.records,
            malformed_lines = summary.malformed_lines,
            targets = summary.aggregator.len(),
            skipped_cached = summary.aggregator.skipped_cached(),
            "Log ingestion complete"
        );

        summary
    }
}

/// Read and parse one log file in full
///
/// Malformed lines are logged and dropped; they do not fail the file.
///
/// # Errors
///
/// Returns `IngestError::SourceUnavailable` if the file cannot be opened or
/// a line cannot be read (including invalid UTF-8).
pub async fn read_log(
    path: &Path,
    patterns: &LinePatterns,
) -> Result<(Vec<TargetRecord>, LogStats), IngestError> {
    let file = File::open(path)
        .await
        .map_err(|e| IngestError::unavailable(path, e))?;
    let mut lines = BufReader::new(file).lines();
    let mut stream = LogStream::new(patterns);

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| IngestError::unavailable(path, e))?
    {
        stream.process_line(&line);
    }

    let parsed = stream.finish();
    let stats = LogStats {
        lines: parsed.lines_seen,
        records: parsed.records.len(),
        malformed: parsed.malformed.len(),
    };
    debug!(path = %path.display(), lines = stats.lines, records = stats.records, "Parsed log");

    Ok((parsed.records, stats))
}
