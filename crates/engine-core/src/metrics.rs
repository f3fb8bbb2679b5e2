use serde::{Deserialize, Serialize};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    lines_read: AtomicU64,
    blank_lines: AtomicU64,
    mismatched_rows: AtomicU64,
    rows_queued: AtomicU64,
    rows_pending: AtomicU64,
    rows_inserted: AtomicU64,
    batches_executed: AtomicU64,
}

/// Live counters of one load. Clones share the same totals, so another
/// thread can watch a load while it runs.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<InnerMetrics>,
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionCounters {
    /// Data lines delivered after the header, blank and malformed ones included.
    pub lines_read: u64,
    pub blank_lines: u64,
    /// Lines skipped because their cell count differs from the header's.
    pub mismatched_rows: u64,
    /// Rows handed to the batch since the start of the load.
    pub rows_queued: u64,
    /// Rows queued since the last flush.
    pub rows_pending: u64,
    pub rows_inserted: u64,
    pub batches_executed: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Metrics {
            inner: Arc::new(InnerMetrics::default()),
        }
    }

    pub fn increment_lines(&self, count: u64) {
        self.inner.lines_read.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_blank(&self, count: u64) {
        self.inner.blank_lines.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_mismatched(&self, count: u64) {
        self.inner.mismatched_rows.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_queued(&self, count: u64) {
        self.inner.rows_queued.fetch_add(count, Ordering::Relaxed);
        self.inner.rows_pending.fetch_add(count, Ordering::Relaxed);
    }

    /// Records a successful flush; the pending count starts over.
    pub fn record_flush(&self, inserted: u64) {
        self.inner.rows_inserted.fetch_add(inserted, Ordering::Relaxed);
        self.inner.batches_executed.fetch_add(1, Ordering::Relaxed);
        self.inner.rows_pending.store(0, Ordering::Relaxed);
    }

    pub fn rows_inserted(&self) -> u64 {
        self.inner.rows_inserted.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> IngestionCounters {
        IngestionCounters {
            lines_read: self.inner.lines_read.load(Ordering::Relaxed),
            blank_lines: self.inner.blank_lines.load(Ordering::Relaxed),
            mismatched_rows: self.inner.mismatched_rows.load(Ordering::Relaxed),
            rows_queued: self.inner.rows_queued.load(Ordering::Relaxed),
            rows_pending: self.inner.rows_pending.load(Ordering::Relaxed),
            rows_inserted: self.inner.rows_inserted.load(Ordering::Relaxed),
            batches_executed: self.inner.batches_executed.load(Ordering::Relaxed),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestionCounters {
    /// Adds another load's totals, for multi-file summaries.
    pub fn accumulate(&mut self, other: &IngestionCounters) {
        self.lines_read += other.lines_read;
        self.blank_lines += other.blank_lines;
        self.mismatched_rows += other.mismatched_rows;
        self.rows_queued += other.rows_queued;
        self.rows_pending += other.rows_pending;
        self.rows_inserted += other.rows_inserted;
        self.batches_executed += other.batches_executed;
    }
}
