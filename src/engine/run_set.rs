// src/engine/run_set.rs

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::extract::MetricRecord;

/// One finished stress run: its metrics and when it ran.
///
/// Immutable once built; `end_time` is never earlier than `start_time`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    metrics: MetricRecord,
    start_time: DateTime<Local>,
    end_time: DateTime<Local>,
}

impl RunRecord {
    /// A wall clock stepping backwards between the two samples is clamped so
    /// the run has zero length rather than a negative one.
    pub fn new(metrics: MetricRecord, start_time: DateTime<Local>, end_time: DateTime<Local>) -> Self {
        Self {
            metrics,
            start_time,
            end_time: end_time.max(start_time),
        }
    }

    pub fn metrics(&self) -> &MetricRecord {
        &self.metrics
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Local> {
        self.end_time
    }

    pub fn duration(&self) -> Duration {
        (self.end_time - self.start_time)
            .to_std()
            .unwrap_or_default()
    }
}

/// Append-only collection shared by the runs of one campaign.
///
/// Cloning shares the same underlying storage. The lock is taken only for
/// the duration of a single `push`.
#[derive(Debug, Clone, Default)]
pub struct RunSet {
    records: Arc<Mutex<Vec<RunRecord>>>,
}

impl RunSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: RunRecord) {
        // A panic elsewhere can't leave a half-finished push behind, so a
        // poisoned lock still guards a consistent vector.
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Take the records out once every writer has been joined.
    ///
    /// Falls back to copying if some clone is unexpectedly still alive.
    pub fn into_records(self) -> Vec<RunRecord> {
        match Arc::try_unwrap(self.records) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => shared
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}
