use std::sync::{Mutex, PoisonError};

use crate::context::Context;
use crate::record::LogRecord;
use crate::severity::Level;
use crate::sink::LogSink;

/// Sink that keeps every record in memory.
#[derive(Debug)]
pub struct MemorySink {
    min_level: Level,
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    /// Keep records of every level.
    pub fn new() -> Self {
        Self::with_min_level(Level::new(i32::MIN))
    }

    /// Keep records at `min_level` and above.
    pub fn with_min_level(min_level: Level) -> Self {
        MemorySink {
            min_level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the records collected so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the collected records.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn enabled(&self, level: Level) -> bool {
        level >= self.min_level
    }

    fn log_attrs(&self, _ctx: &Context, record: LogRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}
