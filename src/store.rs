//! Accumulated record storage, ordered by timestamp.
//!
//! The store is an append-only multi-map from [`DataKey`] to records.
//! Ordering uses the timestamp alone; entries sharing a timestamp keep
//! their relative insertion order. The client IP rides along in the key
//! as payload and never participates in comparisons — this is enforced
//! structurally by bucketing entries per timestamp rather than by an
//! `Ord` impl that would disagree with `Eq`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::LogRecord;

/// Composite key for an accumulated record: the entry's timestamp plus
/// the client source address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DataKey {
    timestamp: u32,
    client_ip: u32,
}

impl DataKey {
    pub fn new(timestamp: u32, client_ip: u32) -> Self {
        Self {
            timestamp,
            client_ip,
        }
    }

    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn client_ip(&self) -> u32 {
        self.client_ip
    }
}

#[derive(Debug, Clone, Serialize)]
struct Entry {
    key: DataKey,
    record: LogRecord,
}

/// Append-only ordered multi-map of parsed records.
///
/// Grows unbounded until [`clear`](RecordStore::clear); it is a pure
/// accumulation buffer for a session of `append` calls.
#[derive(Debug, Default)]
pub struct RecordStore {
    buckets: BTreeMap<u32, Vec<Entry>>,
    len: usize,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a record under its key. Records with an already-present
    /// timestamp are appended after the existing ones.
    pub fn insert(&mut self, key: DataKey, record: LogRecord) {
        self.buckets
            .entry(key.timestamp)
            .or_default()
            .push(Entry { key, record });
        self.len += 1;
    }

    /// Discard all entries.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    /// Iterate over all records in timestamp order, stable within equal
    /// timestamps.
    pub fn iter(&self) -> impl Iterator<Item = (&DataKey, &LogRecord)> {
        self.buckets
            .values()
            .flatten()
            .map(|entry| (&entry.key, &entry.record))
    }
}
