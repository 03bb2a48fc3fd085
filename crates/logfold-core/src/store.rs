//! Store: the persistence port the ingestion pipeline writes through, plus
//! an in-memory implementation.
//!
//! The pipeline never persists [`ParsedLog`](crate::ParsedLog) or
//! [`NormalizedLog`] directly; it copies their columns into a
//! [`NewLogRecord`] and hands that to a [`LogStore`]. Backends assign the id
//! and creation time.

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::types::{LogLevel, Metadata, NormalizedLog};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Columns written for one log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLogRecord {
    pub level: LogLevel,
    pub message: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub raw_log: String,
    pub ingestion_source: String,
    pub format: String,
    pub metadata: Metadata,
}

impl From<NormalizedLog> for NewLogRecord {
    fn from(log: NormalizedLog) -> Self {
        Self {
            level: log.level,
            message: log.message,
            source: log.source,
            timestamp: log.timestamp,
            raw_log: log.raw_log,
            ingestion_source: log.ingestion_source,
            format: log.format,
            metadata: log.metadata,
        }
    }
}

/// A persisted log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub entry: NewLogRecord,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Conjunctive filter over stored records. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub level: Option<LogLevel>,
    /// Case-insensitive substring of `source`.
    pub source: Option<String>,
    /// Case-insensitive substring of `message`.
    pub search: Option<String>,
    pub ingestion_source: Option<String>,
    /// Inclusive lower bound on `timestamp`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `timestamp`.
    pub to: Option<DateTime<Utc>>,
}

impl LogFilter {
    pub fn matches(&self, record: &NewLogRecord) -> bool {
        if self.level.is_some_and(|level| record.level != level) {
            return false;
        }
        if let Some(source) = &self.source {
            if !contains_ignore_case(&record.source, source) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ignore_case(&record.message, search) {
                return false;
            }
        }
        if let Some(channel) = &self.ingestion_source {
            if &record.ingestion_source != channel {
                return false;
            }
        }
        if self.from.is_some_and(|from| record.timestamp < from) {
            return false;
        }
        if self.to.is_some_and(|to| record.timestamp > to) {
            return false;
        }
        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Offset/limit window, applied after ordering by timestamp descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Persistence collaborator. Object safe, so callers may hold
/// `Arc<dyn LogStore>` as well as a concrete store.
pub trait LogStore: Send + Sync {
    /// Persist one record.
    fn create(&self, record: NewLogRecord) -> BoxFuture<'_, Result<LogRecord, StoreError>>;

    /// Persist every record or none of them. Returns the persisted records
    /// in input order.
    fn create_batch(&self, records: Vec<NewLogRecord>) -> BoxFuture<'_, Result<Vec<LogRecord>, StoreError>>;

    fn count<'a>(&'a self, filter: &'a LogFilter) -> BoxFuture<'a, Result<usize, StoreError>>;

    /// Matching records, newest timestamp first.
    fn find_many<'a>(
        &'a self,
        filter: &'a LogFilter,
        page: Pagination,
    ) -> BoxFuture<'a, Result<Vec<LogRecord>, StoreError>>;
}

// ---------------------------------------------------------------------------
// In-memory implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: Vec<LogRecord>,
}

impl Inner {
    fn push(&mut self, entry: NewLogRecord, created_at: DateTime<Utc>) -> LogRecord {
        self.next_id += 1;
        let record = LogRecord {
            id: self.next_id,
            created_at,
            entry,
        };
        self.records.push(record.clone());
        record
    }
}

/// [`LogStore`] held entirely in memory. Ids start at 1 and increase
/// monotonically; a batch is appended under a single write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Every record in insertion order.
    pub async fn snapshot(&self) -> Vec<LogRecord> {
        self.inner.read().await.records.clone()
    }
}

impl LogStore for MemoryStore {
    fn create(&self, record: NewLogRecord) -> BoxFuture<'_, Result<LogRecord, StoreError>> {
        Box::pin(async move {
            let mut inner = self.inner.write().await;
            Ok(inner.push(record, Utc::now()))
        })
    }

    fn create_batch(&self, records: Vec<NewLogRecord>) -> BoxFuture<'_, Result<Vec<LogRecord>, StoreError>> {
        Box::pin(async move {
            let created_at = Utc::now();
            let mut inner = self.inner.write().await;
            Ok(records
                .into_iter()
                .map(|record| inner.push(record, created_at))
                .collect())
        })
    }

    fn count<'a>(&'a self, filter: &'a LogFilter) -> BoxFuture<'a, Result<usize, StoreError>> {
        Box::pin(async move {
            let inner = self.inner.read().await;
            Ok(inner.records.iter().filter(|r| filter.matches(&r.entry)).count())
        })
    }

    fn find_many<'a>(
        &'a self,
        filter: &'a LogFilter,
        page: Pagination,
    ) -> BoxFuture<'a, Result<Vec<LogRecord>, StoreError>> {
        Box::pin(async move {
            let inner = self.inner.read().await;
            let mut matching: Vec<&LogRecord> =
                inner.records.iter().filter(|r| filter.matches(&r.entry)).collect();
            // Stable sort: equal timestamps keep insertion order.
            matching.sort_by(|a, b| b.entry.timestamp.cmp(&a.entry.timestamp));
            Ok(matching
                .into_iter()
                .skip(page.offset)
                .take(page.limit)
                .cloned()
                .collect())
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
