//! Fake storage backend: a [`MemoryStore`] wrapper that records every call
//! and can be told to refuse a specific batch or every single-entry write.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use futures::future::BoxFuture;
use logfold::core::store::{LogFilter, NewLogRecord, Pagination};
use logfold::core::{LogRecord, LogStore, MemoryStore, StoreError};

#[derive(Default)]
pub struct FakeStore {
    inner: MemoryStore,
    /// 1-based index of the `create_batch` call that fails.
    fail_batch_on: Option<usize>,
    fail_create: bool,
    create_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    batch_sizes: Mutex<Vec<usize>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse the `n`th `create_batch` call (1-based). Other calls succeed.
    pub fn failing_batch(n: usize) -> Self {
        Self {
            fail_batch_on: Some(n),
            ..Self::default()
        }
    }

    /// Refuse every `create` call.
    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    /// Record count of every `create_batch` call, refused ones included.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }

    pub fn total_calls(&self) -> usize {
        self.create_calls() + self.batch_calls()
    }

    pub async fn stored(&self) -> Vec<LogRecord> {
        self.inner.snapshot().await
    }
}

impl LogStore for FakeStore {
    fn create(&self, record: NewLogRecord) -> BoxFuture<'_, Result<LogRecord, StoreError>> {
        Box::pin(async move {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(StoreError::Unavailable("create refused".to_string()));
            }
            self.inner.create(record).await
        })
    }

    fn create_batch(&self, records: Vec<NewLogRecord>) -> BoxFuture<'_, Result<Vec<LogRecord>, StoreError>> {
        Box::pin(async move {
            let call = self.batch_calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.batch_sizes.lock().unwrap().push(records.len());
            if self.fail_batch_on == Some(call) {
                return Err(StoreError::Backend(format!("batch {call} refused")));
            }
            self.inner.create_batch(records).await
        })
    }

    fn count<'a>(&'a self, filter: &'a LogFilter) -> BoxFuture<'a, Result<usize, StoreError>> {
        self.inner.count(filter)
    }

    fn find_many<'a>(
        &'a self,
        filter: &'a LogFilter,
        page: Pagination,
    ) -> BoxFuture<'a, Result<Vec<LogRecord>, StoreError>> {
        self.inner.find_many(filter, page)
    }
}
