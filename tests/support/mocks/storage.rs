// tests/support/mocks/storage.rs
use async_trait::async_trait;
use bytes::Bytes;
use folio_core::application::{
    ApplicationResult,
    error::ApplicationError,
    ports::storage::{FileCategory, FileStore, StoredFile},
};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory file store that remembers what was written and removed.
#[derive(Default)]
pub struct RecordingFileStore {
    files: Mutex<BTreeMap<String, Bytes>>,
    removed: Mutex<Vec<String>>,
    /// Number of successful writes before every further write fails.
    fail_after: Option<usize>,
    writes: Mutex<usize>,
}

impl RecordingFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_after(writes: usize) -> Self {
        Self {
            fail_after: Some(writes),
            ..Self::default()
        }
    }

    pub fn references(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }

    pub fn content(&self, reference: &str) -> Option<Bytes> {
        self.files.lock().unwrap().get(reference).cloned()
    }
}

#[async_trait]
impl FileStore for RecordingFileStore {
    async fn store(
        &self,
        category: FileCategory,
        filename: &str,
        content: Bytes,
    ) -> ApplicationResult<StoredFile> {
        let mut writes = self.writes.lock().unwrap();
        if self.fail_after.is_some_and(|limit| *writes >= limit) {
            return Err(ApplicationError::storage("disk full"));
        }
        *writes += 1;

        let reference = format!("{}/{filename}", category.directory());
        let size = content.len() as u64;
        self.files.lock().unwrap().insert(reference.clone(), content);
        Ok(StoredFile { reference, size })
    }

    async fn remove(&self, reference: &str) -> ApplicationResult<()> {
        self.files.lock().unwrap().remove(reference);
        self.removed.lock().unwrap().push(reference.to_string());
        Ok(())
    }
}
