// TestDependencies - mock implementations for testing
//
// Provides fake services that can be injected into ServerDeps for tests.
// Every mock is Clone and shares its recorded calls with its clones, so a
// test can keep a handle after passing one into the deps.

use anyhow::{bail, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};

use super::{
    BaseBlobStorage, BaseEmailSender, EmailMessage, MemoryStore, ServerDeps, ServiceSettings,
    StreamHub,
};

// =============================================================================
// Mock Blob Storage
// =============================================================================

/// Arguments captured from an upload call
#[derive(Debug, Clone)]
pub struct UploadCall {
    pub bucket: String,
    pub path: String,
    pub size: usize,
    pub content_type: String,
}

#[derive(Clone, Default)]
pub struct MockBlobStorage {
    uploads: Arc<Mutex<Vec<UploadCall>>>,
    deletes: Arc<Mutex<Vec<String>>>,
    fail_uploads: Arc<Mutex<bool>>,
    fail_deletes: Arc<Mutex<bool>>,
}

impl MockBlobStorage {
    pub const BASE_URL: &'static str = "https://blobs.test/public";

    pub fn new() -> Self {
        Self::default()
    }

    /// Make every upload fail
    pub fn failing_uploads(self) -> Self {
        *self.fail_uploads.lock().unwrap() = true;
        self
    }

    /// Make every delete fail
    pub fn failing_deletes(self) -> Self {
        *self.fail_deletes.lock().unwrap() = true;
        self
    }

    pub fn uploads(&self) -> Vec<UploadCall> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }

    pub fn was_deleted(&self, url: &str) -> bool {
        self.deletes.lock().unwrap().iter().any(|u| u == url)
    }

    /// Total number of calls of any kind
    pub fn call_count(&self) -> usize {
        self.uploads.lock().unwrap().len() + self.deletes.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseBlobStorage for MockBlobStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String> {
        self.uploads.lock().unwrap().push(UploadCall {
            bucket: bucket.to_string(),
            path: path.to_string(),
            size: bytes.len(),
            content_type: content_type.to_string(),
        });
        if *self.fail_uploads.lock().unwrap() {
            bail!("mock storage unavailable");
        }
        Ok(self.public_url(bucket, path))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.deletes.lock().unwrap().push(url.to_string());
        if *self.fail_deletes.lock().unwrap() {
            bail!("mock storage refused delete");
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", Self::BASE_URL, bucket, path)
    }
}

// =============================================================================
// Mock Email Sender
// =============================================================================

#[derive(Clone, Default)]
pub struct MockEmailSender {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
    failing_recipients: Arc<Mutex<Vec<String>>>,
    fail_all: Arc<Mutex<bool>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every send
    pub fn failing(self) -> Self {
        *self.fail_all.lock().unwrap() = true;
        self
    }

    /// Fail sends addressed to this recipient only
    pub fn failing_for(self, recipient: &str) -> Self {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
        self
    }

    /// Messages that were accepted
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<EmailMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.to.iter().any(|t| t == recipient))
            .collect()
    }
}

#[async_trait]
impl BaseEmailSender for MockEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        if *self.fail_all.lock().unwrap() {
            bail!("mock email provider down");
        }
        let failing = self.failing_recipients.lock().unwrap();
        if message.to.iter().any(|to| failing.contains(to)) {
            bail!("mock email rejected recipient {:?}", message.to);
        }
        drop(failing);
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

pub struct TestDependencies {
    pub store: MemoryStore,
    pub blob_storage: MockBlobStorage,
    pub email: MockEmailSender,
    pub stream_hub: StreamHub,
    pub settings: ServiceSettings,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: MemoryStore::new(),
            blob_storage: MockBlobStorage::new(),
            email: MockEmailSender::new(),
            stream_hub: StreamHub::new(),
            settings: ServiceSettings::default(),
        }
    }

    /// Set the in-memory store
    pub fn mock_store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    /// Set a mock blob storage
    pub fn mock_blob_storage(mut self, storage: MockBlobStorage) -> Self {
        self.blob_storage = storage;
        self
    }

    /// Set a mock email sender
    pub fn mock_email(mut self, email: MockEmailSender) -> Self {
        self.email = email;
        self
    }

    /// Build ServerDeps sharing state with the mocks held here
    pub fn deps(&self) -> ServerDeps {
        ServerDeps::new(
            Arc::new(self.store.clone()),
            Arc::new(self.blob_storage.clone()),
            Arc::new(self.email.clone()),
            self.stream_hub.clone(),
            self.settings.clone(),
        )
    }
}
