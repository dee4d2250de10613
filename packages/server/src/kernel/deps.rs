//! Server dependencies for services (using traits for testability)
//!
//! The central container every domain activity receives. External services
//! sit behind trait objects so tests can inject fakes.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use resend_client::{Attachment, ResendClient, SendEmailRequest};
use std::sync::Arc;
use storage_client::{StorageClient, UploadOptions};
use tracing::info;

use crate::kernel::{
    BaseBlobStorage, BaseEmailSender, BaseStore, EmailMessage, StreamHub, ViewInvalidator,
};

// =============================================================================
// StorageClient Adapter (implements BaseBlobStorage trait)
// =============================================================================

/// Wrapper around the Supabase storage client
pub struct SupabaseBlobStorage {
    client: StorageClient,
    options: UploadOptions,
}

impl SupabaseBlobStorage {
    pub fn new(client: StorageClient) -> Self {
        Self {
            client,
            options: UploadOptions::default(),
        }
    }
}

#[async_trait]
impl BaseBlobStorage for SupabaseBlobStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String> {
        self.client
            .upload(bucket, path, bytes.to_vec(), content_type, &self.options)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.client
            .remove_by_url(url)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client.public_url(bucket, path)
    }
}

// =============================================================================
// Email Adapters (implement BaseEmailSender trait)
// =============================================================================

/// Sends through the Resend API from a fixed sender address
pub struct ResendEmailSender {
    client: ResendClient,
    from: String,
}

impl ResendEmailSender {
    pub fn new(client: ResendClient, from: impl Into<String>) -> Self {
        Self {
            client,
            from: from.into(),
        }
    }
}

#[async_trait]
impl BaseEmailSender for ResendEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let request = SendEmailRequest {
            from: self.from.clone(),
            to: message.to.clone(),
            subject: message.subject.clone(),
            text: Some(message.text.clone()),
            html: None,
            reply_to: message.reply_to.clone(),
            attachments: message
                .attachments
                .iter()
                .map(|a| {
                    Attachment::from_bytes(&a.filename, &a.content, Some(a.content_type.clone()))
                })
                .collect(),
        };

        let sent = self
            .client
            .send(&request)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        tracing::debug!(email_id = %sent.id, "Email accepted by Resend");
        Ok(())
    }
}

/// Logs instead of sending (no API key configured)
pub struct LoggingEmailSender;

#[async_trait]
impl BaseEmailSender for LoggingEmailSender {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to = ?message.to,
            subject = %message.subject,
            attachments = message.attachments.len(),
            "Email delivery disabled, message not sent"
        );
        Ok(())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Bucket names and addresses the services need
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub resume_bucket: String,
    pub asset_bucket: String,
    pub notification_email: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            resume_bucket: "resumes".to_string(),
            asset_bucket: "company-assets".to_string(),
            notification_email: "jobs@example.com".to_string(),
        }
    }
}

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseStore>,
    pub blob_storage: Arc<dyn BaseBlobStorage>,
    pub email: Arc<dyn BaseEmailSender>,
    /// In-process pub/sub hub for real-time streaming to SSE endpoints
    pub stream_hub: StreamHub,
    pub invalidator: ViewInvalidator,
    pub settings: ServiceSettings,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn BaseStore>,
        blob_storage: Arc<dyn BaseBlobStorage>,
        email: Arc<dyn BaseEmailSender>,
        stream_hub: StreamHub,
        settings: ServiceSettings,
    ) -> Self {
        let invalidator = ViewInvalidator::new(stream_hub.clone());
        Self {
            store,
            blob_storage,
            email,
            stream_hub,
            invalidator,
            settings,
        }
    }
}
