//! Pure Supabase Storage REST API client.
//!
//! Covers the three calls the job board needs: upload an object, build its
//! public URL, and remove objects (optionally addressed by their public URL).
//!
//! # Example
//!
//! ```rust,ignore
//! use storage_client::{StorageClient, UploadOptions};
//!
//! let client = StorageClient::new("https://xyz.supabase.co", "service-role-key".into());
//! let url = client
//!     .upload("resumes", "resumes/jane-1700000000000-ab12cd34.pdf", bytes, "application/pdf", &UploadOptions::default())
//!     .await?;
//! client.remove_by_url(&url).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{Result, StorageError};
pub use types::{ObjectLocation, UploadOptions};

use types::RemoveObjects;

const OBJECT_PREFIX: &str = "/storage/v1/object";
const PUBLIC_PREFIX: &str = "/storage/v1/object/public/";

pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl StorageClient {
    pub fn new(base_url: impl Into<String>, service_key: String) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            service_key,
        }
    }

    /// Public URL of an object in a public bucket. Pure string building, no request.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}{}{}/{}",
            self.base_url,
            PUBLIC_PREFIX,
            bucket,
            path.trim_start_matches('/')
        )
    }

    /// Upload an object and return its public URL.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        options: &UploadOptions,
    ) -> Result<String> {
        let path = path.trim_start_matches('/');
        let url = format!("{}{}/{}/{}", self.base_url, OBJECT_PREFIX, bucket, path);

        tracing::debug!(bucket, path, size = bytes.len(), "Uploading object");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("content-type", content_type)
            .header(
                "cache-control",
                format!("max-age={}", options.cache_control_secs),
            )
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(bytes)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(self.public_url(bucket, path))
    }

    /// Remove objects from a bucket.
    pub async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()> {
        let url = format!("{}{}/{}", self.base_url, OBJECT_PREFIX, bucket);

        let resp = self
            .client
            .delete(&url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&RemoveObjects { prefixes: paths })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }

    /// Recover bucket and object path from a public URL issued by this project.
    pub fn locate(&self, public_url: &str) -> Result<ObjectLocation> {
        let invalid = || StorageError::InvalidUrl(public_url.to_string());

        let parsed = url::Url::parse(public_url).map_err(|_| invalid())?;
        let base = url::Url::parse(&self.base_url).map_err(|_| invalid())?;
        if parsed.host_str() != base.host_str() {
            return Err(invalid());
        }

        let rest = parsed.path().strip_prefix(PUBLIC_PREFIX).ok_or_else(invalid)?;
        let (bucket, path) = rest.split_once('/').ok_or_else(invalid)?;
        if bucket.is_empty() || path.is_empty() {
            return Err(invalid());
        }

        Ok(ObjectLocation {
            bucket: bucket.to_string(),
            path: path.to_string(),
        })
    }

    /// Remove a single object addressed by its public URL.
    pub async fn remove_by_url(&self, public_url: &str) -> Result<()> {
        let location = self.locate(public_url)?;
        self.remove(&location.bucket, &[location.path]).await
    }
}
