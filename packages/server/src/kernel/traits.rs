// Trait definitions for dependency injection
//
// Services reach every external collaborator through these traits so tests
// can swap in fakes.
//
// Naming convention: Base* for trait names (e.g., BaseStore, BaseEmailSender)

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::common::{ApplicationId, CascadeReport, CompanyId, JobId};
use crate::domains::applications::models::{Application, ApplicationWithJob, CreateApplication};
use crate::domains::companies::models::{Company, CreateCompany, UpdateCompany};
use crate::domains::jobs::models::{CreateJob, Job, JobFilter, JobWithCompany, UpdateJob};

// =============================================================================
// Store Trait (Infrastructure - durable records)
// =============================================================================

/// Durable record store for companies, jobs and applications.
///
/// Cascading deletes are atomic: either every child row and the parent go,
/// or nothing changes. `None` from an update/delete means the row is missing.
#[async_trait]
pub trait BaseStore: Send + Sync {
    // Companies
    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>>;
    async fn list_companies(&self) -> Result<Vec<Company>>;
    async fn insert_company(&self, input: &CreateCompany) -> Result<Company>;
    async fn update_company(&self, id: CompanyId, input: &UpdateCompany) -> Result<Option<Company>>;
    async fn delete_company_cascade(&self, id: CompanyId) -> Result<Option<CascadeReport>>;
    async fn count_companies(&self) -> Result<i64>;

    // Jobs
    async fn find_job(&self, id: JobId) -> Result<Option<Job>>;
    async fn find_job_with_company(&self, id: JobId) -> Result<Option<JobWithCompany>>;
    /// Filtered listing in listing order (featured, newest, id)
    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobWithCompany>>;
    async fn list_featured_jobs(&self, limit: i64) -> Result<Vec<JobWithCompany>>;
    async fn insert_job(&self, input: &CreateJob) -> Result<Job>;
    async fn update_job(&self, id: JobId, input: &UpdateJob) -> Result<Option<Job>>;
    async fn delete_job_cascade(&self, id: JobId) -> Result<Option<CascadeReport>>;
    async fn count_jobs(&self) -> Result<i64>;

    // Applications
    async fn insert_application(&self, input: &CreateApplication) -> Result<Application>;
    async fn list_applications(&self) -> Result<Vec<ApplicationWithJob>>;
    async fn list_applications_for_job(&self, job_id: JobId) -> Result<Vec<Application>>;
    async fn delete_application(&self, id: ApplicationId) -> Result<Option<Application>>;
    async fn count_applications(&self) -> Result<i64>;
}

// =============================================================================
// Blob Storage Trait (Infrastructure - file bytes by URL)
// =============================================================================

#[async_trait]
pub trait BaseBlobStorage: Send + Sync {
    /// Store bytes under `bucket/path` and return the public URL.
    async fn upload(&self, bucket: &str, path: &str, bytes: Bytes, content_type: &str)
        -> Result<String>;

    /// Remove the object behind a public URL.
    async fn delete(&self, url: &str) -> Result<()>;

    fn public_url(&self, bucket: &str, path: &str) -> String;
}

// =============================================================================
// Email Trait (Infrastructure - transactional email)
// =============================================================================

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Bytes,
    pub content_type: String,
}

/// Outbound email. The sender address is owned by the adapter.
#[derive(Debug, Clone, Default)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub reply_to: Option<String>,
    pub attachments: Vec<EmailAttachment>,
}

#[async_trait]
pub trait BaseEmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}
