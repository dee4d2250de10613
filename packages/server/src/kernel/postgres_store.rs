//! `BaseStore` backed by PostgreSQL. All SQL lives in the domain models;
//! this adapter only routes calls to them.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::common::{ApplicationId, CascadeReport, CompanyId, JobId};
use crate::domains::applications::models::{Application, ApplicationWithJob, CreateApplication};
use crate::domains::companies::models::{Company, CreateCompany, UpdateCompany};
use crate::domains::jobs::models::{CreateJob, Job, JobFilter, JobWithCompany, UpdateJob};
use crate::kernel::BaseStore;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseStore for PostgresStore {
    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>> {
        Company::find_by_id(id, &self.pool)
            .await
            .with_context(|| format!("failed to load company {}", id))
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        Company::find_all(&self.pool)
            .await
            .context("failed to list companies")
    }

    async fn insert_company(&self, input: &CreateCompany) -> Result<Company> {
        Company::create(input, &self.pool)
            .await
            .context("failed to insert company")
    }

    async fn update_company(&self, id: CompanyId, input: &UpdateCompany) -> Result<Option<Company>> {
        Company::update(id, input, &self.pool)
            .await
            .with_context(|| format!("failed to update company {}", id))
    }

    async fn delete_company_cascade(&self, id: CompanyId) -> Result<Option<CascadeReport>> {
        Company::delete_cascade(id, &self.pool)
            .await
            .with_context(|| format!("failed to delete company {}", id))
    }

    async fn count_companies(&self) -> Result<i64> {
        Company::count(&self.pool).await
    }

    async fn find_job(&self, id: JobId) -> Result<Option<Job>> {
        Job::find_by_id(id, &self.pool)
            .await
            .with_context(|| format!("failed to load job {}", id))
    }

    async fn find_job_with_company(&self, id: JobId) -> Result<Option<JobWithCompany>> {
        Job::find_with_company(id, &self.pool)
            .await
            .with_context(|| format!("failed to load job {}", id))
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobWithCompany>> {
        Job::find_listing(filter, &self.pool)
            .await
            .context("failed to list jobs")
    }

    async fn list_featured_jobs(&self, limit: i64) -> Result<Vec<JobWithCompany>> {
        Job::find_featured(limit, &self.pool)
            .await
            .context("failed to list featured jobs")
    }

    async fn insert_job(&self, input: &CreateJob) -> Result<Job> {
        Job::create(input, &self.pool)
            .await
            .context("failed to insert job")
    }

    async fn update_job(&self, id: JobId, input: &UpdateJob) -> Result<Option<Job>> {
        Job::update(id, input, &self.pool)
            .await
            .with_context(|| format!("failed to update job {}", id))
    }

    async fn delete_job_cascade(&self, id: JobId) -> Result<Option<CascadeReport>> {
        Job::delete_cascade(id, &self.pool)
            .await
            .with_context(|| format!("failed to delete job {}", id))
    }

    async fn count_jobs(&self) -> Result<i64> {
        Job::count(&self.pool).await
    }

    async fn insert_application(&self, input: &CreateApplication) -> Result<Application> {
        Application::create(input, &self.pool)
            .await
            .context("failed to insert application")
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationWithJob>> {
        Application::find_all_with_job(&self.pool)
            .await
            .context("failed to list applications")
    }

    async fn list_applications_for_job(&self, job_id: JobId) -> Result<Vec<Application>> {
        Application::find_by_job(job_id, &self.pool)
            .await
            .with_context(|| format!("failed to list applications for job {}", job_id))
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<Option<Application>> {
        Application::delete(id, &self.pool)
            .await
            .with_context(|| format!("failed to delete application {}", id))
    }

    async fn count_applications(&self) -> Result<i64> {
        Application::count(&self.pool).await
    }
}
