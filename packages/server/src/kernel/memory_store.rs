//! In-memory `BaseStore` for tests.
//!
//! Mirrors the Postgres semantics that services rely on: foreign keys are
//! checked on insert, listings use the same filter and order, and cascades
//! run against a working copy that is only swapped in when every step
//! succeeded.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use crate::common::{ApplicationId, CascadeReport, CompanyId, JobId};
use crate::domains::applications::models::{Application, ApplicationWithJob, CreateApplication};
use crate::domains::companies::models::{Company, CreateCompany, UpdateCompany};
use crate::domains::jobs::models::{
    listing_order, CompanySummary, CreateJob, Job, JobFilter, JobWithCompany, UpdateJob,
};
use crate::kernel::BaseStore;

/// Store calls, recorded in order and usable as failure injection points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
    FindCompany,
    ListCompanies,
    InsertCompany,
    UpdateCompany,
    DeleteCompany,
    CountCompanies,
    FindJob,
    ListJobs,
    ListFeaturedJobs,
    InsertJob,
    UpdateJob,
    DeleteJob,
    CountJobs,
    InsertApplication,
    ListApplications,
    DeleteApplication,
    CountApplications,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    companies: BTreeMap<i32, Company>,
    jobs: BTreeMap<i32, Job>,
    applications: BTreeMap<i32, Application>,
    next_company: i32,
    next_job: i32,
    next_application: i32,
}

impl Tables {
    fn next_id(counter: &mut i32) -> i32 {
        *counter += 1;
        *counter
    }

    fn with_company(&self, job: &Job) -> JobWithCompany {
        let company = match self.companies.get(&job.company_id.into_raw()) {
            Some(c) => CompanySummary {
                id: c.id,
                name: c.name.clone(),
                logo: c.logo.clone(),
                location: c.location.clone(),
            },
            None => CompanySummary::unknown(job.company_id),
        };
        JobWithCompany {
            job: job.clone(),
            company,
        }
    }

    /// Remove a job's applications, then the job, tallying into `report`.
    fn remove_job(&mut self, job_id: JobId, report: &mut CascadeReport) {
        let doomed: Vec<i32> = self
            .applications
            .values()
            .filter(|a| a.job_id == job_id)
            .map(|a| a.id.into_raw())
            .collect();
        for id in doomed {
            if let Some(app) = self.applications.remove(&id) {
                report.applications_deleted += 1;
                report.record_asset(Some(app.resume));
            }
        }
        if self.jobs.remove(&job_id.into_raw()).is_some() {
            report.jobs_deleted += 1;
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    calls: Arc<Mutex<Vec<StoreOperation>>>,
    failures: Arc<Mutex<Vec<StoreOperation>>>,
    fail_mid_cascade: Arc<Mutex<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `operation` fail.
    pub fn fail_on(self, operation: StoreOperation) -> Self {
        self.set_failing(operation);
        self
    }

    /// Make cascading deletes fail after the child rows were removed.
    pub fn fail_mid_cascade(self) -> Self {
        self.set_failing_mid_cascade();
        self
    }

    /// Same as `fail_on`, for a store already handed to `ServerDeps`.
    pub fn set_failing(&self, operation: StoreOperation) {
        self.failures.lock().unwrap().push(operation);
    }

    pub fn set_failing_mid_cascade(&self) {
        *self.fail_mid_cascade.lock().unwrap() = true;
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        self.failures.lock().unwrap().clear();
        *self.fail_mid_cascade.lock().unwrap() = false;
    }

    pub fn calls(&self) -> Vec<StoreOperation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn was_called(&self, operation: StoreOperation) -> bool {
        self.calls.lock().unwrap().contains(&operation)
    }

    /// Insert a job row without checking its company, for orphan scenarios.
    pub fn seed_job_unchecked(&self, input: &CreateJob) -> Job {
        let mut tables = self.tables.lock().unwrap();
        let job = build_job(&mut tables, input);
        tables.jobs.insert(job.id.into_raw(), job.clone());
        job
    }

    pub fn company_count(&self) -> usize {
        self.tables.lock().unwrap().companies.len()
    }

    pub fn job_count(&self) -> usize {
        self.tables.lock().unwrap().jobs.len()
    }

    pub fn application_count(&self) -> usize {
        self.tables.lock().unwrap().applications.len()
    }

    pub fn applications(&self) -> Vec<Application> {
        self.tables
            .lock()
            .unwrap()
            .applications
            .values()
            .cloned()
            .collect()
    }

    fn enter(&self, operation: StoreOperation) -> Result<()> {
        self.calls.lock().unwrap().push(operation);
        if self.failures.lock().unwrap().contains(&operation) {
            bail!("injected store failure on {:?}", operation);
        }
        Ok(())
    }

    fn mid_cascade_failure(&self) -> bool {
        *self.fail_mid_cascade.lock().unwrap()
    }
}

fn build_job(tables: &mut Tables, input: &CreateJob) -> Job {
    let now = Utc::now();
    Job {
        id: JobId::from_raw(Tables::next_id(&mut tables.next_job)),
        title: input.title.clone(),
        company_id: input.company_id,
        location: input.location.clone(),
        salary: input.salary.clone(),
        job_type: input.job_type.to_string(),
        category: input.category.to_string(),
        description: input.description.clone(),
        requirements: input.requirements.clone(),
        benefits: input.benefits.clone(),
        featured: input.featured,
        posted_at: input.posted_at.unwrap_or(now),
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl BaseStore for MemoryStore {
    async fn find_company(&self, id: CompanyId) -> Result<Option<Company>> {
        self.enter(StoreOperation::FindCompany)?;
        Ok(self.tables.lock().unwrap().companies.get(&id.into_raw()).cloned())
    }

    async fn list_companies(&self) -> Result<Vec<Company>> {
        self.enter(StoreOperation::ListCompanies)?;
        let mut companies: Vec<Company> =
            self.tables.lock().unwrap().companies.values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(companies)
    }

    async fn insert_company(&self, input: &CreateCompany) -> Result<Company> {
        self.enter(StoreOperation::InsertCompany)?;
        if input.name.trim().is_empty() {
            bail!("companies_name_check violated");
        }
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let company = Company {
            id: CompanyId::from_raw(Tables::next_id(&mut tables.next_company)),
            name: input.name.clone(),
            logo: input.logo.clone(),
            description: input.description.clone(),
            founded: input.founded.clone(),
            location: input.location.clone(),
            employees: input.employees.clone(),
            website: input.website.clone(),
            email: input.email.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.companies.insert(company.id.into_raw(), company.clone());
        Ok(company)
    }

    async fn update_company(&self, id: CompanyId, input: &UpdateCompany) -> Result<Option<Company>> {
        self.enter(StoreOperation::UpdateCompany)?;
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.companies.get_mut(&id.into_raw()).map(|company| {
            input.apply_to(company);
            company.updated_at = Utc::now();
            company.clone()
        }))
    }

    async fn delete_company_cascade(&self, id: CompanyId) -> Result<Option<CascadeReport>> {
        self.enter(StoreOperation::DeleteCompany)?;
        let mut tables = self.tables.lock().unwrap();
        let mut working = tables.clone();

        let Some(company) = working.companies.get(&id.into_raw()).cloned() else {
            return Ok(None);
        };

        let mut report = CascadeReport::default();
        report.record_asset(company.logo);
        let job_ids: Vec<JobId> = working
            .jobs
            .values()
            .filter(|j| j.company_id == id)
            .map(|j| j.id)
            .collect();
        for job_id in job_ids {
            working.remove_job(job_id, &mut report);
        }

        if self.mid_cascade_failure() {
            // working copy dropped, committed tables untouched
            return Err(anyhow!("injected failure while deleting company {}", id));
        }

        working.companies.remove(&id.into_raw());
        report.companies_deleted = 1;

        *tables = working;
        Ok(Some(report))
    }

    async fn count_companies(&self) -> Result<i64> {
        self.enter(StoreOperation::CountCompanies)?;
        Ok(self.tables.lock().unwrap().companies.len() as i64)
    }

    async fn find_job(&self, id: JobId) -> Result<Option<Job>> {
        self.enter(StoreOperation::FindJob)?;
        Ok(self.tables.lock().unwrap().jobs.get(&id.into_raw()).cloned())
    }

    async fn find_job_with_company(&self, id: JobId) -> Result<Option<JobWithCompany>> {
        self.enter(StoreOperation::FindJob)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables.jobs.get(&id.into_raw()).map(|job| tables.with_company(job)))
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<JobWithCompany>> {
        self.enter(StoreOperation::ListJobs)?;
        let tables = self.tables.lock().unwrap();
        let mut jobs: Vec<JobWithCompany> = tables
            .jobs
            .values()
            .map(|job| tables.with_company(job))
            .filter(|job| filter.matches(job))
            .collect();
        jobs.sort_by(|a, b| listing_order(&a.job, &b.job));
        Ok(jobs)
    }

    async fn list_featured_jobs(&self, limit: i64) -> Result<Vec<JobWithCompany>> {
        self.enter(StoreOperation::ListFeaturedJobs)?;
        let tables = self.tables.lock().unwrap();
        let mut jobs: Vec<JobWithCompany> = tables
            .jobs
            .values()
            .filter(|job| job.featured)
            .map(|job| tables.with_company(job))
            .collect();
        jobs.sort_by(|a, b| listing_order(&a.job, &b.job));
        jobs.truncate(limit.max(0) as usize);
        Ok(jobs)
    }

    async fn insert_job(&self, input: &CreateJob) -> Result<Job> {
        self.enter(StoreOperation::InsertJob)?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.companies.contains_key(&input.company_id.into_raw()) {
            bail!("jobs_company_id_fkey violated: company {} does not exist", input.company_id);
        }
        let job = build_job(&mut tables, input);
        tables.jobs.insert(job.id.into_raw(), job.clone());
        Ok(job)
    }

    async fn update_job(&self, id: JobId, input: &UpdateJob) -> Result<Option<Job>> {
        self.enter(StoreOperation::UpdateJob)?;
        let mut tables = self.tables.lock().unwrap();
        if let Some(company_id) = input.company_id {
            if !tables.companies.contains_key(&company_id.into_raw()) {
                bail!("jobs_company_id_fkey violated: company {} does not exist", company_id);
            }
        }
        Ok(tables.jobs.get_mut(&id.into_raw()).map(|job| {
            input.apply_to(job);
            job.updated_at = Utc::now();
            job.clone()
        }))
    }

    async fn delete_job_cascade(&self, id: JobId) -> Result<Option<CascadeReport>> {
        self.enter(StoreOperation::DeleteJob)?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.jobs.contains_key(&id.into_raw()) {
            return Ok(None);
        }
        let mut working = tables.clone();
        let mut report = CascadeReport::default();
        working.remove_job(id, &mut report);

        if self.mid_cascade_failure() {
            return Err(anyhow!("injected failure while deleting job {}", id));
        }

        *tables = working;
        Ok(Some(report))
    }

    async fn count_jobs(&self) -> Result<i64> {
        self.enter(StoreOperation::CountJobs)?;
        Ok(self.tables.lock().unwrap().jobs.len() as i64)
    }

    async fn insert_application(&self, input: &CreateApplication) -> Result<Application> {
        self.enter(StoreOperation::InsertApplication)?;
        let mut tables = self.tables.lock().unwrap();
        if !tables.jobs.contains_key(&input.job_id.into_raw()) {
            bail!("applications_job_id_fkey violated: job {} does not exist", input.job_id);
        }
        if input.resume.is_empty() {
            bail!("applications_resume_check violated");
        }
        let application = Application {
            id: ApplicationId::from_raw(Tables::next_id(&mut tables.next_application)),
            job_id: input.job_id,
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            resume: input.resume.clone(),
            cover_letter: input.cover_letter.clone(),
            created_at: Utc::now(),
        };
        tables
            .applications
            .insert(application.id.into_raw(), application.clone());
        Ok(application)
    }

    async fn list_applications(&self) -> Result<Vec<ApplicationWithJob>> {
        self.enter(StoreOperation::ListApplications)?;
        let tables = self.tables.lock().unwrap();
        // newest first; ids grow with insertion order
        Ok(tables
            .applications
            .values()
            .rev()
            .map(|a| ApplicationWithJob {
                application: a.clone(),
                job_title: tables.jobs.get(&a.job_id.into_raw()).map(|j| j.title.clone()),
            })
            .collect())
    }

    async fn list_applications_for_job(&self, job_id: JobId) -> Result<Vec<Application>> {
        self.enter(StoreOperation::ListApplications)?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .applications
            .values()
            .rev()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect())
    }

    async fn delete_application(&self, id: ApplicationId) -> Result<Option<Application>> {
        self.enter(StoreOperation::DeleteApplication)?;
        Ok(self.tables.lock().unwrap().applications.remove(&id.into_raw()))
    }

    async fn count_applications(&self) -> Result<i64> {
        self.enter(StoreOperation::CountApplications)?;
        Ok(self.tables.lock().unwrap().applications.len() as i64)
    }
}
