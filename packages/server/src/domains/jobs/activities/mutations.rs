//! Job mutations

use tracing::info;

use crate::common::{CascadeReport, CompanyId, JobBoardError, JobId};
use crate::domains::jobs::data::{CreateJobInput, UpdateJobInput};
use crate::domains::jobs::models::Job;
use crate::kernel::{ServerDeps, View};

async fn ensure_company_exists(id: CompanyId, deps: &ServerDeps) -> Result<(), JobBoardError> {
    deps.store
        .find_company(id)
        .await
        .map_err(JobBoardError::Persistence)?
        .map(|_| ())
        .ok_or_else(|| JobBoardError::not_found("Company", id))
}

fn job_views(job: &Job) -> Vec<View> {
    let mut views = View::listings();
    views.push(View::JobDetail(job.id));
    views.push(View::CompanyProfile(job.company_id));
    views
}

pub async fn create_job(input: CreateJobInput, deps: &ServerDeps) -> Result<Job, JobBoardError> {
    let row = input.into_row()?;
    ensure_company_exists(row.company_id, deps).await?;

    info!(title = %row.title, company_id = %row.company_id, "Creating job");

    let job = deps
        .store
        .insert_job(&row)
        .await
        .map_err(JobBoardError::Persistence)?;

    info!(job_id = %job.id, "Job created");
    deps.invalidator.invalidate(&job_views(&job)).await;

    Ok(job)
}

pub async fn update_job(
    id: JobId,
    input: UpdateJobInput,
    deps: &ServerDeps,
) -> Result<Job, JobBoardError> {
    let patch = input.into_patch()?;

    let existing = deps
        .store
        .find_job(id)
        .await
        .map_err(JobBoardError::Persistence)?
        .ok_or_else(|| JobBoardError::not_found("Job", id))?;

    if let Some(company_id) = patch.company_id {
        ensure_company_exists(company_id, deps).await?;
    }

    info!(job_id = %id, "Updating job");

    let job = deps
        .store
        .update_job(id, &patch)
        .await
        .map_err(JobBoardError::Persistence)?
        .ok_or_else(|| JobBoardError::not_found("Job", id))?;

    let mut views = job_views(&job);
    if existing.company_id != job.company_id {
        views.push(View::CompanyProfile(existing.company_id));
    }
    deps.invalidator.invalidate(&views).await;

    Ok(job)
}

/// Delete a job and its applications atomically.
pub async fn delete_job(id: JobId, deps: &ServerDeps) -> Result<CascadeReport, JobBoardError> {
    let job = deps
        .store
        .find_job(id)
        .await
        .map_err(JobBoardError::Persistence)?
        .ok_or_else(|| JobBoardError::not_found("Job", id))?;

    info!(job_id = %id, "Deleting job");

    let report = deps
        .store
        .delete_job_cascade(id)
        .await
        .map_err(JobBoardError::Cascade)?
        .ok_or_else(|| JobBoardError::not_found("Job", id))?;

    info!(
        job_id = %id,
        applications = report.applications_deleted,
        "Job deleted"
    );
    deps.invalidator.invalidate(&job_views(&job)).await;

    Ok(report)
}
