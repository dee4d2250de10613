//! Admin views of applications

use tracing::{error, info};

use crate::common::{ApplicationId, CascadeReport, JobBoardError, JobId};
use crate::domains::applications::models::{Application, ApplicationWithJob};
use crate::kernel::{ServerDeps, View};

/// Every application, newest first, with its job title
pub async fn list_applications(deps: &ServerDeps) -> Vec<ApplicationWithJob> {
    deps.store.list_applications().await.unwrap_or_else(|e| {
        error!(error = %e, "Failed to list applications");
        Vec::new()
    })
}

pub async fn list_applications_for_job(job_id: JobId, deps: &ServerDeps) -> Vec<Application> {
    deps.store
        .list_applications_for_job(job_id)
        .await
        .unwrap_or_else(|e| {
            error!(job_id = %job_id, error = %e, "Failed to list applications");
            Vec::new()
        })
}

/// Remove one application. Its resume is reported, not deleted.
pub async fn delete_application(
    id: ApplicationId,
    deps: &ServerDeps,
) -> Result<CascadeReport, JobBoardError> {
    info!(application_id = %id, "Deleting application");

    let application = deps
        .store
        .delete_application(id)
        .await
        .map_err(JobBoardError::Persistence)?
        .ok_or_else(|| JobBoardError::not_found("Application", id))?;

    let mut report = CascadeReport {
        applications_deleted: 1,
        ..Default::default()
    };
    report.record_asset(Some(application.resume));

    deps.invalidator
        .invalidate(&[View::JobDetail(application.job_id), View::Dashboard])
        .await;
    Ok(report)
}
