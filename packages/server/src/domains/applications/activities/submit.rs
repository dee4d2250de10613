//! Application submission pipeline
//!
//! validate -> job lookup -> resume upload -> insert -> notify (concurrently)
//!
//! Nothing touches storage until validation passes. A failed insert removes
//! the resume it just uploaded. Emails are best-effort: their failures are
//! logged and reported in the outcome but never fail the submission.

use tracing::{error, info, warn};

use crate::common::uploads::unique_object_path;
use crate::common::{JobBoardError, JobId};
use crate::domains::applications::data::{
    ApplicationInput, NotificationOutcome, SubmittedApplication,
};
use crate::domains::applications::emails;
use crate::domains::applications::models::{Application, CreateApplication};
use crate::domains::assets::discard_blob;
use crate::kernel::{ServerDeps, View};

const RESUME_FOLDER: &str = "resumes";

pub async fn submit_application(
    job_id: JobId,
    input: ApplicationInput,
    deps: &ServerDeps,
) -> Result<SubmittedApplication, JobBoardError> {
    let input = input.normalized();
    input.check()?;
    let resume = input
        .resume
        .ok_or_else(|| JobBoardError::invalid("resume", "Resume is required"))?;

    let job = deps
        .store
        .find_job(job_id)
        .await
        .map_err(JobBoardError::Persistence)?
        .ok_or_else(|| JobBoardError::not_found("Job", job_id))?;

    info!(job_id = %job_id, size = resume.size(), "Submitting application");

    let path = unique_object_path(RESUME_FOLDER, &input.name, "pdf");
    let resume_url = deps
        .blob_storage
        .upload(
            &deps.settings.resume_bucket,
            &path,
            resume.bytes.clone(),
            &resume.content_type,
        )
        .await
        .map_err(|e| {
            error!(job_id = %job_id, error = %e, "Resume upload failed");
            JobBoardError::Upload(e)
        })?;

    let row = CreateApplication {
        job_id,
        name: input.name,
        email: input.email,
        phone: input.phone,
        resume: resume_url.clone(),
        cover_letter: input.cover_letter,
    };

    let application = match deps.store.insert_application(&row).await {
        Ok(application) => application,
        Err(e) => {
            error!(job_id = %job_id, error = %e, "Failed to save application");
            discard_blob(&resume_url, "application insert failed", deps).await;
            return Err(JobBoardError::Persistence(e));
        }
    };

    info!(application_id = %application.id, job_id = %job_id, "Application saved");

    let confirmation = emails::applicant_confirmation(&application, &job, &resume);
    let notice = emails::employer_notification(
        &application,
        &job,
        &resume,
        &deps.settings.notification_email,
    );
    let (applicant, employer) = tokio::join!(
        deps.email.send(&confirmation),
        deps.email.send(&notice)
    );

    let notifications = NotificationOutcome {
        applicant_notified: delivered(applicant, &application, "applicant confirmation"),
        employer_notified: delivered(employer, &application, "employer notification"),
    };

    deps.invalidator
        .invalidate(&[View::JobDetail(job_id), View::Dashboard])
        .await;

    Ok(SubmittedApplication {
        application,
        notifications,
    })
}

fn delivered(result: anyhow::Result<()>, application: &Application, email: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(application_id = %application.id, email, error = %e, "Email not sent");
            false
        }
    }
}
