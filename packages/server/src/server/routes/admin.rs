//! Admin surface: company/job/application management and dashboard data.
//!
//! Deletes answer with the cascade report. Under `ASSET_RETENTION=purge`
//! the reported blobs are removed right away and the purge outcome is
//! included in the response.

use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{ApplicationId, CascadeReport, CompanyId, JobId};
use crate::config::AssetRetention;
use crate::domains::analytics::{get_analytics, Analytics};
use crate::domains::applications::activities::{
    delete_application, list_applications, list_applications_for_job,
};
use crate::domains::applications::{Application, ApplicationWithJob};
use crate::domains::assets::{purge_assets, PurgeReport};
use crate::domains::companies::activities::{create_company, delete_company, update_company};
use crate::domains::companies::{Company, CreateCompanyInput, LogoInput, UpdateCompanyInput};
use crate::domains::jobs::activities::{create_job, delete_job, update_job};
use crate::domains::jobs::{CreateJobInput, Job, UpdateJobInput};
use crate::server::app::AppState;
use crate::server::error::{ok, ok_with_message, ApiError, ApiResponse, ResultExt};
use crate::server::routes::multipart::FormData;

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    #[serde(flatten)]
    pub report: CascadeReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purged: Option<PurgeReport>,
}

async fn apply_retention(report: CascadeReport, state: &AppState) -> DeleteResponse {
    let purged = match state.asset_retention {
        AssetRetention::Retain => None,
        AssetRetention::Purge => Some(purge_assets(&report.orphaned_assets, &state.deps).await),
    };
    DeleteResponse { report, purged }
}

// =============================================================================
// Companies
// =============================================================================

/// Logo from the form: an uploaded `logo` file wins over `logo_url`.
fn logo_from_form(form: &mut FormData) -> Option<Option<LogoInput>> {
    if let Some(file) = form.take_file("logo") {
        return Some(Some(LogoInput::Upload(file)));
    }
    form.text("logo_url").map(|url| {
        let url = url.trim().to_string();
        (!url.is_empty()).then_some(LogoInput::Url(url))
    })
}

pub async fn create_company_handler(
    Extension(state): Extension<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Company>>), ApiError> {
    let mut form = FormData::read(multipart).await?;

    let input = CreateCompanyInput {
        name: form.text("name").unwrap_or_default(),
        description: form.text("description"),
        founded: form.text("founded"),
        location: form.text("location"),
        employees: form.text("employees"),
        website: form.text("website"),
        email: form.text("email"),
        logo: logo_from_form(&mut form).flatten(),
    };

    let company = create_company(input, &state.deps)
        .await
        .for_action("create company")?;

    Ok((
        StatusCode::CREATED,
        ok_with_message("Company created successfully", company),
    ))
}

/// Sent fields are updated; a sent-but-empty field is cleared.
pub async fn update_company_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<CompanyId>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let mut form = FormData::read(multipart).await?;

    let input = UpdateCompanyInput {
        name: form.text("name"),
        description: form.text("description").map(Some),
        founded: form.text("founded").map(Some),
        location: form.text("location").map(Some),
        employees: form.text("employees").map(Some),
        website: form.text("website").map(Some),
        email: form.text("email").map(Some),
        logo: logo_from_form(&mut form),
    };

    let company = update_company(id, input, &state.deps)
        .await
        .for_action("update company")?;

    Ok(ok_with_message("Company updated successfully", company))
}

pub async fn delete_company_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<CompanyId>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    let report = delete_company(id, &state.deps)
        .await
        .for_action("delete company")?;

    Ok(ok_with_message(
        "Company deleted successfully",
        apply_retention(report, &state).await,
    ))
}

// =============================================================================
// Jobs
// =============================================================================

pub async fn create_job_handler(
    Extension(state): Extension<AppState>,
    Json(input): Json<CreateJobInput>,
) -> Result<(StatusCode, Json<ApiResponse<Job>>), ApiError> {
    let job = create_job(input, &state.deps)
        .await
        .for_action("create job")?;

    Ok((
        StatusCode::CREATED,
        ok_with_message("Job created successfully", job),
    ))
}

pub async fn update_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<JobId>,
    Json(input): Json<UpdateJobInput>,
) -> Result<Json<ApiResponse<Job>>, ApiError> {
    let job = update_job(id, input, &state.deps)
        .await
        .for_action("update job")?;

    Ok(ok_with_message("Job updated successfully", job))
}

pub async fn delete_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    let report = delete_job(id, &state.deps)
        .await
        .for_action("delete job")?;

    Ok(ok_with_message(
        "Job deleted successfully",
        apply_retention(report, &state).await,
    ))
}

// =============================================================================
// Applications
// =============================================================================

pub async fn list_applications_handler(
    Extension(state): Extension<AppState>,
) -> Json<ApiResponse<Vec<ApplicationWithJob>>> {
    ok(list_applications(&state.deps).await)
}

pub async fn list_job_applications_handler(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<JobId>,
) -> Json<ApiResponse<Vec<Application>>> {
    ok(list_applications_for_job(job_id, &state.deps).await)
}

pub async fn delete_application_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<ApplicationId>,
) -> Result<Json<ApiResponse<DeleteResponse>>, ApiError> {
    let report = delete_application(id, &state.deps)
        .await
        .for_action("delete application")?;

    Ok(ok_with_message(
        "Application deleted successfully",
        apply_retention(report, &state).await,
    ))
}

// =============================================================================
// Dashboard
// =============================================================================

pub async fn analytics_handler(
    Extension(state): Extension<AppState>,
) -> Json<ApiResponse<Analytics>> {
    ok(get_analytics(&state.deps).await)
}

#[derive(Debug, Deserialize)]
pub struct PurgeRequest {
    pub urls: Vec<String>,
}

pub async fn purge_assets_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<PurgeRequest>,
) -> Json<ApiResponse<PurgeReport>> {
    ok(purge_assets(&request.urls, &state.deps).await)
}
