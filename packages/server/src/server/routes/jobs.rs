//! Public job endpoints

use axum::{
    extract::{Extension, Multipart, Path, Query},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::common::patch::non_blank;
use crate::common::{CompanyId, FieldErrors, JobBoardError, JobId};
use crate::domains::applications::activities::submit_application;
use crate::domains::applications::{ApplicationInput, SubmittedApplication};
use crate::domains::jobs::activities::{get_job_by_id, list_featured_jobs, list_jobs};
use crate::domains::jobs::models::{JobCategory, JobFilter, JobType, JobWithCompany};
use crate::server::app::AppState;
use crate::server::error::{ok, ok_with_message, ApiError, ApiResponse, ResultExt};
use crate::server::routes::multipart::FormData;

/// Listing query string. Blank or "all" means no filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub category: Option<String>,
    pub company_id: Option<CompanyId>,
}

impl ListingQuery {
    fn into_filter(self) -> Result<JobFilter, JobBoardError> {
        let mut errors = FieldErrors::new();
        let job_type = selection(self.job_type).and_then(|t| match t.parse::<JobType>() {
            Ok(t) => Some(t),
            Err(_) => {
                errors.add("type", "Invalid job type");
                None
            }
        });
        let category = selection(self.category).and_then(|c| match c.parse::<JobCategory>() {
            Ok(c) => Some(c),
            Err(_) => {
                errors.add("category", "Invalid category");
                None
            }
        });
        errors.into_result()?;

        Ok(JobFilter {
            search: self.search,
            location: self.location,
            job_type,
            category,
            company_id: self.company_id,
        })
    }
}

fn selection(value: Option<String>) -> Option<String> {
    non_blank(value).filter(|v| !v.eq_ignore_ascii_case("all"))
}

pub async fn list_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Json<ApiResponse<Vec<JobWithCompany>>>, ApiError> {
    let filter = query.into_filter().for_action("list jobs")?;
    Ok(ok(list_jobs(filter, &state.deps).await))
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

pub async fn featured_jobs_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<FeaturedQuery>,
) -> Json<ApiResponse<Vec<JobWithCompany>>> {
    ok(list_featured_jobs(query.limit, &state.deps).await)
}

pub async fn get_job_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<JobId>,
) -> Result<Json<ApiResponse<JobWithCompany>>, ApiError> {
    get_job_by_id(id, &state.deps)
        .await
        .map(ok)
        .ok_or(ApiError::NotFound("Job"))
}

/// Multipart fields: name, email, phone, cover_letter, resume (file)
pub async fn submit_application_handler(
    Extension(state): Extension<AppState>,
    Path(job_id): Path<JobId>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<SubmittedApplication>>), ApiError> {
    let mut form = FormData::read(multipart).await?;

    let input = ApplicationInput {
        name: form.text("name").unwrap_or_default(),
        email: form.text("email").unwrap_or_default(),
        phone: form.text("phone"),
        cover_letter: form.text("cover_letter"),
        resume: form.take_file("resume"),
    };

    let submitted = submit_application(job_id, input, &state.deps)
        .await
        .for_action("submit application")?;

    Ok((
        StatusCode::CREATED,
        ok_with_message("Application submitted successfully", submitted),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_and_blank_selections_are_ignored() {
        let filter = ListingQuery {
            job_type: Some("all".into()),
            category: Some(" ".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter, JobFilter::default());
    }

    #[test]
    fn unknown_selection_is_a_field_error() {
        let err = ListingQuery {
            job_type: Some("Gig".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap_err();
        assert!(err.field_errors().unwrap().contains("type"));
    }
}
