use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::common::patch::{non_blank, non_blank_patch};
use crate::common::{CompanyId, FieldErrors, JobBoardError};
use crate::domains::jobs::models::{CreateJob, JobCategory, JobType, UpdateJob};

/// Input for posting a job.
///
/// `type` and `category` arrive as text so that unknown values become field
/// errors rather than request rejections.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJobInput {
    #[validate(length(min = 1, max = 256, message = "Title must be 1-256 characters"))]
    pub title: String,
    pub company_id: CompanyId,
    #[validate(length(min = 1, max = 256, message = "Location must be 1-256 characters"))]
    pub location: String,
    #[validate(length(max = 100, message = "Salary must be at most 100 characters"))]
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub category: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Requirements are required"))]
    pub requirements: String,
    #[validate(length(min = 1, message = "Benefits are required"))]
    pub benefits: String,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
}

impl CreateJobInput {
    /// Validate and convert into row values.
    pub fn into_row(self) -> Result<CreateJob, JobBoardError> {
        let input = Self {
            title: self.title.trim().to_string(),
            location: self.location.trim().to_string(),
            salary: non_blank(self.salary),
            description: self.description.trim().to_string(),
            requirements: self.requirements.trim().to_string(),
            benefits: self.benefits.trim().to_string(),
            ..self
        };

        let mut errors = FieldErrors::new();
        if let Err(e) = input.validate() {
            errors.merge_validator(&e);
        }
        let job_type = parse_field::<JobType>("type", &input.job_type, "Invalid job type", &mut errors);
        let category =
            parse_field::<JobCategory>("category", &input.category, "Invalid category", &mut errors);
        errors.into_result()?;

        match (job_type, category) {
            (Some(job_type), Some(category)) => Ok(CreateJob {
                title: input.title,
                company_id: input.company_id,
                location: input.location,
                salary: input.salary,
                job_type,
                category,
                description: input.description,
                requirements: input.requirements,
                benefits: input.benefits,
                featured: input.featured.unwrap_or(false),
                posted_at: input.posted_at,
            }),
            _ => Err(JobBoardError::invalid("type", "Invalid job type")),
        }
    }
}

/// Patch for a job. Only `salary` can be cleared.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateJobInput {
    #[validate(length(min = 1, max = 256, message = "Title must be 1-256 characters"))]
    pub title: Option<String>,
    pub company_id: Option<CompanyId>,
    #[validate(length(min = 1, max = 256, message = "Location must be 1-256 characters"))]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "crate::common::double_option")]
    pub salary: Option<Option<String>>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub category: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Requirements are required"))]
    pub requirements: Option<String>,
    #[validate(length(min = 1, message = "Benefits are required"))]
    pub benefits: Option<String>,
    pub featured: Option<bool>,
}

impl UpdateJobInput {
    pub fn into_patch(self) -> Result<UpdateJob, JobBoardError> {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
        let input = Self {
            title: trim(self.title),
            location: trim(self.location),
            salary: non_blank_patch(self.salary),
            description: trim(self.description),
            requirements: trim(self.requirements),
            benefits: trim(self.benefits),
            ..self
        };

        let mut errors = FieldErrors::new();
        if let Err(e) = input.validate() {
            errors.merge_validator(&e);
        }
        if let Some(Some(salary)) = &input.salary {
            if salary.chars().count() > 100 {
                errors.add("salary", "Salary must be at most 100 characters");
            }
        }
        let job_type = input
            .job_type
            .as_deref()
            .and_then(|t| parse_field::<JobType>("type", t, "Invalid job type", &mut errors));
        let category = input
            .category
            .as_deref()
            .and_then(|c| parse_field::<JobCategory>("category", c, "Invalid category", &mut errors));
        errors.into_result()?;

        Ok(UpdateJob {
            title: input.title,
            company_id: input.company_id,
            location: input.location,
            salary: input.salary,
            job_type,
            category,
            description: input.description,
            requirements: input.requirements,
            benefits: input.benefits,
            featured: input.featured,
        })
    }
}

fn parse_field<T: std::str::FromStr>(
    field: &str,
    raw: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, message);
            None
        }
    }
}
