use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CascadeReport, CompanyId, JobId};

// =============================================================================
// Enumerations
// =============================================================================

/// Employment type of a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub const ALL: [JobType; 5] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Contract,
        JobType::Internship,
        JobType::Remote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Internship => "Internship",
            JobType::Remote => "Remote",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| anyhow!("Invalid job type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobCategory {
    Technology,
    Marketing,
    Finance,
    Healthcare,
    Education,
    Engineering,
    Sales,
    #[serde(rename = "HR")]
    Hr,
    Design,
    Operations,
    Research,
    Administration,
}

impl JobCategory {
    pub const ALL: [JobCategory; 12] = [
        JobCategory::Technology,
        JobCategory::Marketing,
        JobCategory::Finance,
        JobCategory::Healthcare,
        JobCategory::Education,
        JobCategory::Engineering,
        JobCategory::Sales,
        JobCategory::Hr,
        JobCategory::Design,
        JobCategory::Operations,
        JobCategory::Research,
        JobCategory::Administration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Technology => "Technology",
            JobCategory::Marketing => "Marketing",
            JobCategory::Finance => "Finance",
            JobCategory::Healthcare => "Healthcare",
            JobCategory::Education => "Education",
            JobCategory::Engineering => "Engineering",
            JobCategory::Sales => "Sales",
            JobCategory::Hr => "HR",
            JobCategory::Design => "Design",
            JobCategory::Operations => "Operations",
            JobCategory::Research => "Research",
            JobCategory::Administration => "Administration",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| anyhow!("Invalid job category: {}", s))
    }
}

// =============================================================================
// Rows
// =============================================================================

/// Job posting
///
/// `job_type` and `category` are stored as text; the table's CHECK
/// constraints keep them inside the enumerations above.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company_id: CompanyId,
    pub location: String,
    pub salary: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub job_type: String,
    pub category: String,
    pub description: String,
    pub requirements: String,
    pub benefits: String,
    pub featured: bool,
    pub posted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a company embedded in every listing row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySummary {
    pub id: CompanyId,
    pub name: String,
    pub logo: Option<String>,
    pub location: Option<String>,
}

impl CompanySummary {
    pub const UNKNOWN_NAME: &'static str = "Unknown Company";

    /// Stand-in for a job whose company row is gone.
    pub fn unknown(id: CompanyId) -> Self {
        Self {
            id,
            name: Self::UNKNOWN_NAME.to_string(),
            logo: None,
            location: None,
        }
    }
}

/// A job joined with its owning company
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobWithCompany {
    #[serde(flatten)]
    pub job: Job,
    pub company: CompanySummary,
}

/// Raw LEFT JOIN row; company columns are null when the company is missing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobListingRow {
    #[sqlx(flatten)]
    pub job: Job,
    pub company_name: Option<String>,
    pub company_logo: Option<String>,
    pub company_location: Option<String>,
}

impl From<JobListingRow> for JobWithCompany {
    fn from(row: JobListingRow) -> Self {
        let company = match row.company_name {
            Some(name) => CompanySummary {
                id: row.job.company_id,
                name,
                logo: row.company_logo,
                location: row.company_location,
            },
            None => CompanySummary::unknown(row.job.company_id),
        };
        JobWithCompany {
            job: row.job,
            company,
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// Listing filter. Every field is optional; set fields combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilter {
    /// Substring of title, description or company name
    pub search: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub category: Option<JobCategory>,
    pub company_id: Option<CompanyId>,
}

impl JobFilter {
    /// Blank text options count as absent.
    pub fn normalized(self) -> Self {
        Self {
            search: crate::common::patch::non_blank(self.search),
            location: crate::common::patch::non_blank(self.location),
            ..self
        }
    }

    /// In-memory evaluation with the same semantics as the SQL below.
    pub fn matches(&self, job: &JobWithCompany) -> bool {
        if let Some(search) = &self.search {
            let hit = contains_ci(&job.job.title, search)
                || contains_ci(&job.job.description, search)
                || contains_ci(&job.company.name, search);
            if !hit {
                return false;
            }
        }
        if let Some(location) = &self.location {
            if !contains_ci(&job.job.location, location) {
                return false;
            }
        }
        if let Some(job_type) = self.job_type {
            if job.job.job_type != job_type.as_str() {
                return false;
            }
        }
        if let Some(category) = self.category {
            if job.job.category != category.as_str() {
                return false;
            }
        }
        if let Some(company_id) = self.company_id {
            if job.job.company_id != company_id {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `%needle%` for ILIKE with `%`, `_` and `\` matched literally.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Listing order: featured first, newest first, then by id.
pub fn listing_order(a: &Job, b: &Job) -> std::cmp::Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.posted_at.cmp(&a.posted_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Row values for a new job
#[derive(Debug, Clone)]
pub struct CreateJob {
    pub title: String,
    pub company_id: CompanyId,
    pub location: String,
    pub salary: Option<String>,
    pub job_type: JobType,
    pub category: JobCategory,
    pub description: String,
    pub requirements: String,
    pub benefits: String,
    pub featured: bool,
    pub posted_at: Option<DateTime<Utc>>,
}

/// Patch for a job. `salary` is the only nullable column.
#[derive(Debug, Clone, Default)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub company_id: Option<CompanyId>,
    pub location: Option<String>,
    pub salary: Option<Option<String>>,
    pub job_type: Option<JobType>,
    pub category: Option<JobCategory>,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub featured: Option<bool>,
}

impl UpdateJob {
    pub fn apply_to(&self, job: &mut Job) {
        if let Some(v) = &self.title {
            job.title = v.clone();
        }
        if let Some(v) = self.company_id {
            job.company_id = v;
        }
        if let Some(v) = &self.location {
            job.location = v.clone();
        }
        if let Some(v) = &self.salary {
            job.salary = v.clone();
        }
        if let Some(v) = self.job_type {
            job.job_type = v.to_string();
        }
        if let Some(v) = self.category {
            job.category = v.to_string();
        }
        if let Some(v) = &self.description {
            job.description = v.clone();
        }
        if let Some(v) = &self.requirements {
            job.requirements = v.clone();
        }
        if let Some(v) = &self.benefits {
            job.benefits = v.clone();
        }
        if let Some(v) = self.featured {
            job.featured = v;
        }
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

const LISTING_SELECT: &str = r#"
    SELECT j.*,
           c.name AS company_name,
           c.logo AS company_logo,
           c.location AS company_location
    FROM jobs j
    LEFT JOIN companies c ON c.id = j.company_id
"#;

impl Job {
    pub async fn find_by_id(id: JobId, pool: &PgPool) -> Result<Option<Self>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(job)
    }

    /// Filtered listing joined with companies, in listing order.
    pub async fn find_listing(filter: &JobFilter, pool: &PgPool) -> Result<Vec<JobWithCompany>> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL
                   OR j.title ILIKE $1
                   OR j.description ILIKE $1
                   OR c.name ILIKE $1)
              AND ($2::text IS NULL OR j.location ILIKE $2)
              AND ($3::text IS NULL OR j.type = $3)
              AND ($4::text IS NULL OR j.category = $4)
              AND ($5::int IS NULL OR j.company_id = $5)
            ORDER BY j.featured DESC, j.posted_at DESC, j.id ASC
            "#,
            LISTING_SELECT
        );

        let rows = sqlx::query_as::<_, JobListingRow>(&sql)
            .bind(filter.search.as_deref().map(like_pattern))
            .bind(filter.location.as_deref().map(like_pattern))
            .bind(filter.job_type.map(|t| t.as_str()))
            .bind(filter.category.map(|c| c.as_str()))
            .bind(filter.company_id)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(JobWithCompany::from).collect())
    }

    /// Featured jobs, most recent first.
    pub async fn find_featured(limit: i64, pool: &PgPool) -> Result<Vec<JobWithCompany>> {
        let sql = format!(
            "{} WHERE j.featured = true ORDER BY j.posted_at DESC, j.id ASC LIMIT $1",
            LISTING_SELECT
        );
        let rows = sqlx::query_as::<_, JobListingRow>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(JobWithCompany::from).collect())
    }

    pub async fn find_with_company(id: JobId, pool: &PgPool) -> Result<Option<JobWithCompany>> {
        let sql = format!("{} WHERE j.id = $1", LISTING_SELECT);
        let row = sqlx::query_as::<_, JobListingRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(JobWithCompany::from))
    }

    pub async fn create(input: &CreateJob, pool: &PgPool) -> Result<Self> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (
                title, company_id, location, salary, type, category,
                description, requirements, benefits, featured, posted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, NOW()))
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(input.company_id)
        .bind(&input.location)
        .bind(&input.salary)
        .bind(input.job_type.as_str())
        .bind(input.category.as_str())
        .bind(&input.description)
        .bind(&input.requirements)
        .bind(&input.benefits)
        .bind(input.featured)
        .bind(input.posted_at)
        .fetch_one(pool)
        .await?;
        Ok(job)
    }

    pub async fn update(id: JobId, input: &UpdateJob, pool: &PgPool) -> Result<Option<Self>> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                company_id = COALESCE($3, company_id),
                location = COALESCE($4, location),
                salary = CASE WHEN $5 THEN $6 ELSE salary END,
                type = COALESCE($7, type),
                category = COALESCE($8, category),
                description = COALESCE($9, description),
                requirements = COALESCE($10, requirements),
                benefits = COALESCE($11, benefits),
                featured = COALESCE($12, featured),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.title)
        .bind(input.company_id)
        .bind(&input.location)
        .bind(input.salary.is_some())
        .bind(input.salary.clone().flatten())
        .bind(input.job_type.map(|t| t.as_str()))
        .bind(input.category.map(|c| c.as_str()))
        .bind(&input.description)
        .bind(&input.requirements)
        .bind(&input.benefits)
        .bind(input.featured)
        .fetch_optional(pool)
        .await?;
        Ok(job)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete a job and its applications in one transaction.
    pub async fn delete_cascade(id: JobId, pool: &PgPool) -> Result<Option<CascadeReport>> {
        let mut tx = pool.begin().await?;

        let exists: Option<i32> = sqlx::query_scalar("SELECT id FROM jobs WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let resumes: Vec<String> =
            sqlx::query_scalar("DELETE FROM applications WHERE job_id = $1 RETURNING resume")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        let jobs_deleted = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        let mut report = CascadeReport {
            jobs_deleted,
            applications_deleted: resumes.len() as u64,
            ..Default::default()
        };
        for resume in resumes {
            report.record_asset(Some(resume));
        }
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn job(id: i32, featured: bool, age_days: i64) -> Job {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        Job {
            id: JobId::from_raw(id),
            title: "Backend Engineer".into(),
            company_id: CompanyId::from_raw(1),
            location: "Accra, Ghana".into(),
            salary: None,
            job_type: "Full-time".into(),
            category: "Technology".into(),
            description: "Build APIs".into(),
            requirements: "Rust".into(),
            benefits: "Health".into(),
            featured,
            posted_at: now - Duration::days(age_days),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn job_type_round_trips_through_display() {
        for t in JobType::ALL {
            assert_eq!(t.to_string().parse::<JobType>().unwrap(), t);
        }
        assert!("Freelance".parse::<JobType>().is_err());
        assert_eq!(serde_json::to_value(JobType::FullTime).unwrap(), "Full-time");
    }

    #[test]
    fn hr_category_uses_acronym() {
        assert_eq!(JobCategory::Hr.to_string(), "HR");
        assert_eq!("HR".parse::<JobCategory>().unwrap(), JobCategory::Hr);
        assert!("hr".parse::<JobCategory>().is_err());
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("dev"), "%dev%");
        assert_eq!(like_pattern("100%_x\\"), "%100\\%\\_x\\\\%");
    }

    #[test]
    fn listing_order_puts_featured_then_newest_first() {
        let mut jobs = vec![job(1, false, 0), job(2, true, 5), job(3, true, 1), job(4, true, 1)];
        jobs.sort_by(listing_order);
        let ids: Vec<i32> = jobs.iter().map(|j| j.id.into_raw()).collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn missing_company_becomes_sentinel() {
        let row = JobListingRow {
            job: job(7, false, 0),
            company_name: None,
            company_logo: None,
            company_location: None,
        };
        let listed = JobWithCompany::from(row);
        assert_eq!(listed.company.name, "Unknown Company");
        assert_eq!(listed.company.id, CompanyId::from_raw(1));
        assert!(listed.company.logo.is_none());
    }

    #[test]
    fn filter_search_is_disjunctive_and_case_insensitive() {
        let listed = JobWithCompany {
            job: job(1, false, 0),
            company: CompanySummary {
                id: CompanyId::from_raw(1),
                name: "Acme".into(),
                logo: None,
                location: None,
            },
        };
        let by_company = JobFilter {
            search: Some("acme".into()),
            ..Default::default()
        };
        let by_title_wrong_type = JobFilter {
            search: Some("backend".into()),
            job_type: Some(JobType::Contract),
            ..Default::default()
        };
        assert!(by_company.matches(&listed));
        assert!(!by_title_wrong_type.matches(&listed));
        assert!(JobFilter::default().matches(&listed));
    }
}
