use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{CascadeReport, CompanyId};

/// Company - employer that owns job postings
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub logo: Option<String>, // public URL in blob storage
    pub description: Option<String>,
    pub founded: Option<String>,   // free-text year
    pub location: Option<String>,
    pub employees: Option<String>, // free-text band, e.g. "50-100"
    pub website: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row values for a new company (logo already uploaded)
#[derive(Debug, Clone, Default)]
pub struct CreateCompany {
    pub name: String,
    pub logo: Option<String>,
    pub description: Option<String>,
    pub founded: Option<String>,
    pub location: Option<String>,
    pub employees: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
}

/// Patch for an existing company.
///
/// `None` leaves a column untouched; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub logo: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub founded: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub employees: Option<Option<String>>,
    pub website: Option<Option<String>>,
    pub email: Option<Option<String>>,
}

impl UpdateCompany {
    /// Apply the patch to an in-memory copy.
    pub fn apply_to(&self, company: &mut Company) {
        if let Some(name) = &self.name {
            company.name = name.clone();
        }
        patch_field(&mut company.logo, &self.logo);
        patch_field(&mut company.description, &self.description);
        patch_field(&mut company.founded, &self.founded);
        patch_field(&mut company.location, &self.location);
        patch_field(&mut company.employees, &self.employees);
        patch_field(&mut company.website, &self.website);
        patch_field(&mut company.email, &self.email);
    }
}

fn patch_field(target: &mut Option<String>, patch: &Option<Option<String>>) {
    if let Some(value) = patch {
        *target = value.clone();
    }
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Company {
    /// Find company by ID
    pub async fn find_by_id(id: CompanyId, pool: &PgPool) -> Result<Option<Self>> {
        let company = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(company)
    }

    /// All companies, alphabetical
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let companies =
            sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name, id")
                .fetch_all(pool)
                .await?;
        Ok(companies)
    }

    pub async fn create(input: &CreateCompany, pool: &PgPool) -> Result<Self> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                name, logo, description, founded, location, employees, website, email
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.logo)
        .bind(&input.description)
        .bind(&input.founded)
        .bind(&input.location)
        .bind(&input.employees)
        .bind(&input.website)
        .bind(&input.email)
        .fetch_one(pool)
        .await?;
        Ok(company)
    }

    /// Patch a company. Returns `None` if the row does not exist.
    pub async fn update(id: CompanyId, input: &UpdateCompany, pool: &PgPool) -> Result<Option<Self>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies SET
                name = COALESCE($2, name),
                logo = CASE WHEN $3 THEN $4 ELSE logo END,
                description = CASE WHEN $5 THEN $6 ELSE description END,
                founded = CASE WHEN $7 THEN $8 ELSE founded END,
                location = CASE WHEN $9 THEN $10 ELSE location END,
                employees = CASE WHEN $11 THEN $12 ELSE employees END,
                website = CASE WHEN $13 THEN $14 ELSE website END,
                email = CASE WHEN $15 THEN $16 ELSE email END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.logo.is_some())
        .bind(input.logo.clone().flatten())
        .bind(input.description.is_some())
        .bind(input.description.clone().flatten())
        .bind(input.founded.is_some())
        .bind(input.founded.clone().flatten())
        .bind(input.location.is_some())
        .bind(input.location.clone().flatten())
        .bind(input.employees.is_some())
        .bind(input.employees.clone().flatten())
        .bind(input.website.is_some())
        .bind(input.website.clone().flatten())
        .bind(input.email.is_some())
        .bind(input.email.clone().flatten())
        .fetch_optional(pool)
        .await?;
        Ok(company)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM companies")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete a company with its jobs and their applications in one transaction.
    ///
    /// Children go first (applications, then jobs, then the company) so the
    /// foreign keys hold at every step. Returns `None` if the company does
    /// not exist; nothing is changed in that case.
    pub async fn delete_cascade(id: CompanyId, pool: &PgPool) -> Result<Option<CascadeReport>> {
        let mut tx = pool.begin().await?;

        // Row lock blocks concurrent job inserts against this company
        let logo: Option<Option<String>> =
            sqlx::query_scalar("SELECT logo FROM companies WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(logo) = logo else {
            return Ok(None);
        };

        let resumes: Vec<String> = sqlx::query_scalar(
            r#"
            DELETE FROM applications
            WHERE job_id IN (SELECT id FROM jobs WHERE company_id = $1)
            RETURNING resume
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let jobs_deleted = sqlx::query("DELETE FROM jobs WHERE company_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let companies_deleted = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        let mut report = CascadeReport {
            companies_deleted,
            jobs_deleted,
            applications_deleted: resumes.len() as u64,
            orphaned_assets: Vec::new(),
        };
        report.record_asset(logo);
        for resume in resumes {
            report.record_asset(Some(resume));
        }
        Ok(Some(report))
    }
}
