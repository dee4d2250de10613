use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ApplicationId, JobId};

/// A candidate's submission against one job
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume: String, // public URL of the uploaded PDF
    pub cover_letter: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Admin dashboard row: application plus the title of its job
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ApplicationWithJob {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub application: Application,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub job_id: JobId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub resume: String,
    pub cover_letter: Option<String>,
}

impl Application {
    pub async fn find_by_id(id: ApplicationId, pool: &PgPool) -> Result<Option<Self>> {
        let application =
            sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(application)
    }

    /// Every application, newest first
    pub async fn find_all_with_job(pool: &PgPool) -> Result<Vec<ApplicationWithJob>> {
        let rows = sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.*, j.title AS job_title
            FROM applications a
            LEFT JOIN jobs j ON j.id = a.job_id
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_job(job_id: JobId, pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE job_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(job_id)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(input: &CreateApplication, pool: &PgPool) -> Result<Self> {
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, name, email, phone, resume, cover_letter)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.job_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.resume)
        .bind(&input.cover_letter)
        .fetch_one(pool)
        .await?;
        Ok(application)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete one row and return it. Returns `None` when it does not exist.
    pub async fn delete(id: ApplicationId, pool: &PgPool) -> Result<Option<Self>> {
        let application = sqlx::query_as::<_, Application>(
            "DELETE FROM applications WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(application)
    }
}
