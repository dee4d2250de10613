//! Load companies and their jobs from a JSON file into the database.
//!
//! Companies whose name already exists are skipped together with their jobs.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use jobboard_core::common::CompanyId;
use jobboard_core::domains::companies::models::CreateCompany;
use jobboard_core::domains::companies::CreateCompanyInput;
use jobboard_core::domains::jobs::CreateJobInput;
use jobboard_core::kernel::{BaseStore, PostgresStore};
use serde::Deserialize;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seed_jobs")]
#[command(about = "Seed companies and jobs from a JSON file")]
struct Cli {
    /// Seed file path
    #[arg(long, default_value = "data/jobs_seed.json")]
    file: String,

    /// Validate the file without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct SeedData {
    companies: Vec<SeedCompany>,
}

#[derive(Debug, Deserialize)]
struct SeedCompany {
    #[serde(flatten)]
    company: CreateCompanyInput,
    logo: Option<String>,
    #[serde(default)]
    jobs: Vec<SeedJob>,
}

#[derive(Debug, Deserialize)]
struct SeedJob {
    title: String,
    location: String,
    salary: Option<String>,
    #[serde(rename = "type")]
    job_type: String,
    category: String,
    description: String,
    requirements: String,
    benefits: String,
    #[serde(default)]
    featured: bool,
    posted_at: Option<DateTime<Utc>>,
}

impl SeedJob {
    fn into_input(self, company_id: CompanyId) -> CreateJobInput {
        CreateJobInput {
            title: self.title,
            company_id,
            location: self.location,
            salary: self.salary,
            job_type: self.job_type,
            category: self.category,
            description: self.description,
            requirements: self.requirements,
            benefits: self.benefits,
            featured: Some(self.featured),
            posted_at: self.posted_at,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let raw = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read seed file {}", cli.file))?;
    let seed: SeedData = serde_json::from_str(&raw).context("Failed to parse seed data")?;
    tracing::info!(companies = seed.companies.len(), "Seed data loaded");

    // Validate everything up front so a bad entry writes nothing
    for entry in &seed.companies {
        let input = entry.company.clone().normalized();
        input
            .validate()
            .with_context(|| format!("Invalid company {:?}", input.name))?;
    }

    if cli.dry_run {
        tracing::info!("Dry run, nothing written");
        return Ok(());
    }

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let store = PostgresStore::new(pool);

    let existing: Vec<String> = store
        .list_companies()
        .await?
        .into_iter()
        .map(|c| c.name.to_lowercase())
        .collect();

    let (mut companies_created, mut jobs_created, mut skipped) = (0, 0, 0);

    for entry in seed.companies {
        let input = entry.company.normalized();
        if existing.contains(&input.name.to_lowercase()) {
            tracing::info!(name = %input.name, "Company exists, skipping");
            skipped += 1;
            continue;
        }

        let company = store
            .insert_company(&CreateCompany {
                name: input.name,
                logo: entry.logo,
                description: input.description,
                founded: input.founded,
                location: input.location,
                employees: input.employees,
                website: input.website,
                email: input.email,
            })
            .await?;
        companies_created += 1;

        for job in entry.jobs {
            let row = job
                .into_input(company.id)
                .into_row()
                .with_context(|| format!("Invalid job for {}", company.name))?;
            store.insert_job(&row).await?;
            jobs_created += 1;
        }

        tracing::info!(company_id = %company.id, name = %company.name, "Company seeded");
    }

    tracing::info!(companies_created, jobs_created, skipped, "Seeding complete");
    Ok(())
}
