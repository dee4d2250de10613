//! Test fixtures for creating test data.
//!
//! Records go through the same activities the HTTP layer calls, so every
//! fixture is validated and invalidation events fire as in production.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jobboard_core::common::{CompanyId, FileUpload};
use jobboard_core::domains::applications::ApplicationInput;
use jobboard_core::domains::companies::activities::create_company;
use jobboard_core::domains::companies::{Company, CreateCompanyInput};
use jobboard_core::domains::contact::ContactForm;
use jobboard_core::domains::jobs::activities::create_job;
use jobboard_core::domains::jobs::{CreateJobInput, Job};
use jobboard_core::kernel::ServerDeps;

pub const KB: usize = 1024;
pub const MB: usize = 1024 * 1024;

/// Fixed reference time so ordering assertions are deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    base_time() - Duration::days(days)
}

pub fn company_input(name: &str) -> CreateCompanyInput {
    CreateCompanyInput {
        name: name.to_string(),
        location: Some("Accra".to_string()),
        ..Default::default()
    }
}

/// A valid job posting with sensible defaults; adjust fields as needed.
pub fn job_input(company_id: CompanyId, title: &str) -> CreateJobInput {
    CreateJobInput {
        title: title.to_string(),
        company_id,
        location: "Accra".to_string(),
        salary: None,
        job_type: "Full-time".to_string(),
        category: "Technology".to_string(),
        description: format!("{} role", title),
        requirements: "Three years of experience".to_string(),
        benefits: "Health insurance".to_string(),
        featured: Some(false),
        posted_at: Some(base_time()),
    }
}

pub fn pdf(size: usize) -> FileUpload {
    let mut bytes = b"%PDF-1.4\n".to_vec();
    bytes.resize(size.max(bytes.len()), b'0');
    FileUpload::new("resume.pdf", "application/pdf", bytes)
}

pub fn png_logo() -> FileUpload {
    FileUpload::new("logo.png", "image/png", vec![0x89, b'P', b'N', b'G', 0, 0, 0, 0])
}

pub fn application_input(name: &str, email: &str) -> ApplicationInput {
    ApplicationInput {
        name: name.to_string(),
        email: email.to_string(),
        phone: Some("0241234567".to_string()),
        cover_letter: Some("I would love to join the team.".to_string()),
        resume: Some(pdf(100 * KB)),
    }
}

pub fn contact_form() -> ContactForm {
    ContactForm {
        first_name: "Ama".to_string(),
        last_name: "Mensah".to_string(),
        email: "ama@example.com".to_string(),
        phone: "0241234567".to_string(),
        inquiry_type: "job-posting".to_string(),
        subject: "Posting new roles".to_string(),
        message: "We would like to post three openings next month.".to_string(),
    }
}

pub async fn seed_company(deps: &ServerDeps, name: &str) -> Company {
    create_company(company_input(name), deps)
        .await
        .expect("Failed to seed company")
}

pub async fn seed_job(deps: &ServerDeps, input: CreateJobInput) -> Job {
    create_job(input, deps).await.expect("Failed to seed job")
}
