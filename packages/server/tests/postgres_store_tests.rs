//! SQL-backed store behaviour: joins, filters, ordering and transactional
//! cascades against a real Postgres.
//!
//! The database is shared across tests, so every test scopes its
//! assertions to rows it created itself.

mod common;

use test_context::test_context;
use uuid::Uuid;

use crate::common::*;
use jobboard_core::domains::applications::activities::submit_application;
use jobboard_core::domains::companies::activities::{
    delete_company, get_company, update_company,
};
use jobboard_core::domains::companies::UpdateCompanyInput;
use jobboard_core::domains::jobs::activities::{delete_job, get_job_by_id, list_featured_jobs, list_jobs};
use jobboard_core::domains::jobs::{JobFilter, JobType};

fn unique(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().simple().to_string()[..8])
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn company_round_trip_and_partial_update(ctx: &TestHarness) {
    let deps = ctx.deps();
    let mut input = company_input(&unique("Acme"));
    input.website = Some("https://acme.example.com".into());
    let company = jobboard_core::domains::companies::activities::create_company(input, &deps)
        .await
        .unwrap();

    let updated = update_company(
        company.id,
        UpdateCompanyInput {
            description: Some(Some("Now with description".into())),
            website: Some(None),
            ..Default::default()
        },
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(updated.name, company.name);
    assert_eq!(updated.description.as_deref(), Some("Now with description"));
    assert_eq!(updated.website, None);
    assert_eq!(updated.location.as_deref(), Some("Accra"));

    let loaded = get_company(company.id, &deps).await.unwrap();
    assert_eq!(loaded.description, updated.description);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn listing_sql_filters_orders_and_joins(ctx: &TestHarness) {
    let deps = ctx.deps();
    let company = seed_company(&deps, &unique("Listing Co")).await;
    let token = unique("zebra");

    let mut older = job_input(company.id, &format!("{} analyst", token));
    older.posted_at = Some(days_ago(3));
    seed_job(&deps, older).await;

    let mut featured = job_input(company.id, &format!("{} engineer", token));
    featured.featured = Some(true);
    featured.posted_at = Some(days_ago(10));
    featured.job_type = "Remote".into();
    seed_job(&deps, featured).await;

    let mut newest = job_input(company.id, &format!("{} designer", token));
    newest.posted_at = Some(days_ago(1));
    seed_job(&deps, newest).await;

    let all = list_jobs(
        JobFilter {
            search: Some(token.to_uppercase()),
            ..Default::default()
        },
        &deps,
    )
    .await;
    let titles: Vec<&str> = all.iter().map(|j| j.job.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            format!("{} engineer", token),
            format!("{} designer", token),
            format!("{} analyst", token),
        ]
    );
    assert!(all.iter().all(|j| j.company.name == company.name));

    let remote = list_jobs(
        JobFilter {
            company_id: Some(company.id),
            job_type: Some(JobType::Remote),
            ..Default::default()
        },
        &deps,
    )
    .await;
    assert_eq!(remote.len(), 1);

    let wildcard = list_jobs(
        JobFilter {
            company_id: Some(company.id),
            search: Some("%".into()),
            ..Default::default()
        },
        &deps,
    )
    .await;
    assert!(wildcard.is_empty());

    let featured = list_featured_jobs(Some(100), &deps).await;
    assert!(featured.iter().all(|j| j.job.featured));
    assert!(featured.iter().any(|j| j.job.company_id == company.id));
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn company_cascade_runs_in_one_transaction(ctx: &TestHarness) {
    let deps = ctx.deps();
    let company = seed_company(&deps, &unique("Cascade Co")).await;
    let busy = seed_job(&deps, job_input(company.id, "Backend Engineer")).await;
    let quiet = seed_job(&deps, job_input(company.id, "Sales Associate")).await;
    for name in ["Kwame", "Akosua", "Yaw"] {
        submit_application(
            busy.id,
            application_input(name, &format!("{}@example.com", name.to_lowercase())),
            &deps,
        )
        .await
        .unwrap();
    }

    let report = delete_company(company.id, &deps).await.unwrap();

    assert_eq!(report.companies_deleted, 1);
    assert_eq!(report.jobs_deleted, 2);
    assert_eq!(report.applications_deleted, 3);
    assert_eq!(report.orphaned_assets.len(), 3);
    assert!(get_job_by_id(busy.id, &deps).await.is_none());
    assert!(get_job_by_id(quiet.id, &deps).await.is_none());

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE job_id = $1")
        .bind(busy.id)
        .fetch_one(&ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn job_cascade_reports_resumes(ctx: &TestHarness) {
    let deps = ctx.deps();
    let company = seed_company(&deps, &unique("Job Cascade Co")).await;
    let job = seed_job(&deps, job_input(company.id, "Backend Engineer")).await;
    let submitted = submit_application(
        job.id,
        application_input("Kwame", "kwame@example.com"),
        &deps,
    )
    .await
    .unwrap();

    let report = delete_job(job.id, &deps).await.unwrap();

    assert_eq!(report.jobs_deleted, 1);
    assert_eq!(report.applications_deleted, 1);
    assert_eq!(report.orphaned_assets, vec![submitted.application.resume]);
    assert!(get_company(company.id, &deps).await.is_some());
}
