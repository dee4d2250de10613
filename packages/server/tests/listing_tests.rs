//! Public listing queries: filtering, ordering, featured slice and
//! the missing-company fallback.

mod common;

use crate::common::*;
use jobboard_core::domains::companies::activities::get_company_profile;
use jobboard_core::domains::jobs::activities::{
    get_job_by_id, list_featured_jobs, list_jobs, DEFAULT_FEATURED_LIMIT,
};
use jobboard_core::domains::jobs::models::CreateJob;
use jobboard_core::domains::jobs::{CompanySummary, JobCategory, JobFilter, JobType};
use jobboard_core::common::{CompanyId, JobId};
use jobboard_core::kernel::{MemoryStore, StoreOperation, TestDependencies};

fn titles(jobs: &[jobboard_core::domains::jobs::JobWithCompany]) -> Vec<String> {
    jobs.iter().map(|j| j.job.title.clone()).collect()
}

#[tokio::test]
async fn search_matches_title_and_carries_company_name() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    seed_job(&deps, job_input(acme.id, "Backend Engineer")).await;
    let mut sales = job_input(acme.id, "Sales Associate");
    sales.category = "Sales".into();
    seed_job(&deps, sales).await;

    let jobs = list_jobs(
        JobFilter {
            search: Some("backend".into()),
            ..Default::default()
        },
        &deps,
    )
    .await;

    assert_eq!(titles(&jobs), vec!["Backend Engineer"]);
    assert_eq!(jobs[0].company.name, "Acme");
    assert_eq!(jobs[0].company.id, acme.id);
    assert_eq!(jobs[0].company.location.as_deref(), Some("Accra"));
}

#[tokio::test]
async fn search_matches_company_name_and_description() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    let globex = seed_company(&deps, "Globex").await;
    seed_job(&deps, job_input(acme.id, "Designer")).await;
    let mut analyst = job_input(globex.id, "Analyst");
    analyst.description = "Work with the ACME integration team".into();
    seed_job(&deps, analyst).await;
    seed_job(&deps, job_input(globex.id, "Driver")).await;

    let mut found = titles(
        &list_jobs(
            JobFilter {
                search: Some("acme".into()),
                ..Default::default()
            },
            &deps,
        )
        .await,
    );
    found.sort();

    assert_eq!(found, vec!["Analyst", "Designer"]);
}

#[tokio::test]
async fn filters_combine_with_and() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;

    let mut remote_engineer = job_input(acme.id, "Platform Engineer");
    remote_engineer.job_type = "Remote".into();
    seed_job(&deps, remote_engineer).await;

    let mut kumasi_engineer = job_input(acme.id, "Field Engineer");
    kumasi_engineer.location = "Kumasi".into();
    seed_job(&deps, kumasi_engineer).await;

    let mut accountant = job_input(acme.id, "Accountant");
    accountant.category = "Finance".into();
    seed_job(&deps, accountant).await;

    seed_job(&deps, job_input(acme.id, "Support Engineer")).await;

    let jobs = list_jobs(
        JobFilter {
            search: Some("engineer".into()),
            location: Some("accra".into()),
            job_type: Some(JobType::FullTime),
            category: Some(JobCategory::Technology),
            company_id: None,
        },
        &deps,
    )
    .await;

    assert_eq!(titles(&jobs), vec!["Support Engineer"]);
}

#[tokio::test]
async fn blank_filter_values_are_ignored() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    seed_job(&deps, job_input(acme.id, "Backend Engineer")).await;
    seed_job(&deps, job_input(acme.id, "Nurse")).await;

    let jobs = list_jobs(
        JobFilter {
            search: Some("   ".into()),
            location: Some(String::new()),
            ..Default::default()
        },
        &deps,
    )
    .await;

    assert_eq!(jobs.len(), 2);
}

#[tokio::test]
async fn like_wildcards_in_search_are_literal() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    seed_job(&deps, job_input(acme.id, "Backend Engineer")).await;

    let percent = list_jobs(
        JobFilter {
            search: Some("%".into()),
            ..Default::default()
        },
        &deps,
    )
    .await;
    let underscore = list_jobs(
        JobFilter {
            search: Some("_".into()),
            ..Default::default()
        },
        &deps,
    )
    .await;

    assert!(percent.is_empty());
    assert!(underscore.is_empty());
}

#[tokio::test]
async fn listing_puts_featured_first_then_newest() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;

    let mut old_featured = job_input(acme.id, "Old featured");
    old_featured.featured = Some(true);
    old_featured.posted_at = Some(days_ago(30));
    seed_job(&deps, old_featured).await;

    let mut fresh = job_input(acme.id, "Fresh");
    fresh.posted_at = Some(days_ago(0));
    seed_job(&deps, fresh).await;

    let mut week_old = job_input(acme.id, "Week old");
    week_old.posted_at = Some(days_ago(7));
    seed_job(&deps, week_old).await;

    let mut new_featured = job_input(acme.id, "New featured");
    new_featured.featured = Some(true);
    new_featured.posted_at = Some(days_ago(1));
    seed_job(&deps, new_featured).await;

    let jobs = list_jobs(JobFilter::default(), &deps).await;

    assert_eq!(
        titles(&jobs),
        vec!["New featured", "Old featured", "Fresh", "Week old"]
    );
}

#[tokio::test]
async fn same_post_time_falls_back_to_id_order() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    let first = seed_job(&deps, job_input(acme.id, "First")).await;
    let second = seed_job(&deps, job_input(acme.id, "Second")).await;

    let jobs = list_jobs(JobFilter::default(), &deps).await;

    let ids: Vec<JobId> = jobs.iter().map(|j| j.job.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn featured_listing_is_capped_and_only_featured() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    for i in 0..8 {
        let mut input = job_input(acme.id, &format!("Featured {}", i));
        input.featured = Some(true);
        input.posted_at = Some(days_ago(i));
        seed_job(&deps, input).await;
    }
    seed_job(&deps, job_input(acme.id, "Regular")).await;

    let featured = list_featured_jobs(None, &deps).await;

    assert_eq!(featured.len(), DEFAULT_FEATURED_LIMIT as usize);
    assert!(featured.iter().all(|j| j.job.featured));
    assert_eq!(featured[0].job.title, "Featured 0");
    assert_eq!(featured[5].job.title, "Featured 5");
}

#[tokio::test]
async fn featured_limit_is_respected() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    for i in 0..3 {
        let mut input = job_input(acme.id, &format!("Featured {}", i));
        input.featured = Some(true);
        seed_job(&deps, input).await;
    }

    assert_eq!(list_featured_jobs(Some(2), &deps).await.len(), 2);
    assert_eq!(list_featured_jobs(Some(10), &deps).await.len(), 3);
}

#[tokio::test]
async fn non_positive_featured_limit_skips_the_store() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    assert!(list_featured_jobs(Some(0), &deps).await.is_empty());
    assert!(list_featured_jobs(Some(-3), &deps).await.is_empty());
    assert!(!test_deps.store.was_called(StoreOperation::ListFeaturedJobs));
}

#[tokio::test]
async fn job_without_company_gets_placeholder_summary() {
    let store = MemoryStore::new();
    let test_deps = TestDependencies::new().mock_store(store.clone());
    let deps = test_deps.deps();
    let orphan_company = CompanyId::from_raw(999);
    let job = store.seed_job_unchecked(&CreateJob {
        title: "Orphaned role".into(),
        company_id: orphan_company,
        location: "Tema".into(),
        salary: None,
        job_type: JobType::Contract,
        category: JobCategory::Operations,
        description: "Warehouse operations".into(),
        requirements: "Forklift licence".into(),
        benefits: "Overtime pay".into(),
        featured: false,
        posted_at: Some(base_time()),
    });

    let detail = get_job_by_id(job.id, &deps).await.expect("job should be found");

    assert_eq!(detail.company, CompanySummary::unknown(orphan_company));
    assert_eq!(detail.company.name, CompanySummary::UNKNOWN_NAME);
    assert_eq!(detail.job.company_id, orphan_company);

    let listed = list_jobs(JobFilter::default(), &deps).await;
    assert_eq!(listed[0].company.name, "Unknown Company");
}

#[tokio::test]
async fn unknown_job_id_is_none() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();

    assert!(get_job_by_id(JobId::from_raw(42), &deps).await.is_none());
}

#[tokio::test]
async fn store_failures_degrade_to_empty_results() {
    let store = MemoryStore::new()
        .fail_on(StoreOperation::ListJobs)
        .fail_on(StoreOperation::ListFeaturedJobs)
        .fail_on(StoreOperation::FindJob);
    let test_deps = TestDependencies::new().mock_store(store);
    let deps = test_deps.deps();

    assert!(list_jobs(JobFilter::default(), &deps).await.is_empty());
    assert!(list_featured_jobs(None, &deps).await.is_empty());
    assert!(get_job_by_id(JobId::from_raw(1), &deps).await.is_none());
}

#[tokio::test]
async fn company_profile_lists_only_its_jobs() {
    let test_deps = TestDependencies::new();
    let deps = test_deps.deps();
    let acme = seed_company(&deps, "Acme").await;
    let globex = seed_company(&deps, "Globex").await;
    seed_job(&deps, job_input(acme.id, "Backend Engineer")).await;
    seed_job(&deps, job_input(globex.id, "Nurse")).await;

    let profile = get_company_profile(acme.id, &deps)
        .await
        .expect("profile should exist");

    assert_eq!(profile.company.name, "Acme");
    assert_eq!(titles(&profile.jobs), vec!["Backend Engineer"]);
    assert!(get_company_profile(CompanyId::from_raw(404), &deps).await.is_none());
}
