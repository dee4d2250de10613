//! Listing queries for the public job pages.
//!
//! Read paths never fail: storage errors are logged and degrade to an empty
//! list or `None`.

use tracing::{debug, error};

use crate::common::JobId;
use crate::domains::jobs::models::{JobFilter, JobWithCompany};
use crate::kernel::ServerDeps;

pub const DEFAULT_FEATURED_LIMIT: i64 = 6;

/// Filtered job list: featured first, then newest, then by id.
pub async fn list_jobs(filter: JobFilter, deps: &ServerDeps) -> Vec<JobWithCompany> {
    let filter = filter.normalized();
    debug!(?filter, "Listing jobs");

    deps.store.list_jobs(&filter).await.unwrap_or_else(|e| {
        error!(error = %e, "Failed to list jobs");
        Vec::new()
    })
}

/// Featured jobs for the home page, most recent first
pub async fn list_featured_jobs(limit: Option<i64>, deps: &ServerDeps) -> Vec<JobWithCompany> {
    let limit = limit.unwrap_or(DEFAULT_FEATURED_LIMIT).max(0);
    if limit == 0 {
        return Vec::new();
    }

    deps.store
        .list_featured_jobs(limit)
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, "Failed to list featured jobs");
            Vec::new()
        })
}

pub async fn get_job_by_id(id: JobId, deps: &ServerDeps) -> Option<JobWithCompany> {
    deps.store
        .find_job_with_company(id)
        .await
        .unwrap_or_else(|e| {
            error!(job_id = %id, error = %e, "Failed to load job");
            None
        })
}
