//! Company read paths. Storage failures are logged and degrade to empty results.

use tracing::error;

use crate::common::CompanyId;
use crate::domains::companies::data::CompanyProfile;
use crate::domains::companies::models::Company;
use crate::domains::jobs::models::JobFilter;
use crate::kernel::ServerDeps;

/// All companies, alphabetical
pub async fn list_companies(deps: &ServerDeps) -> Vec<Company> {
    deps.store.list_companies().await.unwrap_or_else(|e| {
        error!(error = %e, "Failed to list companies");
        Vec::new()
    })
}

pub async fn get_company(id: CompanyId, deps: &ServerDeps) -> Option<Company> {
    deps.store.find_company(id).await.unwrap_or_else(|e| {
        error!(company_id = %id, error = %e, "Failed to load company");
        None
    })
}

/// Company with its jobs in listing order
pub async fn get_company_profile(id: CompanyId, deps: &ServerDeps) -> Option<CompanyProfile> {
    let company = get_company(id, deps).await?;

    let filter = JobFilter {
        company_id: Some(id),
        ..Default::default()
    };
    let jobs = deps.store.list_jobs(&filter).await.unwrap_or_else(|e| {
        error!(company_id = %id, error = %e, "Failed to load company jobs");
        Vec::new()
    });

    Some(CompanyProfile { company, jobs })
}
