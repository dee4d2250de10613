//! Dashboard counters

use serde::Serialize;
use tracing::error;

use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Analytics {
    pub total_jobs: i64,
    pub total_companies: i64,
    pub total_applications: i64,
}

/// Row counts; any storage failure yields zeros for the whole snapshot.
pub async fn get_analytics(deps: &ServerDeps) -> Analytics {
    let counts = tokio::try_join!(
        deps.store.count_jobs(),
        deps.store.count_companies(),
        deps.store.count_applications()
    );

    match counts {
        Ok((total_jobs, total_companies, total_applications)) => Analytics {
            total_jobs,
            total_companies,
            total_applications,
        },
        Err(e) => {
            error!(error = %e, "Failed to load analytics");
            Analytics::default()
        }
    }
}
