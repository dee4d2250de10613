//! Blob cleanup. Deleting rows never removes their files; these helpers
//! are the explicit, best-effort way to do it.

use serde::Serialize;
use tracing::{info, warn};

use crate::kernel::ServerDeps;

/// Outcome of a purge; failures are listed, not raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub removed: Vec<String>,
    pub failed: Vec<String>,
}

/// Delete the given blobs, one by one, continuing past failures.
pub async fn purge_assets(urls: &[String], deps: &ServerDeps) -> PurgeReport {
    let mut report = PurgeReport::default();
    for url in urls {
        let url = url.trim();
        if url.is_empty() || report.removed.iter().any(|u| u == url) {
            continue;
        }
        match deps.blob_storage.delete(url).await {
            Ok(()) => report.removed.push(url.to_string()),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to purge asset");
                report.failed.push(url.to_string());
            }
        }
    }
    info!(
        removed = report.removed.len(),
        failed = report.failed.len(),
        "Asset purge finished"
    );
    report
}

/// Remove one blob, logging instead of failing.
pub async fn discard_blob(url: &str, reason: &str, deps: &ServerDeps) {
    if let Err(e) = deps.blob_storage.delete(url).await {
        warn!(url = %url, reason, error = %e, "Failed to delete blob");
    }
}
