//! View invalidation: tells the presentation layer which rendered pages are
//! stale after a write.

use std::fmt;

use serde_json::json;
use tracing::debug;

use super::stream_hub::StreamHub;
use crate::common::{CompanyId, JobId};

pub const VIEWS_TOPIC: &str = "views";

/// A rendered page that depends on store contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Jobs,
    JobDetail(JobId),
    CompanyProfile(CompanyId),
    Dashboard,
}

impl View {
    pub fn path(&self) -> String {
        match self {
            View::Home => "/".to_string(),
            View::Jobs => "/jobs".to_string(),
            View::JobDetail(id) => format!("/jobs/{}", id),
            View::CompanyProfile(id) => format!("/companies/{}", id),
            View::Dashboard => "/dashboard".to_string(),
        }
    }

    /// Views every catalog change touches.
    pub fn listings() -> Vec<View> {
        vec![View::Home, View::Jobs, View::Dashboard]
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Clone)]
pub struct ViewInvalidator {
    hub: StreamHub,
}

impl ViewInvalidator {
    pub fn new(hub: StreamHub) -> Self {
        Self { hub }
    }

    /// Broadcast `{"type":"invalidate","paths":[...]}` on the views topic.
    pub async fn invalidate(&self, views: &[View]) {
        let mut paths: Vec<String> = Vec::with_capacity(views.len());
        for view in views {
            let path = view.path();
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        let receivers = self
            .hub
            .publish(VIEWS_TOPIC, json!({"type": "invalidate", "paths": paths}))
            .await;
        debug!(?paths, receivers, "views invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_page_routes() {
        assert_eq!(View::Home.path(), "/");
        assert_eq!(View::JobDetail(JobId::from_raw(12)).path(), "/jobs/12");
        assert_eq!(View::CompanyProfile(CompanyId::from_raw(3)).to_string(), "/companies/3");
    }

    #[tokio::test]
    async fn invalidate_publishes_deduplicated_paths() {
        let hub = StreamHub::new();
        let mut rx = hub.subscribe(VIEWS_TOPIC).await;
        let invalidator = ViewInvalidator::new(hub);

        invalidator
            .invalidate(&[View::Jobs, View::Dashboard, View::Jobs])
            .await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event["type"], "invalidate");
        assert_eq!(event["paths"], serde_json::json!(["/jobs", "/dashboard"]));
    }
}
