use serde::Serialize;

/// What a cascading delete removed, and which blobs it left behind.
///
/// Rows are deleted; their logo/resume objects are not. `orphaned_assets`
/// lists those URLs so the caller can apply its retention policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub companies_deleted: u64,
    pub jobs_deleted: u64,
    pub applications_deleted: u64,
    pub orphaned_assets: Vec<String>,
}

impl CascadeReport {
    /// Blank and already-listed URLs are skipped.
    pub fn record_asset(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            if !self.orphaned_assets.contains(&url) {
                self.orphaned_assets.push(url);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assets_are_listed_once_in_order() {
        let mut report = CascadeReport::default();
        report.record_asset(Some("https://cdn.example.com/logo.png".into()));
        report.record_asset(None);
        report.record_asset(Some("   ".into()));
        report.record_asset(Some("https://cdn.example.com/a.pdf".into()));
        report.record_asset(Some("https://cdn.example.com/logo.png".into()));

        assert_eq!(
            report.orphaned_assets,
            vec![
                "https://cdn.example.com/logo.png".to_string(),
                "https://cdn.example.com/a.pdf".to_string(),
            ]
        );
    }
}
