use serde::Serialize;

/// Options applied to a single object upload.
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// `Cache-Control: max-age` in seconds served with the object.
    pub cache_control_secs: u32,
    /// Overwrite an existing object at the same path.
    pub upsert: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            cache_control_secs: 3600,
            upsert: false,
        }
    }
}

/// Bucket + object path recovered from a public URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub path: String,
}

/// Body of the bulk-remove endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct RemoveObjects<'a> {
    pub prefixes: &'a [String],
}
