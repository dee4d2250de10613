use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

/// Raw file received from a form field.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercased extension of the original file name, if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    }
}

/// Lowercase ASCII slug: alphanumerics kept, everything else collapsed to `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("file");
    }
    slug
}

/// Collision-resistant object path: `<folder>/<slug>-<unix millis>-<token>.<ext>`.
pub fn unique_object_path(folder: &str, label: &str, extension: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "{}/{}-{}-{}.{}",
        folder,
        slugify(label),
        Utc::now().timestamp_millis(),
        &token[..8],
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Ama  Mensah-Boateng! "), "ama-mensah-boateng");
        assert_eq!(slugify("***"), "file");
    }

    #[test]
    fn unique_paths_differ_for_same_label() {
        let a = unique_object_path("resumes", "Kofi Owusu", "pdf");
        let b = unique_object_path("resumes", "Kofi Owusu", "pdf");
        assert!(a.starts_with("resumes/kofi-owusu-"));
        assert!(a.ends_with(".pdf"));
        assert_ne!(a, b);
    }

    #[test]
    fn extension_is_lowercased() {
        let file = FileUpload::new("Logo.PNG", "image/png", vec![1u8, 2, 3]);
        assert_eq!(file.extension().as_deref(), Some("png"));
        assert_eq!(FileUpload::new("noext", "x", Vec::<u8>::new()).extension(), None);
    }
}
