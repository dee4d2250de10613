use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Field-keyed validation messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded for one field (empty when the field is valid).
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fold in the output of a `#[derive(Validate)]` check.
    pub fn merge_validator(&mut self, errors: &validator::ValidationErrors) {
        for (field, list) in errors.field_errors() {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                self.add(field.to_string(), message);
            }
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error.
    pub fn into_result(self) -> Result<(), JobBoardError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(JobBoardError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Error taxonomy shared by every service operation.
#[derive(Debug, Error)]
pub enum JobBoardError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("Upload failed: {0:#}")]
    Upload(anyhow::Error),

    #[error("Persistence failed: {0:#}")]
    Persistence(anyhow::Error),

    #[error("Cascade delete failed: {0:#}")]
    Cascade(anyhow::Error),

    #[error("Notification failed: {0:#}")]
    Notification(anyhow::Error),
}

impl JobBoardError {
    pub fn not_found(entity: &'static str, id: impl Into<i32>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Validation error carrying a single field message.
    pub fn invalid(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Self::Validation(errors)
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Human-readable message safe to show to end users.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Validation(_) => "Please correct the highlighted fields".to_string(),
            Self::NotFound { entity, .. } => format!("{} not found", entity),
            _ => format!("Failed to {}", action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_are_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("resume", "Resume must be a PDF file");
        errors.add("resume", "Resume must be less than 5MB");
        errors.add("email", "Invalid email address");

        assert_eq!(errors.messages("resume").len(), 2);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email", "resume"]);
        assert!(errors.messages("name").is_empty());
    }

    #[test]
    fn user_message_hides_internal_detail() {
        let err = JobBoardError::Persistence(anyhow::anyhow!("connection reset by peer"));
        assert_eq!(err.user_message("create company"), "Failed to create company");
    }

    #[test]
    fn serializes_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.add("name", "Enter your name");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"name": ["Enter your name"]}));
    }
}
