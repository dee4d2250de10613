use serde::Serialize;
use validator::Validate;

use crate::common::patch::non_blank;
use crate::common::validation::{is_ten_digit_phone, MAX_UPLOAD_BYTES};
use crate::common::{FieldErrors, FileUpload, JobBoardError};
use crate::domains::applications::models::Application;

pub const RESUME_CONTENT_TYPE: &str = "application/pdf";

/// What an applicant submits for one job
#[derive(Debug, Clone, Default, Validate)]
pub struct ApplicationInput {
    #[validate(length(min = 3, message = "Enter your name"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub phone: Option<String>,
    pub cover_letter: Option<String>,
    pub resume: Option<FileUpload>,
}

impl ApplicationInput {
    /// Trim text; blank optional fields become absent.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            cover_letter: non_blank(self.cover_letter),
            resume: self.resume,
        }
    }

    /// Check every field without touching storage.
    pub fn check(&self) -> Result<(), JobBoardError> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            errors.merge_validator(&e);
        }

        if let Some(phone) = &self.phone {
            if !is_ten_digit_phone(phone) {
                errors.add("phone", "Phone number must be 10 digits");
            }
        }

        match &self.resume {
            None => errors.add("resume", "Resume is required"),
            Some(file) if file.is_empty() => errors.add("resume", "Resume is required"),
            Some(file) => {
                if file.content_type.trim().to_ascii_lowercase() != RESUME_CONTENT_TYPE {
                    errors.add("resume", "Resume must be a PDF file");
                }
                if file.size() > MAX_UPLOAD_BYTES {
                    errors.add("resume", "Resume must be less than 5MB");
                }
            }
        }

        errors.into_result()
    }
}

/// Which confirmation emails went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationOutcome {
    pub applicant_notified: bool,
    pub employer_notified: bool,
}

/// Result of a successful submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedApplication {
    pub application: Application,
    pub notifications: NotificationOutcome,
}
