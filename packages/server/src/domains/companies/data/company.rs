use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::patch::{non_blank, non_blank_patch};
use crate::common::validation::{is_web_url, MAX_UPLOAD_BYTES};
use crate::common::{FieldErrors, FileUpload, JobBoardError};
use crate::domains::companies::models::Company;
use crate::domains::jobs::models::JobWithCompany;

/// Where a company's logo comes from
#[derive(Debug, Clone)]
pub enum LogoInput {
    /// Already hosted somewhere; stored as given
    Url(String),
    /// Raw image bytes to upload (JPEG or PNG, at most 5MB)
    Upload(FileUpload),
}

pub const LOGO_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

impl LogoInput {
    fn check(&self, errors: &mut FieldErrors) {
        match self {
            LogoInput::Url(url) => {
                if !is_web_url(url) {
                    errors.add("logo", "Logo must be a valid URL");
                }
            }
            LogoInput::Upload(file) => {
                if file.is_empty() {
                    errors.add("logo", "Logo file is empty");
                }
                if !LOGO_CONTENT_TYPES.contains(&logo_content_type(file).as_str()) {
                    errors.add("logo", "Logo must be a JPEG or PNG image");
                }
                if file.size() > MAX_UPLOAD_BYTES {
                    errors.add("logo", "Logo must be less than 5MB");
                }
            }
        }
    }
}

/// Declared content type, or one guessed from the file name when the
/// client sent a generic type.
pub fn logo_content_type(file: &FileUpload) -> String {
    let declared = file.content_type.trim().to_ascii_lowercase();
    if declared.is_empty() || declared == "application/octet-stream" {
        mime_guess::from_path(&file.file_name)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string()
    } else {
        declared
    }
}

/// Field rules shared by create and update. Absent fields are skipped.
#[derive(Debug, Default, Validate)]
struct CompanyFieldRules {
    #[validate(length(min = 1, max = 256, message = "Company name must be 1-256 characters"))]
    name: Option<String>,
    #[validate(length(max = 50, message = "Founded must be at most 50 characters"))]
    founded: Option<String>,
    #[validate(length(max = 256, message = "Location must be at most 256 characters"))]
    location: Option<String>,
    #[validate(length(max = 50, message = "Employees must be at most 50 characters"))]
    employees: Option<String>,
    #[validate(length(max = 512, message = "Website must be at most 512 characters"))]
    website: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    email: Option<String>,
}

impl CompanyFieldRules {
    fn check(self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Some(website) = &self.website {
            if !is_web_url(website) {
                errors.add("website", "Website must be a valid URL");
            }
        }
        if let Err(e) = self.validate() {
            errors.merge_validator(&e);
        }
        errors
    }
}

/// Input for creating a company
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCompanyInput {
    pub name: String,
    pub description: Option<String>,
    pub founded: Option<String>,
    pub location: Option<String>,
    pub employees: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    #[serde(skip)]
    pub logo: Option<LogoInput>,
}

impl CreateCompanyInput {
    /// Trim text and treat blanks as absent.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: non_blank(self.description),
            founded: non_blank(self.founded),
            location: non_blank(self.location),
            employees: non_blank(self.employees),
            website: non_blank(self.website),
            email: non_blank(self.email),
            logo: self.logo,
        }
    }

    pub fn validate(&self) -> Result<(), JobBoardError> {
        let mut errors = CompanyFieldRules {
            name: Some(self.name.clone()),
            founded: self.founded.clone(),
            location: self.location.clone(),
            employees: self.employees.clone(),
            website: self.website.clone(),
            email: self.email.clone(),
        }
        .check();
        if let Some(logo) = &self.logo {
            logo.check(&mut errors);
        }
        errors.into_result()
    }
}

/// Patch for a company. `None` leaves a field alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyInput {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::common::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::common::double_option")]
    pub founded: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::common::double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::common::double_option")]
    pub employees: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::common::double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::common::double_option")]
    pub email: Option<Option<String>>,
    #[serde(skip)]
    pub logo: Option<Option<LogoInput>>,
}

impl UpdateCompanyInput {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            description: non_blank_patch(self.description),
            founded: non_blank_patch(self.founded),
            location: non_blank_patch(self.location),
            employees: non_blank_patch(self.employees),
            website: non_blank_patch(self.website),
            email: non_blank_patch(self.email),
            logo: self.logo,
        }
    }

    pub fn validate(&self) -> Result<(), JobBoardError> {
        let mut errors = CompanyFieldRules {
            name: self.name.clone(),
            founded: self.founded.clone().flatten(),
            location: self.location.clone().flatten(),
            employees: self.employees.clone().flatten(),
            website: self.website.clone().flatten(),
            email: self.email.clone().flatten(),
        }
        .check();
        if let Some(Some(logo)) = &self.logo {
            logo.check(&mut errors);
        }
        errors.into_result()
    }
}

/// Company page: the company and its open jobs in listing order
#[derive(Debug, Clone, Serialize)]
pub struct CompanyProfile {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobWithCompany>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(size: usize) -> FileUpload {
        FileUpload::new("logo.png", "image/png", vec![0u8; size])
    }

    #[test]
    fn blank_name_is_rejected() {
        let input = CreateCompanyInput {
            name: "   ".into(),
            ..Default::default()
        }
        .normalized();
        let err = input.validate().unwrap_err();
        assert!(err.field_errors().unwrap().contains("name"));
    }

    #[test]
    fn minimal_company_is_valid() {
        let input = CreateCompanyInput {
            name: "Acme".into(),
            website: Some("  ".into()),
            ..Default::default()
        }
        .normalized();
        assert!(input.website.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn bad_contact_fields_are_reported_per_field() {
        let input = CreateCompanyInput {
            name: "Acme".into(),
            website: Some("acme dot com".into()),
            email: Some("not-an-email".into()),
            founded: Some("x".repeat(51)),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains("website"));
        assert_eq!(errors.messages("email"), ["Invalid email address"]);
        assert!(errors.contains("founded"));
    }

    #[test]
    fn logo_upload_must_be_small_png_or_jpeg() {
        let gif = CreateCompanyInput {
            name: "Acme".into(),
            logo: Some(LogoInput::Upload(FileUpload::new("a.gif", "image/gif", vec![1u8]))),
            ..Default::default()
        };
        assert_eq!(
            gif.validate().unwrap_err().field_errors().unwrap().messages("logo"),
            ["Logo must be a JPEG or PNG image"]
        );

        let huge = CreateCompanyInput {
            name: "Acme".into(),
            logo: Some(LogoInput::Upload(png(MAX_UPLOAD_BYTES + 1))),
            ..Default::default()
        };
        assert_eq!(
            huge.validate().unwrap_err().field_errors().unwrap().messages("logo"),
            ["Logo must be less than 5MB"]
        );
    }

    #[test]
    fn octet_stream_logo_falls_back_to_file_name() {
        let file = FileUpload::new("brand.JPG", "application/octet-stream", vec![1u8]);
        assert_eq!(logo_content_type(&file), "image/jpeg");
    }

    #[test]
    fn update_clears_with_blank_and_skips_absent_fields() {
        let input = UpdateCompanyInput {
            location: Some(Some(" ".into())),
            ..Default::default()
        }
        .normalized();
        assert_eq!(input.location, Some(None));
        assert!(input.name.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn update_with_empty_name_is_rejected() {
        let input = UpdateCompanyInput {
            name: Some(" ".into()),
            ..Default::default()
        }
        .normalized();
        assert!(input.validate().is_err());
    }
}
