use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::common::validation::is_person_name;
use crate::common::{FieldErrors, JobBoardError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryType {
    General,
    JobInquiry,
    Partnership,
    Support,
    JobPosting,
}

impl InquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::General => "general",
            InquiryType::JobInquiry => "job-inquiry",
            InquiryType::Partnership => "partnership",
            InquiryType::Support => "support",
            InquiryType::JobPosting => "job-posting",
        }
    }
}

impl fmt::Display for InquiryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InquiryType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "job-inquiry" => Ok(Self::JobInquiry),
            "partnership" => Ok(Self::Partnership),
            "support" => Ok(Self::Support),
            "job-posting" => Ok(Self::JobPosting),
            _ => Err(anyhow!("Invalid inquiry type: {}", s)),
        }
    }
}

/// Contact form as posted by the site
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 2, max = 50, message = "First name must be 2-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 2, max = 50, message = "Last name must be 2-50 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(min = 5, max = 100, message = "Email must be 5-100 characters")
    )]
    pub email: String,
    #[validate(length(equal = 10, message = "Phone number must be 10 characters"))]
    pub phone: String,
    /// One of the `InquiryType` values
    pub inquiry_type: String,
    #[validate(length(min = 5, max = 100, message = "Subject must be 5-100 characters"))]
    pub subject: String,
    #[validate(length(min = 10, max = 1000, message = "Message must be 10-1000 characters"))]
    pub message: String,
}

impl ContactForm {
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            inquiry_type: self.inquiry_type.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Validate and return the parsed inquiry type.
    pub fn check(&self) -> Result<InquiryType, JobBoardError> {
        let mut errors = FieldErrors::new();
        if let Err(e) = self.validate() {
            errors.merge_validator(&e);
        }
        for (field, value) in [("first_name", &self.first_name), ("last_name", &self.last_name)] {
            if !value.is_empty() && !is_person_name(value) {
                errors.add(field, "Only letters and spaces are allowed");
            }
        }
        let inquiry = self.inquiry_type.parse::<InquiryType>().ok();
        if inquiry.is_none() {
            errors.add("inquiry_type", "Select an inquiry type");
        }
        errors.into_result()?;
        inquiry.ok_or_else(|| JobBoardError::invalid("inquiry_type", "Select an inquiry type"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            first_name: "Ama".into(),
            last_name: "Mensah".into(),
            email: "ama@example.com".into(),
            phone: "0241234567".into(),
            inquiry_type: "job-posting".into(),
            subject: "Posting roles".into(),
            message: "We would like to post three roles.".into(),
        }
    }

    #[test]
    fn valid_form_yields_inquiry_type() {
        assert_eq!(form().check().unwrap(), InquiryType::JobPosting);
    }

    #[test]
    fn names_with_digits_are_rejected() {
        let err = ContactForm { first_name: "Ama2".into(), ..form() }.check().unwrap_err();
        assert_eq!(
            err.field_errors().unwrap().messages("first_name"),
            ["Only letters and spaces are allowed"]
        );
    }

    #[test]
    fn unknown_inquiry_type_is_rejected() {
        let err = ContactForm { inquiry_type: "spam".into(), ..form() }.check().unwrap_err();
        assert!(err.field_errors().unwrap().contains("inquiry_type"));
    }

    #[test]
    fn short_message_and_phone_are_rejected() {
        let err = ContactForm {
            message: "hi".into(),
            phone: "12345".into(),
            ..form()
        }
        .check()
        .unwrap_err();
        let errors = err.field_errors().unwrap();
        assert!(errors.contains("message"));
        assert_eq!(errors.messages("phone"), ["Phone number must be 10 characters"]);
    }

    #[test]
    fn inquiry_type_uses_kebab_case() {
        assert_eq!(InquiryType::JobInquiry.to_string(), "job-inquiry");
        assert_eq!(serde_json::to_value(InquiryType::JobInquiry).unwrap(), "job-inquiry");
    }
}
