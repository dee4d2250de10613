//! Plain-text bodies for the two submission emails.

use crate::common::FileUpload;
use crate::domains::applications::models::Application;
use crate::domains::jobs::models::Job;
use crate::kernel::{EmailAttachment, EmailMessage};

pub const COVER_LETTER_PREVIEW_CHARS: usize = 150;

/// First 150 characters of the cover letter, with an ellipsis when cut.
pub fn cover_letter_preview(cover_letter: Option<&str>) -> String {
    let Some(text) = cover_letter else {
        return "No cover letter provided".to_string();
    };
    let mut chars = text.chars();
    let preview: String = chars.by_ref().take(COVER_LETTER_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Confirmation sent to the applicant
pub fn applicant_confirmation(application: &Application, job: &Job, resume: &FileUpload) -> EmailMessage {
    let text = format!(
        "Dear {name},\n\n\
         Thank you for applying for {title}. We have received your application \
         and documents. Here's a summary of what we received:\n\n\
         Full Name: {name}\n\
         Email Address: {email}\n\
         Phone Number: {phone}\n\
         CV Document: {cv}\n\n\
         Cover Letter Preview:\n\"{preview}\"\n\n\
         Our team will review your application and contact you if your profile \
         matches the role.\n",
        name = application.name,
        title = job.title,
        email = application.email,
        phone = application.phone.as_deref().unwrap_or("Not provided"),
        cv = resume.file_name,
        preview = cover_letter_preview(application.cover_letter.as_deref()),
    );

    EmailMessage {
        to: vec![application.email.clone()],
        subject: format!("Application received: {}", job.title),
        text,
        reply_to: None,
        attachments: Vec::new(),
    }
}

/// Notice to the employer inbox, resume attached
pub fn employer_notification(
    application: &Application,
    job: &Job,
    resume: &FileUpload,
    inbox: &str,
) -> EmailMessage {
    let text = format!(
        "A new application was submitted for {title} (job #{job_id}).\n\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Resume: {resume_url}\n\n\
         Cover Letter:\n{cover}\n",
        title = job.title,
        job_id = job.id,
        name = application.name,
        email = application.email,
        phone = application.phone.as_deref().unwrap_or("Not provided"),
        resume_url = application.resume,
        cover = application
            .cover_letter
            .as_deref()
            .unwrap_or("No cover letter provided"),
    );

    EmailMessage {
        to: vec![inbox.to_string()],
        subject: format!("New application for {}: {}", job.title, application.name),
        text,
        reply_to: Some(application.email.clone()),
        attachments: vec![EmailAttachment {
            filename: resume.file_name.clone(),
            content: resume.bytes.clone(),
            content_type: resume.content_type.clone(),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_cover_letter_is_kept_whole() {
        assert_eq!(cover_letter_preview(Some("Hire me")), "Hire me");
        assert_eq!(cover_letter_preview(None), "No cover letter provided");
    }

    #[test]
    fn long_cover_letter_is_cut_on_char_boundary() {
        let letter = "é".repeat(200);
        let preview = cover_letter_preview(Some(&letter));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), COVER_LETTER_PREVIEW_CHARS + 3);
    }

    #[test]
    fn exactly_150_chars_has_no_ellipsis() {
        let letter = "a".repeat(COVER_LETTER_PREVIEW_CHARS);
        assert_eq!(cover_letter_preview(Some(&letter)), letter);
    }
}
