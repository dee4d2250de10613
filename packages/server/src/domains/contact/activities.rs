use tracing::{error, info};

use crate::common::JobBoardError;
use crate::domains::contact::data::ContactForm;
use crate::kernel::{EmailMessage, ServerDeps};

/// Relay a contact form to the operator inbox.
///
/// Sending is the whole operation, so a delivery failure is returned.
pub async fn send_contact_message(form: ContactForm, deps: &ServerDeps) -> Result<(), JobBoardError> {
    let form = form.normalized();
    let inquiry = form.check()?;

    let message = EmailMessage {
        to: vec![deps.settings.notification_email.clone()],
        subject: format!("{}: {}", inquiry, form.subject),
        text: format!(
            "New contact form submission\n\n\
             Name: {} {}\n\
             Email: {}\n\
             Phone: {}\n\
             Inquiry Type: {}\n\
             Subject: {}\n\n\
             Message:\n{}\n",
            form.first_name,
            form.last_name,
            form.email,
            form.phone,
            inquiry,
            form.subject,
            form.message
        ),
        reply_to: Some(form.email.clone()),
        attachments: Vec::new(),
    };

    deps.email.send(&message).await.map_err(|e| {
        error!(inquiry = %inquiry, error = %e, "Failed to send contact message");
        JobBoardError::Notification(e)
    })?;

    info!(inquiry = %inquiry, "Contact message sent");
    Ok(())
}
