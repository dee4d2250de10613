//! Pure Resend transactional email API client.
//!
//! # Example
//!
//! ```rust,ignore
//! use resend_client::{ResendClient, SendEmailRequest};
//!
//! let client = ResendClient::new("re_123".into());
//! let sent = client
//!     .send(&SendEmailRequest {
//!         from: "Jobs <info@example.com>".into(),
//!         to: vec!["someone@example.com".into()],
//!         subject: "Hello".into(),
//!         text: Some("Hi there".into()),
//!         html: None,
//!         reply_to: None,
//!         attachments: vec![],
//!     })
//!     .await?;
//! println!("sent {}", sent.id);
//! ```

pub mod error;
pub mod types;

pub use error::{ResendError, Result};
pub use types::{Attachment, SendEmailRequest, SendEmailResponse};

const BASE_URL: &str = "https://api.resend.com";

pub struct ResendClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ResendClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    /// Point the client at a different API host (local relays, test servers).
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send one email.
    pub async fn send(&self, request: &SendEmailRequest) -> Result<SendEmailResponse> {
        let url = format!("{}/emails", self.base_url);

        tracing::debug!(
            to = ?request.to,
            subject = %request.subject,
            attachments = request.attachments.len(),
            "Sending email"
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ResendError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}
