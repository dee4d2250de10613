use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// What happens to logo/resume blobs after their rows are deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetRetention {
    /// Keep the blobs; deletions only report them
    #[default]
    Retain,
    /// Remove reported blobs right after a successful delete
    Purge,
}

impl FromStr for AssetRetention {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" => Ok(Self::Retain),
            "purge" => Ok(Self::Purge),
            other => bail!("Invalid asset retention policy: {}", other),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub resume_bucket: String,
    pub asset_bucket: String,
    /// Without a key, outgoing email is logged instead of sent
    pub resend_api_key: Option<String>,
    pub email_from: String,
    /// Operator inbox for contact messages and new-application notices
    pub notification_email: String,
    pub allowed_origins: Vec<String>,
    pub asset_retention: AssetRetention,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            supabase_url: env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?,
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .context("SUPABASE_SERVICE_ROLE_KEY must be set")?,
            resume_bucket: env::var("RESUME_BUCKET").unwrap_or_else(|_| "resumes".to_string()),
            asset_bucket: env::var("ASSET_BUCKET")
                .unwrap_or_else(|_| "company-assets".to_string()),
            resend_api_key: env::var("RESEND_API_KEY").ok().filter(|k| !k.is_empty()),
            email_from: env::var("EMAIL_FROM").unwrap_or_else(|_| {
                "Yendaakye Jobs Center <info@yendaakyejobscenter.com>".to_string()
            }),
            notification_email: env::var("NOTIFICATION_EMAIL")
                .context("NOTIFICATION_EMAIL must be set")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            asset_retention: env::var("ASSET_RETENTION")
                .ok()
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
