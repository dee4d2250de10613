// Main entry point for API server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use jobboard_core::kernel::{
    BaseEmailSender, LoggingEmailSender, PostgresStore, ResendEmailSender, ServerDeps,
    ServiceSettings, StreamHub, SupabaseBlobStorage,
};
use jobboard_core::server::{build_app, AppState};
use jobboard_core::Config;
use resend_client::ResendClient;
use sqlx::postgres::PgPoolOptions;
use storage_client::StorageClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobboard_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Yendaakye Jobs Center API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(asset_retention = ?config.asset_retention, "Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let storage = StorageClient::new(
        config.supabase_url.clone(),
        config.supabase_service_role_key.clone(),
    );

    let email: Arc<dyn BaseEmailSender> = match config.resend_api_key.clone() {
        Some(key) => Arc::new(ResendEmailSender::new(
            ResendClient::new(key),
            config.email_from.clone(),
        )),
        None => {
            tracing::warn!("RESEND_API_KEY not set, emails will only be logged");
            Arc::new(LoggingEmailSender)
        }
    };

    let stream_hub = StreamHub::new();
    spawn_stream_pruner(stream_hub.clone());

    let deps = ServerDeps::new(
        Arc::new(PostgresStore::new(pool.clone())),
        Arc::new(SupabaseBlobStorage::new(storage)),
        email,
        stream_hub,
        ServiceSettings {
            resume_bucket: config.resume_bucket.clone(),
            asset_bucket: config.asset_bucket.clone(),
            notification_email: config.notification_email.clone(),
        },
    );

    let state = AppState::new(deps)
        .with_pool(pool)
        .with_asset_retention(config.asset_retention);
    let app = build_app(state, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Drop stream topics nobody listens to anymore
fn spawn_stream_pruner(hub: StreamHub) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(300));
        loop {
            ticker.tick().await;
            let removed = hub.prune().await;
            if removed > 0 {
                tracing::debug!(removed, "Pruned idle stream topics");
            }
        }
    });
}
