//! Application setup and router configuration.

use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::AssetRetention;
use crate::kernel::ServerDeps;
use crate::server::routes::{admin, companies, contact, health_handler, jobs, stream_handler};

/// Upload routes carry a 5MB file plus form overhead
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    /// Present when running against Postgres; used by the health check
    pub db_pool: Option<PgPool>,
    pub asset_retention: AssetRetention,
}

impl AppState {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            deps,
            db_pool: None,
            asset_retention: AssetRetention::default(),
        }
    }

    pub fn with_pool(mut self, pool: PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    pub fn with_asset_retention(mut self, retention: AssetRetention) -> Self {
        self.asset_retention = retention;
        self
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(state: AppState, allowed_origins: &[String]) -> Router {
    let public = Router::new()
        .route("/api/jobs", get(jobs::list_jobs_handler))
        .route("/api/jobs/featured", get(jobs::featured_jobs_handler))
        .route("/api/jobs/:id", get(jobs::get_job_handler))
        .route(
            "/api/jobs/:id/applications",
            post(jobs::submit_application_handler),
        )
        .route("/api/companies", get(companies::list_companies_handler))
        .route("/api/companies/:id", get(companies::get_company_handler))
        .route("/api/contact", post(contact::contact_handler))
        .route("/api/streams/:topic", get(stream_handler));

    let admin = Router::new()
        .route("/api/admin/companies", post(admin::create_company_handler))
        .route(
            "/api/admin/companies/:id",
            delete(admin::delete_company_handler).patch(admin::update_company_handler),
        )
        .route("/api/admin/jobs", post(admin::create_job_handler))
        .route(
            "/api/admin/jobs/:id",
            delete(admin::delete_job_handler).patch(admin::update_job_handler),
        )
        .route(
            "/api/admin/jobs/:id/applications",
            get(admin::list_job_applications_handler),
        )
        .route("/api/admin/applications", get(admin::list_applications_handler))
        .route(
            "/api/admin/applications/:id",
            delete(admin::delete_application_handler),
        )
        .route("/api/admin/analytics", get(admin::analytics_handler))
        .route("/api/admin/assets/purge", post(admin::purge_assets_handler));

    Router::new()
        .route("/health", get(health_handler))
        .merge(public)
        .merge(admin)
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origins))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .layer(Extension(state))
}
