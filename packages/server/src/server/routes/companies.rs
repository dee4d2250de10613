//! Public company endpoints

use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::common::CompanyId;
use crate::domains::companies::activities::{get_company_profile, list_companies};
use crate::domains::companies::{Company, CompanyProfile};
use crate::server::app::AppState;
use crate::server::error::{ok, ApiError, ApiResponse};

pub async fn list_companies_handler(
    Extension(state): Extension<AppState>,
) -> Json<ApiResponse<Vec<Company>>> {
    ok(list_companies(&state.deps).await)
}

/// Company profile with its jobs
pub async fn get_company_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<CompanyId>,
) -> Result<Json<ApiResponse<CompanyProfile>>, ApiError> {
    get_company_profile(id, &state.deps)
        .await
        .map(ok)
        .ok_or(ApiError::NotFound("Company"))
}
