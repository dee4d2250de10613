//! Company mutations: create, update (with logo replacement) and cascading delete.

use tracing::{info, warn};
use uuid::Uuid;

use crate::common::{CascadeReport, CompanyId, FileUpload, JobBoardError};
use crate::domains::assets::discard_blob;
use crate::domains::companies::data::{
    logo_content_type, CreateCompanyInput, LogoInput, UpdateCompanyInput,
};
use crate::domains::companies::models::{Company, CreateCompany, UpdateCompany};
use crate::kernel::{ServerDeps, View};

const LOGO_FOLDER: &str = "company-logos";

/// Upload a logo file and return its public URL
async fn upload_logo(file: &FileUpload, deps: &ServerDeps) -> Result<String, JobBoardError> {
    let content_type = logo_content_type(file);
    // Keep a `.jpeg` name as given; anything else JPEG-typed becomes `.jpg`
    let extension = match (content_type.as_str(), file.extension().as_deref()) {
        ("image/png", _) => "png",
        (_, Some("jpeg")) => "jpeg",
        _ => "jpg",
    };
    let path = format!("{}/{}.{}", LOGO_FOLDER, Uuid::new_v4(), extension);

    deps.blob_storage
        .upload(
            &deps.settings.asset_bucket,
            &path,
            file.bytes.clone(),
            &content_type,
        )
        .await
        .map_err(JobBoardError::Upload)
}

/// Resolve the logo input to a URL. The flag is true for fresh uploads,
/// which must be cleaned up if the row write fails.
async fn resolve_logo(logo: LogoInput, deps: &ServerDeps) -> Result<(String, bool), JobBoardError> {
    match logo {
        LogoInput::Url(url) => Ok((url, false)),
        LogoInput::Upload(file) => Ok((upload_logo(&file, deps).await?, true)),
    }
}

pub async fn create_company(
    input: CreateCompanyInput,
    deps: &ServerDeps,
) -> Result<Company, JobBoardError> {
    let input = input.normalized();
    input.validate()?;

    info!(name = %input.name, "Creating company");

    let (logo, uploaded) = match input.logo {
        Some(logo) => {
            let (url, fresh) = resolve_logo(logo, deps).await?;
            (Some(url), fresh)
        }
        None => (None, false),
    };

    let row = CreateCompany {
        name: input.name,
        logo: logo.clone(),
        description: input.description,
        founded: input.founded,
        location: input.location,
        employees: input.employees,
        website: input.website,
        email: input.email,
    };

    let company = match deps.store.insert_company(&row).await {
        Ok(company) => company,
        Err(e) => {
            if let (Some(url), true) = (logo.as_deref(), uploaded) {
                discard_blob(url, "company insert failed", deps).await;
            }
            return Err(JobBoardError::Persistence(e));
        }
    };

    info!(company_id = %company.id, "Company created");
    let mut views = View::listings();
    views.push(View::CompanyProfile(company.id));
    deps.invalidator.invalidate(&views).await;

    Ok(company)
}

pub async fn update_company(
    id: CompanyId,
    input: UpdateCompanyInput,
    deps: &ServerDeps,
) -> Result<Company, JobBoardError> {
    let input = input.normalized();
    input.validate()?;

    let existing = deps
        .store
        .find_company(id)
        .await
        .map_err(JobBoardError::Persistence)?
        .ok_or_else(|| JobBoardError::not_found("Company", id))?;

    info!(company_id = %id, "Updating company");

    let mut fresh_upload: Option<String> = None;
    let logo = match input.logo {
        Some(Some(logo)) => {
            let (url, uploaded) = resolve_logo(logo, deps).await?;
            if uploaded {
                fresh_upload = Some(url.clone());
            }
            Some(Some(url))
        }
        Some(None) => Some(None),
        None => None,
    };

    let patch = UpdateCompany {
        name: input.name,
        logo,
        description: input.description,
        founded: input.founded,
        location: input.location,
        employees: input.employees,
        website: input.website,
        email: input.email,
    };

    let updated = match deps.store.update_company(id, &patch).await {
        Ok(Some(company)) => Ok(company),
        Ok(None) => Err(JobBoardError::not_found("Company", id)),
        Err(e) => Err(JobBoardError::Persistence(e)),
    };
    let updated = match updated {
        Ok(company) => company,
        Err(err) => {
            if let Some(url) = &fresh_upload {
                discard_blob(url, "company update failed", deps).await;
            }
            return Err(err);
        }
    };

    // Old logo goes only once the row points elsewhere
    if let Some(old) = existing.logo.as_deref() {
        if patch.logo.is_some() && updated.logo.as_deref() != Some(old) {
            if let Err(e) = deps.blob_storage.delete(old).await {
                warn!(company_id = %id, url = %old, error = %e, "Failed to delete replaced logo");
            }
        }
    }

    let mut views = View::listings();
    views.push(View::CompanyProfile(id));
    deps.invalidator.invalidate(&views).await;

    Ok(updated)
}

/// Delete a company together with its jobs and their applications.
///
/// Blobs are left in place and listed in the report.
pub async fn delete_company(
    id: CompanyId,
    deps: &ServerDeps,
) -> Result<CascadeReport, JobBoardError> {
    info!(company_id = %id, "Deleting company");

    let report = deps
        .store
        .delete_company_cascade(id)
        .await
        .map_err(JobBoardError::Cascade)?
        .ok_or_else(|| JobBoardError::not_found("Company", id))?;

    info!(
        company_id = %id,
        jobs = report.jobs_deleted,
        applications = report.applications_deleted,
        orphaned_assets = report.orphaned_assets.len(),
        "Company deleted"
    );

    let mut views = View::listings();
    views.push(View::CompanyProfile(id));
    deps.invalidator.invalidate(&views).await;

    Ok(report)
}
