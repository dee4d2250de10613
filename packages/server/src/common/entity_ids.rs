//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use jobboard_core::common::{CompanyId, JobId};
//!
//! let company_id = CompanyId::from_raw(1);
//! let job_id = JobId::from_raw(1);
//! // let wrong: JobId = company_id; // compile error
//! # let _ = (company_id, job_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Company entities (employers).
pub struct CompanyEntity;

/// Marker type for Job entities (postings).
pub struct JobEntity;

/// Marker type for Application entities (applicant submissions).
pub struct ApplicationEntity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Company entities.
pub type CompanyId = Id<CompanyEntity>;

/// Typed ID for Job entities.
pub type JobId = Id<JobEntity>;

/// Typed ID for Application entities.
pub type ApplicationId = Id<ApplicationEntity>;
