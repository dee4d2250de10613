// Common types and utilities shared across the application

pub mod cascade;
pub mod entity_ids;
pub mod errors;
pub mod id;
pub mod patch;
pub mod uploads;
pub mod validation;

pub use cascade::CascadeReport;
pub use entity_ids::*;
pub use errors::{FieldErrors, JobBoardError};
pub use id::Id;
pub use patch::double_option;
pub use uploads::FileUpload;
