// Companies domain - employers and their profiles
//
// Logo files live in blob storage; rows store only the public URL.

pub mod activities;
pub mod data;
pub mod models;

pub use data::{CompanyProfile, CreateCompanyInput, LogoInput, UpdateCompanyInput};
pub use models::Company;
