// Jobs domain - postings, the public listing query and job mutations

pub mod activities;
pub mod data;
pub mod models;

pub use data::{CreateJobInput, UpdateJobInput};
pub use models::{CompanySummary, Job, JobCategory, JobFilter, JobType, JobWithCompany};
