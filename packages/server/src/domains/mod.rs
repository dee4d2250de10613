// Business domains
pub mod analytics;
pub mod applications;
pub mod assets;
pub mod companies;
pub mod contact;
pub mod jobs;
