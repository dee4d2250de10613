// Applications domain - candidate submissions against jobs
//
// The submission pipeline (activities/submit.rs) is the only writer of new
// rows; admins can list and delete them.

pub mod activities;
pub mod data;
pub mod emails;
pub mod models;

pub use data::{ApplicationInput, NotificationOutcome, SubmittedApplication};
pub use models::{Application, ApplicationWithJob};
