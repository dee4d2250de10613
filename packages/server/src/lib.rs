// Yendaakye Jobs Center - API Core
//
// Job board backend: public listings, company profiles, the application
// submission pipeline and the admin surface for companies, jobs and
// applications. Domains live in domains/*, infrastructure in kernel/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
