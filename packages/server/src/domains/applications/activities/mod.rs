pub mod manage;
pub mod submit;

pub use manage::*;
pub use submit::submit_application;
