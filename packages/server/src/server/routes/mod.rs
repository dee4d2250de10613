// HTTP routes
pub mod admin;
pub mod companies;
pub mod contact;
pub mod health;
pub mod jobs;
pub mod multipart;
pub mod stream;

pub use health::*;
pub use stream::*;
