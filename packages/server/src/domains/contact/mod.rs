// Contact domain - the public contact form, relayed to the operator inbox

pub mod activities;
pub mod data;

pub use activities::send_contact_message;
pub use data::{ContactForm, InquiryType};
