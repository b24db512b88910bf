//! Email domain - forwards one HTML email through the email service.

pub mod actions;
pub mod models;

pub use actions::send_email;
pub use models::SendEmailBody;
