//! Auth domain - passwordless sign-in via magic link
//!
//! The route accepts a single action, `sendMagicLink`. The auth provider owns
//! users and sessions; this service only asks it to send the link.

pub mod actions;
pub mod types;

pub use actions::send_magic_link;
pub use types::{AuthActionBody, SEND_MAGIC_LINK};
