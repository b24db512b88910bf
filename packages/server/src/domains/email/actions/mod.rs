//! Email domain actions

mod send_email;

pub use send_email::send_email;
