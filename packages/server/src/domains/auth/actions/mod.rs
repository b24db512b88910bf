//! Auth domain actions

mod send_magic_link;

pub use send_magic_link::send_magic_link;
