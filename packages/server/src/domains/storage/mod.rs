//! Storage domain - uploads one file to the public bucket.

pub mod actions;

pub use actions::{object_name, upload_file, UploadedFile};
