//! Storage domain actions

mod upload_file;

pub use upload_file::{object_name, upload_file, UploadedFile};
