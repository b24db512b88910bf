//! Upload file action

use serde::Serialize;
use tracing::info;

use crate::common::ServiceError;
use crate::kernel::ServerDeps;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadedFile {
    pub url: String,
    pub path: String,
}

/// Object key for an upload: `<timestamp_ms>-<sanitized name>`.
///
/// Anything outside `[A-Za-z0-9._-]` becomes `_`.
pub fn object_name(timestamp_ms: i64, original: &str) -> String {
    let sanitized: String = original
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let sanitized = if sanitized.is_empty() {
        "file".to_string()
    } else {
        sanitized
    };

    format!("{}-{}", timestamp_ms, sanitized)
}

/// Store the file and return its public URL.
pub async fn upload_file(
    file_name: &str,
    content_type: Option<&str>,
    bytes: Vec<u8>,
    deps: &ServerDeps,
) -> Result<UploadedFile, ServiceError> {
    let storage = deps
        .storage
        .as_ref()
        .ok_or(ServiceError::NotConfigured("SUPABASE_URL"))?;

    let path = object_name(chrono::Utc::now().timestamp_millis(), file_name);
    let content_type = content_type
        .filter(|ct| !ct.is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE);
    let size = bytes.len();

    let url = storage.upload(&path, content_type, bytes).await?;
    info!(path = %path, size, "File uploaded");

    Ok(UploadedFile { url, path })
}
