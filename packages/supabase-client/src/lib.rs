//! Minimal Supabase REST client.
//!
//! Three endpoints, each called once per request with no retries:
//!
//! - Storage: `POST /storage/v1/object/{bucket}/{path}`
//! - Auth: `POST /auth/v1/otp` (magic link)
//! - PostgREST: `POST /rest/v1/{table}`
//!
//! All calls authenticate with the service role key, sent both as `apikey` and
//! as a bearer token.

pub mod error;

pub use error::{Result, SupabaseError};

use serde::Serialize;

#[derive(Debug, Clone)]
pub struct SupabaseOptions {
    pub url: String,
    pub service_role_key: String,
}

#[derive(Debug, Serialize)]
struct OtpRequest<'a> {
    email: &'a str,
    create_user: bool,
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    options: SupabaseOptions,
}

impl SupabaseClient {
    pub fn new(options: SupabaseOptions) -> Self {
        let options = SupabaseOptions {
            url: options.url.trim_end_matches('/').to_string(),
            ..options
        };
        Self {
            client: reqwest::Client::new(),
            options,
        }
    }

    /// Public URL of an object in a public bucket.
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.options.url,
            bucket,
            urlencoding::encode(path)
        )
    }

    /// Upload bytes to `bucket/path`. Returns the public URL of the stored object.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.options.url,
            bucket,
            urlencoding::encode(path)
        );

        let resp = self
            .client
            .post(url)
            .header("apikey", &self.options.service_role_key)
            .bearer_auth(&self.options.service_role_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        check_status(resp, "storage upload").await?;
        Ok(self.public_object_url(bucket, path))
    }

    /// Send a passwordless sign-in link. Creates the user on first sign-in.
    pub async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<()> {
        let url = format!(
            "{}/auth/v1/otp?redirect_to={}",
            self.options.url,
            urlencoding::encode(redirect_to)
        );

        let resp = self
            .client
            .post(url)
            .header("apikey", &self.options.service_role_key)
            .bearer_auth(&self.options.service_role_key)
            .json(&OtpRequest {
                email,
                create_user: true,
            })
            .send()
            .await?;

        check_status(resp, "magic link").await?;
        Ok(())
    }

    /// Insert one row into a PostgREST table without reading it back.
    pub async fn insert_row<T: Serialize + ?Sized>(&self, table: &str, row: &T) -> Result<()> {
        let resp = self
            .client
            .post(format!("{}/rest/v1/{}", self.options.url, table))
            .header("apikey", &self.options.service_role_key)
            .bearer_auth(&self.options.service_role_key)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await?;

        check_status(resp, "insert").await?;
        Ok(())
    }
}

async fn check_status(resp: reqwest::Response, operation: &'static str) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(operation, status = %status, body = %body, "Supabase returned an error");
    Err(SupabaseError::Api {
        status: status.as_u16(),
        message: body,
    })
}
