//! Media uploads for the admin panel.
//!
//! Files go straight to the media host with an unsigned upload preset; the
//! returned URL is what gets stored in the content record.

use log::*;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Errors that can occur while uploading a file.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Uploads are not configured
    #[error("Uploads are not configured (missing cloud name or upload preset)")]
    NotConfigured,

    /// The local file could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Media host rejected the upload
    #[error("Upload failed: {0}")]
    Rejected(String),
}

/// A stored media file.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub url: String,
    pub public_id: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// Posts files to the media host.
///
pub struct Uploader {
    upload_url: String,
    cloud_name: String,
    upload_preset: String,
    http_client: reqwest::Client,
}

impl Uploader {
    pub fn new(upload_url: &str, cloud_name: &str, upload_preset: &str) -> Self {
        Uploader {
            upload_url: upload_url.trim_end_matches('/').to_owned(),
            cloud_name: cloud_name.to_owned(),
            upload_preset: upload_preset.to_owned(),
            http_client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.cloud_name.is_empty() && !self.upload_preset.is_empty()
    }

    fn endpoint(&self) -> String {
        format!("{}/v1_1/{}/auto/upload", self.upload_url, self.cloud_name)
    }

    /// Upload the file at `path`.
    ///
    pub async fn upload_path(&self, path: &Path) -> Result<UploadedFile, UploadError> {
        if !self.is_configured() {
            return Err(UploadError::NotConfigured);
        }
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        self.upload_bytes(bytes, &file_name).await
    }

    /// Upload in-memory file contents under `file_name`.
    ///
    pub async fn upload_bytes(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadedFile, UploadError> {
        if !self.is_configured() {
            return Err(UploadError::NotConfigured);
        }
        debug!("Uploading {} ({} bytes)...", file_name, bytes.len());
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_owned()))
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .http_client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = body
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("Upload failed")
                .to_string();
            error!("Upload of {} failed with status {}: {}", file_name, status, message);
            return Err(UploadError::Rejected(message));
        }

        let data: UploadResponse = response.json().await?;
        info!("Uploaded {} to {}", file_name, data.secure_url);
        Ok(UploadedFile {
            url: data.secure_url,
            public_id: data.public_id,
        })
    }
}
