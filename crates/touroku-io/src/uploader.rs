//! The network half of the screenshot upload pipeline.
//!
//! Stage 1 (decode/downscale/re-encode) lives in
//! `touroku_core::screenshot`; this module sequences the remaining
//! stages: fetch a fresh signed credential, POST the compressed JPEG
//! to the image host as multipart form data with progress reporting,
//! and extract the hosted URL from the host's acknowledgment.
//!
//! No stage retries on its own. Retry is an explicit user action that
//! re-runs stages 2-3 against the already-compressed bytes.

use thiserror::Error;

use touroku_core::UploadSignature;

use crate::api::{ApiClient, ApiError};
use crate::http::{blob_from_bytes, AbortHandle, HttpError, HttpRequest};

/// Folder the host files payment screenshots under.
const UPLOAD_FOLDER: &str = "touroku-payments";

/// Filename reported to the host; the source name is irrelevant after
/// re-encoding.
const UPLOAD_FILENAME: &str = "screenshot.jpg";

/// Failures of the upload's network stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// User abort. Resets the task silently; not surfaced as an error.
    #[error("upload cancelled")]
    Cancelled,

    /// The signed-credential fetch failed; carries that error's
    /// user-facing text.
    #[error("{0}")]
    Credential(ApiError),

    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("Network error. Please check your connection.")]
    Network,

    /// The host answered, but without a usable hosted URL.
    #[error("The image host rejected the upload. Please try again.")]
    HostRejected,
}

impl From<HttpError> for UploadError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Aborted => Self::Cancelled,
            HttpError::Timeout => Self::Timeout,
            HttpError::Network | HttpError::Js(_) => Self::Network,
        }
    }
}

/// Run stages 2-4: credential, multipart upload, URL extraction.
///
/// `on_progress` receives 0-100 percentages from the browser's upload
/// progress events. `abort` cancels the in-flight host request;
/// cancellation surfaces as [`UploadError::Cancelled`].
///
/// # Errors
///
/// [`UploadError`] per stage; the caller maps `Cancelled` to a silent
/// task reset and everything else to the task's failed state.
#[allow(clippy::future_not_send)]
pub async fn upload_compressed(
    api: &ApiClient,
    jpeg: &[u8],
    on_progress: impl Fn(u8) + 'static,
    abort: AbortHandle,
) -> Result<String, UploadError> {
    // Stage 2: short-lived credential, fetched fresh every attempt.
    let signature = api
        .upload_signature()
        .await
        .map_err(UploadError::Credential)?;

    // Stage 3: multipart POST straight to the host.
    let form = build_form(jpeg, &signature)?;
    let url = host_upload_url(&signature.cloud_name);
    let response = HttpRequest::new("POST", &url)
        .multipart(&form)
        .on_progress(on_progress)
        .abort_handle(abort)
        .send()
        .await?;

    if !response.is_success() {
        return Err(UploadError::HostRejected);
    }

    // Stage 4: the hosted URL is the success criterion.
    hosted_url(&response.body).ok_or(UploadError::HostRejected)
}

fn build_form(jpeg: &[u8], signature: &UploadSignature) -> Result<web_sys::FormData, UploadError> {
    let build = || -> Result<web_sys::FormData, HttpError> {
        let form = web_sys::FormData::new()?;
        let blob = blob_from_bytes(jpeg, "image/jpeg")?;
        form.append_with_blob_and_filename("file", &blob, UPLOAD_FILENAME)?;
        form.append_with_str("timestamp", &signature.timestamp.to_string())?;
        form.append_with_str("signature", &signature.signature)?;
        form.append_with_str("api_key", &signature.api_key)?;
        form.append_with_str("folder", UPLOAD_FOLDER)?;
        Ok(form)
    };
    build().map_err(UploadError::from)
}

fn host_upload_url(cloud_name: &str) -> String {
    format!("https://api.cloudinary.com/v1_1/{cloud_name}/image/upload")
}

/// Extract a non-empty `secure_url` from the host's response body.
fn hosted_url(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let url = value.get("secure_url")?.as_str()?;
    (!url.is_empty()).then(|| url.to_owned())
}
