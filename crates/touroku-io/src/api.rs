//! Typed client for the registration backend.
//!
//! Responses arrive in an envelope (`{ status, message, data }`);
//! rejection bodies carry the human-readable reason under `message`
//! or `error`, which is surfaced to the user verbatim. A 401 clears
//! the persisted admin token so stale sessions cannot linger.

use serde::Deserialize;
use thiserror::Error;

use touroku_core::{RegistrationPayload, RegistrationRecord, UploadSignature};

use crate::http::{HttpError, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::session::PersistedValue;

/// Fallback rejection text when the backend sent no usable message.
const GENERIC_REJECTION: &str = "Something went wrong";

/// Failures from a backend call, already in user-facing form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Request timeout. Please try again.")]
    Timeout,

    #[error("Network error. Please check your connection.")]
    Network,

    /// The backend answered with a non-2xx status. `message` is the
    /// verbatim body text for the banner.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body did not match the contract.
    #[error("unexpected response from server")]
    Decode,
}

impl From<HttpError> for ApiError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::Timeout => Self::Timeout,
            // The API surface exposes no cancel, so an abort here is
            // as unexpected as any other transport failure.
            HttpError::Network | HttpError::Aborted | HttpError::Js(_) => Self::Network,
        }
    }
}

/// Client for the registration backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    timeout_ms: u32,
    auth: PersistedValue,
}

impl ApiClient {
    /// `base_url` is the API root without a trailing slash, e.g.
    /// `https://api.example.com/api/v1`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth: PersistedValue) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            auth,
        }
    }

    /// Fetch a fresh signed-upload credential.
    ///
    /// Called once per upload attempt; credentials are short-lived
    /// and must not be cached across files.
    ///
    /// # Errors
    ///
    /// [`ApiError`] in user-facing form.
    #[allow(clippy::future_not_send)]
    pub async fn upload_signature(&self) -> Result<UploadSignature, ApiError> {
        let body = self.request("GET", "/registration/upload-signature", None).await?;
        decode(&body)
    }

    /// Submit an assembled registration payload.
    ///
    /// # Errors
    ///
    /// [`ApiError::Rejected`] carries the backend's reason verbatim
    /// (duplicate registration number, duplicate email, ...).
    #[allow(clippy::future_not_send)]
    pub async fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> Result<RegistrationRecord, ApiError> {
        let json = serde_json::to_string(payload).map_err(|_| ApiError::Decode)?;
        let body = self.request("POST", "/registration", Some(&json)).await?;
        decode(&body)
    }

    #[allow(clippy::future_not_send)]
    async fn request(
        &self,
        method: &str,
        path: &str,
        json: Option<&str>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut request = HttpRequest::new(method, &url).timeout_ms(self.timeout_ms);
        if let Some(token) = self.auth.get() {
            request = request.bearer(token);
        }
        if let Some(body) = json {
            request = request.json(body);
        }

        let response = request.send().await?;
        if response.is_success() {
            return Ok(response.body);
        }

        if response.status == 401 {
            self.auth.clear();
        }
        Err(ApiError::Rejected {
            status: response.status,
            message: rejection_message(&response.body),
        })
    }
}

/// Envelope the backend wraps successful payloads in.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Decode a 2xx body: enveloped `data` first, bare object as a
/// fallback for endpoints that skip the envelope.
fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    if let Ok(Envelope { data: Some(value) }) = serde_json::from_str::<Envelope<T>>(body) {
        return Ok(value);
    }
    serde_json::from_str(body).map_err(|_| ApiError::Decode)
}

/// Extract the user-facing reason from a rejection body:
/// `message` first, then `error`, else a generic fallback.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| GENERIC_REJECTION.to_owned())
}
