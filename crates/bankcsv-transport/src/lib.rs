#![warn(missing_docs)]
//! # bankcsv-transport
//!
//! ## Purpose
//! Provides the real HTTP implementation of the upload transport.
//!
//! ## Responsibilities
//! - Encode one [`bankcsv_upload::ConvertEnvelope`] as a multipart POST.
//! - Capture the status, content headers, and body into a
//!   [`bankcsv_upload::WireResponse`].
//! - Translate wire failures into the upload error taxonomy.
//!
//! ## Data flow
//! Controller -> [`HttpConvertTransport::send`] -> conversion endpoint ->
//! response headers/body back to the controller for interpretation.
//!
//! ## Ownership and lifetimes
//! The blocking HTTP client is owned by the transport and reused across
//! submissions; each send clones the envelope buffers into the request.
//!
//! ## Error model
//! Client construction and request failures surface as
//! [`bankcsv_upload::UploadError::Transport`]; deadline expiry maps to
//! [`bankcsv_upload::UploadError::Timeout`].
//!
//! ## Security and privacy notes
//! The password travels only inside the multipart body; it is never placed
//! in headers, URLs, or error messages.

use std::time::Duration;

use bankcsv_core::PDF_MEDIA_TYPE;
use bankcsv_upload::{
    BANK_FIELD, ConvertEnvelope, ConvertTransport, PASSWORD_FIELD, PDF_FIELD, UploadError,
    WireResponse,
};
use reqwest::blocking::{Client, multipart};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderMap};

/// Default end-to-end request deadline.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Header carrying the deterministic request identity.
pub const IDEMPOTENCY_KEY_HEADER: &str = "x-idempotency-key";

/// Blocking HTTP transport for conversion uploads.
pub struct HttpConvertTransport {
    client: Client,
}

impl HttpConvertTransport {
    /// Creates a transport with the default request deadline.
    ///
    /// # Errors
    /// Returns [`UploadError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self, UploadError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Creates a transport with an explicit request deadline.
    ///
    /// # Errors
    /// Returns [`UploadError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| UploadError::Transport(format!("http client build failed: {error}")))?;
        Ok(Self { client })
    }
}

impl ConvertTransport for HttpConvertTransport {
    fn send(&self, envelope: &ConvertEnvelope) -> Result<WireResponse, UploadError> {
        let pdf_part = multipart::Part::bytes(envelope.pdf_bytes.clone())
            .file_name(envelope.file_name.clone())
            .mime_str(PDF_MEDIA_TYPE)
            .map_err(|error| UploadError::Transport(format!("pdf part build failed: {error}")))?;

        let mut form = multipart::Form::new()
            .text(BANK_FIELD, envelope.bank.clone())
            .part(PDF_FIELD, pdf_part);
        if let Some(password) = &envelope.password {
            form = form.text(PASSWORD_FIELD, password.clone());
        }

        let response = self
            .client
            .post(&envelope.endpoint)
            .header(IDEMPOTENCY_KEY_HEADER, envelope.idempotency_key.as_str())
            .multipart(form)
            .send()
            .map_err(wire_error)?;

        let status = response.status().as_u16();
        let content_type = header_value(response.headers(), CONTENT_TYPE).unwrap_or_default();
        let content_disposition = header_value(response.headers(), CONTENT_DISPOSITION);
        let body = response.bytes().map_err(wire_error)?.to_vec();

        Ok(WireResponse {
            status,
            content_type,
            content_disposition,
            body,
        })
    }
}

fn header_value(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}

fn wire_error(error: reqwest::Error) -> UploadError {
    if error.is_timeout() {
        UploadError::Timeout
    } else {
        UploadError::Transport(error.to_string())
    }
}
