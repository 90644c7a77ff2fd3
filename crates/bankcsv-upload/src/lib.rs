#![warn(missing_docs)]
//! # bankcsv-upload
//!
//! ## Purpose
//! Implements the conversion upload client for `bankcsv`.
//!
//! ## Responsibilities
//! - Validate conversion endpoint policy (HTTPS).
//! - Build the multipart upload envelope from a validated request.
//! - Execute one upload through an injectable transport abstraction.
//! - Surface server rejections and wire failures as a typed error taxonomy.
//!
//! ## Data flow
//! [`bankcsv_core::ConvertRequest`] -> [`ConvertEnvelope`] ->
//! [`ConvertTransport::send`] -> [`WireResponse`] handed back to the caller
//! for contract interpretation.
//!
//! ## Ownership and lifetimes
//! Envelope and response values own their buffers to decouple transport and
//! controller lifetimes.
//!
//! ## Error model
//! Endpoint policy violations, non-success statuses, timeouts, and wire
//! failures are reported as [`UploadError`]. Every failure is terminal for
//! the submission; the client never retries.
//!
//! ## Security and privacy notes
//! The envelope's `Debug` output redacts the password and elides PDF bytes.
//! The idempotency key hashes the bank, filename, and PDF contents only;
//! the password never enters the hash.
//!
//! ## Example
//! ```rust
//! use bankcsv_upload::validate_convert_endpoint;
//!
//! assert!(validate_convert_endpoint("https://api.example.test/convert").is_ok());
//! assert!(validate_convert_endpoint("http://api.example.test/convert").is_err());
//! ```

use std::fmt;
use std::sync::Arc;

use bankcsv_core::ConvertRequest;
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

/// Multipart field name for the bank identifier.
pub const BANK_FIELD: &str = "bank";

/// Multipart field name for the PDF file part.
pub const PDF_FIELD: &str = "pdf";

/// Multipart field name for the optional password.
pub const PASSWORD_FIELD: &str = "password";

/// One upload's worth of wire-ready payload data.
#[derive(Clone, PartialEq, Eq)]
pub struct ConvertEnvelope {
    /// Destination endpoint URL.
    pub endpoint: String,
    /// Bank identifier text field.
    pub bank: String,
    /// Original filename carried on the PDF part.
    pub file_name: String,
    /// PDF file part contents.
    pub pdf_bytes: Vec<u8>,
    /// Password text field, present only when the request carried one.
    pub password: Option<String>,
    /// Deterministic request identity for server-side deduplication.
    pub idempotency_key: String,
}

impl ConvertEnvelope {
    /// Builds the envelope for one request against the given endpoint.
    pub fn from_request(endpoint: impl Into<String>, request: &ConvertRequest) -> Self {
        Self {
            endpoint: endpoint.into(),
            bank: request.bank.clone(),
            file_name: request.file_name.clone(),
            pdf_bytes: request.pdf_bytes.clone(),
            password: request.password.clone(),
            idempotency_key: idempotency_key_for_request(request),
        }
    }
}

impl fmt::Debug for ConvertEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertEnvelope")
            .field("endpoint", &self.endpoint)
            .field("bank", &self.bank)
            .field("file_name", &self.file_name)
            .field("pdf_len", &self.pdf_bytes.len())
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("idempotency_key", &self.idempotency_key)
            .finish()
    }
}

/// Computes a stable hex SHA-256 identity for one conversion request.
///
/// # Semantics
/// Identical bank/filename/PDF inputs produce identical keys; the password
/// is deliberately excluded so credential changes do not break server-side
/// deduplication (and secrets stay out of derived values).
pub fn idempotency_key_for_request(request: &ConvertRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update(request.bank.as_bytes());
    hasher.update([0]);
    hasher.update(request.file_name.as_bytes());
    hasher.update([0]);
    hasher.update(&request.pdf_bytes);
    hex::encode(hasher.finalize())
}

/// Response data captured from the wire, before contract interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header value, empty when absent.
    pub content_type: String,
    /// `Content-Disposition` header value, when present.
    pub content_disposition: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl WireResponse {
    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstract transport used by the convert client.
pub trait ConvertTransport: Send + Sync {
    /// Sends one multipart upload and captures the raw response.
    ///
    /// # Errors
    /// Returns [`UploadError::Timeout`] or [`UploadError::Transport`] for
    /// wire-level failures.
    fn send(&self, envelope: &ConvertEnvelope) -> Result<WireResponse, UploadError>;
}

/// Convert client that validates endpoint policy and executes one upload.
#[derive(Clone)]
pub struct ConvertClient {
    endpoint: String,
    transport: Arc<dyn ConvertTransport>,
}

impl ConvertClient {
    /// Creates a validated convert client.
    ///
    /// # Errors
    /// Returns [`UploadError::InvalidEndpoint`] when the URL does not parse
    /// or is not HTTPS.
    pub fn new(
        endpoint: impl Into<String>,
        transport: Arc<dyn ConvertTransport>,
    ) -> Result<Self, UploadError> {
        let endpoint = endpoint.into();
        validate_convert_endpoint(&endpoint)?;
        Ok(Self {
            endpoint,
            transport,
        })
    }

    /// Sends exactly one conversion upload.
    ///
    /// # Errors
    /// Returns [`UploadError::Server`] for non-success statuses and
    /// propagates transport failures as-is. No retry occurs on any path.
    pub fn convert(&self, request: &ConvertRequest) -> Result<WireResponse, UploadError> {
        let envelope = ConvertEnvelope::from_request(&self.endpoint, request);
        let response = self.transport.send(&envelope)?;
        if !response.is_success() {
            return Err(UploadError::Server(response.status));
        }
        Ok(response)
    }

    /// Returns the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Validates conversion endpoint constraints.
///
/// # Errors
/// Returns [`UploadError::InvalidEndpoint`] for unparseable or non-HTTPS
/// URLs.
pub fn validate_convert_endpoint(endpoint: &str) -> Result<(), UploadError> {
    let parsed = Url::parse(endpoint)
        .map_err(|error| UploadError::InvalidEndpoint(format!("invalid convert url: {error}")))?;

    if parsed.scheme() != "https" {
        return Err(UploadError::InvalidEndpoint(
            "convert endpoint must use https".to_string(),
        ));
    }

    Ok(())
}

/// Errors produced by the upload client and its transports.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Endpoint violates security or parsing requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Server rejected the upload with a non-success status.
    #[error("Server error: {0}")]
    Server(u16),
    /// The request did not complete within the transport deadline.
    #[error("request timed out")]
    Timeout,
    /// Wire-level transport failure.
    #[error("upload transport failure: {0}")]
    Transport(String),
}

#[cfg(test)]
mod tests {
    //! Unit tests for endpoint policy and envelope hygiene.

    use super::*;

    fn fixture_request() -> ConvertRequest {
        ConvertRequest {
            bank: "kotak".to_string(),
            file_name: "statement.pdf".to_string(),
            pdf_bytes: b"%PDF-1.4".to_vec(),
            password: Some("secret".to_string()),
        }
    }

    #[test]
    fn validates_https_endpoint_policy() {
        validate_convert_endpoint("https://example.test/convert").expect("endpoint should pass");
        assert!(validate_convert_endpoint("http://example.test/convert").is_err());
        assert!(validate_convert_endpoint("not a url").is_err());
    }

    #[test]
    fn envelope_debug_redacts_password() {
        let envelope = ConvertEnvelope::from_request("https://example.test/convert", &fixture_request());
        let rendered = format!("{envelope:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("secret"));
    }
}
