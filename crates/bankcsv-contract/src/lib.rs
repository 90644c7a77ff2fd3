#![warn(missing_docs)]
//! # bankcsv-contract
//!
//! ## Purpose
//! Defines the conversion server response contract and client-side mapping
//! helpers.
//!
//! ## Responsibilities
//! - Parse the JSON response shape (`csv` string plus optional `filename`).
//! - Branch a successful response body into a download artifact by content
//!   type.
//! - Extract suggested filenames from `Content-Disposition` headers.
//!
//! ## Data flow
//! Raw response body -> [`interpret_response`] ->
//! [`bankcsv_core::DownloadArtifact`] -> artifact staging and UI offer.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON and a missing `csv` property return [`ContractError`]
//! variants whose display text is the user-facing status sentence.
//!
//! ## Security and privacy notes
//! This crate processes only response bodies and headers; it never touches
//! the statement password.

use bankcsv_core::{DEFAULT_ARTIFACT_MEDIA_TYPE, DEFAULT_ARTIFACT_NAME, DownloadArtifact};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Content-type marker selecting the JSON response shape.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Parsed JSON response from the conversion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResponse {
    /// CSV contents, when the server chose the JSON shape.
    #[serde(default)]
    pub csv: Option<String>,
    /// Suggested filename for the CSV contents.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Parses a raw JSON body into the response contract.
///
/// # Errors
/// Returns [`ContractError::Decode`] for malformed JSON (including bodies
/// that are not valid UTF-8).
pub fn parse_conversion_response(raw: &[u8]) -> Result<ConversionResponse, ContractError> {
    serde_json::from_slice(raw).map_err(ContractError::Decode)
}

/// Interprets a successful response body as a download artifact.
///
/// # Semantics
/// A content type containing `application/json` selects the JSON shape: the
/// body must parse and carry a `csv` string, which becomes a `text/csv`
/// artifact named by the optional `filename` property. Any other content
/// type is treated as raw file bytes, named from the `Content-Disposition`
/// header when one is present and typed by the response content type.
/// Missing names default to `result.csv`; a blank content type defaults to
/// `text/csv`.
///
/// # Errors
/// Returns [`ContractError::Decode`] for an unparseable JSON body and
/// [`ContractError::MissingCsvField`] when the JSON shape lacks `csv`.
pub fn interpret_response(
    content_type: &str,
    content_disposition: Option<&str>,
    body: Vec<u8>,
) -> Result<DownloadArtifact, ContractError> {
    if content_type.contains(JSON_MEDIA_TYPE) {
        let parsed = parse_conversion_response(&body)?;
        let csv = parsed.csv.ok_or(ContractError::MissingCsvField)?;
        let file_name = parsed
            .filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());
        return Ok(DownloadArtifact::from_text(
            csv,
            file_name,
            DEFAULT_ARTIFACT_MEDIA_TYPE,
        ));
    }

    let file_name = content_disposition
        .and_then(content_disposition_filename)
        .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());
    let media_type = if content_type.trim().is_empty() {
        DEFAULT_ARTIFACT_MEDIA_TYPE.to_string()
    } else {
        content_type.to_string()
    };

    Ok(DownloadArtifact::from_bytes(body, file_name, media_type))
}

/// Extracts a suggested filename from a `Content-Disposition` header value.
///
/// Supports the extended `filename*=UTF-8''<percent-encoded>` form and the
/// plain `filename="..."` / bare `filename=...` form. When both appear, the
/// extended form wins. Returns `None` when neither matches.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    const EXTENDED_MARKER: &str = "filename*=utf-8''";
    const PLAIN_MARKER: &str = "filename=";

    let lower = header.to_ascii_lowercase();

    if let Some(position) = lower.find(EXTENDED_MARKER) {
        let encoded = header[position + EXTENDED_MARKER.len()..]
            .split(';')
            .next()
            .unwrap_or("")
            .trim();
        if !encoded.is_empty() {
            return Some(percent_decode_str(encoded).decode_utf8_lossy().into_owned());
        }
    }

    if let Some(position) = lower.find(PLAIN_MARKER) {
        let raw = header[position + PLAIN_MARKER.len()..]
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches('"')
            .trim();
        if !raw.is_empty() {
            return Some(raw.to_string());
        }
    }

    None
}

/// Response contract errors.
///
/// Display text is surfaced verbatim as the submission status.
#[derive(Debug, Error)]
pub enum ContractError {
    /// JSON decode failure.
    #[error("Failed to parse JSON from server.")]
    Decode(#[source] serde_json::Error),
    /// The JSON shape parsed but carried no `csv` string.
    #[error("API returned JSON but no CSV found in `csv` property.")]
    MissingCsvField,
}
