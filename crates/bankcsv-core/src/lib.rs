#![warn(missing_docs)]
//! # bankcsv-core
//!
//! ## Purpose
//! Defines the pure data model used across the `bankcsv` workspace.
//!
//! ## Responsibilities
//! - Represent the statement submission form and its selected file.
//! - Derive a validated conversion request at submit time.
//! - Model download artifacts produced from server responses.
//! - Provide the fixed demo CSV sample used when no endpoint is configured.
//!
//! ## Data flow
//! UI input capture mutates [`SubmissionForm`]. On submit, callers derive a
//! [`ConvertRequest`] through ordered validation and later wrap response data
//! into a [`DownloadArtifact`].
//!
//! ## Ownership and lifetimes
//! Form, request, and artifact values own their backing buffers (`String`,
//! `Vec<u8>`) to avoid hidden borrow coupling between UI, upload, and staging
//! stages.
//!
//! ## Error model
//! Submission validation failures return [`FormError`] variants whose display
//! text is the user-facing status sentence, so status rendering and error
//! propagation cannot drift apart.
//!
//! ## Security and privacy notes
//! `ConvertRequest` carries the statement password; its `Debug` output
//! redacts the password and elides the PDF bytes so request values can be
//! logged without leaking secrets.
//!
//! ## Example
//! ```rust
//! use bankcsv_core::{PasswordMode, StatementFile, SubmissionForm};
//!
//! let mut form = SubmissionForm::new();
//! form.set_bank("kotak");
//! form.select_file(Some(StatementFile::new(
//!     "statement.pdf",
//!     "application/pdf",
//!     vec![0x25, 0x50, 0x44, 0x46],
//! )));
//! let request = form.to_request().expect("valid form");
//! assert_eq!(request.bank, "kotak");
//! assert_eq!(request.password, None);
//! ```

use std::fmt;

use thiserror::Error;

/// Default filename for downloaded conversion results.
pub const DEFAULT_ARTIFACT_NAME: &str = "result.csv";

/// Default media type applied when the server reports none.
pub const DEFAULT_ARTIFACT_MEDIA_TYPE: &str = "text/csv";

/// Canonical media type for PDF statement uploads.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Fixed sample emitted by the demo fallback path.
pub const SAMPLE_STATEMENT_CSV: &str =
    "date,desc,amount\n2025-01-01,Salary,1000\n2025-01-02,Coffee,-3.5\n";

/// Represents one selected statement file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFile {
    /// Original filename as chosen by the user.
    pub name: String,
    /// Media type reported for the selection.
    pub media_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl StatementFile {
    /// Constructs a statement file selection.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Returns `true` when the selection is acceptable as a PDF.
    ///
    /// # Semantics
    /// Accepts either an `application/pdf` media type or a `.pdf` filename
    /// extension, case-insensitively.
    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE || self.name.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Whether the statement PDF requires a password to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PasswordMode {
    /// The PDF is password protected; a password must accompany the upload.
    Required,
    /// The PDF opens without a password.
    #[default]
    NotRequired,
}

/// Mutable submission form state owned by the upload controller.
///
/// # Invariants
/// - The password value is non-empty only while the mode is
///   [`PasswordMode::Required`]; switching to `NotRequired` clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionForm {
    bank: String,
    file: Option<StatementFile>,
    password_mode: PasswordMode,
    password: String,
}

impl SubmissionForm {
    /// Creates an empty form with the password marked not required.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the selected bank identifier.
    pub fn set_bank(&mut self, bank: impl Into<String>) {
        self.bank = bank.into();
    }

    /// Returns the current bank identifier value.
    pub fn bank(&self) -> &str {
        &self.bank
    }

    /// Replaces the file selection. `None` clears it.
    pub fn select_file(&mut self, file: Option<StatementFile>) {
        self.file = file;
    }

    /// Returns the current file selection.
    pub fn file(&self) -> Option<&StatementFile> {
        self.file.as_ref()
    }

    /// Switches the password mode.
    ///
    /// # Side effects
    /// Selecting [`PasswordMode::NotRequired`] clears any entered password.
    pub fn set_password_mode(&mut self, mode: PasswordMode) {
        self.password_mode = mode;
        if mode == PasswordMode::NotRequired {
            self.password.clear();
        }
    }

    /// Returns the current password mode.
    pub fn password_mode(&self) -> PasswordMode {
        self.password_mode
    }

    /// Sets the password value.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    /// Returns the current password value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Derives a validated conversion request from the current form state.
    ///
    /// Validation is ordered and short-circuits on the first failure: bank,
    /// file presence, file type, then password (only when required).
    ///
    /// # Errors
    /// Returns the [`FormError`] for the first failed check; its display text
    /// is the user-facing status sentence.
    pub fn to_request(&self) -> Result<ConvertRequest, FormError> {
        let bank = self.bank.trim();
        if bank.is_empty() {
            return Err(FormError::MissingBank);
        }

        let file = self.file.as_ref().ok_or(FormError::MissingFile)?;
        if !file.is_pdf() {
            return Err(FormError::UnsupportedFileType);
        }

        let password = match self.password_mode {
            PasswordMode::Required => {
                let trimmed = self.password.trim();
                if trimmed.is_empty() {
                    return Err(FormError::MissingPassword);
                }
                Some(trimmed.to_string())
            }
            PasswordMode::NotRequired => None,
        };

        Ok(ConvertRequest {
            bank: bank.to_string(),
            file_name: file.name.clone(),
            pdf_bytes: file.bytes.clone(),
            password,
        })
    }
}

/// Validated request payload derived from the form at submit time.
///
/// Built fresh per submission and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct ConvertRequest {
    /// Trimmed bank identifier.
    pub bank: String,
    /// Original filename of the uploaded PDF.
    pub file_name: String,
    /// Raw PDF contents.
    pub pdf_bytes: Vec<u8>,
    /// Trimmed password, present only when the form required one.
    pub password: Option<String>,
}

impl fmt::Debug for ConvertRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertRequest")
            .field("bank", &self.bank)
            .field("file_name", &self.file_name)
            .field("pdf_len", &self.pdf_bytes.len())
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Downloadable artifact produced from a conversion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    /// Filename offered to the user.
    pub file_name: String,
    /// Media type of the artifact contents.
    pub media_type: String,
    /// Artifact contents.
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    /// Wraps text content in an artifact of the given media type.
    pub fn from_text(
        text: impl Into<String>,
        file_name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes: text.into().into_bytes(),
        }
    }

    /// Wraps raw bytes in an artifact of the given media type.
    pub fn from_bytes(
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Returns the fixed demo sample staged when no endpoint is configured.
    pub fn sample() -> Self {
        Self::from_text(
            SAMPLE_STATEMENT_CSV,
            DEFAULT_ARTIFACT_NAME,
            DEFAULT_ARTIFACT_MEDIA_TYPE,
        )
    }
}

/// Error type for submission validation failures.
///
/// Display text is surfaced verbatim as the submission status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// No bank identifier was provided.
    #[error("Please select a bank.")]
    MissingBank,
    /// No file was selected.
    #[error("Please choose a PDF file to upload.")]
    MissingFile,
    /// The selected file is not a PDF by media type or extension.
    #[error("Only PDF files are allowed.")]
    UnsupportedFileType,
    /// The password is required but empty after trimming.
    #[error("Please enter the PDF password.")]
    MissingPassword,
}
