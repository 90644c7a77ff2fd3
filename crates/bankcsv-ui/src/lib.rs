#![warn(missing_docs)]
//! # bankcsv-ui
//!
//! ## Purpose
//! Defines the UI-facing runtime state model for `bankcsv`.
//!
//! ## Responsibilities
//! - Represent the status line, loading flag, and file/password field state.
//! - Expose the submit gate used to prevent concurrent submissions.
//! - Track the download affordance offered after a successful conversion.
//!
//! ## Data flow
//! Controller events mutate [`UiState`], which drives rendered status in
//! whatever shell hosts the controller.
//!
//! ## Ownership and lifetimes
//! `UiState` owns all string/status values to simplify event reducers.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors; invalid
//! combinations are prevented by reducer methods.
//!
//! ## Security and privacy notes
//! UI state intentionally excludes the password value and file bytes; it
//! carries labels and flags only.

/// Placeholder shown when no file is selected.
pub const NO_FILE_LABEL: &str = "No file chosen";

/// Picker label before a file is selected.
pub const CHOOSE_PDF_LABEL: &str = "Choose PDF";

/// Picker label once a file is already chosen.
pub const CHANGE_PDF_LABEL: &str = "Change PDF";

/// Tone of the rendered status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Neutral/success styling.
    Success,
    /// Error styling.
    Error,
}

/// One human-readable status message with its tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Message text.
    pub text: String,
    /// Success or error tone.
    pub tone: StatusTone,
}

/// Visible download affordance for a staged artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOffer {
    /// Artifact filename.
    pub file_name: String,
    /// Rendered link label (`Download <filename>`).
    pub label: String,
}

/// Aggregate UI runtime state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Current status line, absent between submissions.
    pub status: Option<StatusLine>,
    /// Whether a submission is in flight.
    pub loading: bool,
    /// File-name display text.
    pub file_label: String,
    /// File picker control label.
    pub picker_label: String,
    /// Whether the password field is editable and required.
    pub password_enabled: bool,
    /// Download affordance, present once an artifact is staged.
    pub download: Option<DownloadOffer>,
}

impl UiState {
    /// Creates default UI state.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            status: None,
            loading: false,
            file_label: NO_FILE_LABEL.to_string(),
            picker_label: CHOOSE_PDF_LABEL.to_string(),
            password_enabled: false,
            download: None,
        }
    }

    /// Projects a file selection change into the display labels.
    ///
    /// `None` restores the placeholder text and picker label.
    pub fn on_file_chosen(&mut self, file_name: Option<&str>) {
        match file_name {
            Some(name) => {
                self.file_label = name.to_string();
                self.picker_label = CHANGE_PDF_LABEL.to_string();
            }
            None => {
                self.file_label = NO_FILE_LABEL.to_string();
                self.picker_label = CHOOSE_PDF_LABEL.to_string();
            }
        }
    }

    /// Flips password field enablement.
    pub fn set_password_enabled(&mut self, enabled: bool) {
        self.password_enabled = enabled;
    }

    /// Shows a status line.
    pub fn show_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status = Some(StatusLine {
            text: text.into(),
            tone,
        });
    }

    /// Clears the status line and hides any download affordance.
    pub fn clear_feedback(&mut self) {
        self.status = None;
        self.download = None;
    }

    /// Sets the loading flag gating the submit control.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Returns `true` when the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Returns `true` when the current status carries the error tone.
    pub fn status_is_error(&self) -> bool {
        matches!(
            &self.status,
            Some(StatusLine {
                tone: StatusTone::Error,
                ..
            })
        )
    }

    /// Offers a staged artifact for download.
    pub fn offer_download(&mut self, file_name: &str) {
        self.download = Some(DownloadOffer {
            file_name: file_name.to_string(),
            label: format!("Download {file_name}"),
        });
    }
}
