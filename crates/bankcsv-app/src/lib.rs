#![warn(missing_docs)]
//! # bankcsv-app
//!
//! ## Purpose
//! Orchestrates form state, upload, response interpretation, artifact
//! staging, and UI state for `bankcsv`.
//!
//! ## Responsibilities
//! - Implement the upload controller and its event-handler interface
//!   (file change, password mode change, submit).
//! - Run the submission pipeline: validate -> envelope -> send -> interpret
//!   -> stage, with the demo fallback when no endpoint is configured.
//! - Stage download artifacts on disk with a bounded handle lifetime.
//! - Write per-run file logs with secret redaction.
//!
//! ## Data flow
//! Input capture -> [`UploadController`] events -> one submission through
//! [`bankcsv_upload::ConvertClient`] -> [`bankcsv_contract`] interpretation
//! -> staged artifact + [`bankcsv_ui::UiState`] projection.
//!
//! ## Ownership and lifetimes
//! The controller owns the form, UI state, endpoint configuration, and the
//! staged-download handle; transports are shared via `Arc` so tests can
//! observe calls.
//!
//! ## Error model
//! Subsystem failures are aggregated as [`SubmitError`]; every failure is
//! terminal for its submission and surfaces as one error-toned status line.
//! Loading is cleared on every outcome path.
//!
//! ## Security and privacy notes
//! - The password value and PDF bytes never reach the run log.
//! - [`redact_sensitive`] strips common secret markers from logged detail.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bankcsv_contract::{ContractError, interpret_response};
use bankcsv_core::{
    ConvertRequest, DownloadArtifact, FormError, PasswordMode, StatementFile, SubmissionForm,
};
use bankcsv_ui::{StatusTone, UiState};
use bankcsv_upload::{ConvertClient, ConvertTransport, UploadError};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("BANKCSV_VERSION");

/// Compile-time default conversion endpoint.
///
/// Ships with the placeholder host so fresh builds run in demo mode until a
/// real endpoint is configured.
pub const DEFAULT_CONVERT_ENDPOINT: &str = "https://your-api.example.com/convert";

/// Placeholder host marker that keeps an endpoint unconfigured.
pub const ENDPOINT_PLACEHOLDER_MARKER: &str = "your-api.example.com";

/// Environment override for the conversion endpoint.
pub const CONVERT_ENDPOINT_ENV: &str = "BANKCSV_CONVERT_ENDPOINT";

/// Simulated latency applied on the demo fallback path.
pub const DEMO_LATENCY_MS: u64 = 900;

/// Delay after which a staged-download handle is released.
pub const DOWNLOAD_RELEASE_DELAY_MS: u64 = 60_000;

/// In-progress status shown while a submission is in flight.
pub const UPLOADING_STATUS: &str = "Uploading and converting...";

/// Status shown when the server path completes.
pub const SERVER_SUCCESS_STATUS: &str = "CSV ready. Downloaded from server.";

/// Status shown when the demo fallback produced the sample CSV.
pub const DEMO_STATUS: &str =
    "Demo CSV created (configure the convert endpoint to call the real API).";

/// Fallback status for failures without a usable message.
pub const GENERIC_FAILURE_STATUS: &str = "Upload failed.";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Resolves the conversion endpoint from the environment override or the
/// compile-time default.
pub fn convert_endpoint_from_env() -> String {
    match std::env::var(CONVERT_ENDPOINT_ENV) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => DEFAULT_CONVERT_ENDPOINT.to_string(),
    }
}

/// Returns `true` when the endpoint points at a real conversion service.
///
/// Blank endpoints and endpoints still carrying the placeholder host select
/// the demo fallback instead.
pub fn endpoint_is_configured(endpoint: &str) -> bool {
    !endpoint.trim().is_empty() && !endpoint.contains(ENDPOINT_PLACEHOLDER_MARKER)
}

/// Redacts common secret markers in log-safe output.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for key in ["password", "token", "authorization", "bearer"] {
        redacted = redact_key_value(&redacted, key);
    }
    redacted
}

fn redact_key_value(input: &str, key: &str) -> String {
    let lower = input.to_ascii_lowercase();
    if let Some(position) = lower.find(key) {
        let prefix = &input[..position];
        return format!("{prefix}{key}=<redacted>");
    }

    input.to_string()
}

/// Returns current Unix time in milliseconds.
pub fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_millis() as u64)
}

/// Staged artifact handle with a bounded lifetime.
///
/// The artifact file itself stays in the downloads directory; the handle is
/// what the controller releases once the fixed delay elapses, mirroring a
/// scoped platform resource without a deterministic "done" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDownload {
    /// Location of the staged artifact file.
    pub path: PathBuf,
    /// Artifact filename offered to the user.
    pub file_name: String,
    /// Staging time in Unix epoch milliseconds.
    pub staged_at_ms: u64,
}

impl StagedDownload {
    /// Returns `true` once the release delay has elapsed at `now_ms`.
    pub fn is_released(&self, now_ms: u64) -> bool {
        now_ms >= self.staged_at_ms.saturating_add(DOWNLOAD_RELEASE_DELAY_MS)
    }
}

/// Writes an artifact into the downloads directory.
///
/// The artifact filename is reduced to its final path component so a
/// server-suggested name can never escape the downloads directory.
///
/// # Errors
/// Returns [`SubmitError::Staging`] when the directory or file cannot be
/// written.
pub fn stage_artifact(
    downloads_dir: &Path,
    artifact: &DownloadArtifact,
    staged_at_ms: u64,
) -> Result<StagedDownload, SubmitError> {
    std::fs::create_dir_all(downloads_dir).map_err(|error| {
        SubmitError::Staging(format!(
            "downloads directory create failed '{}': {error}",
            downloads_dir.display()
        ))
    })?;

    let file_name = safe_file_name(&artifact.file_name);
    let path = downloads_dir.join(&file_name);
    std::fs::write(&path, &artifact.bytes).map_err(|error| {
        SubmitError::Staging(format!(
            "artifact write failed '{}': {error}",
            path.display()
        ))
    })?;

    Ok(StagedDownload {
        path,
        file_name,
        staged_at_ms,
    })
}

fn safe_file_name(name: &str) -> String {
    let sanitized = name.replace(['/', '\\', ':', '?', '*', '"', '<', '>', '|'], "_");
    let trimmed = sanitized.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        bankcsv_core::DEFAULT_ARTIFACT_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Per-run append-only log file.
pub struct RunLog {
    file: Mutex<File>,
    path: PathBuf,
}

impl RunLog {
    /// Creates the run log file inside `dir`.
    ///
    /// # Errors
    /// Returns [`SubmitError::Staging`] when the directory or log file
    /// cannot be created.
    pub fn create(dir: &Path) -> Result<Self, SubmitError> {
        std::fs::create_dir_all(dir).map_err(|error| {
            SubmitError::Staging(format!(
                "log directory create failed '{}': {error}",
                dir.display()
            ))
        })?;

        let path = dir.join(format!("{}_bankcsv.log", unix_timestamp_millis()));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|error| {
                SubmitError::Staging(format!(
                    "log file create failed '{}': {error}",
                    path.display()
                ))
            })?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// Appends one structured log line.
    ///
    /// # Side effects
    /// Detail text passes through [`redact_sensitive`] before it is written;
    /// `ERROR` lines flush eagerly.
    pub fn write_line(&self, level: &str, stage: &str, action: &str, detail: &str) {
        let timestamp = unix_timestamp_millis();
        let detail = redact_sensitive(detail);
        let line = format!("{timestamp} | {level} | {stage} | {action} | {detail}\n");

        if let Ok(mut file) = self.file.lock() {
            let _ = file.write_all(line.as_bytes());
            if level == "ERROR" {
                let _ = file.flush();
            }
        }
    }

    /// Returns the log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Flat status snapshot for shells rendering the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionStatus {
    /// Whether the submit control is currently enabled.
    pub can_submit: bool,
    /// Whether a submission is in flight.
    pub loading: bool,
    /// Current status text, empty between submissions.
    pub status_text: String,
    /// Whether the status carries the error tone.
    pub status_is_error: bool,
    /// Download link label, when an artifact is offered.
    pub download_label: Option<String>,
}

/// Projects UI runtime state into a flat status snapshot.
pub fn project_submission_status(state: &UiState) -> SubmissionStatus {
    SubmissionStatus {
        can_submit: state.can_submit(),
        loading: state.loading,
        status_text: state
            .status
            .as_ref()
            .map(|status| status.text.clone())
            .unwrap_or_default(),
        status_is_error: state.status_is_error(),
        download_label: state.download.as_ref().map(|offer| offer.label.clone()),
    }
}

/// Controller construction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Conversion endpoint URL.
    pub endpoint: String,
    /// Directory receiving staged artifacts.
    pub downloads_dir: PathBuf,
    /// Simulated latency for the demo fallback path.
    pub demo_latency: Duration,
}

impl ControllerConfig {
    /// Builds configuration from the environment override and defaults.
    pub fn from_env(downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: convert_endpoint_from_env(),
            downloads_dir: downloads_dir.into(),
            demo_latency: Duration::from_millis(DEMO_LATENCY_MS),
        }
    }
}

/// Orchestrates one submission from user intent to a staged download.
///
/// # Concurrency
/// Submissions are serialized by the UI loading flag: [`Self::on_submit`]
/// returns immediately while one is in flight, so at most one request is
/// ever on the wire.
pub struct UploadController {
    form: SubmissionForm,
    ui: UiState,
    config: ControllerConfig,
    transport: Arc<dyn ConvertTransport>,
    run_log: Option<RunLog>,
    staged: Option<StagedDownload>,
}

impl UploadController {
    /// Creates a controller over the given transport.
    pub fn new(config: ControllerConfig, transport: Arc<dyn ConvertTransport>) -> Self {
        Self {
            form: SubmissionForm::new(),
            ui: UiState::new(app_version()),
            config,
            transport,
            run_log: None,
            staged: None,
        }
    }

    /// Attaches a per-run log file.
    pub fn attach_run_log(&mut self, run_log: RunLog) {
        self.run_log = Some(run_log);
    }

    /// Returns the current UI state.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Returns the current form state.
    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    /// Returns the staged download from the last successful submission.
    pub fn last_download(&self) -> Option<&StagedDownload> {
        self.staged.as_ref()
    }

    /// Releases the staged-download handle once its delay has elapsed.
    ///
    /// The artifact file and the UI download offer are left in place; only
    /// the handle is dropped.
    pub fn release_expired_download(&mut self, now_ms: u64) {
        if let Some(staged) = &self.staged
            && staged.is_released(now_ms)
        {
            self.staged = None;
        }
    }

    /// Input capture for the bank selector.
    pub fn set_bank(&mut self, bank: &str) {
        self.form.set_bank(bank);
    }

    /// Input capture for the password field.
    pub fn set_password(&mut self, value: &str) {
        self.form.set_password(value);
    }

    /// Event handler for file selection changes.
    pub fn on_file_change(&mut self, file: Option<StatementFile>) {
        self.ui
            .on_file_chosen(file.as_ref().map(|file| file.name.as_str()));
        self.form.select_file(file);
    }

    /// Event handler for the password mode radio pair.
    ///
    /// # Side effects
    /// Disabling the password clears any entered value (form invariant) and
    /// flips field enablement in the UI state.
    pub fn on_password_mode_change(&mut self, mode: PasswordMode) {
        self.form.set_password_mode(mode);
        self.ui
            .set_password_enabled(mode == PasswordMode::Required);
    }

    /// Event handler for the submit action; runs one submission lifecycle.
    ///
    /// Ignored while a submission is already in flight. Validation failures
    /// settle without any transport call; every outcome clears the loading
    /// flag as its final step.
    pub fn on_submit(&mut self) {
        if !self.ui.can_submit() {
            return;
        }

        self.ui.clear_feedback();

        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(error) => {
                self.log_error("submit", "validation_failed", &error.to_string());
                self.ui.show_status(error.to_string(), StatusTone::Error);
                return;
            }
        };

        self.ui.set_loading(true);
        self.ui.show_status(UPLOADING_STATUS, StatusTone::Success);
        self.log_info(
            "submit",
            "begin",
            &format!("bank={} file={}", request.bank, request.file_name),
        );

        match self.run_submission(&request) {
            Ok((staged, status_text)) => {
                self.log_info(
                    "submit",
                    "artifact_staged",
                    &format!("path={}", staged.path.display()),
                );
                self.ui.offer_download(&staged.file_name);
                self.ui.show_status(status_text, StatusTone::Success);
                self.staged = Some(staged);
            }
            Err(error) => {
                let message = status_message_for(&error);
                self.log_error("submit", "failed", &message);
                self.ui.show_status(message, StatusTone::Error);
            }
        }

        self.ui.set_loading(false);
    }

    fn run_submission(
        &self,
        request: &ConvertRequest,
    ) -> Result<(StagedDownload, &'static str), SubmitError> {
        if !endpoint_is_configured(&self.config.endpoint) {
            std::thread::sleep(self.config.demo_latency);
            let artifact = DownloadArtifact::sample();
            let staged = stage_artifact(
                &self.config.downloads_dir,
                &artifact,
                unix_timestamp_millis(),
            )?;
            return Ok((staged, DEMO_STATUS));
        }

        let client =
            ConvertClient::new(self.config.endpoint.as_str(), Arc::clone(&self.transport))?;
        let response = client.convert(request)?;
        let artifact = interpret_response(
            &response.content_type,
            response.content_disposition.as_deref(),
            response.body,
        )?;
        let staged = stage_artifact(
            &self.config.downloads_dir,
            &artifact,
            unix_timestamp_millis(),
        )?;

        Ok((staged, SERVER_SUCCESS_STATUS))
    }

    fn log_info(&self, stage: &str, action: &str, detail: &str) {
        if let Some(run_log) = &self.run_log {
            run_log.write_line("INFO", stage, action, detail);
        }
    }

    fn log_error(&self, stage: &str, action: &str, detail: &str) {
        if let Some(run_log) = &self.run_log {
            run_log.write_line("ERROR", stage, action, detail);
        }
    }
}

fn status_message_for(error: &SubmitError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        GENERIC_FAILURE_STATUS.to_string()
    } else {
        message
    }
}

/// Submission pipeline error type.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Form validation failure.
    #[error(transparent)]
    Form(#[from] FormError),
    /// Upload client or transport failure.
    #[error(transparent)]
    Upload(#[from] UploadError),
    /// Response contract violation.
    #[error(transparent)]
    Contract(#[from] ContractError),
    /// Artifact or log staging failure.
    #[error("saving download failed: {0}")]
    Staging(String),
}
