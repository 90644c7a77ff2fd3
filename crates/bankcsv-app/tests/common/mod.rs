//! Shared fixtures for app integration tests.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bankcsv_app::{ControllerConfig, UploadController};
use bankcsv_core::StatementFile;
use bankcsv_upload::{ConvertEnvelope, ConvertTransport, UploadError, WireResponse};

/// Endpoint that selects the real upload path in tests.
#[allow(dead_code)]
pub const CONFIGURED_ENDPOINT: &str = "https://api.example.test/convert";

/// Creates a deterministic PDF selection fixture.
#[allow(dead_code)]
pub fn fixture_pdf() -> StatementFile {
    StatementFile::new(
        "statement.pdf",
        "application/pdf",
        b"%PDF-1.4 fixture".to_vec(),
    )
}

/// Returns a per-test downloads directory under the system temp dir.
#[allow(dead_code)]
pub fn test_downloads_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bankcsv-app-tests-{tag}"))
}

/// Canned-response transport that counts calls and records envelopes.
#[allow(dead_code)]
pub struct CannedTransport {
    response: Mutex<Option<Result<WireResponse, UploadError>>>,
    calls: Mutex<u32>,
    last_envelope: Mutex<Option<ConvertEnvelope>>,
}

#[allow(dead_code)]
impl CannedTransport {
    /// Transport that answers the next send with `response`.
    pub fn with_response(response: WireResponse) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Some(Ok(response))),
            calls: Mutex::new(0),
            last_envelope: Mutex::new(None),
        })
    }

    /// Transport that fails the next send with `error`.
    pub fn with_error(error: UploadError) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Some(Err(error))),
            calls: Mutex::new(0),
            last_envelope: Mutex::new(None),
        })
    }

    /// Transport for paths where no send is expected.
    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(None),
            calls: Mutex::new(0),
            last_envelope: Mutex::new(None),
        })
    }

    /// Returns how many sends were observed.
    pub fn calls(&self) -> u32 {
        *self.calls.lock().expect("call counter lock should work")
    }

    /// Returns the most recent envelope, when one was sent.
    pub fn last_envelope(&self) -> Option<ConvertEnvelope> {
        self.last_envelope
            .lock()
            .expect("envelope lock should work")
            .clone()
    }
}

impl ConvertTransport for CannedTransport {
    fn send(&self, envelope: &ConvertEnvelope) -> Result<WireResponse, UploadError> {
        *self.calls.lock().expect("call counter lock should work") += 1;
        *self
            .last_envelope
            .lock()
            .expect("envelope lock should work") = Some(envelope.clone());

        match self
            .response
            .lock()
            .expect("response lock should work")
            .take()
        {
            Some(result) => result,
            None => Err(UploadError::Transport(
                "no canned response configured".to_string(),
            )),
        }
    }
}

/// Builds a controller with zero demo latency and a per-test downloads dir.
#[allow(dead_code)]
pub fn controller(
    endpoint: &str,
    tag: &str,
    transport: Arc<CannedTransport>,
) -> UploadController {
    UploadController::new(
        ControllerConfig {
            endpoint: endpoint.to_string(),
            downloads_dir: test_downloads_dir(tag),
            demo_latency: Duration::ZERO,
        },
        transport,
    )
}

/// Fills the form with a valid bank + PDF selection.
#[allow(dead_code)]
pub fn fill_valid_form(controller: &mut UploadController) {
    controller.set_bank("kotak");
    controller.on_file_change(Some(fixture_pdf()));
}
