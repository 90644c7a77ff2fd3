//! Integration tests for the unconfigured-endpoint demo fallback.

mod common;

use std::fs;
use std::sync::Arc;

use bankcsv_app::{DEFAULT_CONVERT_ENDPOINT, DEMO_STATUS, project_submission_status};
use bankcsv_core::SAMPLE_STATEMENT_CSV;

#[test]
fn demo_fallback_tests_stage_sample_csv_without_network() {
    let transport = common::CannedTransport::unreachable();
    let mut controller = common::controller(
        DEFAULT_CONVERT_ENDPOINT,
        "demo-fallback",
        Arc::clone(&transport),
    );
    common::fill_valid_form(&mut controller);

    controller.on_submit();

    let status = project_submission_status(controller.ui());
    assert_eq!(status.status_text, DEMO_STATUS);
    assert!(!status.status_is_error);
    assert!(!status.loading);
    assert_eq!(status.download_label.as_deref(), Some("Download result.csv"));
    assert_eq!(transport.calls(), 0);

    let staged = controller.last_download().expect("demo artifact should stage");
    assert_eq!(staged.file_name, "result.csv");
    let contents = fs::read_to_string(&staged.path).expect("staged file should be readable");
    assert_eq!(contents, SAMPLE_STATEMENT_CSV);
}

#[test]
fn demo_fallback_tests_blank_endpoint_also_selects_demo_path() {
    let transport = common::CannedTransport::unreachable();
    let mut controller = common::controller("", "demo-blank", Arc::clone(&transport));
    common::fill_valid_form(&mut controller);

    controller.on_submit();

    assert_eq!(transport.calls(), 0);
    assert!(controller.last_download().is_some());
}
