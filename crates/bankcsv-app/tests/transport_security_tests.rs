//! Integration tests for endpoint security checks.

mod common;

use std::sync::Arc;

use bankcsv_app::project_submission_status;
use bankcsv_upload::validate_convert_endpoint;

#[test]
fn transport_security_tests_reject_non_https_endpoints() {
    assert!(validate_convert_endpoint("https://api.example.test/convert").is_ok());
    assert!(validate_convert_endpoint("http://api.example.test/convert").is_err());
}

#[test]
fn transport_security_tests_surface_policy_failure_as_status() {
    let transport = common::CannedTransport::unreachable();
    let mut controller = common::controller(
        "http://api.example.test/convert",
        "security-http",
        Arc::clone(&transport),
    );
    common::fill_valid_form(&mut controller);

    controller.on_submit();

    let status = project_submission_status(controller.ui());
    assert!(status.status_is_error);
    assert!(status.status_text.contains("https"));
    assert_eq!(transport.calls(), 0);
}
