//! Integration tests for the JSON response shape.

mod common;

use std::fs;
use std::sync::Arc;

use bankcsv_app::project_submission_status;
use bankcsv_upload::WireResponse;

fn json_response(body: serde_json::Value) -> WireResponse {
    WireResponse {
        status: 200,
        content_type: "application/json".to_string(),
        content_disposition: None,
        body: body.to_string().into_bytes(),
    }
}

#[test]
fn json_response_tests_stage_csv_under_suggested_filename() {
    let transport = common::CannedTransport::with_response(json_response(serde_json::json!({
        "csv": "a,b\n1,2\n",
        "filename": "out.csv",
    })));
    let mut controller = common::controller(
        common::CONFIGURED_ENDPOINT,
        "json-named",
        Arc::clone(&transport),
    );
    common::fill_valid_form(&mut controller);

    controller.on_submit();

    let status = project_submission_status(controller.ui());
    assert!(!status.status_is_error);
    assert_eq!(status.download_label.as_deref(), Some("Download out.csv"));

    let staged = controller.last_download().expect("artifact should stage");
    assert_eq!(staged.file_name, "out.csv");
    let contents = fs::read_to_string(&staged.path).expect("staged file should be readable");
    assert_eq!(contents, "a,b\n1,2\n");
}

#[test]
fn json_response_tests_default_filename_when_absent() {
    let transport = common::CannedTransport::with_response(json_response(serde_json::json!({
        "csv": "x\n",
    })));
    let mut controller = common::controller(
        common::CONFIGURED_ENDPOINT,
        "json-default-name",
        Arc::clone(&transport),
    );
    common::fill_valid_form(&mut controller);

    controller.on_submit();

    let staged = controller.last_download().expect("artifact should stage");
    assert_eq!(staged.file_name, "result.csv");
}

#[test]
fn json_response_tests_report_missing_csv_property() {
    let transport = common::CannedTransport::with_response(json_response(serde_json::json!({})));
    let mut controller = common::controller(
        common::CONFIGURED_ENDPOINT,
        "json-missing-csv",
        Arc::clone(&transport),
    );
    common::fill_valid_form(&mut controller);

    controller.on_submit();

    let status = project_submission_status(controller.ui());
    assert_eq!(
        status.status_text,
        "API returned JSON but no CSV found in `csv` property."
    );
    assert!(status.status_is_error);
    assert!(status.download_label.is_none());
}

#[test]
fn json_response_tests_report_unparseable_body() {
    let transport = common::CannedTransport::with_response(WireResponse {
        status: 200,
        content_type: "application/json".to_string(),
        content_disposition: None,
        body: b"not json".to_vec(),
    });
    let mut controller = common::controller(
        common::CONFIGURED_ENDPOINT,
        "json-invalid",
        Arc::clone(&transport),
    );
    common::fill_valid_form(&mut controller);

    controller.on_submit();

    let status = project_submission_status(controller.ui());
    assert_eq!(status.status_text, "Failed to parse JSON from server.");
    assert!(status.status_is_error);
    assert!(status.download_label.is_none());
}
