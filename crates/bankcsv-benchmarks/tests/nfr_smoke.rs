//! Benchmark smoke test for the deterministic envelope/interpret loop.

use std::time::Instant;

use bankcsv_contract::interpret_response;
use bankcsv_core::ConvertRequest;
use bankcsv_upload::{ConvertEnvelope, idempotency_key_for_request};

#[test]
fn benchmark_pipeline_smoke_prints_latency() {
    let request = ConvertRequest {
        bank: "kotak".to_string(),
        file_name: "statement.pdf".to_string(),
        pdf_bytes: vec![0x25; 64 * 1024],
        password: None,
    };
    let response_body = br#"{"csv":"Date,Debit,Credit\n2025-01-01,0,1000\n","filename":"eod.csv"}"#;

    let start = Instant::now();
    let mut key_lengths = 0usize;
    let mut artifact_bytes = 0usize;

    for _ in 0..100 {
        let envelope = ConvertEnvelope::from_request("https://api.example.test/convert", &request);
        key_lengths += idempotency_key_for_request(&request).len();
        artifact_bytes += envelope.pdf_bytes.len();

        let artifact = interpret_response("application/json", None, response_body.to_vec())
            .expect("response should interpret");
        artifact_bytes += artifact.bytes.len();
    }

    let elapsed_ms = start.elapsed().as_millis();
    println!("benchmark_pipeline_elapsed_ms={elapsed_ms}");
    println!("benchmark_idempotency_key_total_len={key_lengths}");
    println!("benchmark_artifact_total_bytes={artifact_bytes}");

    // This is a lightweight guardrail; strict NFR checks are environment-specific.
    assert!(
        elapsed_ms < 5_000,
        "pipeline smoke benchmark should stay bounded"
    );
}
