//! Tests PDF acceptance by media type or filename extension.

use bankcsv_core::StatementFile;

#[test]
fn pdf_detection_tests_accepts_media_type_or_extension() {
    let by_type = StatementFile::new("scan", "application/pdf", vec![1]);
    assert!(by_type.is_pdf());

    let by_extension = StatementFile::new("Statement.PDF", "application/octet-stream", vec![1]);
    assert!(by_extension.is_pdf());

    let neither = StatementFile::new("notes.txt", "text/plain", vec![1]);
    assert!(!neither.is_pdf());
}
