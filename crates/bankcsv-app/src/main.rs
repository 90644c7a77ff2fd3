#![warn(missing_docs)]
//! # bankcsv binary
//!
//! Command-line shell for the upload controller: reads one statement
//! submission from the arguments, runs it, and prints the final status.

use std::path::Path;
use std::process;
use std::sync::Arc;

use bankcsv_app::{
    ControllerConfig, RunLog, UploadController, app_version, project_submission_status,
};
use bankcsv_core::{PDF_MEDIA_TYPE, PasswordMode, StatementFile};
use bankcsv_transport::HttpConvertTransport;

/// CLI entry point.
fn main() {
    if let Err(message) = run() {
        eprintln!("bankcsv: {message}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (bank, pdf_path, password) = match args.as_slice() {
        [bank, pdf_path] => (bank, pdf_path, None),
        [bank, pdf_path, password] => (bank, pdf_path, Some(password)),
        _ => return Err("usage: bankcsv <bank> <statement.pdf> [password]".to_string()),
    };

    let bytes =
        std::fs::read(pdf_path).map_err(|error| format!("unable to read '{pdf_path}': {error}"))?;
    let file_name = Path::new(pdf_path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| format!("'{pdf_path}' has no file name"))?;
    let media_type = if file_name.to_ascii_lowercase().ends_with(".pdf") {
        PDF_MEDIA_TYPE
    } else {
        "application/octet-stream"
    };

    let downloads_dir = std::env::current_dir()
        .map_err(|error| format!("unable to resolve working directory: {error}"))?
        .join("downloads");

    let transport = Arc::new(
        HttpConvertTransport::new().map_err(|error| format!("transport init failed: {error}"))?,
    );
    let mut controller = UploadController::new(ControllerConfig::from_env(&downloads_dir), transport);
    match RunLog::create(&downloads_dir) {
        Ok(run_log) => controller.attach_run_log(run_log),
        Err(error) => eprintln!("bankcsv: run log unavailable: {error}"),
    }

    println!("bankcsv {}", app_version());

    controller.set_bank(bank);
    controller.on_file_change(Some(StatementFile::new(file_name, media_type, bytes)));
    if let Some(password) = password {
        controller.on_password_mode_change(PasswordMode::Required);
        controller.set_password(password);
    }
    controller.on_submit();

    let status = project_submission_status(controller.ui());
    if let Some(label) = &status.download_label
        && let Some(staged) = controller.last_download()
    {
        println!("{label} -> {}", staged.path.display());
    }
    if status.status_is_error {
        return Err(status.status_text);
    }

    println!("{}", status.status_text);
    Ok(())
}
