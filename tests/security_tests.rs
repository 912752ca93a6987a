//! Security Test Suite
//!
//! Validates the hardening around user-supplied text: download file names,
//! request size limits and binary input rejection.

use std::path::Path;

use oligo_order::core::session::Session;
use oligo_order::core::types::{ClientInfo, OrderType};
use oligo_order::order::{generate, OrderError};
use oligo_order::template::{CellLayout, TemplateStore};
use oligo_order::utils::validation::{
    download_filename, validate_text_content, ValidationError, DOWNLOAD_EXTENSION, DOWNLOAD_PREFIX,
    MAX_FILENAME_LENGTH, MAX_TEXT_SIZE,
};

/// Test that client names can never steer the download path
#[test]
fn test_download_filename_traversal_security() {
    let traversal_attempts = vec![
        "../etc/passwd",
        "..\\windows\\system32",
        "test/../../secret",
        "/absolute/path",
        "C:\\Users\\admin",
        "name\0.exe",
        "....",
    ];

    for attempt in traversal_attempts {
        let filename = download_filename(attempt);
        assert!(
            !filename.contains('/') && !filename.contains('\\') && !filename.contains('\0'),
            "File name for '{attempt}' still contains a separator: {filename}"
        );
        let stem = filename
            .strip_prefix(DOWNLOAD_PREFIX)
            .and_then(|rest| rest.strip_suffix(DOWNLOAD_EXTENSION))
            .expect("prefix and extension are always present");
        assert!(!stem.starts_with('.'), "Hidden file name for '{attempt}': {filename}");
    }
}

/// Test that header injection characters are removed from file names
#[test]
fn test_download_filename_header_injection() {
    let filename = download_filename("evil\r\nSet-Cookie: x=1\";");
    assert!(!filename.contains('\r'));
    assert!(!filename.contains('\n'));
    assert!(!filename.contains('"'));
    assert!(!filename.contains(';'));
}

#[test]
fn test_download_filename_length_limit() {
    for name in ["a".repeat(10_000), "张".repeat(10_000)] {
        assert!(download_filename(&name).chars().count() <= MAX_FILENAME_LENGTH);
    }
}

/// Test that binary uploads are not treated as order text
#[test]
fn test_binary_text_rejected() {
    let mut xlsx_like = b"PK\x03\x04".to_vec();
    xlsx_like.extend(std::iter::repeat(0u8).take(500));
    assert!(matches!(
        validate_text_content(&xlsx_like),
        Err(ValidationError::InvalidTextContent)
    ));

    let oversized = vec![b'A'; MAX_TEXT_SIZE + 1];
    assert!(matches!(
        validate_text_content(&oversized),
        Err(ValidationError::TextTooLarge)
    ));
}

/// Test that a non-workbook template is reported as a fill failure, not a panic
#[test]
fn test_fake_template_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("template_dna.xlsx"), b"name,sequence\n").unwrap();

    let err = run_primer_order(dir.path()).unwrap_err();
    match err {
        OrderError::Fill(message) => assert!(message.contains("not an xlsx workbook")),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Test that pathological input finishes quickly and yields no rows
#[test]
fn test_pathological_input_is_bounded() {
    let text = "F:".repeat(100_000) + &" ".repeat(100_000);
    let start = std::time::Instant::now();
    let rows = oligo_order::preview(&text, OrderType::DnaPrimer);
    assert!(rows.is_empty());
    assert!(start.elapsed() < std::time::Duration::from_secs(5));
}

fn run_primer_order(dir: &Path) -> Result<oligo_order::GeneratedOrder, OrderError> {
    let session = Session::with_request(ClientInfo::default(), OrderType::DnaPrimer, "F: ACGTACGT");
    generate(
        &session,
        &TemplateStore::in_dir(dir),
        &CellLayout::load_embedded().unwrap(),
    )
}
