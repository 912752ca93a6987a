//! Centralized validation and helper functions.

/// Maximum size of pasted order text (`DoS` protection)
pub const MAX_TEXT_SIZE: usize = 1024 * 1024; // 1MB

/// Maximum length of a single client header field
pub const MAX_CLIENT_FIELD_LENGTH: usize = 256;

/// Maximum length of a generated download file name, in characters
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Literal prefix of every generated order form
pub const DOWNLOAD_PREFIX: &str = "百力格订购表_";

/// Extension of generated order forms
pub const DOWNLOAD_EXTENSION: &str = ".xlsx";

/// MIME type of generated order forms
pub const XLSX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Order text too large: exceeds {MAX_TEXT_SIZE} bytes")]
    TextTooLarge,
    #[error("Client field '{0}' too long: exceeds {MAX_CLIENT_FIELD_LENGTH} characters")]
    FieldTooLong(&'static str),
    #[error("Input appears to be binary or is not valid UTF-8")]
    InvalidTextContent,
    #[error("Template is not an xlsx workbook")]
    NotAWorkbook,
}

/// Validate that raw input bytes are usable as order text.
///
/// Rejects oversized input, invalid UTF-8 and content that is mostly
/// non-printable (someone uploading a spreadsheet instead of pasting text).
///
/// # Errors
///
/// Returns `ValidationError::TextTooLarge` if the content exceeds
/// [`MAX_TEXT_SIZE`] or `ValidationError::InvalidTextContent` if it is binary.
pub fn validate_text_content(content: &[u8]) -> Result<&str, ValidationError> {
    if content.len() > MAX_TEXT_SIZE {
        return Err(ValidationError::TextTooLarge);
    }

    let text = std::str::from_utf8(content).map_err(|_| ValidationError::InvalidTextContent)?;

    // Control characters other than tab/newline/carriage return
    let control_count = text
        .chars()
        .filter(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r'))
        .count();

    // Allow up to 5% control characters
    if text.len() > 100 && control_count > text.len() / 20 {
        return Err(ValidationError::InvalidTextContent);
    }

    Ok(text)
}

/// Check a client header field against the length limit.
///
/// # Errors
///
/// Returns `ValidationError::FieldTooLong` naming the offending field.
pub fn validate_client_field(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_CLIENT_FIELD_LENGTH {
        return Err(ValidationError::FieldTooLong(field));
    }
    Ok(())
}

/// Check that template bytes look like an xlsx (zip) container
#[must_use]
pub fn is_xlsx_content(content: &[u8]) -> bool {
    content.starts_with(b"PK\x03\x04")
}

/// Make a client name safe to embed in a file name.
///
/// Keeps letters (including CJK), digits, spaces, `-`, `_` and `.`; drops
/// path separators, control characters and everything else. Leading dots are
/// stripped so the result can never be a hidden file or traversal component.
#[must_use]
pub fn sanitize_client_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
        .collect();

    let cleaned = cleaned.trim_start_matches('.').trim();

    let budget = MAX_FILENAME_LENGTH
        - DOWNLOAD_PREFIX.chars().count()
        - DOWNLOAD_EXTENSION.chars().count();
    cleaned.chars().take(budget).collect()
}

/// File name offered for download: literal prefix plus client name.
///
/// # Examples
///
/// ```
/// use oligo_order::utils::validation::download_filename;
///
/// assert_eq!(download_filename("张三"), "百力格订购表_张三.xlsx");
/// assert_eq!(download_filename("../etc"), "百力格订购表_etc.xlsx");
/// ```
#[must_use]
pub fn download_filename(client_name: &str) -> String {
    format!(
        "{DOWNLOAD_PREFIX}{}{DOWNLOAD_EXTENSION}",
        sanitize_client_name(client_name)
    )
}
