use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::utils::validation::{validate_text_content, ValidationError, MAX_TEXT_SIZE};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Read order text from a file, or from stdin when the path is `-`.
///
/// # Errors
///
/// Returns `InputError::Io` if the source cannot be read, or
/// `InputError::Invalid` if the content is too large or not text.
pub fn read_input(path: &Path) -> Result<String, InputError> {
    let mut content = Vec::new();

    if path.as_os_str() == "-" {
        // One byte past the limit is enough to reject oversized input
        std::io::stdin()
            .lock()
            .take(MAX_TEXT_SIZE as u64 + 1)
            .read_to_end(&mut content)?;
    } else {
        std::fs::File::open(path)?
            .take(MAX_TEXT_SIZE as u64 + 1)
            .read_to_end(&mut content)?;
    }

    let text = validate_text_content(&content)?;
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "F: ATCGATCG").unwrap();
        let text = read_input(file.path()).unwrap();
        assert_eq!(text, "F: ATCGATCG\n");
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, InputError::Io(_)));
    }

    #[test]
    fn test_read_input_too_large() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&vec![b'A'; MAX_TEXT_SIZE + 10]).unwrap();
        let err = read_input(file.path()).unwrap_err();
        assert!(matches!(
            err,
            InputError::Invalid(ValidationError::TextTooLarge)
        ));
    }
}
