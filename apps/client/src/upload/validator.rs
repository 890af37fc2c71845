//! File Validator — pure size and MIME type checks run before a file is
//! accepted into the upload form.

use crate::errors::ValidationError;
use crate::upload::form::SelectedFile;

/// 10 MiB.
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_UNKNOWN: &str = "application/octet-stream";

pub const ACCEPTED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_DOC, MIME_DOCX];

/// Validates a candidate file.
///
/// The size check runs first, so an oversized file is reported as too large
/// whatever its type.
pub fn validate_file(file: &SelectedFile) -> Result<(), ValidationError> {
    if file.size_bytes > MAX_FILE_SIZE_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    if !ACCEPTED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ValidationError::InvalidFileType);
    }
    Ok(())
}

/// Maps a file extension to the MIME type a browser would report for it.
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    match extension.to_ascii_lowercase().as_str() {
        "pdf" => MIME_PDF,
        "doc" => MIME_DOC,
        "docx" => MIME_DOCX,
        _ => MIME_UNKNOWN,
    }
}
