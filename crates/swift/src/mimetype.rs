//! Content-type detection for uploads

use std::path::Path;

/// Content type sent for zero-byte uploads
pub const EMPTY: &str = "application/x-empty";

const TEXT: &str = "text/plain";
const BINARY: &str = "application/octet-stream";

/// Detect the content type of an upload
///
/// Magic bytes win; when they are inconclusive the file extension of `path`
/// is consulted, and after that the content is classed as text or binary.
pub fn detect(data: &[u8], path: Option<&Path>) -> String {
    if data.is_empty() {
        return EMPTY.to_string();
    }

    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }

    if let Some(guess) = path.and_then(|p| mime_guess::from_path(p).first_raw()) {
        return guess.to_string();
    }

    if std::str::from_utf8(data).is_ok() {
        TEXT.to_string()
    } else {
        BINARY.to_string()
    }
}
