//! Uploaded files: content-type and size screening, and line splitting.

use bytes::Bytes;

use crate::error::ValidationError;

/// A file handed to [`crate::Ingestor::ingest_file`].
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    /// MIME type as declared by the uploader, parameters included.
    pub content_type: String,
    pub content: Bytes,
}

impl FileUpload {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            content: content.into(),
        }
    }
}

/// The part of a MIME type before any `;` parameters, trimmed and lowercased.
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn check_content_type(content_type: &str, allowed: &[String]) -> Result<(), ValidationError> {
    let essence = mime_essence(content_type);
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(&essence)) {
        return Ok(());
    }
    Err(ValidationError::UnsupportedContentType {
        content_type: content_type.to_string(),
        allowed: allowed.join(", "),
    })
}

/// Newline bytes plus one. Cheap upper bound used before decoding.
pub fn approximate_line_count(content: &[u8]) -> usize {
    content.iter().filter(|&&b| b == b'\n').count() + 1
}

pub fn check_line_count(lines: usize, max: usize) -> Result<(), ValidationError> {
    if lines > max {
        return Err(ValidationError::TooManyLines { lines, max });
    }
    Ok(())
}

/// Split on `\n` or `\r\n`. A trailing empty segment is kept, so `"a\n"`
/// yields two lines and `""` yields one.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut segments = text.split('\n').peekable();
    let mut lines = Vec::new();
    while let Some(segment) = segments.next() {
        if segments.peek().is_some() {
            lines.push(segment.strip_suffix('\r').unwrap_or(segment));
        } else {
            lines.push(segment);
        }
    }
    lines
}
