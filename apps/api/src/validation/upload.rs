//! Resume upload handling: sanity checks on the uploaded PDF bytes and plain
//! text extraction. Layout is discarded; only the text reaches the engine.

use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("File cannot be empty")]
    Empty,

    #[error("File size must be at most {max} bytes, got {size}")]
    TooLarge { size: usize, max: usize },

    #[error("File does not appear to be a valid PDF")]
    NotPdf,

    #[error("Failed to extract text from PDF: {0}")]
    Extraction(String),

    #[error("No text could be extracted from the PDF")]
    NoText,
}

/// Size and magic-number checks, run before the bytes reach the PDF parser.
pub fn check_pdf_bytes(bytes: &[u8], max_bytes: usize) -> Result<(), UploadError> {
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > max_bytes {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            max: max_bytes,
        });
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(UploadError::NotPdf);
    }
    Ok(())
}

/// Checks the bytes, extracts the text layer, and normalizes whitespace.
pub fn extract_resume_text(bytes: &[u8], max_bytes: usize) -> Result<String, UploadError> {
    check_pdf_bytes(bytes, max_bytes)?;

    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| UploadError::Extraction(e.to_string()))?;

    let text = clean_text(&raw);
    if text.is_empty() {
        return Err(UploadError::NoText);
    }
    Ok(text)
}

/// Collapses runs of spaces/tabs within a line and drops blank lines.
pub fn clean_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
