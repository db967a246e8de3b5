//! PDF text-layer extraction.
//!
//! `pdf_extract` panics on some malformed documents instead of returning an
//! error, so every call crosses a `catch_unwind` boundary.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF extraction failed: {0}")]
    Extract(String),

    #[error("PDF extraction panicked (malformed document)")]
    Panicked,
}

/// Text of every page, pages separated by a blank line.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, PdfError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }));
    match result {
        Ok(Ok(pages)) => Ok(pages
            .iter()
            .map(|page| page.trim())
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")),
        Ok(Err(e)) => Err(PdfError::Extract(e.to_string())),
        Err(_) => Err(PdfError::Panicked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_are_an_error_not_a_panic() {
        assert!(extract_pdf_text(b"definitely not a pdf").is_err());
    }

    #[test]
    fn test_truncated_header_is_an_error() {
        assert!(extract_pdf_text(b"%PDF-1.7\n1 0 obj\n<<").is_err());
    }
}
