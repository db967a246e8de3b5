// Upload intake
// Implements: type/size validation, text recovery per document kind, upload record.
// Text recovery never fails: extraction errors become placeholder text naming the file.

pub mod pdf;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const MEGABYTE: f64 = 1024.0 * 1024.0;

pub const PDF_TYPE: &str = "application/pdf";
pub const DOC_TYPE: &str = "application/msword";
pub const DOCX_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const TEXT_TYPE: &str = "text/plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    PlainText,
}

impl DocumentKind {
    fn from_content_type(content_type: &str) -> Option<Self> {
        // "text/plain; charset=utf-8"
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            PDF_TYPE => Some(DocumentKind::Pdf),
            DOC_TYPE | DOCX_TYPE => Some(DocumentKind::Word),
            TEXT_TYPE => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Word),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("Please upload a PDF, DOC, or DOCX file. Current file type: {0}")]
    UnsupportedType(String),

    #[error(
        "File size must be less than {:.0}MB. Current size: {:.2}MB",
        megabytes(.limit),
        megabytes(.size)
    )]
    TooLarge { size: usize, limit: usize },
}

fn megabytes(bytes: &usize) -> f64 {
    *bytes as f64 / MEGABYTE
}

/// A file as received from the client, before any processing.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Declared MIME type first; the extension covers clients that send
    /// `application/octet-stream` or nothing.
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_content_type(&self.content_type)
            .or_else(|| DocumentKind::from_file_name(&self.name))
    }

    pub fn validate(&self, max_bytes: usize) -> Result<DocumentKind, UploadError> {
        let kind = self
            .kind()
            .ok_or_else(|| UploadError::UnsupportedType(self.content_type.clone()))?;
        if self.bytes.len() > max_bytes {
            return Err(UploadError::TooLarge {
                size: self.bytes.len(),
                limit: max_bytes,
            });
        }
        Ok(kind)
    }

    /// Recovers the text layer. Always returns something the pipeline can read.
    pub fn extract_text(&self, kind: DocumentKind) -> String {
        match kind {
            DocumentKind::PlainText => String::from_utf8_lossy(&self.bytes).into_owned(),
            DocumentKind::Word => format!(
                "Resume content from: {}\n\nNote: Please manually copy and paste your resume content for full optimization features.\n\nThis file type ({}) requires server-side processing for text extraction.",
                self.name, self.content_type
            ),
            DocumentKind::Pdf => match pdf::extract_pdf_text(&self.bytes) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Text extraction failed for {}: {e}", self.name);
                    format!(
                        "Resume uploaded: {}\n\nError extracting text content: {e}. Please ensure the file is not corrupted and try again.",
                        self.name
                    )
                }
            },
        }
    }
}

/// Metadata and recovered text of the current upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub name: String,
    pub size: usize,
    #[serde(rename = "type")]
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
    pub text_content: String,
}

impl UploadRecord {
    pub fn new(file: &UploadedFile, text_content: String) -> Self {
        UploadRecord {
            name: file.name.clone(),
            size: file.bytes.len(),
            content_type: file.content_type.clone(),
            uploaded_at: Utc::now(),
            text_content,
        }
    }
}
