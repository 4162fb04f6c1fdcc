//! Turns a staged PDF or DOCX file into plain text.
//!
//! The handler resolves a `DocumentKind` from the upload's file name and asks
//! it for a `TextExtractor`. Adding a format means adding a variant and an
//! extractor; dispatch stays untouched.

use std::path::Path;

use thiserror::Error;

pub mod docx;
pub mod pdf;

#[cfg(test)]
pub(crate) mod fixtures;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Pdf(String),

    #[error("{0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    #[error("extractor panicked")]
    Panicked,
}

/// Reads all textual content from a document on disk.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Document formats, keyed by lower-cased file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Unsupported,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Self {
        match ext {
            ".pdf" => DocumentKind::Pdf,
            ".docx" => DocumentKind::Docx,
            _ => DocumentKind::Unsupported,
        }
    }

    /// `None` for `Unsupported`.
    pub fn extractor(self) -> Option<&'static dyn TextExtractor> {
        match self {
            DocumentKind::Pdf => Some(&PdfExtractor),
            DocumentKind::Docx => Some(&DocxExtractor),
            DocumentKind::Unsupported => None,
        }
    }
}

/// Lower-cased extension of the last path element, dot included.
///
/// `"CV.Final.PDF"` gives `".pdf"`, `".docx"` gives `".docx"`, and a name
/// without a dot gives `""`.
pub fn file_extension(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match base.rfind('.') {
        Some(idx) => base[idx..].to_lowercase(),
        None => String::new(),
    }
}

/// Runs the kind's extractor on the blocking pool. Parsing libraries are
/// synchronous and some of them panic on malformed input; a panic is reported
/// as `ExtractError::Panicked`.
pub async fn extract_blocking(
    extractor: &'static dyn TextExtractor,
    path: &Path,
) -> Result<String, ExtractError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || extractor.extract(&path))
        .await
        .map_err(|_| ExtractError::Panicked)?
}
