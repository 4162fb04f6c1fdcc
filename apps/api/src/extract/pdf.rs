use std::path::Path;

use tracing::debug;

use super::{ExtractError, TextExtractor};

/// PDF text via `pdf-extract`.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let text = pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))?;
        debug!(path = %path.display(), chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}
