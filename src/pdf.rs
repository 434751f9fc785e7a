use std::path::Path;

use pdf_oxide::document::PdfDocument;

use crate::error::{PennyError, Result};
use crate::store::TextExtractor;

/// PDF statement text extraction. Pages are concatenated in reading order;
/// layout reconstruction beyond the text layer is out of scope.
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String> {
        let mut doc =
            PdfDocument::open(path).map_err(|e| PennyError::Extraction(e.to_string()))?;
        let pages = doc
            .page_count()
            .map_err(|e| PennyError::Extraction(e.to_string()))?;

        let mut text = String::new();
        for page in 0..pages {
            let page_text = doc
                .extract_text(page)
                .map_err(|e| PennyError::Extraction(e.to_string()))?;
            text.push_str(&page_text);
            text.push('\n');
        }
        Ok(text)
    }
}
