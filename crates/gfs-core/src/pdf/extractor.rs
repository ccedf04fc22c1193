//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{DocumentText, PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Extract every page's text into a `DocumentText`.
    ///
    /// A PDF with no pages gives an empty document. When lopdf yields no text
    /// on any page, pdf-extract's per-page text is used instead so the last
    /// page is still available for the tax total.
    pub fn extract_document(&self) -> Result<DocumentText> {
        let page_count = self.page_count();
        if page_count == 0 {
            warn!("PDF has no pages");
            return Ok(DocumentText::default());
        }

        let mut pages = Vec::with_capacity(page_count as usize);
        for page_num in 1..=page_count {
            match self.extract_page_text(page_num) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    warn!("Failed to extract text from page {}: {}", page_num, e);
                    pages.push(String::new());
                }
            }
        }

        let document = assemble_pages(pages, || self.extract_pages())?;
        debug!(
            "Extracted {} chars of text from {} pages",
            document.text.len(),
            document.pages.len()
        );
        Ok(document)
    }
}

/// Use `pages` unless every one is blank, in which case take `fallback`.
fn assemble_pages<F>(pages: Vec<String>, fallback: F) -> Result<DocumentText>
where
    F: FnOnce() -> Result<Vec<String>>,
{
    if pages.iter().any(|p| !p.trim().is_empty()) {
        return Ok(DocumentText::from_pages(pages));
    }

    debug!("No lopdf page text, falling back to pdf-extract");
    Ok(DocumentText::from_pages(fallback()?))
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_pages(&self) -> Result<Vec<String>> {
        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}
