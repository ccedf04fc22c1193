//! Invoice text sources: PDF text layers and pre-extracted text.

mod extractor;

pub use extractor::PdfExtractor;

use std::path::Path;

use tracing::info;

use crate::error::PdfError;

/// Separator between pages in pre-extracted text files.
pub const PAGE_BREAK: char = '\u{0c}';

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Text of one invoice: every page concatenated, plus the pages themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentText {
    /// Page texts joined in document order.
    pub text: String,
    /// Text of each page, in order.
    pub pages: Vec<String>,
}

impl DocumentText {
    /// Build from per-page texts.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        Self {
            text: pages.join("\n"),
            pages,
        }
    }

    /// Split pre-extracted text on form feeds.
    pub fn from_plain_text(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self::from_pages(text.split(PAGE_BREAK))
    }

    /// Text of the last page, used for the tax total.
    pub fn last_page(&self) -> Option<&str> {
        self.pages.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Load invoice text from a PDF, or from a `.txt` file of pre-extracted text.
pub fn load_document(path: &Path) -> crate::Result<DocumentText> {
    let is_text = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));

    let document = if is_text {
        DocumentText::from_plain_text(&std::fs::read_to_string(path)?)
    } else {
        let data = std::fs::read(path)?;
        let mut extractor = PdfExtractor::new();
        extractor.load(&data)?;
        extractor.extract_document()?
    };

    info!(
        "Loaded {} ({} pages, {} chars)",
        path.display(),
        document.pages.len(),
        document.text.len()
    );
    Ok(document)
}
