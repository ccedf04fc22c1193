//! Core library for GL coding of vendor invoices.
//!
//! This crate provides:
//! - PDF text extraction (whole document plus per-page text)
//! - Reference table loading (item code to GL account)
//! - Line classification for item rows and surcharge rows
//! - GL resolution, extraction pipeline and summary aggregation

pub mod error;
pub mod models;
pub mod pdf;
pub mod reference;
pub mod invoice;

pub use error::{GfsError, Result};
pub use models::record::{GlAccount, LineItemRecord};
pub use models::summary::{ProcessedInvoice, Summary};
pub use models::config::GfsConfig;
pub use pdf::{load_document, DocumentText, PdfExtractor, PdfProcessor};
pub use reference::ReferenceTable;
pub use invoice::{Aggregator, ExtractionPipeline, ItemResolver, LineClassifier, MergeRule};

use tracing::info;

/// Run the whole invoice flow: classify and resolve every line, then aggregate.
pub fn process_document(
    document: &DocumentText,
    table: &ReferenceTable,
    merge_rules: &[MergeRule],
) -> ProcessedInvoice {
    let pipeline = ExtractionPipeline::new(ItemResolver::new(table));
    let extraction = pipeline.run(document);

    let aggregator = Aggregator::new(merge_rules.to_vec());
    let summary = aggregator.summarize(&extraction.records, extraction.tax);

    info!(
        "Processed invoice: {} records, {} categories, grand total {}",
        extraction.records.len(),
        summary.categories.len(),
        summary.grand_total
    );

    ProcessedInvoice {
        records: extraction.records,
        summary,
    }
}
