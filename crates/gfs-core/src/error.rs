//! Error types for the gfs-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the gfs library.
#[derive(Error, Debug)]
pub enum GfsError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Reference table error.
    #[error("reference table error: {0}")]
    Reference(#[from] ReferenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to loading the reference table.
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// The table file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Unreadable spreadsheet content.
    #[error("invalid workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook contains no worksheets.
    #[error("workbook {} has no worksheets", .0.display())]
    NoWorksheet(PathBuf),

    /// A required header is not present.
    #[error("missing column: {0}")]
    MissingColumn(String),
}

/// Result type for the gfs library.
pub type Result<T> = std::result::Result<T, GfsError>;
