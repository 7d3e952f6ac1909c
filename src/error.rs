use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the caller as a single `{"error": ...}` object.
/// Every variant is terminal for the invocation; there is no retry or
/// partial-success path.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("PDF path required")]
    MissingPath,

    #[error("PDF file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to load PDF: {0}")]
    PdfLoad(#[from] lopdf::Error),

    #[error("failed to extract PDF text: {0}")]
    PdfExtract(String),

    #[error("No tables found in PDF")]
    NoTablesFound,
}
