mod csv_out;
mod engine;
mod error;
mod extract;
mod model;
mod normalize;
mod pdf_reader;
mod table_detect;
mod vocab;

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

pub use crate::csv_out::MENU_CSV_HEADER;
pub use crate::engine::{TableDocument, TableGrid, TextTableDocument};
pub use crate::error::ConvertError;
pub use crate::extract::extract_tables;
pub use crate::model::{ConvertOptions, ExtractedTable, MenuConversion, MenuRecord};
pub use crate::normalize::{HeaderContext, normalize_tables};
pub use crate::vocab::{
    ALLERGY_KEYWORDS, AllergyVocabulary, CONTAINS_SYMBOLS, SHARES_SYMBOLS,
};

/// Convert a menu PDF on disk into the CSV envelope. Fails with
/// `NoTablesFound` when nothing tabular survives extraction.
pub fn convert_menu_pdf(
    input_pdf: &Path,
    options: &ConvertOptions,
) -> Result<MenuConversion, ConvertError> {
    if !input_pdf.exists() {
        return Err(ConvertError::FileNotFound(input_pdf.to_path_buf()));
    }

    let document = TextTableDocument::load(input_pdf)?;
    convert_document(&document, options)
}

/// In-memory variant for callers that already hold the PDF bytes.
pub fn convert_menu_pdf_bytes(
    input_pdf: &[u8],
    options: &ConvertOptions,
) -> Result<MenuConversion, ConvertError> {
    let document = TextTableDocument::from_bytes(input_pdf)?;
    convert_document(&document, options)
}

/// Run extraction and normalization over any table engine.
pub fn convert_document<D: TableDocument>(
    document: &D,
    options: &ConvertOptions,
) -> Result<MenuConversion, ConvertError> {
    let tables = extract_tables(document, options.page)?;
    if tables.is_empty() {
        return Err(ConvertError::NoTablesFound);
    }

    let pages_processed = tables
        .iter()
        .map(|table| table.page)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    let vocab = AllergyVocabulary::standard();
    let csv = normalize_tables(&tables, &vocab);

    debug!(
        tables_found = tables.len(),
        pages = ?pages_processed,
        "conversion finished"
    );

    Ok(MenuConversion {
        csv,
        tables_found: tables.len(),
        pages_processed,
    })
}
