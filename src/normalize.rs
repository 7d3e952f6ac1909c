use std::collections::BTreeMap;

use tracing::debug;

use crate::csv_out::{MENU_CSV_HEADER, render_record, section_separator};
use crate::model::{ExtractedTable, MenuRecord};
use crate::vocab::AllergyVocabulary;

/// Price is searched in this half-open column range, first cell with a
/// numeric character wins.
const PRICE_COLUMNS: std::ops::Range<usize> = 2..5;

/// Neighbor columns searched for an allergen name when the header gave
/// none for the symbol's own column, as offsets around it.
const ALLERGY_SEARCH_BEFORE: usize = 2;
const ALLERGY_SEARCH_AFTER: usize = 2;

/// Header row detected within one table. `column_allergies` is sparse:
/// only columns whose header cell names an allergen appear.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HeaderContext {
    pub header_row: Option<usize>,
    pub column_allergies: BTreeMap<usize, &'static str>,
}

/// First row whose joined text mentions any allergen keyword becomes the
/// header; its cells are scanned left to right for per-column allergen
/// names. No match means data starts at row 0.
pub(crate) fn detect_header(rows: &[Vec<String>], vocab: &AllergyVocabulary) -> HeaderContext {
    for (index, row) in rows.iter().enumerate() {
        let joined = row.join(" ");
        if vocab.first_keyword_in(&joined).is_none() {
            continue;
        }

        let mut column_allergies = BTreeMap::new();
        for (column, cell) in row.iter().enumerate() {
            if let Some(keyword) = vocab.first_keyword_in(cell) {
                column_allergies.insert(column, keyword);
            }
        }

        return HeaderContext {
            header_row: Some(index),
            column_allergies,
        };
    }

    HeaderContext::default()
}

/// Resolve the allergen a symbol cell refers to: the header's name for
/// that column when present, otherwise the first keyword found scanning
/// the clamped `[column - 2, column + 2)` window left to right.
fn resolve_allergy(
    row: &[String],
    column: usize,
    header: &HeaderContext,
    vocab: &AllergyVocabulary,
) -> Option<&'static str> {
    if let Some(name) = header.column_allergies.get(&column).copied() {
        return Some(name);
    }

    let start = column.saturating_sub(ALLERGY_SEARCH_BEFORE);
    let end = (column + ALLERGY_SEARCH_AFTER).min(row.len());
    row[start..end]
        .iter()
        .find_map(|cell| vocab.first_keyword_in(cell))
}

fn push_unique(allergies: &mut Vec<&'static str>, name: &'static str) {
    if !allergies.contains(&name) {
        allergies.push(name);
    }
}

/// Map one data row to a record, or `None` when the row is filtered out:
/// all cells blank, a stray repeat of the header, or no usable menu name
/// (empty, or a bare allergen mark standing in for one).
pub(crate) fn record_from_row(
    row: &[String],
    header: &HeaderContext,
    vocab: &AllergyVocabulary,
) -> Option<MenuRecord> {
    if row.iter().all(|cell| cell.trim().is_empty()) {
        return None;
    }

    if vocab.is_header_like(&row.join(" ")) {
        return None;
    }

    let name = row.first().map_or("", |cell| cell.trim());
    if name.is_empty() || vocab.is_marks_only(name) {
        return None;
    }

    let description = row.get(1).map_or("", |cell| cell.trim());

    let price = PRICE_COLUMNS
        .filter_map(|index| row.get(index))
        .find(|cell| cell.chars().any(char::is_numeric))
        .map_or("", |cell| cell.trim());

    let mut contains_allergies = Vec::new();
    let mut shares_allergies = Vec::new();
    for (column, cell) in row.iter().enumerate() {
        if cell.is_empty() {
            continue;
        }

        // A contains mark suppresses the shares check for the same cell,
        // even when both symbols are present.
        if vocab.has_contains_symbol(cell) {
            if let Some(found) = resolve_allergy(row, column, header, vocab) {
                push_unique(&mut contains_allergies, found);
            }
        } else if vocab.has_shares_symbol(cell) {
            if let Some(found) = resolve_allergy(row, column, header, vocab) {
                push_unique(&mut shares_allergies, found);
            }
        }
    }

    Some(MenuRecord {
        name: name.to_string(),
        description: description.to_string(),
        price: price.to_string(),
        category: String::new(),
        contains_allergies,
        shares_allergies,
        note: String::new(),
        published: true,
    })
}

/// Render the extracted tables as the final CSV text. Each table with at
/// least one row opens a section: the first gets the header line, later
/// ones a blank line, a numbered separator, and a re-emitted header.
#[must_use]
pub fn normalize_tables(tables: &[ExtractedTable], vocab: &AllergyVocabulary) -> String {
    let mut lines = Vec::new();
    let mut sections = 0_usize;

    for table in tables {
        if table.rows.is_empty() {
            continue;
        }

        if sections == 0 {
            lines.push(MENU_CSV_HEADER.to_string());
        } else {
            lines.push(String::new());
            lines.push(section_separator(sections + 1));
            lines.push(MENU_CSV_HEADER.to_string());
        }
        sections += 1;

        let header = detect_header(&table.rows, vocab);
        let start = header.header_row.map_or(0, |index| index + 1);

        let mut records = 0_usize;
        for row in &table.rows[start..] {
            if let Some(record) = record_from_row(row, &header, vocab) {
                lines.push(render_record(&record));
                records += 1;
            }
        }

        debug!(
            page = table.page,
            table_index = table.table_index,
            records,
            header_row = ?header.header_row,
            "normalized table"
        );
    }

    lines.join("\n")
}
