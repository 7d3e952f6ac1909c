use tracing::debug;

use crate::engine::{TableDocument, TableGrid};
use crate::error::ConvertError;
use crate::model::ExtractedTable;

/// Read every detected table on the selected pages. A 1-indexed `page`
/// restricts the pass to that page; out-of-range values (including 0,
/// which underflows the 1-index) are skipped silently. Errors abort the
/// whole call with no partial table list.
pub fn extract_tables<D: TableDocument>(
    document: &D,
    page: Option<u32>,
) -> Result<Vec<ExtractedTable>, ConvertError> {
    let page_indices: Vec<usize> = match page {
        Some(number) => number
            .checked_sub(1)
            .map(|index| index as usize)
            .filter(|&index| index < document.page_count())
            .into_iter()
            .collect(),
        None => (0..document.page_count()).collect(),
    };

    let mut tables = Vec::new();
    for page_index in page_indices {
        for (table_index, grid) in document.tables_on_page(page_index)?.into_iter().enumerate() {
            let rows = read_grid(&grid);
            if rows.is_empty() {
                continue;
            }

            tables.push(ExtractedTable {
                page: u32::try_from(page_index + 1).unwrap_or(u32::MAX),
                table_index,
                rows,
            });
        }
    }

    debug!(tables = tables.len(), ?page, "extraction pass finished");
    Ok(tables)
}

/// Materialize a grid into rows of owned strings: embedded line breaks
/// stripped, missing cells as empty strings.
fn read_grid<T: TableGrid>(grid: &T) -> Vec<Vec<String>> {
    (0..grid.row_count())
        .map(|row| {
            (0..grid.column_count())
                .map(|column| {
                    grid.cell_text(row, column)
                        .map(|text| text.replace(['\n', '\r'], ""))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}
