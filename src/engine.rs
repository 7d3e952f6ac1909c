use std::path::Path;

use crate::error::ConvertError;
use crate::pdf_reader::{PageText, read_pdf_pages, read_pdf_pages_from_bytes};
use crate::table_detect::detect_grids;

/// One detected table, addressed by (row, column) up to the reported
/// counts. `cell_text` returns `None` for cells the engine has no text
/// for; callers treat those as empty.
pub trait TableGrid {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    fn cell_text(&self, row: usize, column: usize) -> Option<String>;
}

/// An opened document exposing per-page table detection. The concrete
/// engine is injected so the pipeline can run against synthetic fixtures
/// as well as real PDFs. Dropping the value releases the document.
pub trait TableDocument {
    type Table: TableGrid;

    fn page_count(&self) -> usize;

    /// Tables detected on the 0-indexed page, in reading order.
    fn tables_on_page(&self, page_index: usize) -> Result<Vec<Self::Table>, ConvertError>;
}

/// Default engine: text-layer extraction plus line-grid inference.
/// Page texts are gathered eagerly at load so failures surface before
/// any table is handed out.
#[derive(Debug)]
pub struct TextTableDocument {
    pages: Vec<PageText>,
}

impl TextTableDocument {
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        Ok(Self {
            pages: read_pdf_pages(path)?,
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConvertError> {
        Ok(Self {
            pages: read_pdf_pages_from_bytes(bytes)?,
        })
    }
}

impl TableDocument for TextTableDocument {
    type Table = TextTableGrid;

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn tables_on_page(&self, page_index: usize) -> Result<Vec<Self::Table>, ConvertError> {
        let Some(page) = self.pages.get(page_index) else {
            return Ok(Vec::new());
        };

        Ok(detect_grids(&page.text)
            .into_iter()
            .map(TextTableGrid::new)
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTableGrid {
    rows: Vec<Vec<String>>,
    columns: usize,
}

impl TextTableGrid {
    fn new(rows: Vec<Vec<String>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, columns }
    }
}

impl TableGrid for TextTableGrid {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        self.rows.get(row).and_then(|cells| cells.get(column)).cloned()
    }
}
