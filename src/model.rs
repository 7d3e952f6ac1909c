use serde::Serialize;

/// One table detected in the source document. Row lengths are not
/// guaranteed to be uniform; missing cells are empty strings, never absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTable {
    /// 1-indexed page number the table was found on.
    pub page: u32,
    /// 0-indexed position of the table within its page.
    pub table_index: usize,
    pub rows: Vec<Vec<String>>,
}

/// One emitted menu row. `category` and `note` are structurally reserved
/// and always empty; `published` is always true for extracted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRecord {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub contains_allergies: Vec<&'static str>,
    pub shares_allergies: Vec<&'static str>,
    pub note: String,
    pub published: bool,
}

/// Result envelope serialized as the success JSON line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MenuConversion {
    pub csv: String,
    pub tables_found: usize,
    /// Distinct 1-indexed pages that contributed at least one table.
    /// Emitted ascending, but consumers must treat this as a set.
    pub pages_processed: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Restrict extraction to a single 1-indexed page. Out-of-range pages
    /// are skipped silently rather than rejected.
    pub page: Option<u32>,
}
