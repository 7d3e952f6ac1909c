use crate::model::MenuRecord;

/// Fixed output header. The literal column names are part of the external
/// contract and must not be localized or reordered.
pub const MENU_CSV_HEADER: &str =
    "メニュー名,説明,価格,カテゴリ,含有アレルギー,共有アレルギー,備考,公開";

/// Separator line opening section `section` (1-based, counted over tables
/// that contributed rows).
pub(crate) fn section_separator(section: usize) -> String {
    format!("\"--- 新しいテーブル (セクション {section}) ---\",,,,,,,")
}

/// Quote a field only when it needs quoting: commas, double quotes, or
/// newlines. Empty fields render as zero characters between delimiters.
pub(crate) fn escape_field(field: &str) -> String {
    if field.is_empty() {
        return String::new();
    }

    if field.contains(',') || field.contains('"') || field.contains('\n') {
        let escaped = field.replace('"', "\"\"");
        return format!("\"{escaped}\"");
    }

    field.to_string()
}

/// Allergy sets render as one double-quoted comma-joined field, or an
/// empty field when the set is empty.
fn render_allergy_list(allergies: &[&str]) -> String {
    if allergies.is_empty() {
        String::new()
    } else {
        format!("\"{}\"", allergies.join(","))
    }
}

pub(crate) fn render_record(record: &MenuRecord) -> String {
    format!(
        "{},{},{},{},{},{},{},{}",
        escape_field(&record.name),
        escape_field(&record.description),
        escape_field(&record.price),
        escape_field(&record.category),
        render_allergy_list(&record.contains_allergies),
        render_allergy_list(&record.shares_allergies),
        escape_field(&record.note),
        if record.published { "true" } else { "false" },
    )
}
