/// Minimum cells per line for it to count as a table row, and minimum
/// rows per contiguous run for the run to count as a table.
const MIN_COLS: usize = 2;
const MIN_ROWS: usize = 2;

/// Split on tabs and runs of two or more spaces; single spaces stay part
/// of the cell text.
pub(crate) fn split_line_into_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut whitespace_run = 0_usize;

    for ch in trimmed.chars() {
        if ch == '\t' {
            if !current.trim().is_empty() {
                cells.push(current.trim().to_string());
                current.clear();
            }
            whitespace_run = 0;
            continue;
        }

        if ch.is_whitespace() {
            whitespace_run += 1;
            if whitespace_run >= 2 {
                if !current.trim().is_empty() {
                    cells.push(current.trim().to_string());
                    current.clear();
                }
                continue;
            }
            current.push(' ');
            continue;
        }

        whitespace_run = 0;
        current.push(ch);
    }

    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }

    cells
}

pub(crate) fn soft_split_line_into_cells(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn looks_like_sentence(line: &str) -> bool {
    ['.', '!', '?', '。', '！', '？']
        .iter()
        .any(|punctuation| line.trim_end().ends_with(*punctuation))
}

fn line_cells(line: &str) -> Vec<String> {
    let cells = split_line_into_cells(line);
    if cells.len() >= MIN_COLS {
        return cells;
    }

    // Single-spaced lines can still be columnar; accept them when they
    // carry a number or stay short, but never prose sentences.
    let soft_cells = soft_split_line_into_cells(line);
    let has_numeric = soft_cells
        .iter()
        .any(|cell| cell.chars().any(char::is_numeric));
    if soft_cells.len() >= MIN_COLS && !looks_like_sentence(line) && (has_numeric || soft_cells.len() <= 6)
    {
        return soft_cells;
    }

    cells
}

/// Group contiguous runs of multi-cell lines into grids. Runs shorter
/// than `MIN_ROWS` are treated as noise and dropped.
pub(crate) fn detect_grids(text: &str) -> Vec<Vec<Vec<String>>> {
    let mut grids = Vec::new();
    let mut current_rows: Vec<Vec<String>> = Vec::new();

    let flush = |rows: &mut Vec<Vec<String>>, grids: &mut Vec<Vec<Vec<String>>>| {
        if rows.len() >= MIN_ROWS {
            grids.push(std::mem::take(rows));
        } else {
            rows.clear();
        }
    };

    for line in text.lines() {
        let cells = line_cells(line);
        if cells.len() >= MIN_COLS {
            current_rows.push(cells);
        } else {
            flush(&mut current_rows, &mut grids);
        }
    }

    flush(&mut current_rows, &mut grids);
    grids
}
