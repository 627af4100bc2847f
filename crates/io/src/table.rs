// Grid-to-row shaping shared by every reader.
//
// The first non-blank line is the header row. Each later line becomes a
// RawRow keyed by header; empty cells are left out and fully blank lines are
// dropped, so row positions count data rows only.

use std::collections::{HashMap, HashSet};

use stockguard_recon::{CellValue, RawRow};

/// Rows read from one sheet or file.
#[derive(Debug, Clone, Default)]
pub struct LoadedSheet {
    /// Worksheet the rows came from (spreadsheet formats only).
    pub sheet_name: Option<String>,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl LoadedSheet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Shape a grid of cells into header-keyed rows.
pub fn rows_from_grid<I>(grid: I) -> LoadedSheet
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut lines = grid.into_iter().filter(|line| !is_blank(line));

    let Some(header_line) = lines.next() else {
        return LoadedSheet::default();
    };
    let headers = header_names(&header_line);

    let mut rows = Vec::new();
    for line in lines {
        let mut row = RawRow::new();
        for (col, cell) in line.into_iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            // Cells past the header row have no name to live under.
            let Some(header) = headers.get(col) else {
                continue;
            };
            row.insert(header.clone(), cell);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    LoadedSheet { sheet_name: None, headers, rows }
}

fn is_blank(line: &[CellValue]) -> bool {
    line.iter().all(CellValue::is_empty)
}

/// Header names as text. Blank headers become `__EMPTY`, `__EMPTY_1`, ...;
/// repeated names get `_1`, `_2`, ... skipping any suffix already taken by a
/// real column, so every column stays addressable.
fn header_names(line: &[CellValue]) -> Vec<String> {
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(line.len());

    for cell in line {
        let text = cell.to_string();
        let base = if text.is_empty() { "__EMPTY".to_string() } else { text };

        let mut name = base.clone();
        if taken.contains(&name) {
            let suffix = next_suffix.entry(base.clone()).or_insert(1);
            loop {
                name = format!("{base}_{suffix}");
                *suffix += 1;
                if !taken.contains(&name) {
                    break;
                }
            }
        }
        taken.insert(name.clone());
        names.push(name);
    }

    names
}
