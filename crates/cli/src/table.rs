//! Plain-text tables for terminal output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Right,
}

/// Display width of a string, accounting for accents, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .take_while(|ch| ch.width().unwrap_or(0) <= width)
            .take(1)
            .collect();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str("..");
    out
}

/// Pad or truncate to exactly `width` display columns.
pub(crate) fn fit(s: &str, width: usize, align: Align) -> String {
    let s = truncate_display(s, width);
    let pad = " ".repeat(width.saturating_sub(display_width(&s)));
    match align {
        Align::Left => format!("{s}{pad}"),
        Align::Right => format!("{pad}{s}"),
    }
}

/// Column-aligned text table. Widths grow to content up to `max_width`.
pub(crate) struct TextTable {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
    max_width: usize,
}

impl TextTable {
    pub(crate) fn new(headers: &[&str], aligns: &[Align]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            aligns: aligns.to_vec(),
            rows: Vec::new(),
            max_width: 40,
        }
    }

    pub(crate) fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub(crate) fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                let content = self
                    .rows
                    .iter()
                    .filter_map(|r| r.get(col))
                    .map(|c| display_width(c))
                    .max()
                    .unwrap_or(0);
                content.max(display_width(&self.headers[col])).min(self.max_width)
            })
            .collect();

        let align = |col: usize| self.aligns.get(col).copied().unwrap_or(Align::Left);
        let line = |cells: &[String]| -> String {
            widths
                .iter()
                .enumerate()
                .map(|(col, &w)| fit(cells.get(col).map(String::as_str).unwrap_or(""), w, align(col)))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&line(&self.headers));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        out.push_str(&rule.join("  "));
        out.push('\n');
        for row in &self.rows {
            out.push_str(&line(row));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_counts_accents_once() {
        assert_eq!(display_width("Référence"), 9);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate_display("abc", 5), "abc");
        assert_eq!(truncate_display("abc", 3), "abc");
    }

    #[test]
    fn truncate_cuts() {
        assert_eq!(truncate_display("abcdef", 5), "abc..");
        assert_eq!(truncate_display("abc", 2), "a");
    }

    #[test]
    fn fit_aligns() {
        assert_eq!(fit("ab", 5, Align::Left), "ab   ");
        assert_eq!(fit("12", 5, Align::Right), "   12");
        assert_eq!(fit("abcdef", 5, Align::Left), "abc..");
    }

    #[test]
    fn table_columns_line_up() {
        let mut t = TextTable::new(&["Ref", "Qty"], &[Align::Left, Align::Right]);
        t.push(vec!["A1".into(), "5".into()]);
        t.push(vec!["LONG-REF".into(), "120".into()]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Ref       Qty");
        assert_eq!(lines[1], "--------  ---");
        assert_eq!(lines[2], "A1          5");
        assert_eq!(lines[3], "LONG-REF  120");
    }
}
