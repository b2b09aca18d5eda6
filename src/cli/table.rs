//! Table formatting for CLI list output
//!
//! A trimmed-down typed-cell table: each row is built from cell values with
//! semantic meaning, and the formatter renders TSV (default, colored), CSV,
//! Markdown, or bare ids.

use chrono::NaiveDateTime;
use console::style;

use crate::cli::helpers::{escape_csv, truncate_str};

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Entity id (cyan, truncated for display)
    Id(String),
    /// Plain text, truncated to the column width
    Text(String),
    /// Entity type tag
    Type(String),
    /// Server timestamp
    Moment(NaiveDateTime),
    /// Numeric value
    Number(i64),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => {
                let display = truncate_str(id, width);
                format!("{:<width$}", style(&display).cyan(), width = width)
            }
            CellValue::Text(s) => {
                let truncated = truncate_str(s, width.saturating_sub(2));
                format!("{:<width$}", truncated, width = width)
            }
            CellValue::Type(t) => {
                format!("{:<width$}", style(t).magenta(), width = width)
            }
            CellValue::Moment(dt) => {
                format!("{:<width$}", dt.format("%Y-%m-%d %H:%M"), width = width)
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Id(id) => escape_csv(id),
            CellValue::Text(s) => escape_csv(s),
            CellValue::Type(t) => escape_csv(t),
            CellValue::Moment(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::Id(id) => id.clone(),
            CellValue::Text(s) => s.clone(),
            CellValue::Type(t) => t.clone(),
            CellValue::Moment(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => "-".to_string(),
        };
        raw.replace('|', "\\|")
    }

    /// Get the display width of this cell's content (for dynamic sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Id(id) => id.len().min(38),
            CellValue::Text(s) => s.len(),
            CellValue::Type(t) => t.len(),
            CellValue::Moment(_) => 16, // "YYYY-MM-DD HH:MM"
            CellValue::Number(n) => n.to_string().len(),
            CellValue::Empty => 1,
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: String,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: String) -> Self {
        Self {
            id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    noun: &'static str,
    show_summary: bool,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], noun: &'static str) -> Self {
        Self {
            columns,
            noun,
            show_summary: true,
        }
    }

    pub fn without_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }

    pub fn output_tsv(&self, rows: &[TableRow], visible: &[&str]) {
        let widths = self.calculate_widths(rows, visible);

        let mut header_parts = Vec::new();
        let mut idx = 0;
        for col in self.columns {
            if visible.contains(&col.key) {
                header_parts.push(format!(
                    "{:<width$}",
                    style(col.header).bold(),
                    width = widths[idx]
                ));
                idx += 1;
            }
        }
        println!("{}", header_parts.join(" "));

        let total: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        println!("{}", "-".repeat(total));

        for row in rows {
            let mut parts = Vec::new();
            let mut idx = 0;
            for col in self.columns {
                if visible.contains(&col.key) {
                    let w = widths[idx];
                    match row.get(col.key) {
                        Some(value) => parts.push(value.format_tsv(w)),
                        None => parts.push(format!("{:<width$}", "-", width = w)),
                    }
                    idx += 1;
                }
            }
            println!("{}", parts.join(" "));
        }

        if self.show_summary {
            println!();
            println!("{} {}(s) found.", style(rows.len()).cyan(), self.noun);
        }
    }

    pub fn output_csv(&self, rows: &[TableRow], visible: &[&str]) {
        let mut headers = vec!["id".to_string()];
        for col in self.columns {
            if visible.contains(&col.key) {
                headers.push(col.key.to_string());
            }
        }
        println!("{}", headers.join(","));

        for row in rows {
            let mut values = vec![escape_csv(&row.id)];
            for col in self.columns {
                if visible.contains(&col.key) {
                    match row.get(col.key) {
                        Some(value) => values.push(value.format_csv()),
                        None => values.push(String::new()),
                    }
                }
            }
            println!("{}", values.join(","));
        }
    }

    pub fn output_md(&self, rows: &[TableRow], visible: &[&str]) {
        let mut headers = vec!["ID".to_string()];
        for col in self.columns {
            if visible.contains(&col.key) {
                headers.push(col.header.to_string());
            }
        }
        println!("| {} |", headers.join(" | "));
        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        println!("|{}|", separators.join("|"));

        for row in rows {
            let mut values = vec![row.id.clone()];
            for col in self.columns {
                if visible.contains(&col.key) {
                    match row.get(col.key) {
                        Some(value) => values.push(value.format_md()),
                        None => values.push("-".to_string()),
                    }
                }
            }
            println!("| {} |", values.join(" | "));
        }
    }

    pub fn output_ids(&self, rows: &[TableRow]) {
        for row in rows {
            println!("{}", row.id);
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow], visible: &[&str]) -> Vec<usize> {
        let mut widths = Vec::new();
        for col in self.columns {
            if visible.contains(&col.key) {
                let header_len = col.header.len();
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                let natural = header_len.max(max_content.saturating_add(2));
                widths.push(natural.min(col.width));
            }
        }
        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_value_text_format() {
        let cell = CellValue::Text("Hello World".to_string());
        assert!(cell.format_tsv(20).contains("Hello World"));
        assert_eq!(cell.format_csv(), "Hello World");
        assert_eq!(cell.format_md(), "Hello World");
    }

    #[test]
    fn test_cell_value_md_escapes_pipes() {
        let cell = CellValue::Text("a|b|c".to_string());
        assert_eq!(cell.format_md(), "a\\|b\\|c");
    }

    #[test]
    fn test_cell_value_csv_escapes_commas() {
        let cell = CellValue::Text("a,b".to_string());
        assert_eq!(cell.format_csv(), "\"a,b\"");
    }

    #[test]
    fn test_table_row_builder() {
        let row = TableRow::new("6f9619ff".to_string())
            .cell("name", CellValue::Text("Widget".to_string()))
            .cell("type", CellValue::Type("product".to_string()));

        assert_eq!(row.id, "6f9619ff");
        assert!(row.get("name").is_some());
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_moment_formats() {
        let dt = NaiveDateTime::parse_from_str("2024-05-01 13:37:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let cell = CellValue::Moment(dt);
        assert_eq!(cell.format_csv(), "2024-05-01T13:37:00");
        assert_eq!(cell.format_md(), "2024-05-01 13:37");
    }
}
