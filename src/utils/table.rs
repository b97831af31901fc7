//! Table rendering utilities for CLI outputs.

pub struct Column {
    pub header: String,
    pub width: usize,
    pub right_align: bool,
}

impl Column {
    pub fn left(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width: width.max(header.len()),
            right_align: false,
        }
    }

    pub fn right(header: &str, width: usize) -> Self {
        Self {
            right_align: true,
            ..Self::left(header, width)
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&Self::cell(&col.header, col));
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let value = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&Self::cell(value, col));
            }
            out.push('\n');
        }

        out
    }

    fn cell(value: &str, col: &Column) -> String {
        if col.right_align {
            format!("{:>width$} ", value, width = col.width)
        } else {
            format!("{:<width$} ", value, width = col.width)
        }
    }
}
