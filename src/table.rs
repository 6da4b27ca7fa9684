//! Transient display tables for bank registers and statements. These live
//! only in memory and are replaced wholesale on every import.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Register,
    Statement,
}

const REGISTER_COLUMNS: &[&str] = &[
    "ID",
    "Account number",
    "Owner name",
    "Operation date",
    "Operation type",
    "Amount",
    "Status",
];

const STATEMENT_COLUMNS: &[&str] = &[
    "ID",
    "Full name",
    "Account number",
    "Operation date",
    "Operation type",
    "Amount",
    "Payment purpose",
    "Status",
];

impl TableKind {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Register => REGISTER_COLUMNS,
            Self::Statement => STATEMENT_COLUMNS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Register => "Bank register",
            Self::Statement => "Bank statement",
        }
    }

    /// Index of the account-number column.
    pub fn account_column(&self) -> usize {
        match self {
            Self::Register => 1,
            Self::Statement => 2,
        }
    }

    pub fn amount_column(&self) -> usize {
        5
    }
}

/// One row of a display table. `None` is an absent cell, which is distinct
/// from a present but empty one.
pub type DisplayRow = Vec<Option<String>>;

#[derive(Debug, Clone)]
pub struct DisplayTable {
    kind: TableKind,
    rows: Vec<DisplayRow>,
    hidden: Vec<bool>,
}

impl DisplayTable {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            hidden: Vec::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn headers(&self) -> &'static [&'static str] {
        self.kind.columns()
    }

    pub fn column_count(&self) -> usize {
        self.kind.columns().len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.hidden.clear();
    }

    /// Append a row, padding or truncating it to the table's column count.
    pub fn push_row(&mut self, mut row: DisplayRow) {
        row.resize(self.column_count(), None);
        self.rows.push(row);
        self.hidden.push(false);
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn is_hidden(&self, row: usize) -> bool {
        self.hidden.get(row).copied().unwrap_or(false)
    }

    /// Indices of rows not hidden by the current filter.
    pub fn visible_rows(&self) -> Vec<usize> {
        (0..self.rows.len()).filter(|&i| !self.is_hidden(i)).collect()
    }

    /// Show a row iff the query is empty or any cell contains it,
    /// case-insensitively. Re-scans every row on each call.
    pub fn apply_filter(&mut self, query: &str) {
        let q = query.to_lowercase();
        for (row, hidden) in self.rows.iter().zip(self.hidden.iter_mut()) {
            *hidden = !q.is_empty()
                && !row
                    .iter()
                    .flatten()
                    .any(|cell| cell.to_lowercase().contains(&q));
        }
    }

    /// Every row as plain text, hidden rows included; absent cells become "".
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.clone().unwrap_or_default()).collect())
            .collect()
    }
}
