use std::fmt;

use tracing::{info, warn};

use crate::table::DisplayTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    AccountNumber,
    Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// 1-based row number.
    pub row: usize,
    pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::AccountNumber => write!(f, "Row {}: invalid account number format", self.row),
            IssueKind::Amount => write!(f, "Row {}: invalid amount format", self.row),
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub rows_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// One message for the whole scan: every issue on its own line, or a
    /// confirmation when there are none.
    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "No errors found".to_string();
        }
        let lines: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        format!("Errors found in data:\n{}", lines.join("\n"))
    }
}

pub fn is_valid_account(raw: &str) -> bool {
    raw.chars().all(|c| c.is_ascii_digit())
}

/// Amounts may use a decimal comma: `12,50` reads as `12.50`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

fn non_blank(cell: Option<&str>) -> Option<&str> {
    cell.filter(|s| !s.trim().is_empty())
}

/// Scan every row for malformed account numbers and amounts. Blank and
/// absent cells are skipped. Rows are never modified.
pub fn validate(table: &DisplayTable) -> ValidationReport {
    let kind = table.kind();
    let mut report = ValidationReport {
        rows_checked: table.row_count(),
        issues: Vec::new(),
    };

    for idx in 0..table.row_count() {
        let row = idx + 1;
        if let Some(account) = non_blank(table.cell(idx, kind.account_column())) {
            if !is_valid_account(account) {
                report.issues.push(ValidationIssue {
                    row,
                    kind: IssueKind::AccountNumber,
                });
            }
        }
        if let Some(amount) = non_blank(table.cell(idx, kind.amount_column())) {
            if parse_amount(amount).is_none() {
                report.issues.push(ValidationIssue {
                    row,
                    kind: IssueKind::Amount,
                });
            }
        }
    }

    if report.is_clean() {
        info!(rows = report.rows_checked, kind = kind.label(), "validation passed");
    } else {
        warn!(
            rows = report.rows_checked,
            issues = report.issues.len(),
            kind = kind.label(),
            "validation found issues"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{DisplayRow, TableKind};

    fn register_row(account: Option<&str>, amount: Option<&str>) -> DisplayRow {
        vec![
            Some("1".to_string()),
            account.map(str::to_string),
            Some("John Smith".to_string()),
            Some("2025-01-15".to_string()),
            Some("credit".to_string()),
            amount.map(str::to_string),
            Some("ok".to_string()),
        ]
    }

    #[test]
    fn test_account_digits_only() {
        assert!(is_valid_account("12345"));
        assert!(!is_valid_account("12A45"));
        assert!(!is_valid_account("123 45"));
        assert!(!is_valid_account("-12345"));
    }

    #[test]
    fn test_parse_amount_decimal_comma() {
        assert_eq!(parse_amount("12,50"), Some(12.50));
        assert_eq!(parse_amount("12.50"), Some(12.50));
        assert_eq!(parse_amount(" -3 "), Some(-3.0));
        assert_eq!(parse_amount("12,5x"), None);
        assert_eq!(parse_amount("1,000.50"), None);
    }

    #[test]
    fn test_validate_flags_offending_rows() {
        let mut t = DisplayTable::new(TableKind::Register);
        t.push_row(register_row(Some("12345"), Some("12,50")));
        t.push_row(register_row(Some("12A45"), Some("12,50")));
        t.push_row(register_row(Some("12345"), Some("12,5x")));
        t.push_row(register_row(Some("XX"), Some("abc")));
        let report = validate(&t);
        assert_eq!(report.rows_checked, 4);
        let messages: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();
        assert_eq!(
            messages,
            vec![
                "Row 2: invalid account number format",
                "Row 3: invalid amount format",
                "Row 4: invalid account number format",
                "Row 4: invalid amount format",
            ]
        );
    }

    #[test]
    fn test_absent_and_blank_cells_pass() {
        let mut t = DisplayTable::new(TableKind::Register);
        t.push_row(register_row(None, None));
        t.push_row(register_row(Some(""), Some("  ")));
        assert!(validate(&t).is_clean());
    }

    #[test]
    fn test_statement_layout_uses_its_columns() {
        let mut t = DisplayTable::new(TableKind::Statement);
        t.push_row(
            ["1", "John Smith", "40817A", "2025-01-15", "credit", "10,00", "Rent", "ok"]
                .iter()
                .map(|c| Some(c.to_string()))
                .collect(),
        );
        let report = validate(&t);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::AccountNumber);
    }

    #[test]
    fn test_summary() {
        let mut t = DisplayTable::new(TableKind::Register);
        t.push_row(register_row(Some("12345"), Some("1")));
        assert_eq!(validate(&t).summary(), "No errors found");

        t.push_row(register_row(Some("1x"), Some("y")));
        assert_eq!(
            validate(&t).summary(),
            "Errors found in data:\nRow 2: invalid account number format\nRow 2: invalid amount format"
        );
    }

    #[test]
    fn test_validate_does_not_mutate() {
        let mut t = DisplayTable::new(TableKind::Register);
        t.push_row(register_row(Some("bad"), Some("bad")));
        let before = t.snapshot();
        validate(&t);
        assert_eq!(t.snapshot(), before);
    }
}
