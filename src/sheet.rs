use std::fmt;
use std::path::Path;

use crate::error::{RegistryError, Result};
use crate::fmt::number;

// ---------------------------------------------------------------------------
// Cells and rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&number(*v)),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// A tabular file: one header row naming the columns, then data rows.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// Borrowed view of one data row with access by column name.
#[derive(Debug, Clone, Copy)]
pub struct SheetRow<'a> {
    headers: &'a [String],
    cells: &'a [CellValue],
}

impl<'a> SheetRow<'a> {
    /// Cell under the named column. A column shorter than the header row
    /// reads as `Empty`; an unknown column reads as `None`.
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        let idx = self.headers.iter().position(|h| h == column)?;
        Some(self.cells.get(idx).unwrap_or(&CellValue::Empty))
    }

    /// True when every cell is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }
}

impl Sheet {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn rows(&self) -> impl Iterator<Item = SheetRow<'_>> {
        self.rows.iter().map(|cells| SheetRow {
            headers: &self.headers,
            cells,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetFormat {
    Workbook,
    Csv,
    Pdf,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            _ => Err(RegistryError::UnknownFormat(path.display().to_string())),
        }
    }
}

/// Parse a spreadsheet file by extension. `.pdf` is recognised but not
/// implemented.
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Workbook => read_workbook(path),
        SheetFormat::Csv => read_csv(path),
        SheetFormat::Pdf => Err(RegistryError::PdfUnsupported),
    }
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

pub fn read_csv(path: &Path) -> Result<Sheet> {
    let file = std::fs::File::open(path)?;
    read_csv_from(std::io::BufReader::new(file))
}

/// CSV cells stay text: account numbers keep their leading zeros and
/// decimal commas survive untouched. Records made only of delimiters are
/// kept as blank rows; the reader itself skips empty lines.
pub fn read_csv_from<R: std::io::Read>(reader: R) -> Result<Sheet> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let cells: Vec<CellValue> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        rows.push(cells);
    }
    Ok(Sheet { headers, rows })
}

// ---------------------------------------------------------------------------
// Excel / ODS (feature-gated)
// ---------------------------------------------------------------------------

#[cfg(feature = "xlsx")]
pub fn read_workbook(path: &Path) -> Result<Sheet> {
    use calamine::{Data, Reader};

    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| RegistryError::Spreadsheet(format!("Failed to open workbook: {e}")))?;
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(Sheet::default());
    };
    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| RegistryError::Spreadsheet(format!("Failed to read sheet '{first}': {e}")))?;

    let convert = |cell: &Data| -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) if s.is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Int(*i),
            Data::Float(f) => CellValue::Float(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Text(excel_serial_to_datetime(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(format!("#{e:?}")),
        }
    };

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header) => header
            .iter()
            .map(|c| convert(c).to_string().trim().to_string())
            .collect(),
        None => return Ok(Sheet::default()),
    };

    let mut rows = Vec::new();
    for row in rows_iter {
        rows.push(row.iter().map(convert).collect());
    }
    Ok(Sheet { headers, rows })
}

#[cfg(not(feature = "xlsx"))]
pub fn read_workbook(path: &Path) -> Result<Sheet> {
    Err(RegistryError::UnknownFormat(format!(
        "{} (built without xlsx support)",
        path.display()
    )))
}

/// Excel serial date to `YYYY-MM-DD`, with a time part when the serial has
/// a fractional day.
pub fn excel_serial_to_datetime(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let Some(base) = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return number(serial);
    };
    let seconds = (serial * 86_400.0).round() as i64;
    let Some(dt) = chrono::TimeDelta::try_seconds(seconds).and_then(|d| base.checked_add_signed(d))
    else {
        return number(serial);
    };
    if seconds % 86_400 == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SheetFormat::from_path(Path::new("a.xlsx")).unwrap(), SheetFormat::Workbook);
        assert_eq!(SheetFormat::from_path(Path::new("a.XLS")).unwrap(), SheetFormat::Workbook);
        assert_eq!(SheetFormat::from_path(Path::new("a.csv")).unwrap(), SheetFormat::Csv);
        assert_eq!(SheetFormat::from_path(Path::new("a.pdf")).unwrap(), SheetFormat::Pdf);
        assert!(matches!(
            SheetFormat::from_path(Path::new("a.txt")),
            Err(RegistryError::UnknownFormat(_))
        ));
        assert!(SheetFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_read_sheet_pdf_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statement.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();
        assert!(matches!(read_sheet(&path), Err(RegistryError::PdfUnsupported)));
    }

    #[test]
    fn test_read_csv_headers_and_rows() {
        let data = "address,build_year,premises\n1 Main St,1990,101;102\n2 Oak Ave,2001,\n";
        let sheet = read_csv_from(data.as_bytes()).unwrap();
        assert_eq!(sheet.headers, vec!["address", "build_year", "premises"]);
        assert_eq!(sheet.len(), 2);
        let row = sheet.rows().next().unwrap();
        assert_eq!(row.get("address"), Some(&CellValue::Text("1 Main St".to_string())));
        assert_eq!(row.get("premises").unwrap().to_string(), "101;102");
        assert_eq!(row.get("area"), None);
        let second = sheet.rows().nth(1).unwrap();
        assert_eq!(second.get("premises"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_read_csv_keeps_text_verbatim() {
        let data = "account,amount\n0012345,\"12,50\"\n";
        let sheet = read_csv_from(data.as_bytes()).unwrap();
        let row = sheet.rows().next().unwrap();
        assert_eq!(row.get("account").unwrap().to_string(), "0012345");
        assert_eq!(row.get("amount").unwrap().to_string(), "12,50");
    }

    #[test]
    fn test_read_csv_short_row_reads_empty() {
        let data = "a,b,c\n1\n";
        let sheet = read_csv_from(data.as_bytes()).unwrap();
        let row = sheet.rows().next().unwrap();
        assert_eq!(row.get("c"), Some(&CellValue::Empty));
    }

    #[test]
    fn test_read_csv_strips_bom() {
        let data = "\u{feff}address,build_year\nX,1990\n";
        let sheet = read_csv_from(data.as_bytes()).unwrap();
        assert!(sheet.has_column("address"));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Int(42).to_string(), "42");
        assert_eq!(CellValue::Float(1990.0).to_string(), "1990");
        assert_eq!(CellValue::Float(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Bool(true).to_string(), "TRUE");
    }

    #[test]
    fn test_excel_serial_to_datetime() {
        assert_eq!(excel_serial_to_datetime(45667.0), "2025-01-10");
        assert_eq!(excel_serial_to_datetime(45667.5), "2025-01-10 12:00:00");
    }

    #[test]
    fn test_excel_serial_out_of_range_prints_number() {
        assert_eq!(excel_serial_to_datetime(1e15), "1000000000000000");
        assert_eq!(excel_serial_to_datetime(-1e15), "-1000000000000000");
    }

    #[test]
    fn test_read_csv_keeps_delimiter_only_records() {
        let data = "a,b,c
1,2,3
,,

4,5,6
";
        let sheet = read_csv_from(data.as_bytes()).unwrap();
        assert_eq!(sheet.len(), 3);
        let blank = sheet.rows().nth(1).unwrap();
        assert!(blank.is_blank());
        assert!(!sheet.rows().next().unwrap().is_blank());
    }
}
