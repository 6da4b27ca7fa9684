use std::path::Path;

use tracing::info;

use crate::error::{RegistryError, Result};
use crate::table::{DisplayTable, TableKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// Destination format from a file extension. `.pdf` is recognised but
    /// not implemented.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" => Ok(Self::Xlsx),
            "csv" => Ok(Self::Csv),
            "pdf" => Err(RegistryError::PdfUnsupported),
            _ => Err(RegistryError::UnknownFormat(path.display().to_string())),
        }
    }
}

/// Serialize every row of the table, hidden ones included, with the column
/// headers as the first row.
pub fn export_table(table: &DisplayTable, format: ExportFormat) -> Result<Vec<u8>> {
    let rows = table.snapshot();
    match format {
        ExportFormat::Csv => to_csv(table.headers(), &rows),
        ExportFormat::Xlsx => to_xlsx(table.headers(), &rows, table.kind()),
    }
}

fn to_csv(headers: &[&str], rows: &[Vec<String>]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.into_inner()
        .map_err(|e| RegistryError::Io(e.into_error()))
}

#[cfg(feature = "xlsx")]
fn to_xlsx(headers: &[&str], rows: &[Vec<String>], kind: TableKind) -> Result<Vec<u8>> {
    use rust_xlsxwriter::{Format, Workbook};

    let xlsx_err = |e: rust_xlsxwriter::XlsxError| RegistryError::Spreadsheet(e.to_string());

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(kind.label()).map_err(xlsx_err)?;

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            worksheet
                .write_string((r + 1) as u32, col as u16, value)
                .map_err(xlsx_err)?;
        }
    }
    workbook.save_to_buffer().map_err(xlsx_err)
}

#[cfg(not(feature = "xlsx"))]
fn to_xlsx(_headers: &[&str], _rows: &[Vec<String>], _kind: TableKind) -> Result<Vec<u8>> {
    Err(RegistryError::UnknownFormat(
        "xlsx (built without xlsx support)".to_string(),
    ))
}

fn write_bytes(bytes: &[u8], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Export to a file whose extension picks the format. Serialization happens
/// in memory first, so a failure leaves no file behind.
pub fn write_export(table: &DisplayTable, path: &Path) -> Result<usize> {
    let format = ExportFormat::from_path(path)?;
    let bytes = export_table(table, format)?;
    write_bytes(&bytes, path)?;
    info!(file = %path.display(), rows = table.row_count(), ?format, "exported table");
    Ok(table.row_count())
}

/// Statement report: the loaded statement as a workbook. An empty table is
/// refused rather than producing a header-only file.
pub fn write_statement_report(table: &DisplayTable, path: &Path) -> Result<usize> {
    if table.is_empty() {
        return Err(RegistryError::EmptyTable(
            "import a statement before building a report".to_string(),
        ));
    }
    match ExportFormat::from_path(path)? {
        ExportFormat::Xlsx => write_export(table, path),
        ExportFormat::Csv => Err(RegistryError::UnknownFormat(format!(
            "{} (reports are written as .xlsx)",
            path.display()
        ))),
    }
}
