use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{RegistryError, Result};
use crate::models::{House, Premise};
use crate::sheet::{read_sheet, CellValue, Sheet, SheetRow};
use crate::store::{insert_house, insert_premise};
use crate::table::DisplayTable;

pub const COL_ADDRESS: &str = "address";
pub const COL_BUILD_YEAR: &str = "build_year";
pub const COL_PREMISES: &str = "premises";
pub const COL_AREA: &str = "area";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn format_error(row: usize, column: &str, cell: &CellValue) -> RegistryError {
    RegistryError::Format {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    }
}

/// Integer parse of a build year cell. Floats are accepted only when they
/// hold a whole number.
pub fn parse_year(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Int(i) => Some(*i),
        CellValue::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
        CellValue::Text(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

pub fn parse_area(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Empty => Some(0.0),
        CellValue::Int(i) => Some(*i as f64),
        CellValue::Float(f) => Some(*f),
        CellValue::Text(s) => s.trim().replace(',', ".").parse().ok(),
        CellValue::Bool(_) => None,
    }
}

/// Split a `;`-delimited premises cell into trimmed numbers, one per token.
/// A blank cell holds no premises; otherwise empty tokens are kept.
pub fn split_premises(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(';').map(|s| s.trim().to_string()).collect()
}

// ---------------------------------------------------------------------------
// Persist mode
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq)]
pub struct ImportResult {
    pub houses: usize,
    pub premises: usize,
}

fn house_from_row(row_no: usize, row: &SheetRow<'_>) -> Result<House> {
    let address = row
        .get(COL_ADDRESS)
        .ok_or_else(|| RegistryError::MissingColumn(COL_ADDRESS.to_string()))?;
    let year_cell = row
        .get(COL_BUILD_YEAR)
        .ok_or_else(|| RegistryError::MissingColumn(COL_BUILD_YEAR.to_string()))?;
    let build_year =
        parse_year(year_cell).ok_or_else(|| format_error(row_no, COL_BUILD_YEAR, year_cell))?;
    Ok(House {
        id: None,
        address: address.to_string(),
        build_year,
    })
}

/// Insert one house per sheet row, fanning out premises from the `premises`
/// column. Rows are inserted as they are read, with no surrounding
/// transaction: a failure partway leaves the earlier rows in the store.
pub fn import_houses(conn: &Connection, sheet: &Sheet) -> Result<ImportResult> {
    let mut result = ImportResult::default();
    if sheet.is_empty() {
        return Ok(result);
    }
    for column in [COL_ADDRESS, COL_BUILD_YEAR] {
        if !sheet.has_column(column) {
            return Err(RegistryError::MissingColumn(column.to_string()));
        }
    }

    for (idx, row) in sheet.rows().enumerate() {
        let row_no = idx + 1;
        if row.is_blank() {
            debug!(row = row_no, "skipping blank row");
            continue;
        }
        let house = house_from_row(row_no, &row)?;
        let house_id = insert_house(conn, &house)?;
        result.houses += 1;
        debug!(row = row_no, house_id, address = %house.address, "inserted house");

        let Some(premises_cell) = row.get(COL_PREMISES) else {
            continue;
        };
        let area = match row.get(COL_AREA) {
            Some(cell) => parse_area(cell).ok_or_else(|| format_error(row_no, COL_AREA, cell))?,
            None => 0.0,
        };
        for number in split_premises(&premises_cell.to_string()) {
            insert_premise(
                conn,
                &Premise {
                    id: None,
                    house_id,
                    number,
                    area,
                },
            )?;
            result.premises += 1;
        }
    }

    info!(houses = result.houses, premises = result.premises, "house import finished");
    Ok(result)
}

pub fn import_houses_file(conn: &Connection, file_path: &Path) -> Result<ImportResult> {
    let sheet = read_sheet(file_path)?;
    info!(file = %file_path.display(), rows = sheet.len(), "importing houses");
    import_houses(conn, &sheet)
}

// ---------------------------------------------------------------------------
// Display-table mode
// ---------------------------------------------------------------------------

/// Replace the table's rows with the sheet's rows, cell by cell as text.
pub fn load_display_table(table: &mut DisplayTable, sheet: &Sheet) -> usize {
    table.clear();
    for cells in &sheet.rows {
        table.push_row(cells.iter().map(|c| Some(c.to_string())).collect());
    }
    debug!(kind = table.kind().label(), rows = table.row_count(), "loaded display table");
    table.row_count()
}

/// Load a file into a display table. The table is untouched when the file
/// cannot be read.
pub fn load_display_file(table: &mut DisplayTable, file_path: &Path) -> Result<usize> {
    let sheet = read_sheet(file_path)?;
    let count = load_display_table(table, &sheet);
    info!(file = %file_path.display(), rows = count, kind = table.kind().label(), "imported display table");
    Ok(count)
}
