use comfy_table::{Cell, Table};

use crate::context::AppContext;
use crate::error::{RegistryError, Result};
use crate::fmt::area;
use crate::models::House;
use crate::store::{insert_house, list_houses, list_premises};

pub const MIN_BUILD_YEAR: i64 = 1800;
pub const MAX_BUILD_YEAR: i64 = 2100;

/// Validate the house form fields.
pub fn parse_house_form(address: &str, build_year: &str) -> Result<House> {
    let address = address.trim();
    if address.is_empty() {
        return Err(RegistryError::InvalidInput("address is required".to_string()));
    }
    let year: i64 = build_year.trim().parse().map_err(|_| {
        RegistryError::InvalidInput(format!("build year must be a whole number, got '{build_year}'"))
    })?;
    if !(MIN_BUILD_YEAR..=MAX_BUILD_YEAR).contains(&year) {
        return Err(RegistryError::InvalidInput(format!(
            "build year must be between {MIN_BUILD_YEAR} and {MAX_BUILD_YEAR}, got {year}"
        )));
    }
    Ok(House {
        id: None,
        address: address.to_string(),
        build_year: year,
    })
}

pub fn add(ctx: &AppContext, address: &str, build_year: &str) -> Result<()> {
    let house = parse_house_form(address, build_year)?;
    let id = insert_house(&ctx.conn, &house)?;
    println!("Added house #{id}: {}", house.address);
    Ok(())
}

pub fn houses_table(ctx: &AppContext) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Address", "Build Year"]);
    for house in list_houses(&ctx.conn)? {
        table.add_row(vec![
            Cell::new(house.id.unwrap_or_default()),
            Cell::new(house.address),
            Cell::new(house.build_year),
        ]);
    }
    Ok(table)
}

pub fn premises_table(ctx: &AppContext) -> Result<Table> {
    let mut table = Table::new();
    table.set_header(vec!["ID", "House ID", "Number", "Area"]);
    for premise in list_premises(&ctx.conn)? {
        table.add_row(vec![
            Cell::new(premise.id.unwrap_or_default()),
            Cell::new(premise.house_id),
            Cell::new(premise.number),
            Cell::new(area(premise.area)),
        ]);
    }
    Ok(table)
}

pub fn list(ctx: &AppContext) -> Result<()> {
    println!("Houses\n{}", houses_table(ctx)?);
    Ok(())
}

pub fn list_premises_cmd(ctx: &AppContext) -> Result<()> {
    println!("Premises\n{}", premises_table(ctx)?);
    Ok(())
}

/// All three collections, freshly queried.
pub fn list_all(ctx: &AppContext) -> Result<()> {
    println!("Houses\n{}", houses_table(ctx)?);
    println!("Premises\n{}", premises_table(ctx)?);
    println!("Owners\n{}", crate::cli::owners::owners_table(ctx)?);
    Ok(())
}
