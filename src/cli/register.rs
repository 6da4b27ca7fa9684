use std::path::Path;

use crate::cli::{load_table, print_check, render_table};
use crate::context::AppContext;
use crate::error::Result;
use crate::exporter::write_export;
use crate::table::TableKind;

pub fn show(ctx: &mut AppContext, file: &str) -> Result<()> {
    ctx.settings.require_bank_registers()?;
    if let Some(count) = load_table(ctx, TableKind::Register, file)? {
        println!("{}", render_table(&ctx.registers));
        println!("{count} register rows loaded");
    }
    Ok(())
}

pub fn check(ctx: &mut AppContext, file: &str) -> Result<()> {
    ctx.settings.require_bank_registers()?;
    if load_table(ctx, TableKind::Register, file)?.is_some() {
        print_check(&ctx.registers);
    }
    Ok(())
}

pub fn export(ctx: &mut AppContext, file: &str, output: &str) -> Result<()> {
    ctx.settings.require_bank_registers()?;
    if load_table(ctx, TableKind::Register, file)?.is_none() {
        return Ok(());
    }
    let written = write_export(&ctx.registers, Path::new(output))?;
    println!("Exported {written} register rows to {output}");
    Ok(())
}
