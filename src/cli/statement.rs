use std::path::Path;

use crate::cli::{load_table, print_check, render_table};
use crate::context::AppContext;
use crate::error::Result;
use crate::exporter::write_statement_report;
use crate::table::TableKind;

pub fn show(ctx: &mut AppContext, file: &str, search: Option<&str>) -> Result<()> {
    if search.is_some() {
        ctx.settings.require_statement_search()?;
    }
    if load_table(ctx, TableKind::Statement, file)?.is_none() {
        return Ok(());
    }
    if let Some(query) = search {
        ctx.statements.apply_filter(query);
    }
    let shown = ctx.statements.visible_rows().len();
    println!("{}", render_table(&ctx.statements));
    println!("{shown} of {} statement rows shown", ctx.statements.row_count());
    Ok(())
}

pub fn check(ctx: &mut AppContext, file: &str) -> Result<()> {
    if load_table(ctx, TableKind::Statement, file)?.is_some() {
        print_check(&ctx.statements);
    }
    Ok(())
}

pub fn report(ctx: &mut AppContext, file: &str, output: &str) -> Result<()> {
    if load_table(ctx, TableKind::Statement, file)?.is_none() {
        return Ok(());
    }
    let written = write_statement_report(&ctx.statements, Path::new(output))?;
    println!("Report saved to {output} ({written} rows)");
    Ok(())
}
