use crate::browser::TableBrowser;
use crate::cli::load_table;
use crate::context::AppContext;
use crate::error::Result;
use crate::table::TableKind;

pub fn run(ctx: &mut AppContext, kind: TableKind, file: &str) -> Result<()> {
    if kind == TableKind::Register {
        ctx.settings.require_bank_registers()?;
    }
    if load_table(ctx, kind, file)?.is_none() {
        return Ok(());
    }
    let search_enabled = kind == TableKind::Statement && ctx.settings.features.statement_search;
    TableBrowser::new(ctx.table_mut(kind), search_enabled).run()
}
