use crate::context::AppContext;
use crate::db::DB_FILE;
use crate::error::Result;
use crate::settings::settings_path;
use crate::store::counts;

pub fn run(ctx: &AppContext) -> Result<()> {
    let settings = &ctx.settings;
    let on_off = |b: bool| if b { "on" } else { "off" };

    println!("Settings:   {}", settings_path().display());
    println!("Data dir:   {}", settings.data_dir);
    println!(
        "Database:   {}",
        std::path::Path::new(&settings.data_dir).join(DB_FILE).display()
    );
    println!("Registers:  {}", on_off(settings.features.bank_registers));
    println!("Search:     {}", on_off(settings.features.statement_search));

    let c = counts(&ctx.conn)?;
    println!();
    println!("Houses:     {}", c.houses);
    println!("Premises:   {}", c.premises);
    println!("Owners:     {}", c.owners);
    Ok(())
}
