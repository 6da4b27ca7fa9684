use std::path::PathBuf;

use colored::Colorize;

use crate::context::AppContext;
use crate::error::{RegistryError, Result};
use crate::importer::import_houses_file;

pub fn run(ctx: &AppContext, file: &str) -> Result<()> {
    let file_path = PathBuf::from(file);
    let result = match import_houses_file(&ctx.conn, &file_path) {
        Ok(result) => result,
        Err(RegistryError::PdfUnsupported) => {
            println!("{}", RegistryError::PdfUnsupported.to_string().yellow());
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!(
        "{} houses imported, {} premises created",
        result.houses, result.premises
    );
    Ok(())
}
