pub mod browse;
pub mod houses;
pub mod import;
pub mod init;
pub mod owners;
pub mod register;
pub mod statement;
pub mod status;

use std::path::Path;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::context::AppContext;
use crate::error::{RegistryError, Result};
use crate::importer::load_display_file;
use crate::table::{DisplayTable, TableKind};
use crate::validator::validate;

#[derive(Parser)]
#[command(name = "registry", about = "Real-estate registry with bank register and statement tools.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for registry data (default: ~/Documents/estate-registry)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Show the current database and record counts.
    Status,
    /// Re-read and print houses, premises and owners.
    List,
    /// Manage houses.
    Houses {
        #[command(subcommand)]
        command: HousesCommands,
    },
    /// Manage premises.
    Premises {
        #[command(subcommand)]
        command: PremisesCommands,
    },
    /// Manage owners.
    Owners {
        #[command(subcommand)]
        command: OwnersCommands,
    },
    /// Import houses and premises from an XLSX/XLS/CSV file.
    Import {
        /// File with address, build_year and optional premises, area columns
        file: String,
    },
    /// Bank register tools (load, check, export).
    Register {
        #[command(subcommand)]
        command: RegisterCommands,
    },
    /// Bank statement tools (load, search, check, report).
    Statement {
        #[command(subcommand)]
        command: StatementCommands,
    },
    /// Interactively browse a register or statement file.
    Browse {
        #[command(subcommand)]
        command: BrowseCommands,
    },
}

#[derive(Subcommand)]
pub enum HousesCommands {
    /// Add a house.
    Add {
        /// Street address
        #[arg(long)]
        address: String,
        /// Year of construction (1800-2100)
        #[arg(long = "build-year")]
        build_year: String,
    },
    /// List all houses.
    List,
}

#[derive(Subcommand)]
pub enum PremisesCommands {
    /// List all premises.
    List,
}

#[derive(Subcommand)]
pub enum OwnersCommands {
    /// Add an owner.
    Add {
        #[arg(long = "first-name")]
        first_name: String,
        #[arg(long = "last-name")]
        last_name: String,
        /// Identity document number
        #[arg(long)]
        document: String,
        /// Ownership share, e.g. 0.5
        #[arg(long)]
        share: String,
    },
    /// List all owners.
    List,
}

#[derive(Subcommand)]
pub enum RegisterCommands {
    /// Load a register file and print it.
    Show {
        /// XLSX/XLS/CSV register file
        file: String,
    },
    /// Load a register file and check account numbers and amounts.
    Check { file: String },
    /// Load a register file and write it back out as XLSX or CSV.
    Export {
        file: String,
        /// Destination path (.xlsx or .csv)
        #[arg(long)]
        output: String,
    },
}

#[derive(Subcommand)]
pub enum StatementCommands {
    /// Load a statement file and print it, optionally filtered.
    Show {
        /// XLSX/XLS/CSV statement file
        file: String,
        /// Case-insensitive text to search for in any column
        #[arg(long)]
        search: Option<String>,
    },
    /// Load a statement file and check account numbers and amounts.
    Check { file: String },
    /// Write the loaded statement as an XLSX report.
    Report {
        file: String,
        /// Destination path (.xlsx)
        #[arg(long)]
        output: String,
    },
}

#[derive(Subcommand)]
pub enum BrowseCommands {
    /// Browse a bank register file.
    Register { file: String },
    /// Browse a bank statement file with live search.
    Statement { file: String },
}

/// Load `file` into the context's table of `kind`. PDF sources are reported
/// and skipped, leaving the table untouched.
pub(crate) fn load_table(ctx: &mut AppContext, kind: TableKind, file: &str) -> Result<Option<usize>> {
    match load_display_file(ctx.table_mut(kind), Path::new(file)) {
        Ok(count) => Ok(Some(count)),
        Err(RegistryError::PdfUnsupported) => {
            println!("{}", RegistryError::PdfUnsupported.to_string().yellow());
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Render the visible rows of a display table.
pub(crate) fn render_table(table: &DisplayTable) -> comfy_table::Table {
    let mut out = comfy_table::Table::new();
    out.set_header(table.headers().to_vec());
    for index in table.visible_rows() {
        let row = &table.rows()[index];
        out.add_row(row.iter().map(|c| c.clone().unwrap_or_default()));
    }
    out
}

/// Validate a loaded table and print the outcome.
pub(crate) fn print_check(table: &DisplayTable) {
    let report = validate(table);
    if report.is_clean() {
        println!("{}", report.summary().green());
    } else {
        println!("{}", report.summary().yellow());
    }
}
