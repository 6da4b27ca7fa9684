mod browser;
mod cli;
mod context;
mod db;
mod error;
mod exporter;
mod fmt;
mod importer;
mod models;
mod settings;
mod sheet;
mod store;
mod table;
mod tui;
mod validator;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    BrowseCommands, Cli, Commands, HousesCommands, OwnersCommands, PremisesCommands,
    RegisterCommands, StatementCommands,
};
use context::AppContext;
use error::Result;
use table::TableKind;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(ctx: &mut AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Status => cli::status::run(ctx),
        Commands::List => cli::houses::list_all(ctx),
        Commands::Houses { command } => match command {
            HousesCommands::Add {
                address,
                build_year,
            } => cli::houses::add(ctx, &address, &build_year),
            HousesCommands::List => cli::houses::list(ctx),
        },
        Commands::Premises { command } => match command {
            PremisesCommands::List => cli::houses::list_premises_cmd(ctx),
        },
        Commands::Owners { command } => match command {
            OwnersCommands::Add {
                first_name,
                last_name,
                document,
                share,
            } => cli::owners::add(ctx, &first_name, &last_name, &document, &share),
            OwnersCommands::List => cli::owners::list(ctx),
        },
        Commands::Import { file } => cli::import::run(ctx, &file),
        Commands::Register { command } => match command {
            RegisterCommands::Show { file } => cli::register::show(ctx, &file),
            RegisterCommands::Check { file } => cli::register::check(ctx, &file),
            RegisterCommands::Export { file, output } => cli::register::export(ctx, &file, &output),
        },
        Commands::Statement { command } => match command {
            StatementCommands::Show { file, search } => {
                cli::statement::show(ctx, &file, search.as_deref())
            }
            StatementCommands::Check { file } => cli::statement::check(ctx, &file),
            StatementCommands::Report { file, output } => cli::statement::report(ctx, &file, &output),
        },
        Commands::Browse { command } => match command {
            BrowseCommands::Register { file } => cli::browse::run(ctx, TableKind::Register, &file),
            BrowseCommands::Statement { file } => cli::browse::run(ctx, TableKind::Statement, &file),
        },
    }
}

fn run(command: Commands) -> Result<()> {
    if let Commands::Init { data_dir } = command {
        return cli::init::run(data_dir);
    }
    let mut ctx = AppContext::load()?;
    let result = dispatch(&mut ctx, command);
    let closed = ctx.close();
    result.and(closed)
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
