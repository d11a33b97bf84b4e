//! die-scan - Identify file types, compilers and packers
//!
//! A command-line front end for the Detect-It-Easy scanning library.

mod commands;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use die_core::{ConfigStore, ResultFormat};

use commands::scan::ScanArgs;

#[derive(Parser)]
#[command(name = "die-scan")]
#[command(author, version, about = "Identify file types, compilers and packers")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v debug, -vv trace); -v also requests a verbose report
    #[arg(short, long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file on disk
    Scan(ScanArgs),

    /// Read a file into memory and scan its bytes
    #[command(alias = "mem")]
    Memory(ScanArgs),

    /// Check that a signature database loads
    LoadDb {
        /// Database directory or file
        path: PathBuf,
    },

    /// Show or change scan defaults
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default signature database
    SetDb { path: PathBuf },
    /// Forget the default signature database
    ClearDb,
    /// Set the default report format (text, json, xml, csv, tsv)
    SetFormat { format: ResultFormat },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbosity);

    // Exit directly: a timed-out scan may still occupy the blocking pool and
    // dropping the runtime would wait for it.
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = ConfigStore::new()?;

    match cli.command {
        Commands::Scan(args) => commands::scan::file(&store, args, cli.verbosity, cli.json).await?,
        Commands::Memory(args) => {
            commands::scan::memory(&store, args, cli.verbosity, cli.json).await?
        }
        Commands::LoadDb { path } => commands::load_db::run(&path)?,
        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&store, cli.json).await?,
            ConfigAction::SetDb { path } => commands::config::set_db(&store, path).await?,
            ConfigAction::ClearDb => commands::config::clear_db(&store).await?,
            ConfigAction::SetFormat { format } => {
                commands::config::set_format(&store, format).await?
            }
        },
    }

    Ok(())
}
