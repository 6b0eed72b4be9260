use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use stockbook_observability::LogFormat;

mod commands;
mod config;

use config::Config;

/// stockbook - single-user inventory tracker
#[derive(Parser)]
#[command(name = "stockbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Inventory data file (default: $STOCKBOOK_DATA_FILE or inventory.json)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Log output format: pretty or json (default: $STOCKBOOK_LOG_FORMAT or pretty)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add units of an item
    Add {
        item: String,
        /// Units to add (non-negative integer)
        #[arg(allow_negative_numbers = true)]
        qty: String,
    },

    /// Remove units of an item; the item is dropped once it reaches zero
    Remove {
        item: String,
        /// Units to remove (non-negative integer)
        #[arg(allow_negative_numbers = true)]
        qty: String,
    },

    /// Print the stock of one item
    Qty { item: String },

    /// List items below the low-stock threshold
    Low {
        /// Threshold (default: $STOCKBOOK_LOW_THRESHOLD or 5)
        #[arg(short, long)]
        threshold: Option<u64>,
    },

    /// Print every item and its quantity
    Report,

    /// Run a short demonstration against the data file
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(file) = cli.file {
        config.data_file = file;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    stockbook_observability::init(config.log_format);
    tracing::debug!(?config, "configuration resolved");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let path = config.data_file.as_path();

    match cli.command {
        Commands::Add { item, qty } => commands::add(&mut out, path, &item, &qty)?,
        Commands::Remove { item, qty } => commands::remove(&mut out, path, &item, &qty)?,
        Commands::Qty { item } => commands::quantity(&mut out, path, &item)?,
        Commands::Low { threshold } => {
            commands::low(&mut out, path, threshold.unwrap_or(config.low_threshold))?
        }
        Commands::Report => commands::report(&mut out, path)?,
        Commands::Demo => commands::demo(&mut out, path, config.low_threshold)?,
    }

    out.flush()?;
    Ok(())
}
