//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{batch, query, tank};
use crate::storage::Brewery;

#[derive(Parser)]
#[command(name = "brewhouse")]
#[command(author, version, about = "Batch tracking and planning for a small brewery")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new brewery site
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage batches
    #[command(subcommand)]
    Batch(batch::BatchCommands),

    /// Manage tanks
    #[command(subcommand)]
    Tank(tank::TankCommands),

    /// Show bottled stock per beer
    Inventory,

    /// Forecast sales for a future month
    Forecast {
        /// Months ahead to forecast
        #[arg(long, default_value = "1")]
        months: u32,
    },

    /// Recommend the next beer to brew
    Plan,

    /// Show brewery status overview
    Status,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Init { path } => {
            output.verbose_ctx("init", &format!("Initializing brewery at: {}", path));
            let brewery = Brewery::init(&path)?;
            output.success(&format!(
                "Initialized brewery at {}",
                brewery.root().display()
            ));
        }

        Commands::Batch(cmd) => batch::run(cmd, &output)?,
        Commands::Tank(cmd) => tank::run(cmd, &output)?,

        Commands::Inventory => query::inventory(&output)?,
        Commands::Forecast { months } => query::forecast(&output, months)?,
        Commands::Plan => query::plan(&output)?,
        Commands::Status => query::status(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
