use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use larder::config::OutputFormat;

/// larder - Recipe scaling with measurable amounts
#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Scale recipes into amounts a cook can measure", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scale a recipe to a number of servings
    Scale {
        /// Recipe JSON file
        #[arg(long)]
        recipe: PathBuf,

        /// Target servings (clamped to the allowed range)
        #[arg(long)]
        servings: Option<f64>,

        /// Output format (overrides config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Pair ingredients and steps of two recipe versions
    Diff {
        /// Recipe JSON file before the edit
        #[arg(long)]
        previous: PathBuf,

        /// Recipe JSON file after the edit
        #[arg(long)]
        current: PathBuf,

        /// Output format (overrides config file)
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Convert an amount between units of the same kind
    Convert {
        amount: String,
        from: String,
        to: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = larder::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    larder::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Scale {
            recipe,
            servings,
            format,
        } => larder::cli::scale(&config, &recipe, servings, format),
        Commands::Diff {
            previous,
            current,
            format,
        } => larder::cli::diff(&config, &previous, &current, format),
        Commands::Convert { amount, from, to } => larder::cli::convert(&amount, &from, &to),
    }
}
