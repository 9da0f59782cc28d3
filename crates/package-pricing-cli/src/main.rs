mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::quote::ClientArgs;

/// Accounting service-package quotes
#[derive(Parser)]
#[command(
    name = "pkgquote",
    version,
    about = "Accounting service-package quotes and recommendations",
    long_about = "Prices the Bronze, Silver, Gold and Platinum accounting packages for a \
                  client from projected turnover and monthly transaction volume, and \
                  recommends which package to offer."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Fee schedule file (JSON, or YAML by extension); defaults to the standard price list
    #[arg(long, global = true, env = "PKGQUOTE_SCHEDULE")]
    schedule: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price every package and recommend one
    Quote(ClientArgs),
    /// Governing Bronze price (Standard or per-transaction)
    Bronze(ClientArgs),
    /// Silver breakdown
    Silver(ClientArgs),
    /// Gold breakdown, with the Silver figures it is priced from
    Gold(ClientArgs),
    /// Platinum starting price
    Platinum(ClientArgs),
    /// Print the fee schedule in effect
    Schedule,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if matches!(cli.command, Commands::Version) {
        println!("pkgquote {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let schedules = match input::schedule::load_schedules(cli.schedule.as_deref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::quote::run_quote(args, &schedules),
        Commands::Bronze(args) => commands::quote::run_bronze(args, &schedules),
        Commands::Silver(args) => commands::quote::run_silver(args, &schedules),
        Commands::Gold(args) => commands::quote::run_gold(args, &schedules),
        Commands::Platinum(args) => commands::quote::run_platinum(args, &schedules),
        Commands::Schedule => commands::schedule::run_schedule(&schedules),
        Commands::Version => return,
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
