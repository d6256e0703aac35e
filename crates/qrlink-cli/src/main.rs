mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use qrlink_core::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qrlink", about = "Generate, scan and forward QR codes")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (TOML). Defaults to the per-user config when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text as a QR code image
    Generate(commands::generate::GenerateArgs),
    /// Decode a QR code from an image file
    Scan(commands::scan::ScanArgs),
    /// Scan a live frame stream until the first QR code
    Watch(commands::watch::WatchArgs),
    /// Forward text to the collector endpoint
    Send(commands::send::SendArgs),
    /// Print or save the default config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Commands::Config(args) = &cli.command {
        return commands::config::run(args);
    }

    let config = AppConfig::resolve(cli.config.as_deref())?;
    match &cli.command {
        Commands::Generate(args) => commands::generate::run(args, &config),
        Commands::Scan(args) => commands::scan::run(args, &config),
        Commands::Watch(args) => commands::watch::run(args, &config),
        Commands::Send(args) => commands::send::run(args, &config),
        Commands::Config(_) => Ok(()),
    }
}
