use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use usmap::cli::{Cli, Commands};
use usmap::commands;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();

    match &cli.command {
        Commands::Render(args) => commands::render(&cli, args).await,
        Commands::Attributes(args) => commands::attributes(&cli, args).await,
    }
}
