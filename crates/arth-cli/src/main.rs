//! Arth CLI - Personal finance dashboard
//!
//! Usage:
//!   arth serve --port 5000    Start the dashboard web server
//!   arth profile              Print the bundled user profile
//!   arth insights             Generate insight cards once and print them
//!   arth doctor               Check AI backend configuration and health

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            allow_origin,
        } => commands::cmd_serve(&host, port, static_dir.as_deref(), allow_origin).await,
        Commands::Profile => commands::cmd_profile(),
        Commands::Insights => commands::cmd_insights().await,
        Commands::Doctor => commands::cmd_doctor().await,
    }
}
