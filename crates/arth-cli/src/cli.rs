//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Arth - Personal finance dashboard with AI insights
#[derive(Parser)]
#[command(name = "arth")]
#[command(about = "Self-hosted personal finance dashboard with AI insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing additional static files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Allowed CORS origin (repeatable; default is same-origin only)
        #[arg(long)]
        allow_origin: Vec<String>,
    },

    /// Print the bundled user profile as JSON
    Profile,

    /// Generate insight cards once and print them
    Insights,

    /// Check AI backend configuration and reachability
    Doctor,
}
