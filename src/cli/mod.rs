//! Command-line interface for resadmin

mod commands;

use clap::{Parser, Subcommand};

pub use commands::{cmd_init, cmd_seed, cmd_serve};

/// resadmin - reservation and customer administration backend
#[derive(Parser)]
#[command(name = "resadmin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the admin HTTP API (default)
    #[command(alias = "web")]
    Serve,

    /// Drop, recreate and populate the database with development fixtures
    Seed {
        /// Print the inserted records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}
