//! CLI module for the FormulaOne API
//!
//! Provides subcommands:
//! - `serve`: run the HTTP server (default)
//! - `migrate`: apply or revert storage migrations

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// FormulaOne API - user authentication and team management
#[derive(Parser)]
#[command(name = "formula-one-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server (default mode)
    Serve,

    /// Apply pending PostgreSQL migrations and exit
    Migrate(migrate::MigrateArgs),
}
