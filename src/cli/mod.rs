//! CLI module for the churn gateway
//!
//! Provides subcommands for running the service:
//! - `serve`: run the API server (default mode)
//! - `migrate`: create the database schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Churn Gateway - churn model serving with JWT-authenticated accounts
#[derive(Parser)]
#[command(name = "churn-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Create the users table and indexes
    Migrate,
}
