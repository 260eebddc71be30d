use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `survey` binary.
#[derive(Debug, Parser)]
#[command(name = "survey", version, about = "Survey compliance-tracking API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ./survey.toml
    #[arg(short, long, global = true, env = "SURVEY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Populate an empty database with sample data
    Seed,
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// Override `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Override `server.port`
    #[arg(long)]
    pub port: Option<u16>,
}
