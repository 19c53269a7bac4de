use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use notes_core::VERSION;

/// Secret Notes - passphrase-encrypted notes over HTTP
#[derive(Parser, Debug)]
#[command(name = "notes-server")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the SQLite database
    #[arg(short, long, global = true, env = "SECRET_NOTES_DATABASE")]
    pub database: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve(ServeArgs),

    /// Write a default config file
    Init(InitArgs),

    /// Delete every stored note (test environments only)
    Purge(PurgeArgs),
}

/// Arguments for the `serve` command
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to listen on (e.g. 0.0.0.0:3000)
    #[arg(short, long, env = "SECRET_NOTES_LISTEN")]
    pub listen: Option<String>,
}

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `purge` command
#[derive(Args, Debug)]
pub struct PurgeArgs {
    /// Confirm deletion of all notes
    #[arg(long)]
    pub yes: bool,
}
