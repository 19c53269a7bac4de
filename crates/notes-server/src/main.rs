//! Secret Notes server binary.
//!
//! Parses the command line, loads configuration, and runs the requested
//! command. With no subcommand it serves the HTTP API.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use notes_core::NoteService;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use notes_server::app::{
    load_config, open_store, resolve_config_path, resolve_settings, wait_for_shutdown,
    Settings,
};
use notes_server::cli::{Cli, Commands, InitArgs, PurgeArgs, ServeArgs};
use notes_server::config::{default_database_path, write_config, NotesConfig};
use notes_server::errors::{exit_code_for, CliError};
use notes_server::http;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        None => {
            // clap only reads SECRET_NOTES_LISTEN when `serve` is named.
            let args = ServeArgs {
                listen: std::env::var("SECRET_NOTES_LISTEN").ok(),
            };
            serve(&cli, &args).await
        }
        Some(Commands::Serve(args)) => serve(&cli, args).await,
        Some(Commands::Init(args)) => init(&cli, args),
        Some(Commands::Purge(args)) => purge(&cli, args).await,
    }
}

fn init_tracing(level: tracing::Level) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
}

async fn serve(cli: &Cli, args: &ServeArgs) -> Result<()> {
    let config = load_config(cli)?;
    let settings: Settings = resolve_settings(cli, args.listen.as_deref(), &config)?;
    init_tracing(settings.log_level);

    tracing::info!(database = %settings.database_path.display(), "starting Secret Notes API");

    let store = open_store(&settings.database_path)?;
    let service = Arc::new(NoteService::new(store));

    let listener = TcpListener::bind(settings.listen_addr).await.map_err(|e| {
        CliError::config(format!("Failed to bind {}: {}", settings.listen_addr, e))
    })?;

    let (shutdown_tx, shutdown_rx) = watch::channel(());
    tokio::spawn(async move {
        wait_for_shutdown(tokio::signal::ctrl_c()).await;
        let _ = shutdown_tx.send(());
    });

    let router = http::router(
        Arc::clone(&service),
        settings.max_body_bytes,
        settings.log_level,
    );
    http::serve(listener, router, shutdown_rx).await?;

    match Arc::try_unwrap(service) {
        Ok(service) => service.into_store().close()?,
        Err(_) => tracing::warn!("note store still shared at shutdown; skipping close"),
    }
    Ok(())
}

fn init(cli: &Cli, args: &InitArgs) -> Result<()> {
    let path = resolve_config_path(cli)?;
    if path.exists() && !args.force {
        return Err(CliError::invalid_input(
            format!("Config file already exists: {}", path.display()),
            "Use --force to overwrite it",
        )
        .into());
    }

    let database_path = match cli.database.clone() {
        Some(path) => path,
        None => default_database_path()?,
    };
    write_config(&path, &NotesConfig::with_defaults(database_path))?;
    println!("Wrote config to {}", path.display());
    Ok(())
}

async fn purge(cli: &Cli, args: &PurgeArgs) -> Result<()> {
    if !args.yes {
        return Err(CliError::invalid_input(
            "Refusing to delete every note without confirmation",
            "Re-run with --yes",
        )
        .into());
    }

    let config = load_config(cli)?;
    let settings = resolve_settings(cli, None, &config)?;
    init_tracing(settings.log_level);

    let store = open_store(&settings.database_path)?;
    let removed = store.purge().await?;
    store.close()?;
    println!("Removed {} note(s)", removed);
    Ok(())
}
