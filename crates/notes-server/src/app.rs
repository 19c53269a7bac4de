//! Settings resolution and store lifecycle.
//!
//! Every setting is resolved in the same order: CLI flag, then config file,
//! then built-in default.

use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use notes_core::SqliteNoteStore;

use crate::cli::Cli;
use crate::config::{default_config_path, default_database_path, read_config, NotesConfig};
use crate::constants::defaults;
use crate::errors::CliError;

/// Effective runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    pub log_level: tracing::Level,
    pub max_body_bytes: usize,
    pub database_path: PathBuf,
}

pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.config.clone() {
        return Ok(path);
    }
    if let Ok(value) = std::env::var("SECRET_NOTES_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file if one exists.
///
/// A missing file is not an error; an explicit `--config` that does not
/// exist is.
pub fn load_config(cli: &Cli) -> anyhow::Result<NotesConfig> {
    let path = resolve_config_path(cli)?;
    if path.exists() {
        return read_config(&path).map_err(|e| CliError::config(e.to_string()).into());
    }
    if cli.config.is_some() {
        return Err(CliError::config(format!("Config file not found: {}", path.display())).into());
    }
    Ok(NotesConfig::default())
}

pub fn resolve_settings(
    cli: &Cli,
    listen: Option<&str>,
    config: &NotesConfig,
) -> anyhow::Result<Settings> {
    let listen_raw = listen
        .map(str::to_string)
        .or_else(|| config.server.listen_addr.clone())
        .unwrap_or_else(|| defaults::LISTEN_ADDR.to_string());
    let listen_addr: SocketAddr = listen_raw.parse().map_err(|e| {
        CliError::invalid_input(
            format!("Invalid listen address \"{}\": {}", listen_raw, e),
            "Use HOST:PORT, e.g. 0.0.0.0:3000",
        )
    })?;

    let level_raw = cli
        .log_level
        .clone()
        .or_else(|| config.server.log_level.clone())
        .unwrap_or_else(|| defaults::LOG_LEVEL.to_string());
    let log_level: tracing::Level = level_raw.parse().map_err(|_| {
        CliError::invalid_input(
            format!("Invalid log level \"{}\"", level_raw),
            "Use one of: error, warn, info, debug, trace",
        )
    })?;

    let max_body_bytes = config
        .server
        .max_body_bytes
        .unwrap_or(defaults::MAX_BODY_BYTES);

    let database_path = match cli.database.clone() {
        Some(path) => path,
        None => match config.database.path.as_deref() {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        },
    };

    Ok(Settings {
        listen_addr,
        log_level,
        max_body_bytes,
        database_path,
    })
}

/// Open the note database, creating its directory if needed.
pub fn open_store(path: &Path) -> anyhow::Result<SqliteNoteStore> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CliError::config(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    SqliteNoteStore::open(path).map_err(|e| {
        CliError::config(format!(
            "Failed to open database {}: {}",
            path.display(),
            e
        ))
        .into()
    })
}

/// Resolve once `signal` fires.
///
/// If the signal handler cannot be installed the error is logged and this
/// never resolves, so the server keeps running instead of stopping at once.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
