use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::defaults;

/// On-disk server configuration. Every field is optional; unset values
/// fall back to CLI flags or built-in defaults.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerSection {
    pub listen_addr: Option<String>,
    pub log_level: Option<String>,
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseSection {
    pub path: Option<String>,
}

impl NotesConfig {
    /// A fully populated config with built-in defaults.
    pub fn with_defaults(database_path: PathBuf) -> Self {
        Self {
            server: ServerSection {
                listen_addr: Some(defaults::LISTEN_ADDR.to_string()),
                log_level: Some(defaults::LOG_LEVEL.to_string()),
                max_body_bytes: Some(defaults::MAX_BODY_BYTES),
            },
            database: DatabaseSection {
                path: Some(database_path.to_string_lossy().to_string()),
            },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_database_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join(defaults::DATABASE_FILENAME))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotesConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &NotesConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("secret-notes"));
        }
    }
    Ok(home_dir()?.join(".config").join("secret-notes"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("secret-notes"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("secret-notes"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = NotesConfig::with_defaults(dir.path().join("notes.sqlite3"));

        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nlisten_addr = \"127.0.0.1:9000\"\n").unwrap();

        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.server.listen_addr.as_deref(), Some("127.0.0.1:9000"));
        assert_eq!(loaded.server.log_level, None);
        assert_eq!(loaded.database.path, None);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\n").unwrap();

        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
