use std::path::{Path, PathBuf};

use agenda_bridge::config::Config;
use directories::ProjectDirs;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

const CONFIG_FILE: &str = "config.toml";

/// Failures of reading or writing `config.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No home directory could be resolved for the current user.
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// Creating, reading or writing `config.toml` failed.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// `config.toml` is not valid TOML or has an unknown shape, e.g. a
    /// non-numeric `dismiss_after_ms`.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// The in-memory config could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Path of `config.toml` inside the user's configuration directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "agenda", "agenda")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or(ConfigError::DirectoriesNotFound)
}

/// Loads the application configuration from the user's configuration
/// directory, writing the defaults there first if the file does not exist.
pub async fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&default_config_path()?).await
}

/// Loads the configuration stored at `path`. A missing file is created with
/// default values.
pub async fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {path:?}");
    if path.exists() {
        let contents = read_to_string(path).await?;
        return Ok(toml::from_str(&contents)?);
    }

    let config = Config::default();
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

/// Serializes `config` to pretty-printed TOML and writes it to `path`,
/// overwriting any existing file.
pub async fn save_config_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .await?;

    let contents = toml::to_string_pretty(config)?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}
