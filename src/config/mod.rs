//! Configuration loading from TOML files.
//!
//! Config is loaded from the first source found (highest wins):
//! 1. TOML file given with `--config`
//! 2. ./portchat.toml in the current directory
//! 3. $XDG_CONFIG_HOME/portchat/portchat.toml (or ~/.config/portchat/portchat.toml)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

mod defaults;
mod sources;
mod types;

use defaults::{APP_DIR_NAME, DEFAULT_CONFIG_TEMPLATE, LOG_FILE_NAME};
use sources::read_config_text_with_sources;

pub use sources::ConfigSource;
pub use types::{ChatConfig, Config, InputConfig, LogConfig, TerminalConfig};

/// Parsed configuration plus the source it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Load configuration from disk.
///
/// `path_override` is an explicit config file path (from `--config`).
///
/// # Errors
///
/// An unreadable explicit path, malformed TOML, or values that fail
/// [`Config::validate`].
pub fn load_config(path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FRoot>(
    path_override: Option<&Path>,
    read_file: FRead,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let config: Config = toml::from_str(&text)?;
    config.validate()?;
    Ok(LoadedConfig { config, source })
}

/// The commented default `portchat.toml`.
pub fn default_config_template() -> &'static str {
    DEFAULT_CONFIG_TEMPLATE
}

/// Log file used when `[log].file` is unset.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
