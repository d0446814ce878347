//! Diagnostic logging setup.
//!
//! The terminal belongs to the UI, so events go to a log file. Verbosity
//! comes from the CLI flags or `[log].level`; `RUST_LOG` overrides both.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// How much gets logged, quietest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Nothing.
    Silent,
    /// Only errors that end the program.
    Fatal,
    Severe,
    Error,
    Warning,
    #[default]
    Info,
    /// Everything, including registry and lifecycle chatter.
    Extra,
}

impl Verbosity {
    /// `EnvFilter` directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Silent => "off",
            Self::Fatal | Self::Severe | Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Extra => "debug",
        }
    }

    fn filter(self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()))
    }
}

/// Install the global subscriber writing to `file`.
///
/// Returns the path being written, or `None` when logging is off (silent
/// with no `RUST_LOG`).
///
/// # Errors
///
/// The log file cannot be created, or a subscriber is already installed.
pub fn init(verbosity: Verbosity, file: &Path) -> io::Result<Option<PathBuf>> {
    if verbosity == Verbosity::Silent && std::env::var_os("RUST_LOG").is_none() {
        return Ok(None);
    }
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let writer = OpenOptions::new().create(true).append(true).open(file)?;

    tracing_subscriber::fmt()
        .with_env_filter(verbosity.filter())
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_thread_names(true)
        .try_init()
        .map_err(io::Error::other)?;
    Ok(Some(file.to_path_buf()))
}
