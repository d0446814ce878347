//! Configuration data model.
//!
//! Every section is `#[serde(default)]` so a partial file only overrides
//! what it names.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::defaults::{
    DEFAULT_INPUT_HEIGHT, DEFAULT_LOCAL_NAME, DEFAULT_MAX_MESSAGES, DEFAULT_MIN_COLUMNS,
    DEFAULT_MIN_ROWS, DEFAULT_PLACEHOLDER, DEFAULT_SYSTEM_NAME,
};
use crate::error::ConfigError;
use crate::logging::Verbosity;
use crate::widget::{BorderStyle, Padding};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log: LogConfig,
    pub chat: ChatConfig,
    pub input: InputConfig,
    pub terminal: TerminalConfig,
}

impl Config {
    /// Reject values that parse but cannot work.
    ///
    /// # Errors
    ///
    /// `ConfigError::Invalid` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chat.max_messages == 0 {
            return Err(invalid("chat.max_messages must be at least 1"));
        }
        if self.input.height == 0 {
            return Err(invalid("input.height must be at least 1"));
        }
        if self.terminal.min_columns == 0 || self.terminal.min_rows == 0 {
            return Err(invalid("terminal.min_columns and terminal.min_rows must be at least 1"));
        }
        if self.input.height >= self.terminal.min_rows {
            return Err(invalid(
                "input.height must leave room for the message pane (raise terminal.min_rows)",
            ));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}

/// Where diagnostics go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: Verbosity,
    /// Log file; a per-user state directory is used when unset.
    pub file: Option<PathBuf>,
}

/// Message history and sender names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    /// Oldest messages are dropped beyond this many.
    pub max_messages: usize,
    pub local_name: String,
    pub system_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            local_name: DEFAULT_LOCAL_NAME.to_string(),
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
        }
    }
}

/// The message input box at the bottom of the chat screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Rows, border included.
    pub height: u16,
    pub border: BorderStyle,
    pub padding: Padding,
    pub placeholder: String,
    /// 0 means unlimited.
    pub character_limit: usize,
    pub word_break: bool,
    pub overflow_indicator: bool,
    pub indicator_char: Option<char>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_INPUT_HEIGHT,
            border: BorderStyle::None,
            padding: Padding::new(0, 1, 0, 1),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            character_limit: 0,
            word_break: true,
            overflow_indicator: true,
            indicator_char: None,
        }
    }
}

/// Smallest terminal the chat screen will draw into.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerminalConfig {
    pub min_columns: u16,
    pub min_rows: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            min_columns: DEFAULT_MIN_COLUMNS,
            min_rows: DEFAULT_MIN_ROWS,
        }
    }
}
