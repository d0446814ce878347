//! Default configuration constants.

/// Embedded `portchat.toml` documenting every key at its default.
pub(super) const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("../templates/portchat.toml");

pub(super) const DEFAULT_MAX_MESSAGES: usize = 50;
pub(super) const DEFAULT_LOCAL_NAME: &str = "You";
pub(super) const DEFAULT_SYSTEM_NAME: &str = "SPC-System";
pub(super) const DEFAULT_INPUT_HEIGHT: u16 = 1;
pub(super) const DEFAULT_PLACEHOLDER: &str = "Type a message...";
pub(super) const DEFAULT_MIN_COLUMNS: u16 = 24;
pub(super) const DEFAULT_MIN_ROWS: u16 = 8;

/// File name looked up in the working directory and the config root.
pub(super) const CONFIG_FILE_NAME: &str = "portchat.toml";
/// Subdirectory of the config root (and of the state directory for logs).
pub(super) const APP_DIR_NAME: &str = "portchat";
pub(super) const LOG_FILE_NAME: &str = "portchat.log";
