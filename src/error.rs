//! Error types for configuration, widget construction, and line input.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// WidgetError
// ---------------------------------------------------------------------------

/// Text widget configuration errors.
///
/// These are only ever raised while assembling a widget; a constructed
/// widget never produces one later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// Rows or columns were zero.
    EmptySize,
    /// The rectangle reaches past the last addressable row or column.
    OutOfBounds,
    /// The builder was never given a position.
    PositionNotSet,
    /// The builder was never given a size.
    SizeNotSet,
    /// `bounds()` corners do not describe at least a 1x1 rectangle.
    InvalidBounds(String),
    /// Padding (including border thickness) leaves no usable text cell.
    NoTextArea { area: usize },
    /// Overflow indicator requested but the text area is under 3 cells.
    NoRoomForIndicator { area: usize },
    /// The border is as thick as (or thicker than) the rectangle.
    BorderTooLarge,
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySize => write!(f, "size cannot be less than 1x1"),
            Self::OutOfBounds => write!(f, "widget extends past the addressable screen"),
            Self::PositionNotSet => write!(f, "position is not set"),
            Self::SizeNotSet => write!(f, "size is not set"),
            Self::InvalidBounds(msg) => write!(f, "invalid bounds: {msg}"),
            Self::NoTextArea { area } => write!(
                f,
                "too much padding for this widget size (usable text area would be {area} cells)"
            ),
            Self::NoRoomForIndicator { area } => write!(
                f,
                "not enough space for the overflow indicator ({area} cells); disable it"
            ),
            Self::BorderTooLarge => write!(f, "widget too small to fit the border"),
        }
    }
}

impl std::error::Error for WidgetError {}

// ---------------------------------------------------------------------------
// InputError
// ---------------------------------------------------------------------------

/// Errors surfaced to threads consuming line input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The input source is gone. Permanent for the listener that reported it.
    StreamClosed,
    /// The listener does not support the requested operation.
    Unsupported(&'static str),
    /// `set_contents` was given more characters than the widget accepts.
    TooLong { len: usize, cap: usize },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StreamClosed => write!(f, "input stream closed"),
            Self::Unsupported(op) => write!(f, "operation not supported by this listener: {op}"),
            Self::TooLong { len, cap } => {
                write!(f, "contents too long: {len} characters exceeds limit of {cap}")
            }
        }
    }
}

impl std::error::Error for InputError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Top-level error type for the terminal client.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Widget(WidgetError),
    Input(InputError),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Widget(e) => write!(f, "widget: {e}"),
            Self::Input(e) => write!(f, "input: {e}"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<WidgetError> for AppError {
    fn from(e: WidgetError) -> Self {
        Self::Widget(e)
    }
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
