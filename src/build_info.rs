//! Compile-time build metadata for the version and help output.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commit hash captured by `build.rs`.
pub const GIT_COMMIT: &str = env!("PORTCHAT_BUILD_GIT_HASH");

pub const BUILD_TIMESTAMP: &str = env!("PORTCHAT_BUILD_TIMESTAMP");

/// Trailer appended to `portchat --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("PORTCHAT_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("PORTCHAT_BUILD_TIMESTAMP")
);

/// One-line version stamp logged at startup.
pub fn version_line() -> String {
    format!("portchat v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
