//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::Parser;

use portchat::build_info;
use portchat::logging::Verbosity;

/// Terminal chat client with a multi-listener keyboard input core.
#[derive(Debug, Parser)]
#[command(name = "portchat", version, after_help = build_info::HELP_BUILD_METADATA)]
pub struct Args {
    /// Path to config file (default: ./portchat.toml or ~/.config/portchat/portchat.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Log everything.
    #[arg(long, conflicts_with_all = ["error_only", "silent"])]
    pub debug: bool,

    /// Log errors only.
    #[arg(long = "error-only", conflicts_with = "silent")]
    pub error_only: bool,

    /// Log nothing.
    #[arg(long)]
    pub silent: bool,

    /// Write logs here instead of the configured file.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the default configuration file and exit.
    #[arg(long = "print-config")]
    pub print_config: bool,
}

impl Args {
    /// Verbosity chosen by flags, if any.
    pub fn verbosity(&self) -> Option<Verbosity> {
        if self.debug {
            Some(Verbosity::Extra)
        } else if self.error_only {
            Some(Verbosity::Error)
        } else if self.silent {
            Some(Verbosity::Silent)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags() {
        assert_eq!(Args::parse_from(["portchat"]).verbosity(), None);
        assert_eq!(
            Args::parse_from(["portchat", "--debug"]).verbosity(),
            Some(Verbosity::Extra)
        );
        assert_eq!(
            Args::parse_from(["portchat", "--error-only"]).verbosity(),
            Some(Verbosity::Error)
        );
        assert_eq!(
            Args::parse_from(["portchat", "--silent"]).verbosity(),
            Some(Verbosity::Silent)
        );
    }

    #[test]
    fn verbosity_flags_conflict() {
        assert!(Args::try_parse_from(["portchat", "--debug", "--silent"]).is_err());
    }

    #[test]
    fn config_and_log_paths() {
        let args = Args::parse_from(["portchat", "-c", "chat.toml", "--log-file", "/tmp/x.log"]);
        assert_eq!(args.config, Some(PathBuf::from("chat.toml")));
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(!args.print_config);
    }
}
