//! CLI entry point for portchat.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use portchat::app::ChatScreen;
use portchat::build_info;
use portchat::config::{default_config_template, default_log_path, load_config};
use portchat::context::{AppContext, Message};
use portchat::display::{CrosstermSurface, DisplayHandle, TerminalGuard};
use portchat::error::AppError;
use portchat::input::{CrosstermKeySource, InputBus};
use portchat::logging;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let args = cli::Args::parse();

    if args.print_config {
        print!("{}", default_config_template());
        return ExitCode::SUCCESS;
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "portchat exited with an error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: cli::Args) -> Result<(), AppError> {
    let loaded = load_config(args.config.as_deref())?;
    let config = loaded.config;

    let verbosity = args.verbosity().unwrap_or(config.log.level);
    let log_path = args
        .log_file
        .clone()
        .or_else(|| config.log.file.clone())
        .or_else(default_log_path);
    if let Some(path) = &log_path {
        if let Err(e) = logging::init(verbosity, path) {
            eprintln!("warning: logging disabled ({}): {e}", path.display());
        }
    }
    info!("{}", build_info::version_line());
    debug!(source = %loaded.source, "configuration loaded");

    let ctx = Arc::new(AppContext::new(config.chat.max_messages));
    let system = config.chat.system_name.as_str();
    ctx.add_messages([
        Message::new(system, build_info::version_line()),
        Message::new(system, "Type a message and press Enter. Esc or Ctrl-D quits."),
    ]);

    let _terminal = TerminalGuard::acquire()?;
    let display = DisplayHandle::new(CrosstermSurface::stdout());
    let bus = InputBus::new(Arc::clone(&ctx));
    // Not joined: the reader stays parked in a blocking read until exit.
    let _reader = bus.spawn(CrosstermKeySource)?;

    ChatScreen::new(ctx, bus, display, config).run()
}
