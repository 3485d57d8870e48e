//! fly-resource CLI entry point.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use fly_resource::cli::{Cli, CommandDispatcher};
use fly_resource::config::load_config;
use fly_resource::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so stdout carries only fly's output.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("fly_resource=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fly_resource=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let dir = std::env::current_dir()?;
    let mut config = load_config(cli.config.as_deref(), &dir)?;
    config.apply_overrides(&cli.overrides());
    config.validate()?;

    let dispatcher = CommandDispatcher::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatcher.dispatch(&cli.command, &mut out)?;
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("fly-resource starting with command: {:?}", cli.command);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(partial) = e.partial_output() {
                let mut stdout = io::stdout();
                let _ = stdout.write_all(partial);
                let _ = stdout.flush();
            }
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
