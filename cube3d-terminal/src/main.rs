/// cube3d - Interactive wireframe cube for the terminal
///
/// Controls:
///   - U/J, I/K, O/L: Rotate about X, Y, Z
///   - W/S, A/D, Q/E: Move up/down, left/right, forward/back
///   - R/F, T/G, Y/H: Scale X, Y, Z
///   - 0: Reset
///   - Esc / Ctrl+C: Quit
use anyhow::{Context, Result};
use clap::Parser;
use cube3d_terminal::{cli::Cli, TerminalApp};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install the tracing subscriber.
///
/// The terminal is in raw mode while the app runs, so logs go to `log_file`
/// when given, to stderr only when `RUST_LOG` is set, and nowhere otherwise.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    if cli.print_config {
        let config = cli.effective_config().context("Invalid configuration")?;
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let settings = cli.settings().context("Invalid configuration")?;
    let mut app = TerminalApp::new(settings).context("Failed to query terminal size")?;
    app.run().context("Terminal session failed")?;

    Ok(())
}
