use std::io::BufReader;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fmsh::config::{DEFAULT_LOG_FILTER, DEFAULT_USERNAME, cwd_message, farewell_message, welcome_message};
use fmsh::core::{Console, Dispatcher, Session, StdoutConsole, spawn_line_reader};
use fmsh::models::OutputLine;
use fmsh::utils::sysinfo;

/// Interactive file manager shell.
#[derive(Parser, Debug)]
#[command(name = "fmsh", version, about)]
struct Cli {
    /// Name shown in the welcome and farewell banners
    #[arg(long, default_value = DEFAULT_USERNAME)]
    username: String,

    /// Log filter (overrides RUST_LOG), e.g. `debug` or `fmsh=trace`
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: Option<&str>) {
    let filter = level
        .map(EnvFilter::new)
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let home = sysinfo::home_dir().context("could not determine the home directory")?;
    let session = Session::new(&home, cli.username.as_str())
        .with_context(|| format!("cannot start in {}", home.display()))?;

    let mut console = StdoutConsole;
    console.emit(&OutputLine::text(welcome_message(session.username())));
    console.emit(&OutputLine::text(cwd_message(session.cwd())));
    info!(username = session.username(), cwd = %session.cwd().display(), "session started");

    let username = session.username().to_string();
    let mut dispatcher = Dispatcher::new(session);
    let mut lines = spawn_line_reader(BufReader::new(std::io::stdin()));

    let interrupted = tokio::select! {
        exited = dispatcher.run(&mut lines, &mut console) => {
            info!(exited, "session finished");
            false
        }
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::warn!(error = %e, "failed to listen for interrupt");
            }
            info!("interrupted");
            true
        }
    };
    if interrupted {
        // Keep the farewell off the line holding the echoed ^C.
        console.emit(&OutputLine::empty());
    }

    console.emit(&OutputLine::text(farewell_message(&username)));
    Ok(())
}
