//! Ledger Sheets CLI - scripted workbook editing sessions

mod commands;
mod session;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use ledger_sheets::assistant::Assistant;
use ledger_sheets::sample::ledger_workbook;
use ledger_sheets::{CommandAssistant, SessionConfig};
use tracing_subscriber::EnvFilter;

use crate::session::Session;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(
    author,
    version,
    about = "Run workbook editing commands from a script or stdin"
)]
struct Cli {
    /// Session configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from the sample quarterly report instead of an empty workbook
    #[arg(long)]
    demo: bool,

    /// Program answering `ask` commands (prompt on stdin, answer on stdout)
    #[arg(long, value_name = "PROGRAM")]
    assistant_cmd: Option<String>,

    /// Argument passed to the assistant program (repeatable)
    #[arg(long, value_name = "ARG", requires = "assistant_cmd")]
    assistant_arg: Vec<String>,

    /// Log filter (overrides RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Command script (default: stdin)
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => SessionConfig::default(),
    };

    let workbook = if cli.demo {
        ledger_workbook()
    } else {
        config.new_workbook()
    };
    let store = config.build_store(workbook);

    let assistant = cli.assistant_cmd.as_ref().map(|program| {
        Box::new(CommandAssistant::new(program.as_str()).args(cli.assistant_arg.iter().cloned()))
            as Box<dyn Assistant>
    });

    let mut session = Session::new(store, assistant);
    let stdout = io::stdout();
    let stderr = io::stderr();
    let failures = session.run(
        open_script(cli.script.as_deref())?,
        &mut stdout.lock(),
        &mut stderr.lock(),
    )?;

    tracing::debug!(
        "Session finished with {} history entries",
        session.store().history().len()
    );
    if failures > 0 {
        bail!("{} command(s) failed", failures);
    }
    Ok(())
}

fn open_script(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script '{}'", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
