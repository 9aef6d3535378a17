//! # bill-acceptor entry point
//!
//! Interactive console for the bill acceptor state machine. Operator text
//! goes to stdout, logs go to stderr.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bill_acceptor::acceptor::{BillAcceptor, ConsoleHandler};
use bill_acceptor::config::AcceptorConfig;
use bill_acceptor::driver::{Driver, SessionEnd};

/// Drive a simulated bill acceptor from the keyboard.
///
/// Keys: i = Init Ok, e = Enable, d = Disable, n = Note is In,
/// a = Accept bill, r = Reject bill, s = Stacked, q = Quit.
#[derive(Parser, Debug)]
#[command(name = "bill-acceptor", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of transitions kept in memory (0 keeps none).
    #[arg(long)]
    history_limit: Option<usize>,

    /// Do not print the key menu before each prompt.
    #[arg(long)]
    no_menu: bool,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<AcceptorConfig> {
        let config = match &self.config {
            Some(path) => AcceptorConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => AcceptorConfig::default(),
        };
        Ok(config.with_overrides(self.history_limit, self.no_menu))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    tracing::debug!(?config, "starting bill acceptor");

    let mut acceptor = BillAcceptor::with_config(ConsoleHandler::stdout(), &config);
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let session = Driver::new(&config)
        .run(stdin.lock(), &mut stdout, &mut acceptor)
        .context("console session failed")?;

    if session.end == SessionEnd::EndOfInput {
        tracing::info!("input closed");
    }
    tracing::info!(
        dispatched = session.dispatched,
        transitions = acceptor.history().total_recorded(),
        final_state = %acceptor.current_state(),
        "session finished"
    );
    Ok(())
}
