//! Console chess
//!
//! Hotseat, human vs engine, or engine vs engine games in the terminal.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chess_cli::{Mode, Session, SessionConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chess", version, about = "Console chess with a minimax engine")]
struct Args {
    /// Session file (TOML); flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Who plays which side
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Engine search depth below the root move
    #[arg(short, long)]
    depth: Option<u8>,

    /// Score root moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Stop after this many plies
    #[arg(long)]
    max_plies: Option<u32>,

    /// Start from this FEN instead of the standard setup
    #[arg(long)]
    fen: Option<String>,

    /// Write a JSON game record here when the session ends
    #[arg(long)]
    record: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `minimax_engine=trace` (falls back to RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

impl Args {
    fn apply(self, config: &mut SessionConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(depth) = self.depth {
            config.engine.depth = depth;
        }
        if self.parallel {
            config.engine.parallel_root = true;
        }
        if let Some(max_plies) = self.max_plies {
            config.max_plies = max_plies;
        }
        if self.fen.is_some() {
            config.fen = self.fen;
        }
        if self.record.is_some() {
            config.record = self.record;
        }
        if self.log.is_some() {
            config.log_filter = self.log;
        }
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    args.apply(&mut config);
    init_tracing(config.log_filter.as_deref());

    let record_path = config.record.clone();
    let stdin = io::stdin();
    let mut session = Session::new(config, stdin.lock(), io::stdout())?;
    let record = session.run()?;

    println!("Result: {}", record.result_text());
    if let Some(path) = record_path {
        record.save(&path)?;
        println!("Game record written to {}", path.display());
    }
    Ok(())
}
