use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::{self, LogTarget};

use self::{play::PlayArg, replay::ReplayArg, simulate::SimulateArg};

mod play;
mod replay;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
    /// Log level specification, overridden by `RUST_LOG`
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Directory for log files written during interactive play
    #[arg(long, global = true, default_value = "./data/logs/")]
    log_dir: PathBuf,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Play games with a random player and summarize the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Re-run a recorded game and verify its final state
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play(PlayArg::default()));

    // The terminal belongs to the UI while playing.
    let target = match mode {
        Mode::Play(_) => LogTarget::Directory(&args.log_dir),
        Mode::Simulate(_) | Mode::Replay(_) => LogTarget::Stderr,
    };
    let _logger = logging::init(&args.log_level, target)?;

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}
