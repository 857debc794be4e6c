use std::path::PathBuf;

use anyhow::{bail, ensure};
use log::info;
use twenty48_engine::{GameSession, MoveOutcome};

use crate::{schema::record::RecordedSession, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    recording_file: PathBuf,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg { recording_file } = arg;

    info!("loading recording from {}", recording_file.display());
    let record: RecordedSession = util::read_json_file("recording", recording_file)?;
    info!(
        "recorded at {} with {} moves",
        record.recorded_at,
        record.moves.len()
    );

    let session = replay(&record)?;

    println!("{}", session.grid());
    println!("Score: {}", session.score());
    println!("Turns: {}", session.stats().turns());
    match (session.is_won(), session.is_game_over()) {
        (true, true) => println!("You won! (no moves left)"),
        (true, false) => println!("You won!"),
        (false, true) => println!("Game over"),
        (false, false) => println!("Game in progress"),
    }
    Ok(())
}

/// Re-applies the recorded moves and checks the result against the recording.
fn replay(record: &RecordedSession) -> anyhow::Result<GameSession> {
    let mut session = GameSession::with_seed(record.seed);
    for (turn, &direction) in record.moves.iter().enumerate() {
        match session.apply_move(direction) {
            MoveOutcome::Moved { .. } => {}
            MoveOutcome::Unchanged => bail!("recorded move {turn} ({direction}) changes nothing"),
            MoveOutcome::GameOver => bail!("recorded move {turn} ({direction}) after game over"),
        }
    }

    ensure!(
        *session.grid() == record.final_grid,
        "replayed grid differs from the recording:\n{}",
        session.grid()
    );
    ensure!(
        session.score() == record.final_score,
        "replayed score {} differs from recorded score {}",
        session.score(),
        record.final_score
    );
    Ok(session)
}
