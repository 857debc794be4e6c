use std::{
    fs::{self, File},
    io::{BufWriter, Write as _},
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::Utc;
use log::info;
use rand::Rng as _;
use twenty48_engine::{Direction, GameSession, MoveOutcome, TileSeed};

use crate::schema::record::RecordedSession;

/// A wrapper around [`GameSession`] that records every accepted move.
///
/// Together with the session's seed, the move list is enough to reproduce the
/// game exactly. Use [`into_history`](Self::into_history) to extract it once
/// the game ends.
#[derive(Debug)]
pub struct RecordingSession {
    session: GameSession,
    moves: Vec<Direction>,
}

/// Read-only access to the underlying `GameSession`.
///
/// `DerefMut` is not implemented: moves must go through
/// [`RecordingSession::apply_move`] to be recorded.
impl Deref for RecordingSession {
    type Target = GameSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl RecordingSession {
    /// Creates a new recording session, drawing a random seed if none is given.
    pub fn new(seed: Option<TileSeed>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        info!("starting session with seed {seed}");
        Self {
            session: GameSession::with_seed(seed),
            moves: Vec::new(),
        }
    }

    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.session.apply_move(direction);
        if outcome.is_moved() {
            self.moves.push(direction);
            if self.session.is_game_over() {
                info!(
                    "game over after {} turns with score {}",
                    self.moves.len(),
                    self.session.score()
                );
            }
        }
        outcome
    }

    /// Consumes the session and returns the recorded history.
    pub fn into_history(self) -> SessionHistory {
        let session = &self.session;
        SessionHistory {
            record: RecordedSession {
                recorded_at: Utc::now(),
                seed: session.seed(),
                final_stats: session.stats().clone(),
                final_score: session.score(),
                final_grid: *session.grid(),
                won: session.is_won(),
                game_over: session.is_game_over(),
                moves: self.moves,
            },
        }
    }
}

/// Recorded history of a finished (or abandoned) game.
#[derive(Debug)]
pub struct SessionHistory {
    record: RecordedSession,
}

impl SessionHistory {
    #[cfg(test)]
    fn record(&self) -> &RecordedSession {
        &self.record
    }

    /// Saves the recording as pretty JSON and returns the file path.
    ///
    /// The filename is generated from the recording timestamp:
    /// `game_{YYYYMMDD_HHMMSS}.json`. The directory is created if needed.
    pub fn save(&self, record_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let filename = format!(
            "game_{}.json",
            self.record.recorded_at.format("%Y%m%d_%H%M%S")
        );
        let filepath = record_dir.join(filename);

        let file = File::create(&filepath)
            .with_context(|| format!("Failed to create file: {}", filepath.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.record)
            .with_context(|| format!("Failed to write JSON to {}", filepath.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", filepath.display()))?;

        info!(
            "saved {} moves to {}",
            self.record.moves.len(),
            filepath.display()
        );
        Ok(filepath)
    }
}
