use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use twenty48_engine::{Direction, GameStats, Grid, TileSeed};

/// Recorded game with everything needed to replay it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Random seed used for tile spawning
    pub seed: TileSeed,
    /// Accepted moves in the order they were played
    pub moves: Vec<Direction>,
    /// Final game statistics at the time of recording
    pub final_stats: GameStats,
    /// Score after the last accepted move
    pub final_score: u64,
    /// Grid after the last accepted move
    pub final_grid: Grid,
    pub won: bool,
    pub game_over: bool,
}
