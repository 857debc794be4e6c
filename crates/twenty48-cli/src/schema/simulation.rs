use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use twenty48_engine::TileSeed;

/// Aggregate results of a `simulate` run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub num_games: usize,
    pub wins: usize,
    pub mean_score: f64,
    pub best_score: u64,
    pub mean_turns: f64,
    /// Number of games by their largest tile
    pub max_tile_counts: BTreeMap<u32, usize>,
    pub games: Vec<GameResult>,
}

/// Outcome of a single simulated game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: TileSeed,
    pub score: u64,
    pub turns: usize,
    pub max_tile: u32,
    pub won: bool,
    /// `false` when the game was cut off by the turn limit
    pub finished: bool,
}
