use serde::{Deserialize, Serialize};

use crate::{core::grid::Grid, engine::tile_spawner::Spawn};

/// Per-session counters that are not part of the game rules.
///
/// - **Turns**: accepted moves (rejected no-op attempts are not counted)
/// - **Max tile**: largest tile present after any turn
/// - **Spawned fours**: how many of the spawned tiles were 4s
///
/// # Example
///
/// ```
/// use twenty48_engine::GameStats;
///
/// let stats = GameStats::new();
/// assert_eq!(stats.turns(), 0);
/// assert_eq!(stats.max_tile(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    turns: usize,
    max_tile: u32,
    spawned_tiles: usize,
    spawned_fours: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            turns: 0,
            max_tile: 0,
            spawned_tiles: 0,
            spawned_fours: 0,
        }
    }

    /// Number of accepted moves.
    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    #[must_use]
    pub const fn max_tile(&self) -> u32 {
        self.max_tile
    }

    /// Tiles spawned so far, including the two initial ones.
    #[must_use]
    pub const fn spawned_tiles(&self) -> usize {
        self.spawned_tiles
    }

    #[must_use]
    pub const fn spawned_fours(&self) -> usize {
        self.spawned_fours
    }

    pub(crate) fn record_spawn(&mut self, spawn: Spawn) {
        self.spawned_tiles += 1;
        if spawn.value == 4 {
            self.spawned_fours += 1;
        }
        self.max_tile = self.max_tile.max(spawn.value);
    }

    /// Updates statistics after an accepted move on the post-spawn grid.
    pub(crate) fn complete_turn(&mut self, grid: &Grid) {
        self.turns += 1;
        self.max_tile = self.max_tile.max(grid.max_tile());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_record_spawn() {
        let mut stats = GameStats::new();
        stats.record_spawn(Spawn {
            position: Position::new(0, 0),
            value: 2,
        });
        stats.record_spawn(Spawn {
            position: Position::new(1, 1),
            value: 4,
        });
        assert_eq!(stats.spawned_tiles(), 2);
        assert_eq!(stats.spawned_fours(), 1);
        assert_eq!(stats.max_tile(), 4);
        assert_eq!(stats.turns(), 0);
    }

    #[test]
    fn test_complete_turn_tracks_max_tile() {
        let mut stats = GameStats::new();
        let grid = Grid::from_rows([[64, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]]).unwrap();
        stats.complete_turn(&grid);
        stats.complete_turn(&Grid::EMPTY);
        assert_eq!(stats.turns(), 2);
        assert_eq!(stats.max_tile(), 64);
    }
}
