use log::debug;

use crate::{
    core::{direction::Direction, grid::Grid},
    engine::{
        game_stats::GameStats,
        tile_spawner::{RandomTileSpawner, Spawn, TileSeed, TileSpawner},
    },
};

/// Number of tiles spawned before the first move.
const INITIAL_TILES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Result of [`GameSession::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// Tiles slid and a new tile was spawned.
    Moved { spawn: Option<Spawn> },
    /// The move would not change the grid; the session is untouched.
    Unchanged,
    /// The session is already over; the session is untouched.
    GameOver,
}

/// A single game: the grid, its score, and the win/terminal flags.
///
/// `GameSession` is the only mutable surface of the engine. Every input goes
/// through [`apply_move`](Self::apply_move), which either performs a full turn
/// or leaves the session exactly as it was.
///
/// The tile spawner is a type parameter so that callers can inject their own
/// random source; [`RandomTileSpawner`] is used by default.
///
/// # Example
///
/// ```
/// use twenty48_engine::{Direction, GameSession, MoveOutcome};
///
/// let mut session = GameSession::new();
/// assert_eq!(session.grid().count_empty(), 14);
///
/// for direction in [Direction::Left, Direction::Up, Direction::Right] {
///     match session.apply_move(direction) {
///         MoveOutcome::Moved { .. } => assert_eq!(session.score(), session.grid().sum()),
///         MoveOutcome::Unchanged | MoveOutcome::GameOver => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession<S = RandomTileSpawner> {
    grid: Grid,
    score: u64,
    won: bool,
    game_over: bool,
    stats: GameStats,
    spawner: S,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a new game with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_spawner(RandomTileSpawner::new())
    }

    /// Starts a new game whose tile spawns are fully determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: TileSeed) -> Self {
        Self::with_spawner(RandomTileSpawner::with_seed(seed))
    }

    #[must_use]
    pub fn seed(&self) -> TileSeed {
        self.spawner.seed()
    }
}

impl<S> GameSession<S>
where
    S: TileSpawner,
{
    /// Starts a new game on an empty grid with two spawned tiles.
    pub fn with_spawner(spawner: S) -> Self {
        let mut session = Self::from_grid(Grid::EMPTY, spawner);
        for _ in 0..INITIAL_TILES {
            session.spawn_tile();
        }
        debug!("session started:\n{}", session.grid);
        session
    }

    /// Resumes play from an arbitrary grid without spawning.
    ///
    /// The win and terminal flags are derived from `grid`. The score starts at
    /// zero and is recomputed on the first accepted move.
    pub fn from_grid(grid: Grid, spawner: S) -> Self {
        Self {
            grid,
            score: 0,
            won: grid.has_winning_tile(),
            game_over: grid.is_game_over(),
            stats: GameStats::new(),
            spawner,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Sum of all tiles after the last accepted move.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns `true` while a 2048 tile is on the grid.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        if self.game_over {
            SessionState::GameOver
        } else {
            SessionState::Playing
        }
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Plays one turn in `direction`.
    ///
    /// 1. A finished session ignores the input.
    /// 2. A move that changes nothing is rejected without touching any state.
    /// 3. Otherwise one tile is spawned, the score becomes the sum of all
    ///    cells, and the win and terminal flags are re-evaluated on the new
    ///    grid. Both flags may become true on the same turn.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.game_over {
            debug!("ignoring {direction}: game is over");
            return MoveOutcome::GameOver;
        }

        let (grid, moved) = self.grid.shifted(direction);
        if !moved {
            debug!("rejecting {direction}: grid unchanged");
            return MoveOutcome::Unchanged;
        }

        self.grid = grid;
        let spawn = self.spawn_tile();
        self.score = self.grid.sum();
        self.won = self.grid.has_winning_tile();
        self.game_over = self.grid.is_game_over();
        self.stats.complete_turn(&self.grid);

        debug!(
            "turn {}: {direction}, spawn {spawn:?}, score {}, won {}, game over {}",
            self.stats.turns(),
            self.score,
            self.won,
            self.game_over,
        );
        MoveOutcome::Moved { spawn }
    }

    fn spawn_tile(&mut self) -> Option<Spawn> {
        let (grid, spawn) = self.spawner.spawn(&self.grid);
        self.grid = grid;
        if let Some(spawn) = spawn {
            self.stats.record_spawn(spawn);
        }
        spawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, WINNING_TILE, core::grid::Row, engine::tile_spawner::ScriptedTileSpawner};

    fn grid(rows: [Row; 4]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    fn scripted<I>(rows: [Row; 4], spawns: I) -> GameSession<ScriptedTileSpawner>
    where
        I: IntoIterator<Item = (usize, usize, u32)>,
    {
        GameSession::from_grid(grid(rows), ScriptedTileSpawner::new(spawns))
    }

    fn checkerboard() -> [Row; 4] {
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]
    }

    #[test]
    fn test_new_session_spawns_two_tiles() {
        let session = GameSession::with_seed(TileSeed::from_bytes([1; 16]));
        assert_eq!(session.grid().count_empty(), 14);
        assert!(session.grid().rows().iter().flatten().all(|&v| matches!(v, 0 | 2 | 4)));
        assert_eq!(session.score(), 0);
        assert!(session.session_state().is_playing());
        assert!(!session.is_won());
        assert_eq!(session.stats().spawned_tiles(), 2);
        assert_eq!(session.stats().turns(), 0);
    }

    #[test]
    fn test_scripted_initial_spawns() {
        let session = GameSession::with_spawner(ScriptedTileSpawner::new([(0, 0, 2), (2, 3, 4)]));
        assert_eq!(
            *session.grid(),
            grid([[2, 0, 0, 0], [0; 4], [0, 0, 0, 4], [0; 4]])
        );
        assert_eq!(session.spawner().remaining(), 0);
    }

    #[test]
    fn test_merge_then_spawn() {
        let mut session = scripted([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], [(3, 3, 2)]);

        let outcome = session.apply_move(Direction::Left);

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                spawn: Some(Spawn {
                    position: Position::new(3, 3),
                    value: 2,
                })
            }
        );
        assert_eq!(
            *session.grid(),
            grid([[4, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]])
        );
        assert_eq!(session.score(), 6);
        assert_eq!(session.stats().turns(), 1);
    }

    #[test]
    fn test_score_is_sum_of_cells() {
        let mut session = scripted([[2, 2, 2, 2], [4, 4, 0, 0], [0; 4], [0; 4]], [(3, 0, 4)]);
        session.apply_move(Direction::Left);
        // merge gains would total 16; the score counts every tile on the grid
        assert_eq!(session.score(), 20);
        assert_eq!(session.score(), session.grid().sum());
    }

    #[test]
    fn test_noop_move_is_rejected_without_mutation() {
        let mut session = scripted([[2, 4, 0, 0], [8, 0, 0, 0], [0; 4], [0; 4]], []);
        let before = session.clone();

        assert_eq!(session.apply_move(Direction::Left), MoveOutcome::Unchanged);
        assert_eq!(session, before);
        assert_eq!(session.apply_move(Direction::Up), MoveOutcome::Unchanged);
        assert_eq!(session.apply_move(Direction::Left), MoveOutcome::Unchanged);
        assert_eq!(session, before);
        assert_eq!(session.stats().turns(), 0);
    }

    #[test]
    fn test_game_over_is_sticky() {
        let mut session = scripted(checkerboard(), []);
        assert!(session.is_game_over());
        assert!(session.session_state().is_game_over());

        let before = session.clone();
        for direction in Direction::ALL {
            assert_eq!(session.apply_move(direction), MoveOutcome::GameOver);
        }
        assert_eq!(session, before);
    }

    #[test]
    fn test_move_that_ends_the_game() {
        let mut session = scripted(
            [[0, 2, 4, 2], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
            [(0, 3, 4)],
        );
        assert!(!session.is_game_over());

        assert!(session.apply_move(Direction::Left).is_moved());

        assert_eq!(*session.grid(), grid(checkerboard()));
        assert!(session.is_game_over());
        assert!(!session.is_won());
        assert_eq!(session.score(), 48);
        assert_eq!(session.apply_move(Direction::Right), MoveOutcome::GameOver);
    }

    #[test]
    fn test_win_and_game_over_on_same_turn() {
        let mut session = scripted(
            [
                [1024, 1024, 8, 16],
                [4, 32, 64, 128],
                [8, 256, 512, 4],
                [16, 4, 8, 16],
            ],
            [(0, 3, 2)],
        );

        assert!(session.apply_move(Direction::Left).is_moved());

        assert_eq!(session.grid().rows()[0], [WINNING_TILE, 8, 16, 2]);
        assert!(session.is_won());
        assert!(session.is_game_over());
    }

    #[test]
    fn test_won_follows_grid() {
        let mut session = scripted(
            [[WINNING_TILE, 0, 0, 0], [0; 4], [0, 2, 0, 0], [0; 4]],
            [(3, 3, 2)],
        );
        assert!(session.is_won());
        assert!(!session.is_game_over());

        assert!(session.apply_move(Direction::Down).is_moved());
        assert!(session.is_won());
        assert_eq!(session.grid().rows()[3], [WINNING_TILE, 2, 0, 2]);
    }

    #[test]
    fn test_same_seed_same_game() {
        let seed = TileSeed::from_bytes([0x5a; 16]);
        let mut first = GameSession::with_seed(seed);
        let mut second = GameSession::with_seed(seed);
        assert_eq!(first.seed(), seed);

        for direction in Direction::ALL.into_iter().cycle().take(400) {
            assert_eq!(first.apply_move(direction), second.apply_move(direction));
            assert_eq!(first.grid(), second.grid());
            assert_eq!(first.score(), second.score());
        }
    }

    #[test]
    fn test_invariants_hold_during_play() {
        let mut session = GameSession::with_seed(TileSeed::from_bytes([9; 16]));
        let moves = [Direction::Down, Direction::Left, Direction::Down, Direction::Right];
        let mut previous_score = 0;

        for direction in moves.into_iter().cycle().take(5_000) {
            let tiles_before = 16 - session.grid().count_empty();
            match session.apply_move(direction) {
                MoveOutcome::Moved { spawn } => {
                    assert!(spawn.is_some());
                    assert_eq!(session.score(), session.grid().sum());
                    assert!(session.score() > previous_score);
                    assert!(16 - session.grid().count_empty() <= tiles_before + 1);
                    previous_score = session.score();
                }
                MoveOutcome::Unchanged => {}
                MoveOutcome::GameOver => break,
            }
            assert_eq!(session.is_won(), session.grid().has_winning_tile());
            assert_eq!(session.is_game_over(), session.grid().is_game_over());
            assert!(Grid::from_rows(*session.grid().rows()).is_ok());
        }
    }
}
