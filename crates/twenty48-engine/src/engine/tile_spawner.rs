use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    ParseTileSeedError,
    core::grid::{CELL_COUNT, Grid, Position},
};

/// Probability that a spawned tile is a 4 instead of a 2.
pub const FOUR_TILE_PROBABILITY: f64 = 0.1;

/// A tile written into the grid by a spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub position: Position,
    pub value: u32,
}

/// Writes a 2 (90%) or a 4 (10%) into an empty cell chosen uniformly at random.
///
/// A full grid is returned unchanged together with `None`.
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use twenty48_engine::{Grid, spawn_random_tile};
///
/// let mut rng = Pcg32::seed_from_u64(1);
/// let (grid, spawn) = spawn_random_tile(&Grid::EMPTY, &mut rng);
///
/// let spawn = spawn.unwrap();
/// assert_eq!(grid.get(spawn.position), spawn.value);
/// assert_eq!(grid.count_empty(), 15);
/// ```
pub fn spawn_random_tile<R>(grid: &Grid, rng: &mut R) -> (Grid, Option<Spawn>)
where
    R: Rng + ?Sized,
{
    let empties: ArrayVec<Position, CELL_COUNT> = grid.empty_positions().collect();
    let Some(&position) = empties.choose(rng) else {
        return (*grid, None);
    };
    let value = if rng.random_bool(FOUR_TILE_PROBABILITY) {
        4
    } else {
        2
    };
    let spawn = Spawn { position, value };
    (grid.with_tile_unchecked(position, value), Some(spawn))
}

/// Source of newly spawned tiles for a [`GameSession`](super::GameSession).
///
/// The session calls [`spawn`](Self::spawn) twice when it starts and once per
/// accepted move. Implementations must only write into empty cells and must
/// leave a full grid unchanged.
pub trait TileSpawner {
    fn spawn(&mut self, grid: &Grid) -> (Grid, Option<Spawn>);
}

/// Seed for deterministic tile spawning.
///
/// A 128-bit seed for the spawner's random number generator. The same seed
/// combined with the same sequence of accepted moves reproduces a game
/// exactly.
///
/// Seeds serialize (and display) as 32 lowercase hex characters.
///
/// ```
/// use rand::Rng as _;
/// use twenty48_engine::{GameSession, TileSeed};
///
/// let seed: TileSeed = rand::rng().random();
/// let first = GameSession::with_seed(seed);
/// let second = GameSession::with_seed(seed);
/// assert_eq!(first.grid(), second.grid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSeed([u8; 16]);

impl TileSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for TileSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for TileSeed {
    type Err = ParseTileSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseTileSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for TileSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows drawing a random seed with `rng.random()`.
impl Distribution<TileSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TileSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TileSeed(seed)
    }
}

/// The default [`TileSpawner`], backed by a seeded PCG generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomTileSpawner {
    seed: TileSeed,
    rng: Pcg32,
}

impl Default for RandomTileSpawner {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomTileSpawner {
    /// Creates a spawner with a seed drawn from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: TileSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// The seed this spawner was created from.
    #[must_use]
    pub const fn seed(&self) -> TileSeed {
        self.seed
    }
}

impl TileSpawner for RandomTileSpawner {
    fn spawn(&mut self, grid: &Grid) -> (Grid, Option<Spawn>) {
        spawn_random_tile(grid, &mut self.rng)
    }
}

/// Spawner that replays a fixed list of tiles, for tests.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ScriptedTileSpawner {
    queue: std::collections::VecDeque<Spawn>,
}

#[cfg(test)]
impl ScriptedTileSpawner {
    pub(crate) fn new<I>(spawns: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, u32)>,
    {
        let queue = spawns
            .into_iter()
            .map(|(row, col, value)| Spawn {
                position: Position::new(row, col),
                value,
            })
            .collect();
        Self { queue }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
impl TileSpawner for ScriptedTileSpawner {
    fn spawn(&mut self, grid: &Grid) -> (Grid, Option<Spawn>) {
        if grid.count_empty() == 0 {
            return (*grid, None);
        }
        let spawn = self.queue.pop_front().expect("scripted spawns exhausted");
        assert_eq!(grid.get(spawn.position), 0, "scripted spawn on occupied cell");
        (grid.with_tile(spawn.position, spawn.value).unwrap(), Some(spawn))
    }
}
