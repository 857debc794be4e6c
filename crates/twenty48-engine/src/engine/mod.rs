//! Game session logic and tile generation.
//!
//! This module drives the pure grid rules in [`crate::core`] through a game:
//!
//! - [`GameSession`] - Current grid, score and win/terminal flags
//! - [`GameStats`] - Turn count and other bookkeeping
//! - [`TileSpawner`] - Source of new tiles, injectable for tests
//! - [`RandomTileSpawner`] / [`TileSeed`] - Seeded default spawner
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; two tiles are spawned on an empty grid
//! 2. Feed it a [`Direction`](crate::Direction) per player input
//! 3. A move that changes the grid spawns one tile and updates the score
//! 4. A move that changes nothing is rejected
//! 5. Repeat until no move can change the grid
//!
//! # Example
//!
//! ```
//! use twenty48_engine::{Direction, GameSession};
//!
//! let mut session = GameSession::new();
//!
//! while !session.is_game_over() {
//!     let moved = Direction::ALL
//!         .into_iter()
//!         .any(|direction| session.apply_move(direction).is_moved());
//!     assert!(moved || session.is_game_over());
//! }
//!
//! println!("Final score: {}", session.score());
//! ```

pub use self::{game_session::*, game_stats::*, tile_spawner::*};

mod game_session;
mod game_stats;
mod tile_spawner;
