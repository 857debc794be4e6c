pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A grid was built from a value that is not a valid tile.
///
/// Valid tiles are `0` (empty) or a power of two no smaller than 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid tile value {value} at row {row}, column {col}")]
pub struct InvalidTileError {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

/// A tile seed string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid tile seed {input:?}: expected 32 hex characters")]
pub struct ParseTileSeedError {
    pub input: String,
}
