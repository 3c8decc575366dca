//! Centralized error types for the maze simulation.
//!
//! Contract violations (stepping onto an edge while not standing on its tail, adding a second edge in
//! an occupied direction) are bugs and panic. Everything a caller can reasonably recover from is
//! represented here.

use glam::IVec2;

/// Main error type for the simulation core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Lookups against an empty queue or an absent key.
///
/// These are recoverable; callers that know the collection is non-empty may treat them as bugs.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Collection is empty")]
    Empty,

    #[error("Key not found")]
    KeyNotFound,
}

/// Errors for a tile grid that cannot be compiled into a maze graph.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Tile grid has no tiles")]
    EmptyGrid,

    #[error("Column {column} has {found} rows, expected {expected}")]
    RaggedGrid { column: usize, expected: usize, found: usize },

    #[error("Elevation grid is {found:?} but tile grid is {expected:?}")]
    ShapeMismatch { expected: (usize, usize), found: (usize, usize) },

    #[error("Starting tile {0} is not a path tile")]
    StartNotPath(IVec2),

    #[error("{unreachable} path tiles are not connected to the starting tile")]
    Disconnected { unreachable: usize },

    #[error("No {0} starting edge exists in this maze")]
    MissingStartingEdge(&'static str),
}

/// Error type for ASCII board parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Board has no rows")]
    EmptyBoard,

    #[error("Row {row} has {found} columns, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Invalid elevation character {character:?} at ({column}, {row})")]
    InvalidElevation { character: char, column: usize, row: usize },
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
