//! This module contains all the constants used in the simulation.
//!
//! Most of these are game-feel tuning values. They are the defaults behind [`crate::config::GameConfig`].

use glam::IVec2;

/// The duration of a single frame driven by the external timer, in milliseconds.
pub const FRAME_DURATION_MS: f64 = 16.0;

/// The tile every maze graph is grown from. Maze generators guarantee it is a path tile.
pub const MAZE_START: IVec2 = IVec2::new(2, 2);

/// Largest elevation difference that still affects edge weight, in either direction.
pub const MAX_ELEVATION_DELTA: f64 = 0.25;
/// How strongly a clamped elevation difference scales edge weight.
pub const ELEVATION_WEIGHT_FACTOR: f64 = 3.0;

/// Two progress values closer than this denote the same point.
pub const COLLISION_TOLERANCE: f64 = 1e-6;

/// Pac-Mann's base speed, in tiles per millisecond.
pub const PLAYER_SPEED: f64 = 1.0 / 200.0;
/// Ghost base speed while chasing, in tiles per millisecond.
pub const GHOST_CHASE_SPEED: f64 = 1.0 / 225.0;
/// Ghost base speed while fleeing, in tiles per millisecond.
pub const GHOST_FLEE_SPEED: f64 = 1.0 / 400.0;

/// How long each ghost waits in the holding area at the start of a life, in milliseconds.
pub const BLINKY_WAIT_MS: f64 = 2000.0;
pub const PINKY_WAIT_MS: f64 = 4000.0;
pub const INKY_WAIT_MS: f64 = 6000.0;
pub const CLYDE_WAIT_MS: f64 = 8000.0;

/// How long an eaten ghost waits before leaving the holding area again, in milliseconds.
pub const GHOST_RESPAWN_DELAY_MS: f64 = 3000.0;
/// How long ghosts flee after a pellet is eaten, in milliseconds.
pub const FLEE_DURATION_MS: f64 = 7000.0;

/// How many tiles ahead of Pac-Mann Pinky aims.
pub const PINKY_LOOKAHEAD: i32 = 3;
/// Clyde chases directly only when farther than this from Pac-Mann.
pub const CLYDE_SHY_RADIUS: f64 = 10.0;

/// Maximum number of BFS steps the AI player looks ahead.
pub const AI_SEARCH_DEPTH: usize = 12;
/// Score for a vertex holding a dot.
pub const AI_ITEM_WEIGHT: f64 = 10.0;
/// Extra multiplier applied to the item score for pellets.
pub const AI_PELLET_MULTIPLIER: f64 = 1.5;
/// Penalty scale for vertices near a chasing ghost.
pub const AI_DANGER_WEIGHT: f64 = 1.2;
/// Bonus scale for vertices near a fleeing ghost.
pub const AI_FLEE_GHOST_WEIGHT: f64 = 2.5;
/// Vertices within this many tiles of a chasing ghost are excluded.
pub const AI_DANGER_RADIUS: i32 = 2;
/// Exclusion radius used once a chasing ghost is already within it of Pac-Mann.
pub const AI_WIDE_DANGER_RADIUS: i32 = 3;
/// Fleeing ghosts farther away than this earn no bonus.
pub const AI_FLEE_GHOST_RADIUS: i32 = 6;

/// A 21x21 demonstration board. `#` is a wall, `.` is a path tile.
///
/// Every tile at `(3a + 2, 3b + 2)` is a path tile and all path tiles are connected (with wraparound),
/// matching what the maze generator guarantees.
pub const DEMO_BOARD: [&str; 21] = [
    "##.##.##.##.##.##.##.",
    "##.##.##.##.##.##.##.",
    "...............##....",
    "##.##.##.#####.##.##.",
    "##.##.##.#####.##.##.",
    "...##................",
    "##.##.##.##.##.##.###",
    "##.##.##.##.##.##.###",
    ".....................",
    "#####.##.##.##.##.##.",
    "#####.##.##.##.##.##.",
    ".........#...........",
    "##.##.##.##.##.#####.",
    "##.##.##.##.##.#####.",
    "......##.............",
    "##.##.##.##.##.##.##.",
    "##.##.##.##.##.##.##.",
    "............##.......",
    "##.##.##.##.##.##.##.",
    "##.##.##.##.##.##.##.",
    "...##................",
];
