//! Runtime configuration for a simulation.
//!
//! Every field defaults to the matching value in [`crate::constants`], so a configuration file only
//! needs to mention what it overrides.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::entity::ghost::GhostType;
use crate::error::GameResult;

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Pac-Mann's base speed, in tiles per millisecond.
    pub player_speed: f64,
    pub ghosts: GhostConfig,
    pub ai: AiConfig,
}

/// Ghost speeds and timers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostConfig {
    pub chase_speed: f64,
    pub flee_speed: f64,
    /// Wait delays indexed in [`GhostType`] order (Blinky, Pinky, Inky, Clyde).
    pub wait_ms: [f64; 4],
    pub respawn_delay_ms: f64,
    pub flee_duration_ms: f64,
    pub pinky_lookahead: i32,
    pub clyde_shy_radius: f64,
}

/// Scoring weights for the automatic player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub search_depth: usize,
    pub item_weight: f64,
    pub pellet_multiplier: f64,
    pub danger_weight: f64,
    pub flee_ghost_weight: f64,
    pub danger_radius: i32,
    pub wide_danger_radius: i32,
    pub flee_ghost_radius: i32,
}

impl GameConfig {
    /// Parses a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GhostConfig {
    /// Returns the initial wait delay for the given ghost.
    pub fn wait_for(&self, ghost_type: GhostType) -> f64 {
        self.wait_ms[ghost_type as usize]
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            ghosts: GhostConfig::default(),
            ai: AiConfig::default(),
        }
    }
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            chase_speed: GHOST_CHASE_SPEED,
            flee_speed: GHOST_FLEE_SPEED,
            wait_ms: [BLINKY_WAIT_MS, PINKY_WAIT_MS, INKY_WAIT_MS, CLYDE_WAIT_MS],
            respawn_delay_ms: GHOST_RESPAWN_DELAY_MS,
            flee_duration_ms: FLEE_DURATION_MS,
            pinky_lookahead: PINKY_LOOKAHEAD,
            clyde_shy_radius: CLYDE_SHY_RADIUS,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            search_depth: AI_SEARCH_DEPTH,
            item_weight: AI_ITEM_WEIGHT,
            pellet_multiplier: AI_PELLET_MULTIPLIER,
            danger_weight: AI_DANGER_WEIGHT,
            flee_ghost_weight: AI_FLEE_GHOST_WEIGHT,
            danger_radius: AI_DANGER_RADIUS,
            wide_danger_radius: AI_WIDE_DANGER_RADIUS,
            flee_ghost_radius: AI_FLEE_GHOST_RADIUS,
        }
    }
}
