//! Maze navigation and pursuit simulation core for the Pac-Mann arcade game.
//!
//! A tile grid is compiled once into a [`map::MazeGraph`]. Actors move continuously along its
//! edges, and whenever one reaches a vertex its behavior picks the next edge, ghosts by way of the
//! non-backtracking search in [`navigation`]. [`game::Game::update_actors`] drives it all.

pub mod collections;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod game;
pub mod logging;
pub mod map;
pub mod navigation;
