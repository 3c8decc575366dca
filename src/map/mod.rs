//! The maze: tile grids, the navigation graph built from them, and ASCII board parsing.

pub mod builder;
pub mod direction;
pub mod graph;
pub mod parser;

pub use builder::{TileGrid, TileType};
pub use direction::Direction;
pub use graph::{edge_weight, Edge, MazeGraph, Vertex, VertexId};
pub use parser::BoardParser;
