//! Maze graph construction from a tile grid.

use std::collections::VecDeque;

use glam::IVec2;
use tracing::debug;

use super::direction::Direction;
use super::graph::{edge_weight, Edge, MazeGraph};
use crate::constants::MAZE_START;
use crate::error::{GameResult, MapError};

/// The kind of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileType {
    Wall,
    Path,
}

/// A rectangular grid of tiles and their elevations, addressed `[column][row]`.
///
/// This is what a maze generator produces and what [`MazeGraph::new`] consumes.
#[derive(Debug, Clone)]
pub struct TileGrid {
    types: Vec<Vec<TileType>>,
    elevations: Vec<Vec<f64>>,
}

impl TileGrid {
    /// Pairs a tile-type grid with an elevation grid of the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyGrid`] for a grid with no tiles, [`MapError::RaggedGrid`] when the
    /// columns differ in length, and [`MapError::ShapeMismatch`] when the elevations do not line up.
    pub fn new(types: Vec<Vec<TileType>>, elevations: Vec<Vec<f64>>) -> GameResult<Self> {
        let expected = shape(&types)?;
        let found = (elevations.len(), elevations.first().map_or(0, Vec::len));
        if found != expected || elevations.iter().any(|column| column.len() != expected.1) {
            return Err(MapError::ShapeMismatch { expected, found }.into());
        }
        Ok(Self { types, elevations })
    }

    /// Creates a grid where every tile sits at elevation zero, so every edge has weight 1.
    pub fn flat(types: Vec<Vec<TileType>>) -> GameResult<Self> {
        let elevations = types.iter().map(|column| vec![0.0; column.len()]).collect();
        Self::new(types, elevations)
    }

    pub fn width(&self) -> i32 {
        self.types.len() as i32
    }

    pub fn height(&self) -> i32 {
        self.types[0].len() as i32
    }

    /// Returns the tile at an in-bounds `position`.
    pub fn tile(&self, position: IVec2) -> TileType {
        self.types[position.x as usize][position.y as usize]
    }

    /// Returns the elevation at an in-bounds `position`.
    pub fn elevation(&self, position: IVec2) -> f64 {
        self.elevations[position.x as usize][position.y as usize]
    }

    pub fn is_path(&self, position: IVec2) -> bool {
        self.tile(position) == TileType::Path
    }

    /// Counts the path tiles in the grid.
    pub fn path_count(&self) -> usize {
        self.types.iter().flatten().filter(|&&tile| tile == TileType::Path).count()
    }
}

fn shape(types: &[Vec<TileType>]) -> Result<(usize, usize), MapError> {
    let height = types.first().map_or(0, Vec::len);
    if height == 0 {
        return Err(MapError::EmptyGrid);
    }
    for (column, tiles) in types.iter().enumerate() {
        if tiles.len() != height {
            return Err(MapError::RaggedGrid {
                column,
                expected: height,
                found: tiles.len(),
            });
        }
    }
    Ok((types.len(), height))
}

impl MazeGraph {
    /// Builds the maze graph, growing it from the standard starting tile.
    pub fn new(grid: &TileGrid) -> GameResult<Self> {
        Self::from_start(grid, MAZE_START)
    }

    /// Builds the maze graph by breadth-first traversal from `start`.
    ///
    /// Neighbors are found with wraparound, so a path tile on one boundary connects to a path tile
    /// on the opposite boundary.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::StartNotPath`] if `start` is out of bounds or a wall, and
    /// [`MapError::Disconnected`] if some path tiles cannot be reached from it.
    pub fn from_start(grid: &TileGrid, start: IVec2) -> GameResult<Self> {
        let (width, height) = (grid.width(), grid.height());
        let in_bounds = (0..width).contains(&start.x) && (0..height).contains(&start.y);
        if !in_bounds || !grid.is_path(start) {
            return Err(MapError::StartNotPath(start).into());
        }

        let mut graph = MazeGraph::empty(width, height);
        let mut queue = VecDeque::new();
        queue.push_back(graph.add_vertex(start));

        while let Some(current) = queue.pop_front() {
            let position = graph.position(current);
            for direction in Direction::DIRECTIONS {
                // On a board one tile thick the wrapped neighbor is the tile itself.
                let neighbor = graph.wrap(position + direction.as_ivec2());
                if neighbor == position || !grid.is_path(neighbor) {
                    continue;
                }

                let head = match graph.vertex_at(neighbor) {
                    Some(id) => id,
                    None => {
                        let id = graph.add_vertex(neighbor);
                        queue.push_back(id);
                        id
                    }
                };
                graph.add_edge(Edge {
                    tail: current,
                    head,
                    direction,
                    weight: edge_weight(grid.elevation(position), grid.elevation(neighbor)),
                });
            }
        }

        let unreachable = grid.path_count() - graph.vertex_count();
        if unreachable > 0 {
            return Err(MapError::Disconnected { unreachable }.into());
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edges().count(),
            width,
            height,
            "Maze graph built"
        );
        Ok(graph)
    }
}
