use std::collections::HashMap;

use glam::IVec2;

use super::direction::Direction;
use crate::constants::{ELEVATION_WEIGHT_FACTOR, MAX_ELEVATION_DELTA};

/// A unique identifier for a vertex, represented by its index in the graph's storage.
pub type VertexId = usize;

/// A directed, weighted edge between two orthogonally adjacent path tiles.
///
/// Edges are small values; two edges are the same edge when they compare equal. The reverse of an edge
/// is found through [`MazeGraph::reverse`] rather than stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// The vertex this edge leaves.
    pub tail: VertexId,
    /// The vertex this edge enters.
    pub head: VertexId,
    /// The direction of this edge on the tail's tile. Tunnel edges point toward the nearest boundary.
    pub direction: Direction,
    /// Traversal cost, always in `[0.25, 1.75]`. Also divides an actor's speed along the edge.
    pub weight: f64,
}

impl Edge {
    /// Returns `true` if `other` runs between the same two vertices in the opposite direction.
    pub fn is_reverse_of(&self, other: &Edge) -> bool {
        self.tail == other.head && self.head == other.tail && self.direction == other.direction.reverse()
    }
}

/// Returns the weight of an edge from a tile at elevation `tail_elevation` to one at `head_elevation`.
///
/// Uphill edges weigh more than 1 and downhill edges less; the elevation change is clamped to
/// ±[`MAX_ELEVATION_DELTA`] so the weight is always in `[0.25, 1.75]`.
pub fn edge_weight(tail_elevation: f64, head_elevation: f64) -> f64 {
    let delta = (head_elevation - tail_elevation).clamp(-MAX_ELEVATION_DELTA, MAX_ELEVATION_DELTA);
    1.0 + ELEVATION_WEIGHT_FACTOR * delta
}

/// The (at most four) outgoing edges of a vertex, one slot per direction.
///
/// Provides O(1) access to the edge in any cardinal direction.
#[derive(Debug, Default, Clone)]
pub struct Intersection {
    pub left: Option<Edge>,
    pub right: Option<Edge>,
    pub up: Option<Edge>,
    pub down: Option<Edge>,
}

impl Intersection {
    /// Returns an iterator over the existing edges, in `Left, Right, Up, Down` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> {
        [self.left, self.right, self.up, self.down].into_iter().flatten()
    }

    /// Retrieves the edge in the specified direction, if it exists.
    pub fn get(&self, direction: Direction) -> Option<Edge> {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Sets the edge in its direction.
    ///
    /// # Panics
    ///
    /// Panics if an edge already occupies that direction. Each direction is populated exactly once
    /// while a graph is built, so a second edge means the builder is broken.
    fn set(&mut self, edge: Edge) {
        let slot = match edge.direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        assert!(slot.is_none(), "vertex {} already has an edge pointing {:?}", edge.tail, edge.direction);
        *slot = Some(edge);
    }
}

/// A path tile of the maze.
#[derive(Debug)]
pub struct Vertex {
    /// The (column, row) of this vertex's tile.
    pub position: IVec2,
    edges: Intersection,
}

impl Vertex {
    /// Returns the edge leaving this vertex in `direction`, if any.
    pub fn edge_in_direction(&self, direction: Direction) -> Option<Edge> {
        self.edges.get(direction)
    }

    /// Returns an iterator over this vertex's outgoing edges.
    pub fn outgoing_edges(&self) -> impl Iterator<Item = Edge> {
        self.edges.edges()
    }
}

/// The directed graph of a toroidal tile maze.
///
/// Vertices live in an arena and their indices serve as their [`VertexId`]. Once built, the graph is
/// never mutated, so it can be shared freely by every actor.
#[derive(Debug)]
pub struct MazeGraph {
    vertices: Vec<Vertex>,
    grid_to_vertex: HashMap<IVec2, VertexId>,
    width: i32,
    height: i32,
}

impl MazeGraph {
    /// Creates a graph with no vertices over a `width` x `height` grid.
    pub(super) fn empty(width: i32, height: i32) -> Self {
        Self {
            vertices: Vec::new(),
            grid_to_vertex: HashMap::new(),
            width,
            height,
        }
    }

    /// Adds a vertex for the tile at `position`, returning its id.
    pub(super) fn add_vertex(&mut self, position: IVec2) -> VertexId {
        let id = self.vertices.len();
        self.vertices.push(Vertex {
            position,
            edges: Intersection::default(),
        });
        self.grid_to_vertex.insert(position, id);
        id
    }

    /// Adds `edge` to its tail's outgoing edges.
    pub(super) fn add_edge(&mut self, edge: Edge) {
        self.vertices[edge.tail].edges.set(edge);
    }

    /// Returns the width of the tile grid.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the height of the tile grid.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns the total number of vertices in the graph.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the vertex with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not produced by this graph.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    /// Returns the grid position of a vertex.
    pub fn position(&self, id: VertexId) -> IVec2 {
        self.vertices[id].position
    }

    /// Returns the vertex on the tile at `position`, if that tile is a reachable path tile.
    pub fn vertex_at(&self, position: IVec2) -> Option<VertexId> {
        self.grid_to_vertex.get(&position).copied()
    }

    /// Returns an iterator over every vertex and its id.
    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices.iter().enumerate()
    }

    /// Returns an iterator over every edge in the graph.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices.iter().flat_map(|vertex| vertex.outgoing_edges())
    }

    /// Returns the outgoing edges of a vertex.
    pub fn outgoing_edges(&self, id: VertexId) -> impl Iterator<Item = Edge> + '_ {
        self.vertices[id].outgoing_edges()
    }

    /// Finds the edge leaving `from` in `direction`.
    pub fn edge_in_direction(&self, from: VertexId, direction: Direction) -> Option<Edge> {
        self.vertices.get(from)?.edge_in_direction(direction)
    }

    /// Returns the edge pointing back from `edge.head` to `edge.tail`.
    ///
    /// Every edge of a fully built graph has one; `None` only means `edge` came from another graph.
    pub fn reverse(&self, edge: Edge) -> Option<Edge> {
        self.edge_in_direction(edge.head, edge.direction.reverse())
            .filter(|reverse| reverse.head == edge.tail)
    }

    /// Wraps a grid coordinate onto the torus.
    pub fn wrap(&self, position: IVec2) -> IVec2 {
        IVec2::new(position.x.rem_euclid(self.width), position.y.rem_euclid(self.height))
    }

    /// Returns a vertex close to the tile `(i, j)`, which need not be a path tile or even in bounds.
    ///
    /// Ghosts use this to turn approximate targets into reachable ones. Maze generators guarantee
    /// every tile at `(3a + 2, 3b + 2)` is a path tile, so the nearest such tile is tried (rounding
    /// each axis down or keeping it exact). If that lands in the ghost holding area, the tile three
    /// rows below is used instead. Boards that break the generator's guarantees fall back to the
    /// vertex with the smallest Manhattan distance.
    pub fn closest_to(&self, i: i32, j: i32) -> VertexId {
        let i = i.min(self.width - 2).max(0);
        let j = j.min(self.height - 2).max(0);

        let ip = ((i - 1) / 3) * 3 + 2;
        let jp = ((j - 1) / 3) * 3 + 2;

        let candidates = [
            IVec2::new(i, j),
            IVec2::new(i, jp),
            IVec2::new(ip, j),
            IVec2::new(ip, jp),
            IVec2::new(ip, jp + 3),
        ];
        if let Some(id) = candidates.into_iter().find_map(|position| self.vertex_at(position)) {
            return id;
        }

        let target = IVec2::new(i, j);
        self.vertices
            .iter()
            .enumerate()
            .min_by_key(|(_, vertex)| {
                let delta = vertex.position - target;
                delta.x.abs() + delta.y.abs()
            })
            .map(|(id, _)| id)
            .unwrap_or_default()
    }

    /// Returns the first edge Pac-Mann traverses at the start of a life.
    ///
    /// The edge ends at a fixed tile in the lower part of the board, arriving from the left (or from
    /// above when there is no path to the left).
    pub fn player_starting_edge(&self) -> Option<Edge> {
        let start = IVec2::new((self.width - 1) / 2, 3 * ((3 * (self.height / 3) - 1) / 4) + 2);
        let vertex = self.vertex_at(start)?;
        let outgoing = self
            .edge_in_direction(vertex, Direction::Left)
            .or_else(|| self.edge_in_direction(vertex, Direction::Up))?;
        self.reverse(outgoing)
    }

    /// Returns the first edge a ghost traverses when it leaves the holding area.
    pub fn ghost_starting_edge(&self) -> Option<Edge> {
        let start = IVec2::new((self.width - 1) / 2, 3 * ((self.height - 3) / 6) - 1);
        self.edge_in_direction(self.vertex_at(start)?, Direction::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_weight_range() {
        assert_eq!(edge_weight(0.0, 0.0), 1.0);
        assert_eq!(edge_weight(0.0, 1.0), 1.75);
        assert_eq!(edge_weight(1.0, 0.0), 0.25);
        assert!((edge_weight(0.5, 0.6) - 1.3).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "already has an edge")]
    fn test_second_edge_in_direction_panics() {
        let mut graph = MazeGraph::empty(3, 1);
        let a = graph.add_vertex(IVec2::new(0, 0));
        let b = graph.add_vertex(IVec2::new(1, 0));
        let edge = Edge {
            tail: a,
            head: b,
            direction: Direction::Right,
            weight: 1.0,
        };
        graph.add_edge(edge);
        graph.add_edge(edge);
    }

    #[test]
    fn test_reverse_requires_matching_head() {
        let mut graph = MazeGraph::empty(3, 1);
        let a = graph.add_vertex(IVec2::new(0, 0));
        let b = graph.add_vertex(IVec2::new(1, 0));
        let forward = Edge {
            tail: a,
            head: b,
            direction: Direction::Right,
            weight: 1.0,
        };
        graph.add_edge(forward);
        assert_eq!(graph.reverse(forward), None);

        let backward = Edge {
            tail: b,
            head: a,
            direction: Direction::Left,
            weight: 1.0,
        };
        graph.add_edge(backward);
        assert_eq!(graph.reverse(forward), Some(backward));
        assert!(backward.is_reverse_of(&forward));
    }
}
