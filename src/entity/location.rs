use crate::constants::COLLISION_TOLERANCE;
use crate::map::graph::{Edge, MazeGraph, VertexId};

/// Where an actor is: an edge and how far along it, from 0 (at the tail) to 1 (at the head).
///
/// Locations are values. Motion produces a new location rather than mutating one in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub edge: Edge,
    pub progress: f64,
}

impl Location {
    /// Creates a location, clamping `progress` into `[0, 1]`.
    pub fn new(edge: Edge, progress: f64) -> Self {
        Self {
            edge,
            progress: progress.clamp(0.0, 1.0),
        }
    }

    /// Returns a location at the tail of `edge`.
    pub fn start_of(edge: Edge) -> Self {
        Self { edge, progress: 0.0 }
    }

    /// Returns the tail while less than halfway along the edge, the head otherwise.
    pub fn nearest_vertex(&self) -> VertexId {
        if self.progress < 0.5 {
            self.edge.tail
        } else {
            self.edge.head
        }
    }

    /// Returns this location moved `delta` further along the edge, clamped to the edge's ends.
    pub fn progressed(&self, delta: f64) -> Self {
        Self::new(self.edge, self.progress + delta)
    }

    /// Returns whether this location is exactly on a vertex.
    pub fn at_vertex(&self) -> bool {
        self.progress == 0.0 || self.progress == 1.0
    }

    /// Returns whether two locations denote the same point of the maze.
    ///
    /// That is the case on the same edge at (nearly) equal progress, on opposite edges of one
    /// corridor at complementary progress, or when both sit exactly on the same vertex.
    pub fn collides_with(&self, other: &Location) -> bool {
        if self.edge == other.edge {
            (self.progress - other.progress).abs() < COLLISION_TOLERANCE
        } else if self.edge.is_reverse_of(&other.edge) {
            (self.progress - (1.0 - other.progress)).abs() < COLLISION_TOLERANCE
        } else {
            self.at_vertex() && other.at_vertex() && self.nearest_vertex() == other.nearest_vertex()
        }
    }

    /// Returns the same point of the maze, facing the other way.
    ///
    /// `None` only if the edge has no reverse in `graph`, which cannot happen for a built maze.
    pub fn reversed(&self, graph: &MazeGraph) -> Option<Self> {
        graph.reverse(self.edge).map(|edge| Self::new(edge, 1.0 - self.progress))
    }
}
