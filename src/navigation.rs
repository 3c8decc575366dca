//! Non-backtracking shortest paths over the maze graph.
//!
//! A path is non-backtracking when no edge is immediately followed by its own reverse. The search is
//! Dijkstra's algorithm with that rule applied during relaxation: an edge out of a vertex is skipped
//! when it reverses the edge the vertex was reached by. At the source, the caller's previous edge
//! (the one just used to arrive there) plays that role.
//!
//! "No path" is an ordinary outcome and is reported as `None`.

use tracing::trace;

use crate::collections::{MinPQueue, ProbingMap};
use crate::map::graph::{Edge, MazeGraph, VertexId};

/// The best known non-backtracking path ending at some vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PathEnd {
    /// Total weight of the path.
    distance: f64,
    /// The final edge of the path, or `None` for the source itself.
    last_edge: Option<Edge>,
}

/// The result of one search: a shortest non-backtracking path end for every reachable vertex.
///
/// One tree answers any number of destination queries from the same source.
#[derive(Debug)]
pub struct PathTree {
    source: VertexId,
    ends: ProbingMap<VertexId, PathEnd>,
}

impl PathTree {
    /// Searches from `source`, where `previous` is the edge just used to arrive at `source` (if any).
    ///
    /// Relaxation uses a strict `<`, and edges are considered in `Left, Right, Up, Down` order, so
    /// among equal-cost paths the one whose last vertex is settled first wins.
    ///
    /// # Panics
    ///
    /// Panics if `previous` does not end at `source`.
    pub fn build(graph: &MazeGraph, source: VertexId, previous: Option<Edge>) -> Self {
        if let Some(previous) = previous {
            assert_eq!(previous.head, source, "previous edge must end at the search source");
        }

        let mut ends = ProbingMap::new();
        let mut frontier = MinPQueue::new();
        ends.put(
            source,
            PathEnd {
                distance: 0.0,
                last_edge: None,
            },
        );
        frontier.add_or_update(source, 0.0);

        while let Ok(current) = frontier.remove() {
            let Ok(&PathEnd { distance, last_edge }) = ends.get(&current) else {
                continue;
            };
            let arrived_by = if current == source { previous } else { last_edge };

            for edge in graph.outgoing_edges(current) {
                if arrived_by.is_some_and(|arrived| edge.is_reverse_of(&arrived)) {
                    continue;
                }

                let candidate = distance + edge.weight;
                let improves = match ends.get(&edge.head) {
                    Ok(end) => candidate < end.distance,
                    Err(_) => true,
                };
                if improves {
                    ends.put(
                        edge.head,
                        PathEnd {
                            distance: candidate,
                            last_edge: Some(edge),
                        },
                    );
                    frontier.add_or_update(edge.head, candidate);
                }
            }
        }

        Self { source, ends }
    }

    pub fn source(&self) -> VertexId {
        self.source
    }

    /// Returns the shortest non-backtracking distance to `vertex`, if it is reachable.
    pub fn distance(&self, vertex: VertexId) -> Option<f64> {
        self.ends.get(&vertex).ok().map(|end| end.distance)
    }

    /// Returns every reachable vertex, in unspecified order.
    pub fn reached(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.ends.keys().copied()
    }

    /// Reconstructs the edges from the source to `target`.
    ///
    /// Returns `None` when `target` is unreachable and an empty path when it is the source.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<Edge>> {
        let mut end = self.ends.get(&target).ok()?;
        let mut path = Vec::new();
        while let Some(edge) = end.last_edge {
            path.push(edge);
            end = self.ends.get(&edge.tail).ok()?;
        }
        path.reverse();
        Some(path)
    }
}

/// Returns the lowest-weight non-backtracking path from `source` to `target`.
///
/// The first edge never reverses `previous`. Returns `None` if no such path exists, and an empty path
/// when `source == target`.
pub fn shortest_non_backtracking_path(
    graph: &MazeGraph,
    source: VertexId,
    previous: Option<Edge>,
    target: VertexId,
) -> Option<Vec<Edge>> {
    let path = PathTree::build(graph, source, previous).path_to(target);
    trace!(source, target, length = path.as_ref().map(Vec::len), "Non-backtracking path search");
    path
}
