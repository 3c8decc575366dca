//! The motion model shared by Pac-Mann and the ghosts.

use glam::DVec2;
use rand::rngs::StdRng;

use super::ghost::{Ghost, GhostState, GhostType};
use super::location::Location;
use super::pacman::{Player, PlayerStrategy};
use super::{GhostSighting, World};
use crate::config::{GameConfig, GhostConfig};
use crate::map::graph::{Edge, MazeGraph, VertexId};

/// The decision policy attached to an actor.
#[derive(Debug, Clone)]
enum Behavior {
    Player(Player),
    Ghost(Ghost),
}

/// A character moving through the maze.
///
/// Speeds are in tiles per millisecond. On an edge of weight `w` an actor moves at `base_speed / w`,
/// so uphill edges take longer to cross.
#[derive(Debug, Clone)]
pub struct Actor {
    location: Location,
    /// The location this actor returns to at the start of a life.
    start: Location,
    behavior: Behavior,
}

impl Actor {
    /// Creates Pac-Mann standing at the head of `start_edge`, free to leave along any edge.
    pub fn player(strategy: PlayerStrategy, start_edge: Edge, config: &GameConfig) -> Self {
        let start = Location::new(start_edge, 1.0);
        Self {
            location: start,
            start,
            behavior: Behavior::Player(Player::new(strategy, config.player_speed, config.ai.clone())),
        }
    }

    /// Creates a ghost waiting at the tail of `home`, the edge it will leave the holding area by.
    pub fn ghost(ghost_type: GhostType, home: Edge, config: &GhostConfig) -> Self {
        let start = Location::start_of(home);
        Self {
            location: start,
            start,
            behavior: Behavior::Ghost(Ghost::new(ghost_type, home, config.clone())),
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn current_edge(&self) -> Edge {
        self.location.edge
    }

    pub fn nearest_vertex(&self) -> VertexId {
        self.location.nearest_vertex()
    }

    pub fn as_ghost(&self) -> Option<&Ghost> {
        match &self.behavior {
            Behavior::Ghost(ghost) => Some(ghost),
            Behavior::Player(_) => None,
        }
    }

    pub fn as_player(&self) -> Option<&Player> {
        match &self.behavior {
            Behavior::Player(player) => Some(player),
            Behavior::Ghost(_) => None,
        }
    }

    /// Returns the ghost's state, or `None` for Pac-Mann.
    pub fn ghost_state(&self) -> Option<GhostState> {
        self.as_ghost().map(Ghost::state)
    }

    /// Describes this actor to others, or `None` for Pac-Mann.
    pub fn sighting(&self) -> Option<GhostSighting> {
        self.as_ghost().map(|ghost| GhostSighting {
            ghost_type: ghost.ghost_type,
            state: ghost.state(),
            location: self.location,
        })
    }

    /// Speed before accounting for the weight of the current edge.
    pub fn base_speed(&self) -> f64 {
        match &self.behavior {
            Behavior::Player(player) => player.speed(),
            Behavior::Ghost(ghost) => ghost.speed(),
        }
    }

    /// Progress per millisecond along the current edge.
    pub fn edge_speed(&self) -> f64 {
        self.base_speed() / self.location.edge.weight
    }

    /// Milliseconds until this actor reaches the end of its edge at its current speed.
    fn time_to_arrival(&self) -> f64 {
        let speed = self.edge_speed();
        if self.location.progress >= 1.0 || speed <= 0.0 {
            f64::INFINITY
        } else {
            (1.0 - self.location.progress) / speed
        }
    }

    /// Milliseconds this actor can be propagated before it reaches a vertex or changes state.
    ///
    /// Infinite for an actor standing still with nothing scheduled.
    pub fn max_propagation_time(&self) -> f64 {
        let arrival = self.time_to_arrival();
        match &self.behavior {
            Behavior::Ghost(ghost) => arrival.min(ghost.timer()),
            Behavior::Player(_) => arrival,
        }
    }

    /// Moves this actor `dt` milliseconds along its edge, stopping at the head.
    ///
    /// A `dt` of at least [`max_propagation_time`](Self::max_propagation_time) lands on the head with
    /// progress exactly 1. Returns the ghost's new state if its timer expired during `dt`. A ghost
    /// whose wait ends steps onto its home edge.
    pub fn propagate(&mut self, dt: f64) -> Option<GhostState> {
        self.location = if dt >= self.time_to_arrival() {
            Location::new(self.location.edge, 1.0)
        } else {
            self.location.progressed(self.edge_speed() * dt)
        };

        let Behavior::Ghost(ghost) = &mut self.behavior else {
            return None;
        };
        let was_waiting = ghost.state() == GhostState::Wait;
        let home = ghost.home();
        let transition = ghost.tick(dt)?;
        if was_waiting {
            self.traverse_edge(home);
        }
        Some(transition)
    }

    /// Starts traversing `edge` from its tail.
    ///
    /// # Panics
    ///
    /// Panics unless the actor stands exactly on a vertex that is `edge`'s tail.
    pub fn traverse_edge(&mut self, edge: Edge) {
        assert!(self.location.at_vertex(), "actor must stand on a vertex to change edges");
        assert_eq!(
            edge.tail,
            self.location.nearest_vertex(),
            "new edge must leave the vertex the actor stands on"
        );
        self.location = Location::start_of(edge);
    }

    /// Turns around in place. Does nothing if the edge has no reverse.
    pub fn turn_around(&mut self, graph: &MazeGraph) {
        if let Some(reversed) = self.location.reversed(graph) {
            self.location = reversed;
        }
    }

    /// Asks the behavior which edge to take from the vertex this actor stands on.
    pub fn next_edge(&mut self, world: &World<'_>, rng: &mut StdRng) -> Option<Edge> {
        let location = self.location;
        match &mut self.behavior {
            Behavior::Player(player) => player.next_edge(&location, world, rng),
            Behavior::Ghost(ghost) => ghost.next_edge(&location, world, rng),
        }
    }

    /// The path this actor intends to follow, for visualization. Consecutive edges are contiguous.
    pub fn guidance_path(&self) -> Vec<Edge> {
        match &self.behavior {
            Behavior::Player(player) => player.guidance_path(&self.location),
            Behavior::Ghost(ghost) => ghost.path().to_vec(),
        }
    }

    /// Sends a ghost into flight, turning it around if it was chasing between vertices.
    ///
    /// Returns whether the ghost's state changed. Pac-Mann and waiting ghosts are unaffected.
    pub fn frighten(&mut self, graph: &MazeGraph) -> bool {
        let Behavior::Ghost(ghost) = &mut self.behavior else {
            return false;
        };
        let was_waiting = ghost.state() == GhostState::Wait;
        if ghost.frighten() && !self.location.at_vertex() {
            self.turn_around(graph);
        }
        !was_waiting
    }

    /// Sends a caught ghost back to the holding area.
    pub fn eaten(&mut self) {
        if let Behavior::Ghost(ghost) = &mut self.behavior {
            ghost.eaten();
            self.location = self.start;
        }
    }

    /// Restores the state this actor had at the start of a life.
    pub fn reset(&mut self) {
        self.location = self.start;
        match &mut self.behavior {
            Behavior::Player(player) => player.reset(),
            Behavior::Ghost(ghost) => ghost.reset(),
        }
    }

    /// The actor's (column, row) position on the board, interpolated along its edge.
    ///
    /// On a tunnel edge the position runs past the boundary in the edge's direction.
    pub fn board_position(&self, graph: &MazeGraph) -> DVec2 {
        let tail = graph.position(self.location.edge.tail).as_dvec2();
        tail + self.location.edge.direction.as_ivec2().as_dvec2() * self.location.progress
    }
}
