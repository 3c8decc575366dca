//! Ghost identities, their state machine, and how each one picks a target.
//!
//! A ghost starts every life waiting in the holding area. After its identity's delay it leaves along
//! the ghost starting edge and chases. Eating a pellet makes every chasing ghost flee for a while. A
//! fleeing ghost that Pac-Mann catches goes back to waiting.

use glam::IVec2;
use rand::rngs::StdRng;
use rand::Rng;
use strum_macros::{AsRefStr, EnumIter};
use tracing::{trace, warn};

use super::location::Location;
use super::World;
use crate::config::GhostConfig;
use crate::map::graph::{Edge, MazeGraph, VertexId};
use crate::navigation::shortest_non_backtracking_path;

/// The four ghost identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum GhostType {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

/// Which target rule a ghost currently follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostState {
    Wait,
    Chase,
    Flee,
}

impl GhostType {
    /// Returns the board corner this ghost runs to while fleeing.
    pub fn flee_corner(self, width: i32, height: i32) -> IVec2 {
        match self {
            GhostType::Blinky => IVec2::new(2, 2),
            GhostType::Pinky => IVec2::new(width - 3, 2),
            GhostType::Inky => IVec2::new(2, height - 3),
            GhostType::Clyde => IVec2::new(width - 3, height - 3),
        }
    }

    /// Picks the vertex a ghost of this identity heads for.
    ///
    /// `own` is the ghost's own location. Only Clyde consumes randomness.
    pub fn target(
        self,
        state: GhostState,
        own: &Location,
        home: Edge,
        world: &World<'_>,
        config: &GhostConfig,
        rng: &mut StdRng,
    ) -> VertexId {
        let graph = world.graph;
        match state {
            GhostState::Wait => home.tail,
            GhostState::Flee => {
                let corner = self.flee_corner(graph.width(), graph.height());
                graph.closest_to(corner.x, corner.y)
            }
            GhostState::Chase => self.chase_target(own, world, config, rng),
        }
    }

    fn chase_target(self, own: &Location, world: &World<'_>, config: &GhostConfig, rng: &mut StdRng) -> VertexId {
        let graph = world.graph;
        let player = world.player.nearest_vertex();
        let player_position = graph.position(player);

        match self {
            GhostType::Blinky => player,
            GhostType::Pinky => {
                let ahead = player_position + world.player.edge.direction.as_ivec2() * config.pinky_lookahead;
                graph.closest_to(ahead.x, ahead.y)
            }
            GhostType::Inky => {
                let reference = world
                    .ghost(GhostType::Blinky)
                    .map_or(own.nearest_vertex(), |blinky| blinky.location.nearest_vertex());
                let reflected = player_position * 2 - graph.position(reference);
                graph.closest_to(reflected.x, reflected.y)
            }
            GhostType::Clyde => {
                let distance = (player_position - graph.position(own.nearest_vertex())).as_dvec2().length();
                if distance >= config.clyde_shy_radius {
                    player
                } else {
                    let x = rng.random_range(0..graph.width());
                    let y = rng.random_range(0..graph.height());
                    graph.closest_to(x, y)
                }
            }
        }
    }
}

/// The decision state of one ghost.
#[derive(Debug, Clone)]
pub struct Ghost {
    pub ghost_type: GhostType,
    state: GhostState,
    /// Milliseconds until the next automatic transition, infinite while chasing.
    timer: f64,
    /// The edge the ghost leaves the holding area by.
    home: Edge,
    config: GhostConfig,
    path: Vec<Edge>,
}

impl Ghost {
    pub fn new(ghost_type: GhostType, home: Edge, config: GhostConfig) -> Self {
        Self {
            ghost_type,
            state: GhostState::Wait,
            timer: config.wait_for(ghost_type),
            home,
            config,
            path: Vec::new(),
        }
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    /// Milliseconds until this ghost changes state on its own.
    pub fn timer(&self) -> f64 {
        self.timer
    }

    pub fn home(&self) -> Edge {
        self.home
    }

    /// Base speed in the current state. Waiting ghosts do not move.
    pub fn speed(&self) -> f64 {
        match self.state {
            GhostState::Wait => 0.0,
            GhostState::Chase => self.config.chase_speed,
            GhostState::Flee => self.config.flee_speed,
        }
    }

    /// The most recently planned path.
    pub fn path(&self) -> &[Edge] {
        &self.path
    }

    /// Returns to the holding area for the start of a new life.
    pub fn reset(&mut self) {
        self.enter_wait(self.config.wait_for(self.ghost_type));
    }

    /// Returns to the holding area after being eaten.
    pub fn eaten(&mut self) {
        self.enter_wait(self.config.respawn_delay_ms);
    }

    fn enter_wait(&mut self, delay: f64) {
        self.state = GhostState::Wait;
        self.timer = delay;
        self.path.clear();
    }

    /// Starts (or restarts) fleeing. Returns `true` if the ghost was chasing until now.
    ///
    /// Waiting ghosts are unaffected.
    pub fn frighten(&mut self) -> bool {
        match self.state {
            GhostState::Wait => false,
            GhostState::Chase | GhostState::Flee => {
                let was_chasing = self.state == GhostState::Chase;
                self.state = GhostState::Flee;
                self.timer = self.config.flee_duration_ms;
                was_chasing
            }
        }
    }

    /// Advances the state timer by `dt`, returning the new state if it expired.
    ///
    /// A `dt` that reaches the timer expires it exactly, so a caller that never steps past
    /// [`timer`](Self::timer) observes every transition.
    pub fn tick(&mut self, dt: f64) -> Option<GhostState> {
        if dt < self.timer {
            self.timer -= dt;
            return None;
        }

        self.state = match self.state {
            GhostState::Wait | GhostState::Flee => GhostState::Chase,
            GhostState::Chase => return None,
        };
        self.timer = f64::INFINITY;
        Some(self.state)
    }

    /// Picks the next edge from the vertex the ghost stands on.
    ///
    /// The edge is the first step of the shortest non-backtracking path toward this ghost's target,
    /// never reversing the edge just finished. When the ghost already stands on its target it keeps
    /// moving, going straight where possible. Returns `None` if no path exists.
    pub fn next_edge(&mut self, location: &Location, world: &World<'_>, rng: &mut StdRng) -> Option<Edge> {
        let graph = world.graph;
        let current = location.nearest_vertex();
        let previous = (location.progress == 1.0).then_some(location.edge);
        let target = self
            .ghost_type
            .target(self.state, location, self.home, world, &self.config, rng);

        let Some(path) = shortest_non_backtracking_path(graph, current, previous, target) else {
            warn!(ghost = self.ghost_type.as_ref(), vertex = current, target, "Ghost has no path to its target");
            self.path.clear();
            return None;
        };

        let edge = match path.first() {
            Some(&first) => first,
            None => wander(graph, current, previous)?,
        };
        trace!(
            ghost = self.ghost_type.as_ref(),
            state = self.state.as_ref(),
            vertex = current,
            target,
            direction = edge.direction.as_ref(),
            "Ghost chose edge"
        );
        self.path = path;
        Some(edge)
    }
}

/// Picks an edge out of `vertex` without reversing `previous`, preferring to continue straight.
fn wander(graph: &MazeGraph, vertex: VertexId, previous: Option<Edge>) -> Option<Edge> {
    let Some(previous) = previous else {
        return graph.outgoing_edges(vertex).next();
    };
    graph
        .edge_in_direction(vertex, previous.direction)
        .or_else(|| graph.outgoing_edges(vertex).find(|edge| !edge.is_reverse_of(&previous)))
        .or_else(|| graph.reverse(previous))
}
