//! The frame driver: advances every actor by the elapsed time and resolves what happens on arrival.

use rand::rngs::StdRng;
use smallvec::SmallVec;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::collections::ProbingMap;
use crate::config::GameConfig;
use crate::entity::{Actor, GhostSighting, GhostState, GhostType, Item, Location, PlayerStrategy, World};
use crate::error::{GameResult, MapError};
use crate::map::direction::Direction;
use crate::map::graph::{MazeGraph, VertexId};

/// Something that happened during [`Game::update_actors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Pac-Mann ate the item on a vertex.
    ItemEaten { vertex: VertexId, item: Item },
    /// A pellet was eaten; this many ghosts started fleeing.
    GhostsFrightened { count: usize },
    /// A ghost's timer moved it to a new state.
    GhostStateChanged { ghost: GhostType, state: GhostState },
    /// Pac-Mann caught a fleeing ghost.
    GhostEaten(GhostType),
    /// A chasing ghost caught Pac-Mann. Every actor has been reset for the next life.
    PlayerCaught(GhostType),
}

/// The simulation state: the maze, its actors, and the items left on it.
pub struct Game {
    graph: MazeGraph,
    player: Actor,
    ghosts: Vec<Actor>,
    items: ProbingMap<VertexId, Item>,
    command: Option<Direction>,
    rng: StdRng,
    config: GameConfig,
}

impl Game {
    /// Places Pac-Mann and the four ghosts on their starting edges. The board starts without items.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::MissingStartingEdge`] if the maze lacks the player's or the ghosts' starting
    /// edge.
    pub fn new(graph: MazeGraph, strategy: PlayerStrategy, config: GameConfig, rng: StdRng) -> GameResult<Self> {
        let player_start = graph
            .player_starting_edge()
            .ok_or(MapError::MissingStartingEdge("player"))?;
        let ghost_start = graph
            .ghost_starting_edge()
            .ok_or(MapError::MissingStartingEdge("ghost"))?;

        let player = Actor::player(strategy, player_start, &config);
        let ghosts = GhostType::iter()
            .map(|ghost_type| Actor::ghost(ghost_type, ghost_start, &config.ghosts))
            .collect();

        Ok(Self {
            graph,
            player,
            ghosts,
            items: ProbingMap::new(),
            command: None,
            rng,
            config,
        })
    }

    pub fn graph(&self) -> &MazeGraph {
        &self.graph
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn ghosts(&self) -> &[Actor] {
        &self.ghosts
    }

    pub fn ghost(&self, ghost_type: GhostType) -> Option<&Actor> {
        self.ghosts
            .iter()
            .find(|actor| actor.as_ghost().is_some_and(|ghost| ghost.ghost_type == ghost_type))
    }

    pub fn items(&self) -> &ProbingMap<VertexId, Item> {
        &self.items
    }

    pub fn item_at(&self, vertex: VertexId) -> Option<Item> {
        self.items.get(&vertex).ok().copied()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn command(&self) -> Option<Direction> {
        self.command
    }

    /// Places `item` on `vertex`, replacing whatever was there.
    pub fn place_item(&mut self, vertex: VertexId, item: Item) {
        self.items.put(vertex, item);
    }

    /// Puts a dot on every vertex and a pellet on the vertex each ghost flees to.
    pub fn populate_items(&mut self) {
        for (vertex, _) in self.graph.vertices() {
            self.items.put(vertex, Item::Dot);
        }
        for ghost_type in GhostType::iter() {
            let corner = ghost_type.flee_corner(self.graph.width(), self.graph.height());
            self.items.put(self.graph.closest_to(corner.x, corner.y), Item::Pellet);
        }
        debug!(items = self.items.len(), "Items placed");
    }

    /// Records a directional command for the manual player.
    ///
    /// A command opposite to Pac-Mann's current edge turns it around at once, even between vertices.
    pub fn set_command(&mut self, direction: Direction) {
        self.command = Some(direction);

        let location = self.player.location();
        let manual = self
            .player
            .as_player()
            .is_some_and(|player| player.strategy == PlayerStrategy::Manual);
        if manual && !location.at_vertex() && direction == location.edge.direction.reverse() {
            self.player.turn_around(&self.graph);
        }
    }

    /// Makes every ghost outside the holding area flee. Returns how many were affected.
    pub fn frighten_ghosts(&mut self) -> usize {
        let count = self
            .ghosts
            .iter_mut()
            .map(|ghost| ghost.frighten(&self.graph))
            .filter(|&frightened| frightened)
            .count();
        debug!(count, "Ghosts frightened");
        count
    }

    /// Returns every actor to where it was at the start of the life.
    pub fn reset_life(&mut self) {
        self.player.reset();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
        debug!("Life reset");
    }

    /// Advances the simulation by `dt` milliseconds.
    ///
    /// Time is split into sub-steps that end whenever some actor reaches a vertex or changes state.
    /// Within a step every actor moves, then each actor that arrived at a vertex resolves the arrival
    /// and picks its next edge, then collisions are checked. A capture ends the update early.
    pub fn update_actors(&mut self, dt: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.decide_all(&mut events);

        // Every step either uses up time or expires a timer, so this terminates.
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = self.actors().map(Actor::max_propagation_time).fold(remaining, f64::min);

            let before = self.locations();
            self.player.propagate(step);
            for ghost in &mut self.ghosts {
                if let Some(state) = ghost.propagate(step) {
                    let ghost_type = ghost.as_ghost().map(|ghost| ghost.ghost_type);
                    if let Some(ghost_type) = ghost_type {
                        debug!(ghost = ghost_type.as_ref(), state = state.as_ref(), "Ghost changed state");
                        events.push(GameEvent::GhostStateChanged { ghost: ghost_type, state });
                    }
                }
            }
            let after = self.locations();
            remaining -= step;

            self.decide_all(&mut events);
            if self.resolve_collisions(&before, &after, &mut events) {
                break;
            }
        }
        events
    }

    fn actors(&self) -> impl Iterator<Item = &Actor> {
        std::iter::once(&self.player).chain(&self.ghosts)
    }

    fn locations(&self) -> SmallVec<[Location; 5]> {
        self.actors().map(Actor::location).collect()
    }

    fn sightings(&self) -> SmallVec<[GhostSighting; 4]> {
        self.ghosts.iter().filter_map(Actor::sighting).collect()
    }

    /// Resolves arrivals and picks new edges for every actor standing at the end of its edge.
    fn decide_all(&mut self, events: &mut Vec<GameEvent>) {
        if self.player.location().progress == 1.0 {
            self.visit(self.player.nearest_vertex(), events);

            let sightings = self.sightings();
            let world = World {
                graph: &self.graph,
                player: self.player.location(),
                ghosts: &sightings,
                items: &self.items,
                command: self.command,
            };
            if let Some(edge) = self.player.next_edge(&world, &mut self.rng) {
                self.player.traverse_edge(edge);
            }
        }

        for i in 0..self.ghosts.len() {
            if self.ghosts[i].location().progress < 1.0 {
                continue;
            }
            let sightings = self.sightings();
            let world = World {
                graph: &self.graph,
                player: self.player.location(),
                ghosts: &sightings,
                items: &self.items,
                command: self.command,
            };
            let ghost = &mut self.ghosts[i];
            if let Some(edge) = ghost.next_edge(&world, &mut self.rng) {
                ghost.traverse_edge(edge);
            }
        }
    }

    /// Pac-Mann eats whatever rests on `vertex`.
    fn visit(&mut self, vertex: VertexId, events: &mut Vec<GameEvent>) {
        let Ok(item) = self.items.remove(&vertex) else {
            return;
        };
        trace!(vertex, item = item.as_ref(), "Item eaten");
        events.push(GameEvent::ItemEaten { vertex, item });
        if item == Item::Pellet {
            let count = self.frighten_ghosts();
            events.push(GameEvent::GhostsFrightened { count });
        }
    }

    /// Checks Pac-Mann against every ghost outside the holding area. Returns `true` on a capture.
    ///
    /// Besides [`Location::collides_with`], two actors that swapped sides on one corridor during the
    /// step also count as colliding.
    fn resolve_collisions(&mut self, before: &[Location], after: &[Location], events: &mut Vec<GameEvent>) -> bool {
        let player = self.player.location();
        let mut captor = None;
        for (i, ghost) in self.ghosts.iter_mut().enumerate() {
            let Some(sighting) = ghost.sighting() else {
                continue;
            };
            if sighting.state == GhostState::Wait {
                continue;
            }
            let collided = player.collides_with(&sighting.location)
                || passed_through((before[0], before[i + 1]), (after[0], after[i + 1]));
            if !collided {
                continue;
            }

            match sighting.state {
                GhostState::Flee => {
                    debug!(ghost = sighting.ghost_type.as_ref(), "Ghost eaten");
                    ghost.eaten();
                    events.push(GameEvent::GhostEaten(sighting.ghost_type));
                }
                GhostState::Chase => {
                    captor = Some(sighting.ghost_type);
                    break;
                }
                GhostState::Wait => {}
            }
        }

        let Some(ghost_type) = captor else {
            return false;
        };
        debug!(ghost = ghost_type.as_ref(), "Pac-Mann caught");
        events.push(GameEvent::PlayerCaught(ghost_type));
        self.reset_life();
        true
    }
}

/// Returns whether two actors that stayed on their edges moved past each other.
///
/// On one edge that means the faster one overtook the other. On opposite edges of one corridor it
/// means they met head-on.
fn passed_through(before: (Location, Location), after: (Location, Location)) -> bool {
    let (a0, b0) = before;
    let (a1, b1) = after;
    if a0.edge != a1.edge || b0.edge != b1.edge {
        return false;
    }
    if a0.edge == b0.edge {
        (a0.progress - b0.progress) * (a1.progress - b1.progress) < 0.0
    } else {
        a0.edge.is_reverse_of(&b0.edge) && a0.progress + b0.progress < 1.0 && a1.progress + b1.progress > 1.0
    }
}
