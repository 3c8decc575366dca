//! Actors and the decision policies that steer them.
//!
//! Every actor shares one motion model ([`actor::Actor`]) and carries a behavior that
//! decides which edge to take whenever it stands on a vertex.

pub mod actor;
pub mod ghost;
pub mod item;
pub mod location;
pub mod pacman;

use crate::collections::ProbingMap;
use crate::map::direction::Direction;
use crate::map::graph::{MazeGraph, VertexId};

pub use actor::Actor;
pub use ghost::{Ghost, GhostState, GhostType};
pub use item::Item;
pub use location::Location;
pub use pacman::{Player, PlayerStrategy};

/// What one ghost looks like to the other actors at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostSighting {
    pub ghost_type: GhostType,
    pub state: GhostState,
    pub location: Location,
}

/// A read-only snapshot of everything a decision may look at.
#[derive(Debug, Clone, Copy)]
pub struct World<'a> {
    pub graph: &'a MazeGraph,
    pub player: Location,
    pub ghosts: &'a [GhostSighting],
    pub items: &'a ProbingMap<VertexId, Item>,
    /// The most recent directional input, if any.
    pub command: Option<Direction>,
}

impl World<'_> {
    /// Finds the ghost with the given identity.
    pub fn ghost(&self, ghost_type: GhostType) -> Option<&GhostSighting> {
        self.ghosts.iter().find(|ghost| ghost.ghost_type == ghost_type)
    }

    /// Returns the item resting on `vertex`, if any.
    pub fn item_at(&self, vertex: VertexId) -> Option<Item> {
        self.items.get(&vertex).ok().copied()
    }
}
