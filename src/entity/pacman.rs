//! Pac-Mann's two decision strategies.
//!
//! The manual strategy follows the latest directional command. The automatic strategy runs a
//! bounded breadth-first search around Pac-Mann, scores the vertices it finds, and walks toward the
//! best one.

use std::collections::VecDeque;

use glam::IVec2;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use smallvec::SmallVec;
use tracing::{trace, warn};

use super::ghost::GhostState;
use super::location::Location;
use super::{GhostSighting, Item, World};
use crate::collections::ProbingMap;
use crate::config::AiConfig;
use crate::map::graph::{Edge, MazeGraph, VertexId};
use crate::navigation::shortest_non_backtracking_path;

/// How Pac-Mann decides where to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStrategy {
    /// Follow the most recent directional command.
    Manual,
    /// Hunt for items while avoiding chasing ghosts.
    Ai,
}

/// The decision state of Pac-Mann.
#[derive(Debug, Clone)]
pub struct Player {
    pub strategy: PlayerStrategy,
    speed: f64,
    ai: AiConfig,
    plan: Vec<Edge>,
}

impl Player {
    pub fn new(strategy: PlayerStrategy, speed: f64, ai: AiConfig) -> Self {
        Self {
            strategy,
            speed,
            ai,
            plan: Vec::new(),
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn reset(&mut self) {
        self.plan.clear();
    }

    /// The path Pac-Mann intends to follow, starting with the edge it is on.
    pub fn guidance_path(&self, location: &Location) -> Vec<Edge> {
        match self.strategy {
            PlayerStrategy::Ai if !self.plan.is_empty() => self.plan.clone(),
            _ => vec![location.edge],
        }
    }

    /// Picks the next edge out of the vertex Pac-Mann stands on, or `None` to stay put.
    pub fn next_edge(&mut self, location: &Location, world: &World<'_>, rng: &mut StdRng) -> Option<Edge> {
        match self.strategy {
            PlayerStrategy::Manual => manual_edge(location, world),
            PlayerStrategy::Ai => {
                let edge = self.ai_edge(location, world, rng);
                if edge.is_none() {
                    self.plan.clear();
                }
                edge
            }
        }
    }

    fn ai_edge(&mut self, location: &Location, world: &World<'_>, rng: &mut StdRng) -> Option<Edge> {
        let graph = world.graph;
        let start = location.nearest_vertex();
        let previous = (location.progress == 1.0).then_some(location.edge);
        let scorer = Scorer::new(graph, world.ghosts, &self.ai);

        let close_call = scorer.nearest_chaser(graph.position(start)) <= self.ai.wide_danger_radius;
        let radius = if close_call {
            self.ai.wide_danger_radius
        } else {
            self.ai.danger_radius
        };

        let target = scorer
            .best_target(start, world, Some(radius))
            .or_else(|| scorer.best_target(start, world, None));

        if let Some(target) = target {
            let path = shortest_non_backtracking_path(graph, start, previous, target)
                .or_else(|| shortest_non_backtracking_path(graph, start, None, target));
            if let Some(&first) = path.as_ref().and_then(|path| path.first()) {
                trace!(vertex = start, target, direction = first.direction.as_ref(), "AI chose edge");
                self.plan = path.unwrap_or_default();
                return Some(first);
            }
        }

        self.plan.clear();
        if let Some(edge) = scorer.safest_edge(start) {
            trace!(vertex = start, direction = edge.direction.as_ref(), "AI retreating");
            return Some(edge);
        }

        let edge = graph.outgoing_edges(start).choose(rng);
        if edge.is_none() {
            warn!(vertex = start, "Pac-Mann has no outgoing edge");
        }
        edge
    }
}

/// Command first, then straight ahead, then stand still.
fn manual_edge(location: &Location, world: &World<'_>) -> Option<Edge> {
    let vertex = location.nearest_vertex();
    world
        .command
        .and_then(|direction| world.graph.edge_in_direction(vertex, direction))
        .or_else(|| world.graph.edge_in_direction(vertex, location.edge.direction))
}

fn manhattan(a: IVec2, b: IVec2) -> i32 {
    let delta = a - b;
    delta.x.abs() + delta.y.abs()
}

/// Scores vertices for the automatic strategy.
struct Scorer<'a> {
    graph: &'a MazeGraph,
    config: &'a AiConfig,
    chasers: SmallVec<[IVec2; 4]>,
    fleeing: SmallVec<[IVec2; 4]>,
}

impl<'a> Scorer<'a> {
    fn new(graph: &'a MazeGraph, ghosts: &[GhostSighting], config: &'a AiConfig) -> Self {
        let positions = |state: GhostState| {
            ghosts
                .iter()
                .filter(move |ghost| ghost.state == state)
                .map(|ghost| graph.position(ghost.location.nearest_vertex()))
                .collect()
        };
        Self {
            graph,
            config,
            chasers: positions(GhostState::Chase),
            fleeing: positions(GhostState::Flee),
        }
    }

    /// Distance to the closest chasing ghost, or `i32::MAX` when none is chasing.
    fn nearest_chaser(&self, position: IVec2) -> i32 {
        self.chasers
            .iter()
            .map(|&chaser| manhattan(chaser, position))
            .min()
            .unwrap_or(i32::MAX)
    }

    /// The undiscounted value of standing on `vertex`.
    fn score(&self, vertex: VertexId, item: Option<Item>) -> f64 {
        let position = self.graph.position(vertex);
        let config = self.config;

        let food = match item {
            Some(Item::Dot) => config.item_weight,
            Some(Item::Pellet) => config.item_weight * config.pellet_multiplier,
            None => 0.0,
        };
        let prey: f64 = self
            .fleeing
            .iter()
            .map(|&ghost| manhattan(ghost, position))
            .filter(|&distance| distance <= config.flee_ghost_radius)
            .map(|distance| config.flee_ghost_weight * f64::from(config.flee_ghost_radius - distance + 1))
            .sum();
        let danger: f64 = self
            .chasers
            .iter()
            .map(|&ghost| config.danger_weight * config.item_weight / f64::from(1 + manhattan(ghost, position)))
            .sum();

        food + prey - danger
    }

    /// Breadth-first search up to the configured depth for the best-scoring vertex.
    ///
    /// Scores are divided by the number of steps needed to reach the vertex. With `exclusion`, vertices
    /// within that distance of a chasing ghost are neither scored nor expanded. Returns `None` if no
    /// vertex scores above zero.
    fn best_target(&self, start: VertexId, world: &World<'_>, exclusion: Option<i32>) -> Option<VertexId> {
        let mut depths: ProbingMap<VertexId, usize> = ProbingMap::new();
        let mut queue = VecDeque::from([start]);
        depths.put(start, 0);
        let mut best: Option<(VertexId, f64)> = None;

        while let Some(vertex) = queue.pop_front() {
            let depth = depths.get(&vertex).copied().unwrap_or_default();
            if vertex != start {
                let score = self.score(vertex, world.item_at(vertex)) / depth as f64;
                if score > 0.0 && best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((vertex, score));
                }
            }
            if depth >= self.config.search_depth {
                continue;
            }

            for edge in self.graph.outgoing_edges(vertex) {
                if depths.contains_key(&edge.head) {
                    continue;
                }
                let excluded = exclusion
                    .is_some_and(|radius| self.nearest_chaser(self.graph.position(edge.head)) <= radius);
                if excluded {
                    continue;
                }
                depths.put(edge.head, depth + 1);
                queue.push_back(edge.head);
            }
        }

        best.map(|(vertex, _)| vertex)
    }

    /// The outgoing edge whose head is farthest from every chasing ghost.
    fn safest_edge(&self, vertex: VertexId) -> Option<Edge> {
        if self.chasers.is_empty() {
            return None;
        }
        let mut best: Option<(Edge, i32)> = None;
        for edge in self.graph.outgoing_edges(vertex) {
            let clearance = self.nearest_chaser(self.graph.position(edge.head));
            if best.is_none_or(|(_, best_clearance)| clearance > best_clearance) {
                best = Some((edge, clearance));
            }
        }
        best.map(|(edge, _)| edge)
    }
}
