#![allow(dead_code)]

use glam::IVec2;
use pacmann::collections::ProbingMap;
use pacmann::config::GameConfig;
use pacmann::constants::DEMO_BOARD;
use pacmann::entity::{GhostSighting, Item, Location, PlayerStrategy, World};
use pacmann::game::Game;
use pacmann::map::{BoardParser, Direction, Edge, MazeGraph, VertexId};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A 3x3 block of path tiles walled in on every side, so no edge wraps around.
pub const WALLED_3X3: [&str; 5] = ["#####", "#...#", "#...#", "#...#", "#####"];

/// A single row of four path tiles. Wraparound closes it into a cycle.
pub const LOOP_1X4: [&str; 1] = ["...."];

pub fn graph_from(rows: &[&str], start: (i32, i32)) -> MazeGraph {
    let grid = BoardParser::parse_board(rows).unwrap();
    MazeGraph::from_start(&grid, IVec2::new(start.0, start.1)).unwrap()
}

pub fn demo_graph() -> MazeGraph {
    let grid = BoardParser::parse_board(&DEMO_BOARD).unwrap();
    MazeGraph::new(&grid).unwrap()
}

pub fn vertex(graph: &MazeGraph, column: i32, row: i32) -> VertexId {
    graph
        .vertex_at(IVec2::new(column, row))
        .unwrap_or_else(|| panic!("no vertex at ({column}, {row})"))
}

pub fn edge(graph: &MazeGraph, column: i32, row: i32, direction: Direction) -> Edge {
    graph
        .edge_in_direction(vertex(graph, column, row), direction)
        .unwrap_or_else(|| panic!("no {direction:?} edge at ({column}, {row})"))
}

/// A config where every ghost leaves the holding area immediately.
pub fn eager_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.ghosts.wait_ms = [0.0; 4];
    config
}

pub fn demo_game(strategy: PlayerStrategy, config: GameConfig, seed: u64) -> Game {
    Game::new(demo_graph(), strategy, config, StdRng::seed_from_u64(seed)).unwrap()
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

pub fn world<'a>(
    graph: &'a MazeGraph,
    player: Location,
    ghosts: &'a [GhostSighting],
    items: &'a ProbingMap<VertexId, Item>,
) -> World<'a> {
    World {
        graph,
        player,
        ghosts,
        items,
        command: None,
    }
}
