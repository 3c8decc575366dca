use glam::DVec2;
use pacmann::config::GameConfig;
use pacmann::entity::{Actor, GhostState, GhostType, Location, PlayerStrategy};
use pacmann::map::{BoardParser, Direction, MazeGraph};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;
use common::*;

/// Pac-Mann at the start of an edge of weight 1.
fn moving_player(graph: &MazeGraph, config: &GameConfig) -> Actor {
    let arrival = edge(graph, 0, 0, Direction::Right);
    let mut player = Actor::player(PlayerStrategy::Manual, arrival, config);
    player.traverse_edge(edge(graph, 1, 0, Direction::Right));
    player
}

#[test]
fn test_player_starts_standing_at_head() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let start = edge(&graph, 0, 0, Direction::Right);
    let player = Actor::player(PlayerStrategy::Ai, start, &GameConfig::default());

    assert_eq!(player.location(), Location::new(start, 1.0));
    assert_eq!(player.max_propagation_time(), f64::INFINITY);
}

#[test]
fn test_full_edge_takes_one_over_speed() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let config = GameConfig::default();
    let mut player = moving_player(&graph, &config);

    let time = player.max_propagation_time();
    assert_that(&(time - 1.0 / config.player_speed).abs()).is_less_than(1e-9);

    player.propagate(1.0 / config.player_speed);
    assert_that(&(player.location().progress - 1.0).abs()).is_less_than(1e-9);
}

#[test]
fn test_propagate_never_overshoots() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let config = GameConfig::default();
    let mut player = moving_player(&graph, &config);

    player.propagate(100.0);
    assert_that(&(player.location().progress - 0.5).abs()).is_less_than(1e-9);

    player.propagate(1e6);
    assert_eq!(player.location().progress, 1.0);
    assert_eq!(player.max_propagation_time(), f64::INFINITY);
}

#[test]
fn test_exact_remaining_time_lands_on_vertex() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let config = GameConfig::default();
    let mut player = moving_player(&graph, &config);

    player.propagate(37.0);
    player.propagate(player.max_propagation_time());
    assert_eq!(player.location().progress, 1.0);
    assert_that(&player.location().at_vertex()).is_true();
}

#[test]
fn test_uphill_edges_are_slower() {
    let grid = BoardParser::parse_with_elevation(&["...."], &["0200"]).unwrap();
    let graph = MazeGraph::from_start(&grid, glam::IVec2::ZERO).unwrap();
    let config = GameConfig::default();

    let mut player = Actor::player(PlayerStrategy::Manual, edge(&graph, 3, 0, Direction::Right), &config);
    let uphill = edge(&graph, 0, 0, Direction::Right);
    player.traverse_edge(uphill);

    assert_that(&(uphill.weight - 1.6).abs()).is_less_than(1e-9);
    assert_that(&(player.edge_speed() - config.player_speed / 1.6).abs()).is_less_than(1e-12);
    assert_that(&(player.max_propagation_time() - 1.6 / config.player_speed).abs()).is_less_than(1e-6);
}

#[test]
#[should_panic(expected = "actor must stand on a vertex")]
fn test_traverse_edge_between_vertices_panics() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let config = GameConfig::default();
    let mut player = moving_player(&graph, &config);
    player.propagate(50.0);
    player.traverse_edge(edge(&graph, 2, 0, Direction::Right));
}

#[test]
#[should_panic(expected = "new edge must leave the vertex")]
fn test_traverse_edge_from_wrong_vertex_panics() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let player_start = edge(&graph, 0, 0, Direction::Right);
    let mut player = Actor::player(PlayerStrategy::Manual, player_start, &GameConfig::default());
    player.traverse_edge(edge(&graph, 3, 0, Direction::Left));
}

#[test]
fn test_board_position_interpolates_and_extrapolates_tunnels() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let config = GameConfig::default();
    let mut player = moving_player(&graph, &config);
    player.propagate(50.0);
    assert_that(&(player.board_position(&graph) - DVec2::new(1.25, 0.0)).length()).is_less_than(1e-9);

    let mut tunnel = Actor::player(PlayerStrategy::Manual, edge(&graph, 1, 0, Direction::Left), &config);
    tunnel.traverse_edge(edge(&graph, 0, 0, Direction::Left));
    tunnel.propagate(100.0);
    assert_that(&(tunnel.board_position(&graph) - DVec2::new(-0.5, 0.0)).length()).is_less_than(1e-9);
}

#[test]
fn test_waiting_ghost_leaves_after_delay() {
    let graph = demo_graph();
    let home = graph.ghost_starting_edge().unwrap();
    let config = GameConfig::default();
    let mut ghost = Actor::ghost(GhostType::Pinky, home, &config.ghosts);

    assert_eq!(ghost.ghost_state(), Some(GhostState::Wait));
    assert_eq!(ghost.base_speed(), 0.0);
    assert_eq!(ghost.max_propagation_time(), config.ghosts.wait_ms[1]);

    assert_eq!(ghost.propagate(1_000.0), None);
    assert_eq!(ghost.location(), Location::start_of(home));
    assert_eq!(ghost.max_propagation_time(), config.ghosts.wait_ms[1] - 1_000.0);

    assert_eq!(ghost.propagate(ghost.max_propagation_time()), Some(GhostState::Chase));
    assert_eq!(ghost.location(), Location::start_of(home));
    assert_eq!(ghost.base_speed(), config.ghosts.chase_speed);
}

#[test]
fn test_frighten_turns_chasing_ghost_around() {
    let graph = demo_graph();
    let home = graph.ghost_starting_edge().unwrap();
    let config = eager_config();
    let mut ghost = Actor::ghost(GhostType::Blinky, home, &config.ghosts);

    assert_that(&ghost.frighten(&graph)).is_false();

    ghost.propagate(0.0);
    ghost.propagate(ghost.max_propagation_time() / 4.0);
    let before = ghost.location();
    assert_that(&ghost.frighten(&graph)).is_true();

    let after = ghost.location();
    assert_eq!(ghost.ghost_state(), Some(GhostState::Flee));
    assert_eq!(after.edge, graph.reverse(home).unwrap());
    assert_that(&after.collides_with(&before)).is_true();
    assert_that(&ghost.max_propagation_time()).is_less_than_or_equal_to(config.ghosts.flee_duration_ms);
}

#[test]
fn test_eaten_ghost_returns_home_and_waits() {
    let graph = demo_graph();
    let home = graph.ghost_starting_edge().unwrap();
    let config = eager_config();
    let mut ghost = Actor::ghost(GhostType::Clyde, home, &config.ghosts);
    ghost.propagate(0.0);
    ghost.propagate(ghost.max_propagation_time());

    ghost.eaten();
    assert_eq!(ghost.ghost_state(), Some(GhostState::Wait));
    assert_eq!(ghost.location(), Location::start_of(home));
    assert_eq!(ghost.max_propagation_time(), config.ghosts.respawn_delay_ms);
}

#[test]
fn test_manual_guidance_path_is_current_edge() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    let config = GameConfig::default();
    let player = moving_player(&graph, &config);
    assert_eq!(player.guidance_path(), vec![player.current_edge()]);
}
