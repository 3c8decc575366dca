use glam::IVec2;
use pacmann::constants::DEMO_BOARD;
use pacmann::error::{GameError, MapError};
use pacmann::map::{edge_weight, BoardParser, Direction, MazeGraph, TileGrid, TileType};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;
use common::*;

#[test]
fn test_demo_graph_covers_every_path_tile() {
    let grid = BoardParser::parse_board(&DEMO_BOARD).unwrap();
    let graph = MazeGraph::new(&grid).unwrap();

    assert_eq!(graph.vertex_count(), grid.path_count());
    assert_eq!((graph.width(), graph.height()), (21, 21));
    for (id, vertex) in graph.vertices() {
        assert_eq!(graph.vertex_at(vertex.position), Some(id));
        assert_that(&grid.is_path(vertex.position)).is_true();
    }
}

#[test]
fn test_every_edge_has_a_reverse() {
    let graph = demo_graph();
    for edge in graph.edges() {
        let reverse = graph.reverse(edge).expect("every edge has a reverse");
        assert_eq!(reverse.tail, edge.head);
        assert_eq!(reverse.head, edge.tail);
        assert_eq!(reverse.direction, edge.direction.reverse());
        assert_that(&reverse.is_reverse_of(&edge)).is_true();
        assert_that(&edge.weight).is_greater_than(0.0);
    }
}

#[test]
fn test_edges_connect_adjacent_tiles() {
    let graph = demo_graph();
    for edge in graph.edges() {
        let expected = graph.wrap(graph.position(edge.tail) + edge.direction.as_ivec2());
        assert_eq!(graph.position(edge.head), expected);
    }
}

#[test]
fn test_tunnel_edge_wraps_around_board() {
    let graph = demo_graph();
    let tunnel = edge(&graph, 0, 2, Direction::Left);
    assert_eq!(graph.position(tunnel.head), IVec2::new(20, 2));
    assert_eq!(tunnel.direction, Direction::Left);
}

#[test]
fn test_walled_grid_has_no_wraparound() {
    let graph = graph_from(&WALLED_3X3, (1, 1));
    assert_eq!(graph.vertex_count(), 9);
    assert_eq!(graph.edges().count(), 24);
    assert_eq!(graph.outgoing_edges(vertex(&graph, 1, 1)).count(), 2);
    assert_eq!(graph.outgoing_edges(vertex(&graph, 2, 2)).count(), 4);
}

#[test]
fn test_single_row_loop_has_no_self_edges() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    assert_eq!(graph.vertex_count(), 4);
    for edge in graph.edges() {
        assert_that(&edge.tail).is_not_equal_to(edge.head);
        assert_that(&matches!(edge.direction, Direction::Left | Direction::Right)).is_true();
    }
}

#[test]
fn test_edge_weight_is_clamped_and_monotonic() {
    let mut previous = f64::NEG_INFINITY;
    for step in -20..=20 {
        let delta = f64::from(step) / 20.0;
        let weight = edge_weight(0.5, 0.5 + delta);
        assert_that(&weight).is_greater_than_or_equal_to(previous);
        assert_that(&weight).is_greater_than_or_equal_to(0.25);
        assert_that(&weight).is_less_than_or_equal_to(1.75);
        previous = weight;
    }
}

#[test]
fn test_elevation_sets_edge_weights() {
    let grid = BoardParser::parse_with_elevation(&["...."], &["0109"]).unwrap();
    let graph = MazeGraph::from_start(&grid, IVec2::ZERO).unwrap();

    let uphill = edge(&graph, 0, 0, Direction::Right);
    assert_that(&(uphill.weight - 1.3).abs()).is_less_than(1e-9);
    let downhill = graph.reverse(uphill).unwrap();
    assert_that(&(downhill.weight - 0.7).abs()).is_less_than(1e-9);
    assert_eq!(edge(&graph, 2, 0, Direction::Right).weight, 1.75);
    assert_eq!(edge(&graph, 3, 0, Direction::Left).weight, 0.25);
}

#[test]
fn test_closest_to_exact_and_snapped() {
    let graph = demo_graph();
    assert_eq!(graph.closest_to(2, 2), vertex(&graph, 2, 2));
    assert_eq!(graph.position(graph.closest_to(3, 3)), IVec2::new(3, 2));

    for (i, j) in [(-50, -50), (100, 100), (10, 10), (0, 20), (20, 0)] {
        let id = graph.closest_to(i, j);
        assert_that(&id).is_less_than(graph.vertex_count());
    }
}

#[test]
fn test_closest_to_skips_the_holding_area() {
    let mut rows = vec!["..........."; 11];
    for row in &mut rows[4..7] {
        *row = "....###....";
    }
    let graph = graph_from(&rows, (2, 2));

    let below = IVec2::new(5, 8);
    assert_eq!(graph.position(graph.closest_to(5, 5)), below);
    assert_eq!(graph.position(graph.closest_to(4, 5)), below);
    assert_eq!(graph.position(graph.closest_to(5, 4)), below);
    // Outside the box the lattice point itself is used.
    assert_eq!(graph.position(graph.closest_to(3, 2)), IVec2::new(3, 2));
}

#[test]
fn test_closest_to_falls_back_to_nearest_vertex() {
    let graph = graph_from(&["#####", "#...#", "#####"], (1, 1));
    assert_eq!(graph.position(graph.closest_to(0, 0)), IVec2::new(1, 1));
}

#[test]
fn test_demo_starting_edges() {
    let graph = demo_graph();

    let player = graph.player_starting_edge().unwrap();
    assert_eq!(graph.position(player.head), IVec2::new(10, 17));
    assert_eq!(graph.position(player.tail), IVec2::new(9, 17));
    assert_eq!(player.direction, Direction::Right);

    let ghost = graph.ghost_starting_edge().unwrap();
    assert_eq!(graph.position(ghost.tail), IVec2::new(10, 8));
    assert_eq!(ghost.direction, Direction::Right);
}

#[test]
fn test_small_board_has_no_starting_edges() {
    let graph = graph_from(&LOOP_1X4, (0, 0));
    assert_that(&graph.player_starting_edge()).is_none();
    assert_that(&graph.ghost_starting_edge()).is_none();
}

#[test]
fn test_start_must_be_a_path_tile() {
    let grid = BoardParser::parse_board(&WALLED_3X3).unwrap();
    let result = MazeGraph::from_start(&grid, IVec2::ZERO);
    assert!(matches!(result, Err(GameError::Map(MapError::StartNotPath(start))) if start == IVec2::ZERO));

    let result = MazeGraph::from_start(&grid, IVec2::new(9, 9));
    assert!(matches!(result, Err(GameError::Map(MapError::StartNotPath(_)))));
}

#[test]
fn test_disconnected_path_tiles_are_rejected() {
    let grid = BoardParser::parse_board(&[".#.#"]).unwrap();
    let result = MazeGraph::from_start(&grid, IVec2::ZERO);
    assert!(matches!(
        result,
        Err(GameError::Map(MapError::Disconnected { unreachable: 1 }))
    ));
}

#[test]
fn test_tile_grid_validation() {
    let column = vec![TileType::Path; 3];

    let ragged = TileGrid::flat(vec![column.clone(), vec![TileType::Path; 2]]);
    assert!(matches!(
        ragged,
        Err(GameError::Map(MapError::RaggedGrid {
            column: 1,
            expected: 3,
            found: 2
        }))
    ));

    let mismatched = TileGrid::new(vec![column.clone(), column.clone()], vec![vec![0.0; 3]]);
    assert!(matches!(
        mismatched,
        Err(GameError::Map(MapError::ShapeMismatch {
            expected: (2, 3),
            found: (1, 3)
        }))
    ));

    assert!(matches!(TileGrid::flat(Vec::new()), Err(GameError::Map(MapError::EmptyGrid))));
}
