use glam::IVec2;
use pacmann::constants::DEMO_BOARD;
use pacmann::error::{GameError, ParseError};
use pacmann::map::{BoardParser, TileType};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

#[test]
fn test_parse_character() {
    assert_eq!(BoardParser::parse_character('#'), TileType::Wall);
    for c in ['.', ' ', 'o', 'T', 'X'] {
        assert_eq!(BoardParser::parse_character(c), TileType::Path);
    }
}

#[test]
fn test_parse_board_is_column_major() {
    let grid = BoardParser::parse_board(&["#..", "..#"]).unwrap();

    assert_eq!((grid.width(), grid.height()), (3, 2));
    assert_eq!(grid.tile(IVec2::new(0, 0)), TileType::Wall);
    assert_eq!(grid.tile(IVec2::new(2, 1)), TileType::Wall);
    assert_eq!(grid.tile(IVec2::new(2, 0)), TileType::Path);
    assert_eq!(grid.path_count(), 4);
    assert_eq!(grid.elevation(IVec2::new(1, 1)), 0.0);
}

#[test]
fn test_parse_demo_board() {
    let grid = BoardParser::parse_board(&DEMO_BOARD).unwrap();
    assert_eq!((grid.width(), grid.height()), (21, 21));
    for a in 0..7 {
        for b in 0..7 {
            assert_that(&grid.is_path(IVec2::new(3 * a + 2, 3 * b + 2))).is_true();
        }
    }
}

#[test]
fn test_empty_and_ragged_boards() {
    let empty: [&str; 0] = [];
    assert!(matches!(
        BoardParser::parse_board(&empty),
        Err(GameError::MapParse(ParseError::EmptyBoard))
    ));
    assert!(matches!(
        BoardParser::parse_board(&[""]),
        Err(GameError::MapParse(ParseError::EmptyBoard))
    ));
    assert!(matches!(
        BoardParser::parse_board(&["...", "..", "..."]),
        Err(GameError::MapParse(ParseError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        }))
    ));
}

#[test]
fn test_elevation_layer() {
    let grid = BoardParser::parse_with_elevation(&["..", "#."], &["05", "19"]).unwrap();
    assert_eq!(grid.elevation(IVec2::new(0, 0)), 0.0);
    assert_eq!(grid.elevation(IVec2::new(1, 0)), 0.5);
    assert_eq!(grid.elevation(IVec2::new(0, 1)), 0.1);
    assert_eq!(grid.elevation(IVec2::new(1, 1)), 0.9);
}

#[test]
fn test_invalid_elevation_layers() {
    let result = BoardParser::parse_with_elevation(&["..", ".."], &["00", "0x"]);
    assert!(matches!(
        result,
        Err(GameError::MapParse(ParseError::InvalidElevation {
            character: 'x',
            column: 1,
            row: 1
        }))
    ));

    let result = BoardParser::parse_with_elevation(&["..", ".."], &["000", "000"]);
    assert!(matches!(result, Err(GameError::Map(_))));
}

#[test]
fn test_render_round_trips_and_highlights() {
    let rows = ["#...", "..#.", "...."];
    let grid = BoardParser::parse_board(&rows).unwrap();

    assert_eq!(BoardParser::render(&grid, &[]), rows.map(String::from).to_vec());
    assert_eq!(
        BoardParser::render(&grid, &[IVec2::new(1, 0), IVec2::new(2, 1)]),
        vec!["#o..", "..#.", "...."]
    );
}
