//! Parsing of ASCII board layouts into tile grids.
//!
//! Boards are written row by row. `#` is a wall and any other character is a path tile. An optional
//! elevation layer of the same shape uses one digit per tile, read as tenths (`'7'` is `0.7`).

use glam::IVec2;

use super::builder::{TileGrid, TileType};
use crate::error::{GameResult, ParseError};

/// Parser for converting raw board layouts into tile grids.
pub struct BoardParser;

impl BoardParser {
    /// Parses a single character into a tile type.
    pub fn parse_character(c: char) -> TileType {
        match c {
            '#' => TileType::Wall,
            _ => TileType::Path,
        }
    }

    /// Parses a board with every tile at elevation zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty or its rows differ in length.
    pub fn parse_board<S: AsRef<str>>(rows: &[S]) -> GameResult<TileGrid> {
        let types = transpose(rows, |_, _, c| Ok(Self::parse_character(c)))?;
        TileGrid::flat(types)
    }

    /// Parses a board and a digit elevation layer.
    ///
    /// # Errors
    ///
    /// Returns an error if either layer is empty or ragged, an elevation character is not a digit, or
    /// the two layers differ in shape.
    pub fn parse_with_elevation<S: AsRef<str>, E: AsRef<str>>(rows: &[S], elevation_rows: &[E]) -> GameResult<TileGrid> {
        let types = transpose(rows, |_, _, c| Ok(Self::parse_character(c)))?;
        let elevations = transpose(elevation_rows, |column, row, character| {
            character
                .to_digit(10)
                .map(|digit| digit as f64 / 10.0)
                .ok_or(ParseError::InvalidElevation { character, column, row })
        })?;
        TileGrid::new(types, elevations)
    }

    /// Renders a grid back to rows of `#` and `.`, marking `highlight` positions with `o`.
    pub fn render(grid: &TileGrid, highlight: &[IVec2]) -> Vec<String> {
        (0..grid.height())
            .map(|row| {
                (0..grid.width())
                    .map(|column| {
                        let position = IVec2::new(column, row);
                        match grid.tile(position) {
                            TileType::Wall => '#',
                            TileType::Path if highlight.contains(&position) => 'o',
                            TileType::Path => '.',
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Converts row-major text into a column-major grid, parsing each character with `parse`.
fn transpose<S, T, F>(rows: &[S], mut parse: F) -> Result<Vec<Vec<T>>, ParseError>
where
    S: AsRef<str>,
    F: FnMut(usize, usize, char) -> Result<T, ParseError>,
{
    let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
    if width == 0 {
        return Err(ParseError::EmptyBoard);
    }

    let mut columns: Vec<Vec<T>> = (0..width).map(|_| Vec::with_capacity(rows.len())).collect();
    for (row, line) in rows.iter().enumerate() {
        let found = line.as_ref().chars().count();
        if found != width {
            return Err(ParseError::RaggedRow {
                row,
                expected: width,
                found,
            });
        }
        for (column, character) in line.as_ref().chars().enumerate() {
            columns[column].push(parse(column, row, character)?);
        }
    }
    Ok(columns)
}
