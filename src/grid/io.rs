//! Text formats for grid puzzles

use super::Board;
use crate::error::{Result, SearchError};
use anyhow::Context;
use std::path::Path;

/// Parse an open/blocked grid.
/// Format: one line per row, '1' for an open cell and '0' for a blocked one
pub fn parse_open_grid(content: &str) -> Result<Board<bool>> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(SearchError::invalid("grid text contains no rows"));
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => {
                    return Err(SearchError::invalid(format!(
                        "invalid character '{}' at ({}, {}); only '0' and '1' are allowed",
                        ch, row_idx, col_idx
                    )))
                }
            }
        }
        rows.push(row);
    }

    Board::from_rows(rows)
}

/// Parse a sudoku puzzle.
/// Format: 9 rows of 9 cells, digits '1'-'9' for givens and '.' or '0' for
/// empty cells. Whitespace inside a row is ignored
pub fn parse_sudoku(content: &str) -> Result<Board<u8>> {
    let mut rows = Vec::new();
    for (row_idx, line) in content.lines().enumerate() {
        let cells: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
        if cells.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(cells.len());
        for (col_idx, ch) in cells.into_iter().enumerate() {
            match ch {
                '.' | '0' => row.push(0),
                '1'..='9' => row.push(ch as u8 - b'0'),
                _ => {
                    return Err(SearchError::invalid(format!(
                        "invalid sudoku character '{}' at line {}, cell {}",
                        ch,
                        row_idx + 1,
                        col_idx
                    )))
                }
            }
        }
        rows.push(row);
    }

    Board::from_rows(rows)
}

/// Render an open/blocked grid in the format read by [`parse_open_grid`]
pub fn open_grid_to_string(grid: &Board<bool>) -> String {
    let mut result = String::with_capacity(grid.height * (grid.width + 1));
    for row in grid.rows() {
        result.extend(row.iter().map(|&open| if open { '1' } else { '0' }));
        result.push('\n');
    }
    result
}

/// Render a sudoku board in the format read by [`parse_sudoku`]
pub fn sudoku_to_string(board: &Board<u8>) -> String {
    let mut result = String::with_capacity(board.height * (board.width + 1));
    for row in board.rows() {
        result.extend(row.iter().map(|&digit| match digit {
            0 => '.',
            d => char::from(b'0' + d),
        }));
        result.push('\n');
    }
    result
}

pub fn load_open_grid_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Board<bool>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read grid file: {}", path.as_ref().display()))?;

    parse_open_grid(&content)
        .with_context(|| format!("Failed to parse grid from file: {}", path.as_ref().display()))
}

pub fn load_sudoku_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Board<u8>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    parse_sudoku(&content)
        .with_context(|| format!("Failed to parse puzzle from file: {}", path.as_ref().display()))
}

/// Write sample puzzles used by the `setup` command
pub fn create_example_puzzles<P: AsRef<Path>>(output_dir: P) -> anyhow::Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let sudoku = "\
53..7....
6..195...
.98....6.
8...6...3
4..8.3..1
7...2...6
.6....28.
...419..5
....8..79
";
    std::fs::write(dir.join("sudoku.txt"), sudoku)
        .context("Failed to write sudoku.txt")?;

    // Same digit twice in the first row.
    let broken = sudoku.replacen("53..7....", "53..7...5", 1);
    std::fs::write(dir.join("sudoku_unsolvable.txt"), broken)
        .context("Failed to write sudoku_unsolvable.txt")?;

    std::fs::write(dir.join("maze.txt"), "111\n111\n011\n")
        .context("Failed to write maze.txt")?;

    std::fs::write(dir.join("maze_4x4.txt"), "1000\n1101\n1100\n0111\n")
        .context("Failed to write maze_4x4.txt")?;

    Ok(())
}
