//! N-Queens placement, one queen per row

use super::Board;
use crate::config::SearchConfig;
use crate::engine::{search, SearchMode, SearchProblem, SearchReport};
use crate::error::{Result, SearchError};
use serde::Serialize;
use std::fmt;

/// A completed placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueensSolution {
    /// Board rows, `'Q'` for a queen and `'.'` for an empty square
    pub rows: Vec<String>,
    /// Queen column for each row
    pub columns: Vec<usize>,
}

impl fmt::Display for QueensSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Queens are placed row by row; a move is the column for the next row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NQueens {
    board: Board<bool>,
    columns: Vec<usize>,
}

impl NQueens {
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SearchError::invalid("board size must be at least 1"));
        }
        Ok(Self {
            board: Board::new(n, n, false),
            columns: Vec::with_capacity(n),
        })
    }

    pub fn size(&self) -> usize {
        self.board.width
    }

    pub fn board(&self) -> &Board<bool> {
        &self.board
    }

    fn row(&self) -> usize {
        self.columns.len()
    }

    /// Walk from `cell` in direction `(d_row, d_col)` looking for a queen.
    fn attacked_along(&self, cell: (usize, usize), d_row: isize, d_col: isize) -> bool {
        let mut current = cell;
        while let Some(next) = self.board.offset(current, d_row, d_col) {
            if self.board[next] {
                return true;
            }
            current = next;
        }
        false
    }
}

impl SearchProblem for NQueens {
    type Move = usize;
    type Solution = QueensSolution;

    fn is_complete(&self) -> bool {
        self.row() == self.size()
    }

    fn candidates(&self) -> Vec<usize> {
        (0..self.size()).collect()
    }

    fn is_feasible(&self, &col: &usize) -> bool {
        // Every placed queen sits in an earlier row, so only upward scans matter.
        let cell = (self.row(), col);
        !self.attacked_along(cell, -1, 0)
            && !self.attacked_along(cell, -1, -1)
            && !self.attacked_along(cell, -1, 1)
    }

    fn apply(&mut self, &col: &usize) {
        let row = self.row();
        self.board[(row, col)] = true;
        self.columns.push(col);
    }

    fn undo(&mut self, &col: &usize) {
        self.columns.pop();
        let row = self.row();
        self.board[(row, col)] = false;
    }

    fn snapshot(&self) -> QueensSolution {
        QueensSolution {
            rows: self
                .board
                .rows()
                .map(|row| row.iter().map(|&queen| if queen { 'Q' } else { '.' }).collect())
                .collect(),
            columns: self.columns.clone(),
        }
    }

    fn name(&self) -> &str {
        "n-queens"
    }
}

/// Every placement of `n` non-attacking queens on an `n x n` board,
/// ordered by the column of the first row, then the second, and so on.
pub fn solve_n_queens(n: usize, config: &SearchConfig) -> Result<SearchReport<QueensSolution>> {
    let mut problem = NQueens::new(n)?;
    search(&mut problem, config, SearchMode::CollectAll)
}

pub fn count_n_queens(n: usize, config: &SearchConfig) -> Result<usize> {
    Ok(solve_n_queens(n, config)?.len())
}
