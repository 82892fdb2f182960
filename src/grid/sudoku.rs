//! 9x9 Sudoku, first solution only

use super::Board;
use crate::config::SearchConfig;
use crate::engine::{search, SearchMode, SearchProblem, SearchReport};
use crate::error::{Result, SearchError};
use itertools::Itertools;

pub const SIZE: usize = 9;
pub const BOX: usize = 3;
pub const EMPTY: u8 = 0;

/// Write `digit` into the cell at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub row: usize,
    pub col: usize,
    pub digit: u8,
}

/// Puzzle state: the board plus the empty cells in row-major order.
/// Cells before `filled` in `empties` currently hold a digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    board: Board<u8>,
    empties: Vec<(usize, usize)>,
    filled: usize,
}

impl Sudoku {
    pub fn new(board: Board<u8>) -> Result<Self> {
        if board.width != SIZE || board.height != SIZE {
            return Err(SearchError::invalid(format!(
                "sudoku board must be {}x{}, got {}x{}",
                SIZE, SIZE, board.height, board.width
            )));
        }
        if let Some(bad) = board.cells.iter().find(|&&digit| digit > 9) {
            return Err(SearchError::invalid(format!(
                "sudoku cell value {} is outside 0-9",
                bad
            )));
        }

        let empties = (0..SIZE)
            .cartesian_product(0..SIZE)
            .filter(|&cell| board[cell] == EMPTY)
            .collect();

        Ok(Self {
            board,
            empties,
            filled: 0,
        })
    }

    pub fn board(&self) -> &Board<u8> {
        &self.board
    }

    /// Whether `digit` already appears in the row, column or box of `(row, col)`
    fn conflicts(&self, row: usize, col: usize, digit: u8) -> bool {
        let box_row = row / BOX * BOX;
        let box_col = col / BOX * BOX;
        (0..SIZE).any(|i| {
            self.board[(row, i)] == digit
                || self.board[(i, col)] == digit
                || self.board[(box_row + i / BOX, box_col + i % BOX)] == digit
        })
    }

    /// Whether two givens already share a row, column or box
    fn givens_conflict(&self) -> bool {
        let givens = |cells: Vec<(usize, usize)>| {
            cells
                .into_iter()
                .map(|cell| self.board[cell])
                .filter(|&digit| digit != EMPTY)
                .all_unique()
        };
        !units().all(givens)
    }
}

/// The 27 rows, columns and boxes of the board
fn units() -> impl Iterator<Item = Vec<(usize, usize)>> {
    let rows = (0..SIZE).map(|r| (0..SIZE).map(|c| (r, c)).collect());
    let cols = (0..SIZE).map(|c| (0..SIZE).map(|r| (r, c)).collect());
    let boxes = (0..SIZE).map(|b| {
        let (top, left) = (b / BOX * BOX, b % BOX * BOX);
        (0..SIZE).map(|i| (top + i / BOX, left + i % BOX)).collect()
    });
    rows.chain(cols).chain(boxes)
}

impl SearchProblem for Sudoku {
    type Move = Fill;
    type Solution = Board<u8>;

    fn is_complete(&self) -> bool {
        self.filled == self.empties.len()
    }

    fn candidates(&self) -> Vec<Fill> {
        let (row, col) = self.empties[self.filled];
        (1..=9).map(|digit| Fill { row, col, digit }).collect()
    }

    fn is_feasible(&self, fill: &Fill) -> bool {
        !self.conflicts(fill.row, fill.col, fill.digit)
    }

    fn apply(&mut self, fill: &Fill) {
        self.board[(fill.row, fill.col)] = fill.digit;
        self.filled += 1;
    }

    fn undo(&mut self, fill: &Fill) {
        self.board[(fill.row, fill.col)] = EMPTY;
        self.filled -= 1;
    }

    fn snapshot(&self) -> Board<u8> {
        self.board.clone()
    }

    fn name(&self) -> &str {
        "sudoku"
    }
}

/// Solve `board` (0 marks an empty cell).
///
/// The report holds the completed board, or no solution when the puzzle is
/// unsolvable. Givens that already break a rule are reported unsolvable
/// without searching.
pub fn solve_sudoku(board: &Board<u8>, config: &SearchConfig) -> Result<SearchReport<Board<u8>>> {
    let mut problem = Sudoku::new(board.clone())?;
    if problem.givens_conflict() {
        tracing::debug!("sudoku givens conflict, skipping search");
        return Ok(SearchReport::exhausted());
    }
    search(&mut problem, config, SearchMode::FirstSolution)
}

/// Whether `board` is a completed grid with every row, column and box
/// holding 1-9 exactly once.
pub fn is_valid_solution(board: &Board<u8>) -> bool {
    if board.width != SIZE || board.height != SIZE {
        return false;
    }
    if board.cells.iter().any(|&digit| !(1..=9).contains(&digit)) {
        return false;
    }
    units().all(|cells| cells.into_iter().map(|cell| board[cell]).all_unique())
}
