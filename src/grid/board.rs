//! Rectangular board shared by the grid solvers

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Row-major grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board<T> {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<T>,
}

impl<T: Clone> Board<T> {
    /// Create a board with every cell set to `fill`
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Create a board from rows of equal length
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(SearchError::invalid("grid cannot be empty"));
        }

        let height = rows.len();
        let width = rows[0].len();

        if width == 0 {
            return Err(SearchError::invalid("grid width cannot be zero"));
        }

        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(SearchError::invalid(format!(
                    "row {} has length {}, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }
}

impl<T> Board<T> {
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// The cell `(row + d_row, col + d_col)` if it lies on the board
    pub fn offset(&self, (row, col): (usize, usize), d_row: isize, d_col: isize) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(d_row)?;
        let col = col.checked_add_signed(d_col)?;
        self.contains(row, col).then_some((row, col))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Side length of a non-empty square board
    pub fn side(&self) -> Result<usize> {
        if self.width == 0 || self.height == 0 {
            return Err(SearchError::invalid("grid cannot be empty"));
        }
        if !self.is_square() {
            return Err(SearchError::invalid(format!(
                "grid must be square, got {}x{}",
                self.height, self.width
            )));
        }
        Ok(self.width)
    }
}

impl<T> Index<(usize, usize)> for Board<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.cells[Board::index(self, row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for Board<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let idx = Board::index(self, row, col);
        &mut self.cells[idx]
    }
}
