//! Grid puzzles: constraint placement (N-Queens, Sudoku) and path
//! enumeration over a shared [`Board`].

pub mod board;
pub mod io;
pub mod maze;
pub mod queens;
pub mod sudoku;

pub use board::Board;
pub use io::{
    create_example_puzzles, load_open_grid_from_file, load_sudoku_from_file, open_grid_to_string,
    parse_open_grid, parse_sudoku, sudoku_to_string,
};
pub use maze::{find_paths, find_paths_in, Direction, Maze};
pub use queens::{count_n_queens, solve_n_queens, NQueens, QueensSolution};
pub use sudoku::{is_valid_solution, solve_sudoku, Sudoku};
