//! Backtracking search engine
//!
//! A generic choose / explore / un-choose search over problems that mutate
//! their state in place, with combinatorial generators (subsets, target-sum
//! combinations, palindrome partitions) and grid solvers (N-Queens, Sudoku,
//! maze paths) built on top of it.

pub mod combinatorial;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod utils;

pub use config::{SearchConfig, Settings};
pub use engine::{search, Outcome, SearchMode, SearchProblem, SearchReport, SearchStatistics, Searcher};
pub use error::{Result, SearchError};
