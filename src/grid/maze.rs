//! Simple path enumeration on an open/blocked grid

use super::Board;
use crate::config::SearchConfig;
use crate::engine::{search, SearchMode, SearchProblem, SearchReport};
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Right,
    Up,
    Left,
}

impl Direction {
    /// Order in which moves are tried; it fixes the order of the paths found
    pub const ALL: [Direction; 4] = [Direction::Down, Direction::Right, Direction::Up, Direction::Left];

    pub fn letter(self) -> char {
        match self {
            Direction::Down => 'D',
            Direction::Right => 'R',
            Direction::Up => 'U',
            Direction::Left => 'L',
        }
    }

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// A step from `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub direction: Direction,
    pub from: (usize, usize),
    pub to: (usize, usize),
}

/// Walker state on a square grid.
///
/// The cell under the walker is marked visited while its frame is open, so
/// a path never crosses its own prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    open: Board<bool>,
    visited: Board<bool>,
    position: (usize, usize),
    destination: (usize, usize),
    path: String,
}

impl Maze {
    /// Walk from the top-left corner to the bottom-right corner
    pub fn new(open: Board<bool>) -> Result<Self> {
        let n = open.side()?;
        Self::with_endpoints(open, (0, 0), (n - 1, n - 1))
    }

    pub fn with_endpoints(
        open: Board<bool>,
        start: (usize, usize),
        destination: (usize, usize),
    ) -> Result<Self> {
        let n = open.side()?;
        for (label, (row, col)) in [("start", start), ("destination", destination)] {
            if !open.contains(row, col) {
                return Err(SearchError::invalid(format!(
                    "{} ({}, {}) is outside the {}x{} grid",
                    label, row, col, n, n
                )));
            }
        }

        Ok(Self {
            visited: Board::new(n, n, false),
            open,
            position: start,
            destination,
            path: String::new(),
        })
    }

    /// Whether both endpoints are open cells
    pub fn endpoints_open(&self) -> bool {
        self.open[self.position] && self.open[self.destination]
    }

    pub fn visited(&self) -> &Board<bool> {
        &self.visited
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl SearchProblem for Maze {
    type Move = Step;
    type Solution = String;

    fn is_complete(&self) -> bool {
        self.position == self.destination
    }

    fn candidates(&self) -> Vec<Step> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                let (d_row, d_col) = direction.delta();
                let to = self.open.offset(self.position, d_row, d_col)?;
                Some(Step {
                    direction,
                    from: self.position,
                    to,
                })
            })
            .collect()
    }

    fn is_feasible(&self, step: &Step) -> bool {
        self.open[step.to] && !self.visited[step.to]
    }

    fn apply(&mut self, step: &Step) {
        self.path.push(step.direction.letter());
        self.position = step.to;
    }

    fn undo(&mut self, step: &Step) {
        self.path.pop();
        self.position = step.from;
    }

    fn snapshot(&self) -> String {
        self.path.clone()
    }

    fn enter(&mut self) {
        self.visited[self.position] = true;
    }

    fn leave(&mut self) {
        self.visited[self.position] = false;
    }

    fn name(&self) -> &str {
        "maze-paths"
    }
}

/// Every simple path from the top-left to the bottom-right corner of `open`,
/// as direction letters. A blocked endpoint yields no paths.
pub fn find_paths(open: &Board<bool>, config: &SearchConfig) -> Result<SearchReport<String>> {
    let mut maze = Maze::new(open.clone())?;
    find_paths_in(&mut maze, config)
}

/// Enumerate the paths of an already configured maze
pub fn find_paths_in(maze: &mut Maze, config: &SearchConfig) -> Result<SearchReport<String>> {
    if !maze.endpoints_open() {
        tracing::debug!("maze endpoint is blocked, skipping search");
        return Ok(SearchReport::exhausted());
    }
    search(maze, config, SearchMode::CollectAll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Searcher;
    use crate::grid::io::parse_open_grid;
    use itertools::Itertools;
    use std::collections::HashSet;

    fn three_by_three() -> Board<bool> {
        parse_open_grid("111\n111\n011\n").unwrap()
    }

    /// Replay `path` on `open`, checking bounds, blocked cells and revisits.
    fn walk(open: &Board<bool>, start: (usize, usize), path: &str) -> Option<(usize, usize)> {
        let mut seen = HashSet::from([start]);
        let mut position = start;
        for letter in path.chars() {
            let direction = Direction::ALL.into_iter().find(|d| d.letter() == letter)?;
            let (d_row, d_col) = direction.delta();
            position = open.offset(position, d_row, d_col)?;
            if !open[position] || !seen.insert(position) {
                return None;
            }
        }
        Some(position)
    }

    #[test]
    fn test_paths_with_blocked_corner() {
        let config = SearchConfig::default();
        let open = three_by_three();
        let report = find_paths(&open, &config).unwrap();

        assert_eq!(
            report.solutions,
            vec!["DRDR", "DRRD", "DRURDD", "RDDR", "RDRD", "RRDD", "RRDLDR"]
        );
        assert!(report.solutions.iter().all_unique());
        for path in &report.solutions {
            assert_eq!(walk(&open, (0, 0), path), Some((2, 2)), "path {}", path);
        }
        assert!(report.solutions.contains(&"DRURDD".to_string()));
        assert!(report
            .solutions
            .iter()
            .any(|path| path.contains('U') && path.contains('D')));
    }

    #[test]
    fn test_open_two_by_two() {
        let config = SearchConfig::default();
        let open = Board::new(2, 2, true);
        let report = find_paths(&open, &config).unwrap();
        assert_eq!(report.solutions, vec!["DR".to_string(), "RD".to_string()]);
    }

    #[test]
    fn test_blocked_endpoints() {
        let config = SearchConfig::default();

        let mut blocked_start = three_by_three();
        blocked_start[(0, 0)] = false;
        assert!(find_paths(&blocked_start, &config).unwrap().is_empty());

        let mut blocked_end = three_by_three();
        blocked_end[(2, 2)] = false;
        assert!(find_paths(&blocked_end, &config).unwrap().is_empty());
    }

    #[test]
    fn test_walled_off_destination() {
        let config = SearchConfig::default();
        let open = parse_open_grid("110\n100\n001\n").unwrap();
        let report = find_paths(&open, &config).unwrap();
        assert!(report.is_empty());
        assert_eq!(report.outcome, crate::engine::Outcome::Exhausted);
    }

    #[test]
    fn test_start_is_destination() {
        let config = SearchConfig::default();
        let open = Board::new(1, 1, true);
        let report = find_paths(&open, &config).unwrap();
        assert_eq!(report.solutions, vec![String::new()]);

        let mut maze = Maze::with_endpoints(three_by_three(), (1, 1), (1, 1)).unwrap();
        let report = find_paths_in(&mut maze, &config).unwrap();
        assert_eq!(report.solutions, vec![String::new()]);
    }

    #[test]
    fn test_custom_endpoints() {
        let config = SearchConfig::default();
        let mut maze = Maze::with_endpoints(three_by_three(), (2, 2), (0, 0)).unwrap();
        let report = find_paths_in(&mut maze, &config).unwrap();
        assert!(report.solutions.contains(&"UULL".to_string()));
        for path in &report.solutions {
            assert_eq!(walk(&three_by_three(), (2, 2), path), Some((0, 0)));
        }
    }

    #[test]
    fn test_invalid_grids() {
        assert!(matches!(
            Maze::new(Board::new(3, 2, true)),
            Err(SearchError::InvalidInput(_))
        ));
        assert!(Maze::with_endpoints(three_by_three(), (0, 0), (3, 0)).is_err());
    }

    #[test]
    fn test_marks_restored() {
        let config = SearchConfig::default();
        let mut maze = Maze::new(Board::new(4, 4, true)).unwrap();
        let before = maze.clone();
        let report = Searcher::collect_all(&config).run(&mut maze).unwrap();
        assert!(!report.is_empty());
        assert_eq!(maze, before);
        assert!(maze.visited().cells.iter().all(|&seen| !seen));
        assert!(maze.path().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        let open = Board::new(4, 4, true);
        let sequential = find_paths(&open, &SearchConfig::default()).unwrap();
        let split = find_paths(&open, &parallel).unwrap();
        assert_eq!(split.solutions, sequential.solutions);
    }
}
