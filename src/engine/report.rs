//! Results and statistics of a search run

use serde::Serialize;
use std::time::Duration;

/// How a frame (or a whole run) finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The subtree recorded at least one solution and the search goes on.
    Continue,
    /// The search must stop: first solution found, or the cap was reached.
    Found,
    /// The subtree recorded nothing.
    Exhausted,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Frames entered, terminal ones included.
    pub frames: u64,
    /// Candidates rejected by the feasibility check.
    pub pruned: u64,
    /// Solutions recorded.
    pub solutions: u64,
    /// Deepest frame reached (root = 0).
    pub max_depth: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl SearchStatistics {
    /// Fold the counters of an independently searched branch into these.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.frames += other.frames;
        self.pruned += other.pruned;
        self.solutions += other.solutions;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Frames: {}", self.frames)?;
        writeln!(f, "  Pruned candidates: {}", self.pruned)?;
        writeln!(f, "  Solutions: {}", self.solutions)?;
        writeln!(f, "  Deepest frame: {}", self.max_depth)?;
        writeln!(f, "  Elapsed: {:.3}s", self.elapsed.as_secs_f64())?;
        Ok(())
    }
}

/// Ordered solutions of one top-level search, owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport<S> {
    pub solutions: Vec<S>,
    pub outcome: Outcome,
    pub statistics: SearchStatistics,
}

impl<S> SearchReport<S> {
    pub fn new(solutions: Vec<S>, outcome: Outcome, statistics: SearchStatistics) -> Self {
        Self {
            solutions,
            outcome,
            statistics,
        }
    }

    /// Report for an input rejected as unsolvable before searching.
    pub fn exhausted() -> Self {
        Self::new(Vec::new(), Outcome::Exhausted, SearchStatistics::default())
    }

    /// Whether at least one solution was found.
    pub fn is_success(&self) -> bool {
        !self.solutions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn first(&self) -> Option<&S> {
        self.solutions.first()
    }

    pub fn into_solutions(self) -> Vec<S> {
        self.solutions
    }

    pub fn into_first(self) -> Option<S> {
        self.solutions.into_iter().next()
    }

    /// Convert every solution, keeping outcome and statistics.
    pub fn map<T>(self, f: impl FnMut(S) -> T) -> SearchReport<T> {
        SearchReport {
            solutions: self.solutions.into_iter().map(f).collect(),
            outcome: self.outcome,
            statistics: self.statistics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_report() {
        let report: SearchReport<u8> = SearchReport::exhausted();
        assert!(!report.is_success());
        assert!(report.is_empty());
        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(report.statistics.frames, 0);
    }

    #[test]
    fn test_statistics_merge() {
        let mut total = SearchStatistics {
            frames: 4,
            pruned: 1,
            solutions: 1,
            max_depth: 2,
            elapsed: Duration::ZERO,
        };
        let branch = SearchStatistics {
            frames: 6,
            pruned: 2,
            solutions: 0,
            max_depth: 5,
            elapsed: Duration::ZERO,
        };
        total.merge(&branch);
        assert_eq!(total.frames, 10);
        assert_eq!(total.pruned, 3);
        assert_eq!(total.solutions, 1);
        assert_eq!(total.max_depth, 5);
    }

    #[test]
    fn test_map_keeps_outcome() {
        let report = SearchReport::new(vec![1, 2], Outcome::Continue, SearchStatistics::default());
        let mapped = report.map(|n| n * 10);
        assert_eq!(mapped.solutions, vec![10, 20]);
        assert_eq!(mapped.outcome, Outcome::Continue);
    }
}
