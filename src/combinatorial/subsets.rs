//! Power set enumeration by include / exclude choices

use super::siblings::next_distinct;
use crate::config::SearchConfig;
use crate::engine::{search, SearchMode, SearchProblem, SearchReport};
use crate::error::Result;

/// Decision taken for the element under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Leave `values[from]` out and continue at `to`.
    Exclude { from: usize, to: usize },
    /// Take `values[from]` and continue at `from + 1`.
    Include { from: usize },
}

/// One binary decision per element; complete once every element is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerSet<T> {
    values: Vec<T>,
    distinct: bool,
    cursor: usize,
    chosen: Vec<T>,
}

impl<T: Clone> PowerSet<T> {
    pub fn new(values: Vec<T>) -> Self {
        Self {
            values,
            distinct: false,
            cursor: 0,
            chosen: Vec::new(),
        }
    }

    pub fn chosen(&self) -> &[T] {
        &self.chosen
    }
}

impl<T: Clone + Ord> PowerSet<T> {
    /// Sort the values; excluding an element also excludes every equal
    /// element after it, so equal subsets are produced once.
    pub fn without_duplicates(mut self) -> Self {
        self.values.sort();
        self.distinct = true;
        self
    }
}

impl<T: Clone + PartialEq> SearchProblem for PowerSet<T> {
    type Move = Choice;
    type Solution = Vec<T>;

    fn is_complete(&self) -> bool {
        self.cursor == self.values.len()
    }

    fn candidates(&self) -> Vec<Choice> {
        let to = if self.distinct {
            next_distinct(&self.values, self.cursor)
        } else {
            self.cursor + 1
        };
        vec![
            Choice::Exclude {
                from: self.cursor,
                to,
            },
            Choice::Include { from: self.cursor },
        ]
    }

    fn is_feasible(&self, _choice: &Choice) -> bool {
        true
    }

    fn apply(&mut self, choice: &Choice) {
        match *choice {
            Choice::Exclude { to, .. } => self.cursor = to,
            Choice::Include { from } => {
                self.chosen.push(self.values[from].clone());
                self.cursor = from + 1;
            }
        }
    }

    fn undo(&mut self, choice: &Choice) {
        match *choice {
            Choice::Exclude { from, .. } => self.cursor = from,
            Choice::Include { from } => {
                self.chosen.pop();
                self.cursor = from;
            }
        }
    }

    fn snapshot(&self) -> Vec<T> {
        self.chosen.clone()
    }

    fn name(&self) -> &str {
        "power-set"
    }
}

/// All `2^n` subsets of `values`, keeping the input order inside each one.
pub fn power_set<T>(values: &[T], config: &SearchConfig) -> Result<SearchReport<Vec<T>>>
where
    T: Clone + PartialEq + Send + Sync,
{
    let mut problem = PowerSet::new(values.to_vec());
    search(&mut problem, config, SearchMode::CollectAll)
}

/// Every distinct subset of `values`, each sorted ascending.
pub fn unique_subsets<T>(values: &[T], config: &SearchConfig) -> Result<SearchReport<Vec<T>>>
where
    T: Clone + Ord + Send + Sync,
{
    let mut problem = PowerSet::new(values.to_vec()).without_duplicates();
    search(&mut problem, config, SearchMode::CollectAll)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Searcher;
    use itertools::Itertools;

    #[test]
    fn test_power_set_order() {
        let config = SearchConfig::default();
        let report = power_set(&[1, 2, 3], &config).unwrap();
        assert_eq!(
            report.solutions,
            vec![
                vec![],
                vec![3],
                vec![2],
                vec![2, 3],
                vec![1],
                vec![1, 3],
                vec![1, 2],
                vec![1, 2, 3],
            ]
        );
    }

    #[test]
    fn test_power_set_of_empty_input() {
        let config = SearchConfig::default();
        let report = power_set::<u8>(&[], &config).unwrap();
        assert_eq!(report.solutions, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_power_set_keeps_duplicates() {
        let config = SearchConfig::default();
        let report = power_set(&['a', 'a'], &config).unwrap();
        assert_eq!(report.len(), 4);
    }

    #[test]
    fn test_unique_subsets() {
        let config = SearchConfig::default();
        let report = unique_subsets(&[2, 1, 2], &config).unwrap();
        assert_eq!(
            report.solutions,
            vec![vec![], vec![2], vec![2, 2], vec![1], vec![1, 2], vec![1, 2, 2]]
        );
        assert!(report.solutions.iter().all_unique());
    }

    #[test]
    fn test_unique_subsets_count() {
        let config = SearchConfig::default();
        // Multiplicities 3, 1, 2 give 4 * 2 * 3 distinct subsets.
        let report = unique_subsets(&[5, 5, 5, 7, 9, 9], &config).unwrap();
        assert_eq!(report.len(), 24);
        assert!(report.solutions.iter().all_unique());
    }

    #[test]
    fn test_state_restored() {
        let config = SearchConfig::default();
        let mut problem = PowerSet::new(vec!["x", "y", "z"]);
        let before = problem.clone();
        Searcher::collect_all(&config).run(&mut problem).unwrap();
        assert_eq!(problem, before);
        assert!(problem.chosen().is_empty());
    }
}
