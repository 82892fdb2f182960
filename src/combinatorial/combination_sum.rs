//! Combinations of a value sequence that add up to a target

use super::siblings::distinct_sibling_starts;
use crate::config::SearchConfig;
use crate::engine::{search, SearchMode, SearchProblem, SearchReport};
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Where the cursor goes after picking the value at index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePolicy {
    /// Next pick starts at `i + 1`. Each element is used at most once.
    AdvanceOnly,
    /// Next pick starts at `i`. An element may be picked again.
    RepeatAllowed,
}

/// Picking `values[index]` while the cursor was at `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub index: usize,
    pub from: usize,
}

/// Search state: cursor into an immutable value sequence plus the amount
/// still missing from the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationSum {
    values: Vec<i64>,
    policy: MovePolicy,
    distinct: bool,
    size: Option<usize>,
    sorted: bool,
    cursor: usize,
    remaining: i64,
    chosen: Vec<i64>,
}

impl CombinationSum {
    /// Values must be strictly positive.
    pub fn new(values: Vec<i64>, target: i64, policy: MovePolicy) -> Result<Self> {
        if let Some(bad) = values.iter().find(|&&value| value <= 0) {
            return Err(SearchError::invalid(format!(
                "combination values must be positive, got {}",
                bad
            )));
        }

        let sorted = values.windows(2).all(|pair| pair[0] <= pair[1]);
        Ok(Self {
            values,
            policy,
            distinct: false,
            size: None,
            sorted,
            cursor: 0,
            remaining: target,
            chosen: Vec::new(),
        })
    }

    /// Sort the values and never branch twice on equal siblings, so no
    /// combination is produced more than once.
    pub fn without_duplicates(mut self) -> Self {
        self.values.sort_unstable();
        self.sorted = true;
        self.distinct = true;
        self
    }

    /// Only accept combinations of exactly `size` picks.
    pub fn with_size(mut self, size: usize) -> Result<Self> {
        if self.policy == MovePolicy::AdvanceOnly && size > self.values.len() {
            return Err(SearchError::invalid(format!(
                "cannot pick {} of {} values without repetition",
                size,
                self.values.len()
            )));
        }
        self.size = Some(size);
        Ok(self)
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn chosen(&self) -> &[i64] {
        &self.chosen
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }
}

impl SearchProblem for CombinationSum {
    type Move = Pick;
    type Solution = Vec<i64>;

    fn is_complete(&self) -> bool {
        self.remaining == 0 && self.size.map_or(true, |size| self.chosen.len() == size)
    }

    fn candidates(&self) -> Vec<Pick> {
        let indices: Vec<usize> = if self.distinct {
            distinct_sibling_starts(&self.values, self.cursor)
        } else {
            (self.cursor..self.values.len()).collect()
        };

        // Sorted values only grow, so the first overshoot ends the loop.
        indices
            .into_iter()
            .take_while(|&index| !self.sorted || self.values[index] <= self.remaining)
            .map(|index| Pick {
                index,
                from: self.cursor,
            })
            .collect()
    }

    fn is_feasible(&self, pick: &Pick) -> bool {
        self.values[pick.index] <= self.remaining
            && self.size.map_or(true, |size| self.chosen.len() < size)
    }

    fn apply(&mut self, pick: &Pick) {
        let value = self.values[pick.index];
        self.chosen.push(value);
        self.remaining -= value;
        self.cursor = match self.policy {
            MovePolicy::AdvanceOnly => pick.index + 1,
            MovePolicy::RepeatAllowed => pick.index,
        };
    }

    fn undo(&mut self, pick: &Pick) {
        if let Some(value) = self.chosen.pop() {
            self.remaining += value;
        }
        self.cursor = pick.from;
    }

    fn snapshot(&self) -> Vec<i64> {
        self.chosen.clone()
    }

    fn name(&self) -> &str {
        "combination-sum"
    }
}

/// Every multiset of `values` summing to `target`, each value usable any
/// number of times.
pub fn combination_sum(
    values: &[i64],
    target: i64,
    config: &SearchConfig,
) -> Result<SearchReport<Vec<i64>>> {
    let mut problem = CombinationSum::new(values.to_vec(), target, MovePolicy::RepeatAllowed)?;
    search(&mut problem, config, SearchMode::CollectAll)
}

/// Every distinct combination of `values` summing to `target`, each element
/// used at most once. Combinations come out in ascending order.
pub fn combination_sum_unique(
    values: &[i64],
    target: i64,
    config: &SearchConfig,
) -> Result<SearchReport<Vec<i64>>> {
    let mut problem =
        CombinationSum::new(values.to_vec(), target, MovePolicy::AdvanceOnly)?.without_duplicates();
    search(&mut problem, config, SearchMode::CollectAll)
}

/// Every choice of exactly `size` elements of `values` (by position) that
/// sums to `target`.
pub fn combinations_with_size(
    values: &[i64],
    size: usize,
    target: i64,
    config: &SearchConfig,
) -> Result<SearchReport<Vec<i64>>> {
    let mut problem =
        CombinationSum::new(values.to_vec(), target, MovePolicy::AdvanceOnly)?.with_size(size)?;
    search(&mut problem, config, SearchMode::CollectAll)
}

/// A subsequence of `values` summing to `target`, if any.
pub fn has_subset_with_sum(
    values: &[i64],
    target: i64,
    config: &SearchConfig,
) -> Result<Option<Vec<i64>>> {
    let mut problem = CombinationSum::new(values.to_vec(), target, MovePolicy::AdvanceOnly)?;
    let report = search(&mut problem, config, SearchMode::FirstSolution)?;
    Ok(report.into_first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Outcome, Searcher};

    #[test]
    fn test_repeat_allowed() {
        let config = SearchConfig::default();
        let report = combination_sum(&[2, 3, 6, 7], 7, &config).unwrap();
        assert_eq!(report.solutions, vec![vec![2, 2, 3], vec![7]]);
    }

    #[test]
    fn test_repeat_allowed_unsorted_input() {
        let config = SearchConfig::default();
        let mut solutions = combination_sum(&[3, 2], 6, &config).unwrap().into_solutions();
        solutions.sort();
        assert_eq!(solutions, vec![vec![2, 2, 2], vec![3, 3]]);
    }

    #[test]
    fn test_duplicates_suppressed() {
        let config = SearchConfig::default();
        let report = combination_sum_unique(&[10, 1, 2, 7, 6, 1, 5], 8, &config).unwrap();
        assert_eq!(
            report.solutions,
            vec![vec![1, 1, 6], vec![1, 2, 5], vec![1, 7], vec![2, 6]]
        );
        assert_eq!(report.solutions.iter().filter(|s| **s == vec![1, 7]).count(), 1);
        assert_eq!(report.solutions.iter().filter(|s| **s == vec![1, 1, 6]).count(), 1);
    }

    #[test]
    fn test_fixed_size() {
        let config = SearchConfig::default();
        let values: Vec<i64> = (1..=9).collect();
        let report = combinations_with_size(&values, 3, 9, &config).unwrap();
        assert_eq!(report.solutions, vec![vec![1, 2, 6], vec![1, 3, 5], vec![2, 3, 4]]);
    }

    #[test]
    fn test_size_larger_than_input() {
        let config = SearchConfig::default();
        let err = combinations_with_size(&[1, 2, 3], 4, 6, &config).unwrap_err();
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }

    #[test]
    fn test_non_positive_values_rejected() {
        let config = SearchConfig::default();
        assert!(combination_sum(&[0, 1], 3, &config).is_err());
        assert!(combination_sum_unique(&[-2, 4], 2, &config).is_err());
    }

    #[test]
    fn test_target_edges() {
        let config = SearchConfig::default();

        let zero = combination_sum(&[2, 3], 0, &config).unwrap();
        assert_eq!(zero.solutions, vec![Vec::<i64>::new()]);

        let negative = combination_sum(&[2, 3], -4, &config).unwrap();
        assert!(negative.is_empty());
        assert_eq!(negative.outcome, Outcome::Exhausted);

        let unreachable = combination_sum(&[4, 6], 7, &config).unwrap();
        assert!(unreachable.is_empty());
    }

    #[test]
    fn test_subset_sum_exists() {
        let config = SearchConfig::default();
        assert_eq!(
            has_subset_with_sum(&[1, 2, 3, 4], 5, &config).unwrap(),
            Some(vec![1, 4])
        );
        assert_eq!(has_subset_with_sum(&[4], 4, &config).unwrap(), Some(vec![4]));
        assert_eq!(has_subset_with_sum(&[2, 4, 6], 5, &config).unwrap(), None);
    }

    #[test]
    fn test_state_restored() {
        let config = SearchConfig::default();
        let mut problem = CombinationSum::new(vec![10, 1, 2, 7, 6, 1, 5], 8, MovePolicy::AdvanceOnly)
            .unwrap()
            .without_duplicates();
        let before = problem.clone();
        let report = Searcher::collect_all(&config).run(&mut problem).unwrap();
        assert_eq!(report.len(), 4);
        assert_eq!(problem, before);
        assert!(problem.chosen().is_empty());
        assert_eq!(problem.remaining(), 8);
    }

    #[test]
    fn test_results_do_not_alias_state() {
        let config = SearchConfig::default();
        let mut problem = CombinationSum::new(vec![1, 2], 3, MovePolicy::RepeatAllowed).unwrap();
        let report = Searcher::collect_all(&config).run(&mut problem).unwrap();
        assert_eq!(report.solutions, vec![vec![1, 1, 1], vec![1, 2]]);
    }

    #[test]
    fn test_deep_target_reports_stack_exhaustion() {
        let config = SearchConfig::default();
        let err = combination_sum(&[1], 20_000, &config).unwrap_err();
        assert_eq!(err, SearchError::StackExhaustion { limit: 10_000 });

        let parallel = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        let err = combination_sum(&[1, 2], 30_000, &parallel).unwrap_err();
        assert_eq!(err, SearchError::StackExhaustion { limit: 10_000 });
    }

    #[test]
    fn test_deep_target_within_limit() {
        let config = SearchConfig::default();
        let report = combination_sum(&[1], 9_000, &config).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.statistics.max_depth, 9_000);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = SearchConfig::default();
        let parallel = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        let values = [2, 3, 5, 7, 11];
        assert_eq!(
            combination_sum(&values, 20, &parallel).unwrap().solutions,
            combination_sum(&values, 20, &sequential).unwrap().solutions
        );
    }
}
