//! Combinations over a small ascending alphabet `1..=max`

use crate::config::SearchConfig;
use crate::engine::{search, SearchMode, SearchProblem, SearchReport};
use crate::error::{Result, SearchError};

/// Largest value in the default alphabet.
pub const DIGIT_MAX: u32 = 9;

/// Pick `count` distinct values from `1..=max` that sum to a target.
///
/// Values are picked in ascending order, so each combination is generated
/// once and the candidate loop can stop at the first value that overshoots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedAlphabet {
    max: u32,
    count: usize,
    remaining: i64,
    chosen: Vec<u32>,
}

impl BoundedAlphabet {
    pub fn new(max: u32, count: usize, target: i64) -> Result<Self> {
        if max == 0 {
            return Err(SearchError::invalid("alphabet must contain at least one value"));
        }
        if count > max as usize {
            return Err(SearchError::invalid(format!(
                "cannot pick {} distinct values from 1..={}",
                count, max
            )));
        }

        Ok(Self {
            max,
            count,
            remaining: target,
            chosen: Vec::with_capacity(count),
        })
    }

    pub fn chosen(&self) -> &[u32] {
        &self.chosen
    }
}

impl SearchProblem for BoundedAlphabet {
    type Move = u32;
    type Solution = Vec<u32>;

    fn is_complete(&self) -> bool {
        self.remaining == 0 && self.chosen.len() == self.count
    }

    fn candidates(&self) -> Vec<u32> {
        let first = self.chosen.last().map_or(1, |last| last + 1);
        (first..=self.max)
            .take_while(|&value| i64::from(value) <= self.remaining)
            .collect()
    }

    fn is_feasible(&self, _value: &u32) -> bool {
        self.chosen.len() < self.count
    }

    fn apply(&mut self, value: &u32) {
        self.chosen.push(*value);
        self.remaining -= i64::from(*value);
    }

    fn undo(&mut self, value: &u32) {
        self.chosen.pop();
        self.remaining += i64::from(*value);
    }

    fn snapshot(&self) -> Vec<u32> {
        self.chosen.clone()
    }

    fn name(&self) -> &str {
        "bounded-alphabet"
    }
}

/// Every set of `count` distinct digits 1-9 that sums to `target`.
pub fn digit_combinations(
    count: usize,
    target: i64,
    config: &SearchConfig,
) -> Result<SearchReport<Vec<u32>>> {
    let mut problem = BoundedAlphabet::new(DIGIT_MAX, count, target)?;
    search(&mut problem, config, SearchMode::CollectAll)
}
