//! Backtracking search engine.
//!
//! The engine walks a [`SearchProblem`] depth first. At each frame it either
//! records a snapshot of a complete state, or tries the frame's candidates in
//! order: feasible moves are applied, explored recursively and undone before
//! the next sibling is tried.
//!
//! State is mutated in place and never cloned per branch. Each mutation is
//! held by a guard from [`guard`], which reverts it when the frame unwinds for
//! any reason, including a stop signal or a depth error.
//!
//! The recursion never runs on the caller's stack: it is hosted on a thread
//! (or a rayon pool) whose stack is sized from `max_depth`, so going too deep
//! surfaces as [`SearchError::StackExhaustion`] instead of a stack overflow.
//!
//! Two modes are supported:
//! - [`SearchMode::CollectAll`] exhausts the tree (optionally capped by
//!   `max_solutions`).
//! - [`SearchMode::FirstSolution`] stops the whole traversal as soon as one
//!   solution is recorded; frames propagate [`Outcome::Found`] upward.

pub mod guard;
pub mod problem;
pub mod report;

pub use guard::{AppliedMove, EnteredFrame};
pub use problem::SearchProblem;
pub use report::{Outcome, SearchReport, SearchStatistics};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Stack reserved for each search frame.
const FRAME_STACK_BYTES: usize = 4 * 1024;

/// Stack reserved on top of the frames for the thread itself.
const BASE_STACK_BYTES: usize = 1024 * 1024;

/// Stack size of a thread that must hold `max_depth` search frames.
pub fn stack_size_for(max_depth: usize) -> usize {
    max_depth
        .saturating_add(1)
        .saturating_mul(FRAME_STACK_BYTES)
        .saturating_add(BASE_STACK_BYTES)
}

/// Termination contract of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    CollectAll,
    FirstSolution,
}

/// Run `problem` under `config`, on the rayon pool when the config asks for
/// it and the mode allows it.
pub fn search<P>(
    problem: &mut P,
    config: &SearchConfig,
    mode: SearchMode,
) -> Result<SearchReport<P::Solution>>
where
    P: SearchProblem + Clone + Send + Sync,
    P::Move: Send,
    P::Solution: Send,
{
    let searcher = Searcher::new(config, mode);
    if config.parallel && mode == SearchMode::CollectAll {
        searcher.run_parallel(problem)
    } else {
        searcher.run(problem)
    }
}

/// Drives the recursion for one top-level invocation.
pub struct Searcher<'c> {
    config: &'c SearchConfig,
    mode: SearchMode,
    statistics: SearchStatistics,
    /// Parallel branch index, with the shared index of the earliest branch
    /// that filled the solution cap on its own.
    cutoff: Option<(&'c AtomicUsize, usize)>,
}

impl<'c> Searcher<'c> {
    pub fn new(config: &'c SearchConfig, mode: SearchMode) -> Self {
        Self {
            config,
            mode,
            statistics: SearchStatistics::default(),
            cutoff: None,
        }
    }

    pub fn collect_all(config: &'c SearchConfig) -> Self {
        Self::new(config, SearchMode::CollectAll)
    }

    pub fn first_solution(config: &'c SearchConfig) -> Self {
        Self::new(config, SearchMode::FirstSolution)
    }

    fn branch(config: &'c SearchConfig, cutoff: &'c AtomicUsize, index: usize) -> Self {
        Self {
            cutoff: Some((cutoff, index)),
            ..Self::collect_all(config)
        }
    }

    /// Search `problem` from its current state.
    ///
    /// The recursion runs on a scoped thread sized for `max_depth` frames.
    /// On return, including on error, `problem` is back in the state it was
    /// passed in.
    pub fn run<P>(self, problem: &mut P) -> Result<SearchReport<P::Solution>>
    where
        P: SearchProblem + Send,
        P::Solution: Send,
    {
        let stack_size = stack_size_for(self.config.max_depth);
        std::thread::scope(|scope| {
            let worker = std::thread::Builder::new()
                .name("search".to_string())
                .stack_size(stack_size)
                .spawn_scoped(scope, move || self.run_in_place(problem))
                .map_err(|err| SearchError::ThreadSpawn(err.to_string()))?;
            worker
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
        })
    }

    fn run_in_place<P: SearchProblem>(mut self, problem: &mut P) -> Result<SearchReport<P::Solution>> {
        let start = Instant::now();
        let mut solutions = Vec::new();

        let outcome = self.descend(problem, 0, &mut solutions)?;

        self.statistics.elapsed = start.elapsed();
        tracing::debug!(
            problem = problem.name(),
            mode = ?self.mode,
            ?outcome,
            frames = self.statistics.frames,
            pruned = self.statistics.pruned,
            solutions = solutions.len(),
            "search finished"
        );

        Ok(SearchReport::new(solutions, outcome, self.statistics))
    }

    /// Search with the root frame's branches spread over a rayon pool.
    ///
    /// Each root candidate is explored on a private clone of `problem`, and
    /// the branch results are concatenated in candidate order, so the
    /// solution sequence matches [`Searcher::run`]. Under a solution cap a
    /// branch stops once it holds the cap itself, and every later branch
    /// stops as soon as an earlier one has done so. First-solution searches
    /// and runs with `parallel` disabled fall back to the sequential path.
    pub fn run_parallel<P>(mut self, problem: &P) -> Result<SearchReport<P::Solution>>
    where
        P: SearchProblem + Clone + Send + Sync,
        P::Move: Send,
        P::Solution: Send,
    {
        if self.mode == SearchMode::FirstSolution || !self.config.parallel {
            let mut private = problem.clone();
            return self.run(&mut private);
        }

        let start = Instant::now();
        self.statistics.frames += 1;

        if problem.is_complete() {
            let mut solutions = vec![problem.snapshot()];
            self.statistics.solutions += 1;
            self.statistics.elapsed = start.elapsed();
            self.apply_cap(&mut solutions);
            return Ok(SearchReport::new(solutions, Outcome::Continue, self.statistics));
        }

        let mut root = problem.clone();
        root.enter();
        let (roots, rejected): (Vec<P::Move>, Vec<P::Move>) = root
            .candidates()
            .into_iter()
            .partition(|mv| root.is_feasible(mv));
        self.statistics.pruned += rejected.len() as u64;

        let pool = rayon::ThreadPoolBuilder::new()
            .stack_size(stack_size_for(self.config.max_depth))
            .thread_name(|index| format!("search-{}", index))
            .build()
            .map_err(|err| SearchError::ThreadSpawn(err.to_string()))?;

        let config = self.config;
        let root = &root;
        let cutoff = AtomicUsize::new(usize::MAX);
        let cutoff = &cutoff;
        let branches = pool.install(|| {
            roots
                .into_par_iter()
                .enumerate()
                .map(|(index, mv)| -> Result<(Vec<P::Solution>, SearchStatistics)> {
                    let mut branch = root.clone();
                    let mut searcher = Searcher::branch(config, cutoff, index);
                    let mut solutions = Vec::new();
                    {
                        let mut applied = AppliedMove::apply(&mut branch, mv);
                        searcher.descend(&mut *applied, 1, &mut solutions)?;
                    }
                    if searcher.cap_reached(solutions.len()) {
                        cutoff.fetch_min(index, Ordering::Relaxed);
                    }
                    Ok((solutions, searcher.statistics))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut solutions = Vec::new();
        for (branch_solutions, branch_statistics) in branches {
            solutions.extend(branch_solutions);
            self.statistics.merge(&branch_statistics);
        }
        self.apply_cap(&mut solutions);

        let outcome = if solutions.is_empty() {
            Outcome::Exhausted
        } else if self.cap_reached(solutions.len()) {
            Outcome::Found
        } else {
            Outcome::Continue
        };

        self.statistics.elapsed = start.elapsed();
        tracing::debug!(
            problem = problem.name(),
            ?outcome,
            frames = self.statistics.frames,
            solutions = solutions.len(),
            "parallel search finished"
        );

        Ok(SearchReport::new(solutions, outcome, self.statistics))
    }

    fn descend<P: SearchProblem>(
        &mut self,
        problem: &mut P,
        depth: usize,
        solutions: &mut Vec<P::Solution>,
    ) -> Result<Outcome> {
        if depth > self.config.max_depth {
            return Err(SearchError::StackExhaustion {
                limit: self.config.max_depth,
            });
        }

        // Everything this branch could still add lands past the cap.
        if self.overtaken() {
            return Ok(Outcome::Found);
        }

        self.statistics.frames += 1;
        self.statistics.max_depth = self.statistics.max_depth.max(depth);

        if problem.is_complete() {
            solutions.push(problem.snapshot());
            self.statistics.solutions += 1;
            tracing::trace!(depth, recorded = solutions.len(), "solution recorded");

            return Ok(if self.should_stop(solutions.len()) {
                Outcome::Found
            } else {
                Outcome::Continue
            });
        }

        let mut frame = EnteredFrame::enter(problem);
        let mut outcome = Outcome::Exhausted;

        for mv in frame.candidates() {
            if !frame.is_feasible(&mv) {
                self.statistics.pruned += 1;
                continue;
            }

            let mut applied = AppliedMove::apply(&mut *frame, mv);
            match self.descend(&mut *applied, depth + 1, solutions)? {
                Outcome::Found => return Ok(Outcome::Found),
                Outcome::Continue => outcome = Outcome::Continue,
                Outcome::Exhausted => {}
            }
        }

        Ok(outcome)
    }

    fn should_stop(&self, recorded: usize) -> bool {
        self.mode == SearchMode::FirstSolution || self.cap_reached(recorded)
    }

    fn cap_reached(&self, recorded: usize) -> bool {
        self.config.max_solutions.is_some_and(|cap| recorded >= cap)
    }

    fn overtaken(&self) -> bool {
        self.cutoff
            .is_some_and(|(cutoff, index)| cutoff.load(Ordering::Relaxed) < index)
    }

    fn apply_cap<S>(&self, solutions: &mut Vec<S>) {
        if let Some(cap) = self.config.max_solutions {
            solutions.truncate(cap);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sequences over `alphabet` of length `len`, rejecting any with two
    /// equal neighbours.
    #[derive(Debug, Clone, PartialEq)]
    struct NoRepeats {
        alphabet: Vec<char>,
        len: usize,
        word: Vec<char>,
        open_frames: usize,
    }

    impl NoRepeats {
        fn new(alphabet: &str, len: usize) -> Self {
            Self {
                alphabet: alphabet.chars().collect(),
                len,
                word: Vec::new(),
                open_frames: 0,
            }
        }
    }

    impl SearchProblem for NoRepeats {
        type Move = char;
        type Solution = String;

        fn is_complete(&self) -> bool {
            self.word.len() == self.len
        }

        fn candidates(&self) -> Vec<char> {
            self.alphabet.clone()
        }

        fn is_feasible(&self, mv: &char) -> bool {
            self.word.last() != Some(mv)
        }

        fn apply(&mut self, mv: &char) {
            self.word.push(*mv);
        }

        fn undo(&mut self, _mv: &char) {
            self.word.pop();
        }

        fn snapshot(&self) -> String {
            self.word.iter().collect()
        }

        fn enter(&mut self) {
            self.open_frames += 1;
        }

        fn leave(&mut self) {
            self.open_frames -= 1;
        }
    }

    #[test]
    fn test_collect_all_in_candidate_order() {
        let config = SearchConfig::default();
        let mut problem = NoRepeats::new("ab", 3);
        let report = Searcher::collect_all(&config).run(&mut problem).unwrap();

        assert_eq!(report.solutions, vec!["aba".to_string(), "bab".to_string()]);
        assert_eq!(report.outcome, Outcome::Continue);
        assert_eq!(report.statistics.solutions, 2);
        assert!(report.statistics.pruned > 0);
        assert_eq!(report.statistics.max_depth, 3);
    }

    #[test]
    fn test_state_restored_after_run() {
        let config = SearchConfig::default();
        let mut problem = NoRepeats::new("abc", 4);
        let before = problem.clone();
        Searcher::collect_all(&config).run(&mut problem).unwrap();
        assert_eq!(problem, before);
    }

    #[test]
    fn test_first_solution_stops_early() {
        let config = SearchConfig::default();
        let mut problem = NoRepeats::new("abc", 4);
        let before = problem.clone();
        let report = Searcher::first_solution(&config).run(&mut problem).unwrap();

        assert_eq!(report.solutions, vec!["abab".to_string()]);
        assert_eq!(report.outcome, Outcome::Found);
        assert_eq!(problem, before);
    }

    #[test]
    fn test_exhausted_when_nothing_completes() {
        let config = SearchConfig::default();
        let mut problem = NoRepeats::new("a", 2);
        let report = Searcher::collect_all(&config).run(&mut problem).unwrap();

        assert!(report.is_empty());
        assert_eq!(report.outcome, Outcome::Exhausted);
    }

    #[test]
    fn test_solution_cap() {
        let config = SearchConfig {
            max_solutions: Some(3),
            ..SearchConfig::default()
        };
        let mut problem = NoRepeats::new("abc", 3);
        let report = Searcher::collect_all(&config).run(&mut problem).unwrap();

        assert_eq!(report.len(), 3);
        assert_eq!(report.outcome, Outcome::Found);
    }

    #[test]
    fn test_depth_limit_restores_state() {
        let config = SearchConfig {
            max_depth: 2,
            ..SearchConfig::default()
        };
        let mut problem = NoRepeats::new("ab", 5);
        let before = problem.clone();
        let err = Searcher::collect_all(&config).run(&mut problem).unwrap_err();

        assert_eq!(err, SearchError::StackExhaustion { limit: 2 });
        assert_eq!(problem, before);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential_config = SearchConfig::default();
        let parallel_config = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };

        let mut problem = NoRepeats::new("abcd", 4);
        let sequential = Searcher::collect_all(&sequential_config)
            .run(&mut problem)
            .unwrap();
        let parallel = Searcher::collect_all(&parallel_config)
            .run_parallel(&problem)
            .unwrap();

        assert_eq!(parallel.solutions, sequential.solutions);
        assert_eq!(parallel.statistics.solutions, sequential.statistics.solutions);
        assert_eq!(parallel.statistics.frames, sequential.statistics.frames);
    }

    #[test]
    fn test_parallel_complete_root() {
        let config = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        let problem = NoRepeats::new("ab", 0);
        let report = Searcher::collect_all(&config).run_parallel(&problem).unwrap();
        assert_eq!(report.solutions, vec![String::new()]);
    }

    #[test]
    fn test_default_depth_limit_is_reported() {
        let config = SearchConfig::default();
        let mut problem = NoRepeats::new("ab", 20_000);
        let before = problem.clone();
        let err = Searcher::collect_all(&config).run(&mut problem).unwrap_err();

        assert_eq!(
            err,
            SearchError::StackExhaustion {
                limit: config.max_depth
            }
        );
        assert_eq!(problem, before);
    }

    #[test]
    fn test_default_depth_limit_is_reported_in_parallel() {
        let config = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        let problem = NoRepeats::new("abc", 20_000);
        let err = Searcher::collect_all(&config).run_parallel(&problem).unwrap_err();
        assert_eq!(err, SearchError::StackExhaustion { limit: 10_000 });
    }

    #[test]
    fn test_stack_size_grows_with_depth() {
        assert!(stack_size_for(10_000) > stack_size_for(100));
        assert_eq!(stack_size_for(usize::MAX), usize::MAX);
    }

    #[test]
    fn test_parallel_cap_stops_branches_early() {
        let capped = SearchConfig {
            parallel: true,
            max_solutions: Some(1),
            ..SearchConfig::default()
        };
        let uncapped = SearchConfig {
            parallel: true,
            ..SearchConfig::default()
        };
        let sequential_capped = SearchConfig {
            max_solutions: Some(1),
            ..SearchConfig::default()
        };

        let problem = NoRepeats::new("abcd", 6);
        let early = Searcher::collect_all(&capped).run_parallel(&problem).unwrap();
        let full = Searcher::collect_all(&uncapped).run_parallel(&problem).unwrap();
        let mut private = problem.clone();
        let sequential = Searcher::collect_all(&sequential_capped)
            .run(&mut private)
            .unwrap();

        assert_eq!(early.solutions, sequential.solutions);
        assert_eq!(early.solutions, vec!["ababab".to_string()]);
        assert_eq!(early.outcome, Outcome::Found);
        assert!(early.statistics.frames < full.statistics.frames);
    }
}
