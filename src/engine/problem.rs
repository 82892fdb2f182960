//! Extension points a search problem supplies to the engine.

/// A state space searched by choose / explore / un-choose.
///
/// The engine owns no state of its own: it drives a single mutable problem
/// value through `apply` and `undo`, and asks it for candidates and
/// feasibility at every frame.
///
/// # Contract
///
/// - `is_feasible` is a pure query and may be called any number of times.
/// - `undo(mv)` restores exactly the state that existed before `apply(mv)`.
///   Moves carry whatever they need for that (previous cursor, cell, ...).
/// - `enter` and `leave` bracket the candidate loop of every frame that is
///   not complete. Both default to no-ops.
/// - `snapshot` returns an owned copy; it must not share storage with the
///   live state.
///
/// # Example
///
/// ```
/// use backtrack_search::engine::{SearchProblem, Searcher, SearchMode};
/// use backtrack_search::config::SearchConfig;
///
/// /// Every bit string of a fixed length.
/// #[derive(Debug)]
/// struct Bits { len: usize, bits: Vec<bool> }
///
/// impl SearchProblem for Bits {
///     type Move = bool;
///     type Solution = Vec<bool>;
///
///     fn is_complete(&self) -> bool { self.bits.len() == self.len }
///     fn candidates(&self) -> Vec<bool> { vec![false, true] }
///     fn is_feasible(&self, _mv: &bool) -> bool { true }
///     fn apply(&mut self, mv: &bool) { self.bits.push(*mv); }
///     fn undo(&mut self, _mv: &bool) { self.bits.pop(); }
///     fn snapshot(&self) -> Vec<bool> { self.bits.clone() }
/// }
///
/// let config = SearchConfig::default();
/// let mut problem = Bits { len: 3, bits: Vec::new() };
/// let report = Searcher::new(&config, SearchMode::CollectAll)
///     .run(&mut problem)
///     .unwrap();
/// assert_eq!(report.len(), 8);
/// assert!(problem.bits.is_empty());
/// ```
pub trait SearchProblem {
    /// One extension of the partial solution.
    type Move;

    /// Deep copy of a completed partial solution.
    type Solution;

    /// Terminal condition for the current frame.
    fn is_complete(&self) -> bool;

    /// Moves to try at this frame, in exploration order.
    fn candidates(&self) -> Vec<Self::Move>;

    /// Local pruning check for one candidate.
    fn is_feasible(&self, mv: &Self::Move) -> bool;

    /// Extend the partial solution in place.
    fn apply(&mut self, mv: &Self::Move);

    /// Revert a previous `apply` of the same move.
    fn undo(&mut self, mv: &Self::Move);

    /// Copy the completed partial solution out of the live state.
    fn snapshot(&self) -> Self::Solution;

    /// Called before a non-terminal frame tries its candidates.
    fn enter(&mut self) {}

    /// Called when a non-terminal frame is done, on every exit path.
    fn leave(&mut self) {}

    /// Name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
