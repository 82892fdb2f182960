//! Scoped mutation guards.
//!
//! Every in-place change the engine makes to a problem is owned by one of
//! these guards. Dropping the guard reverts the change, so early returns,
//! `?` propagation and unwinding all leave the state as it was found.

use super::SearchProblem;
use std::ops::{Deref, DerefMut};

/// A move that is currently applied. Undone on drop.
pub struct AppliedMove<'a, P: SearchProblem> {
    problem: &'a mut P,
    mv: P::Move,
}

impl<'a, P: SearchProblem> AppliedMove<'a, P> {
    pub fn apply(problem: &'a mut P, mv: P::Move) -> Self {
        problem.apply(&mv);
        Self { problem, mv }
    }
}

impl<P: SearchProblem> Deref for AppliedMove<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.problem
    }
}

impl<P: SearchProblem> DerefMut for AppliedMove<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.problem
    }
}

impl<P: SearchProblem> Drop for AppliedMove<'_, P> {
    fn drop(&mut self) {
        self.problem.undo(&self.mv);
    }
}

/// A frame whose `enter` hook has run. Calls `leave` on drop.
pub struct EnteredFrame<'a, P: SearchProblem> {
    problem: &'a mut P,
}

impl<'a, P: SearchProblem> EnteredFrame<'a, P> {
    pub fn enter(problem: &'a mut P) -> Self {
        problem.enter();
        Self { problem }
    }
}

impl<P: SearchProblem> Deref for EnteredFrame<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.problem
    }
}

impl<P: SearchProblem> DerefMut for EnteredFrame<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.problem
    }
}

impl<P: SearchProblem> Drop for EnteredFrame<'_, P> {
    fn drop(&mut self) {
        self.problem.leave();
    }
}
