//! Structured conflict records produced by the table generator.

use crate::grammar::{Symbol, TermId};
use crate::table::StateId;

/// The two ways one ACTION cell can be claimed twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// A shift and a reduce compete for the same (state, terminal) cell
    ShiftReduce,
    /// Two reduces compete for the same (state, terminal) cell
    ReduceReduce,
}

/// A conflict detected while filling the ACTION table. The first-written
/// action stays in the table; the record exists for diagnostics only.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// Which kind of collision occurred
    pub kind: ConflictKind,
    /// The state whose ACTION row was being filled
    pub state: StateId,
    /// The lookahead terminal of the contested cell
    pub terminal: TermId,
    /// Witness path from the conflict state back toward state 0: each entry
    /// is a state and the symbol whose successor edge entered it
    pub witness: Vec<(StateId, Symbol)>,
}

impl Conflict {
    /// Builds a conflict record, walking the generator's backtrack map from
    /// `state` to state 0 to capture the witness path.
    pub(super) fn new(
        kind: ConflictKind,
        state: StateId,
        terminal: TermId,
        backtrack: &[(StateId, Symbol)],
    ) -> Self {
        let mut witness = Vec::new();
        let mut current = state;
        while current != 0 {
            let (predecessor, symbol) = backtrack[current];
            witness.push((current, symbol));
            current = predecessor;
        }

        Self {
            kind,
            state,
            terminal,
            witness,
        }
    }
}
