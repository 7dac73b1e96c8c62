//! FIRST sets and the fixed-point computation over them.
//!
//! A [FirstSet] carries ε-derivability as an explicit flag instead of a
//! reserved member id, so terminal id 0 always means `$` and nothing else.

use std::collections::BTreeSet;

use super::{Symbol, TermId};

/// The set of terminals that may begin a derivation, plus whether the
/// derivation may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    /// Terminal ids, kept ordered for deterministic iteration
    terminals: BTreeSet<TermId>,
    /// Whether ε is derivable
    epsilon: bool,
}

impl FirstSet {
    /// Adds a terminal, returning whether the set changed.
    pub fn insert(&mut self, terminal: TermId) -> bool {
        self.terminals.insert(terminal)
    }

    /// Marks ε as derivable, returning whether the set changed.
    pub fn set_epsilon(&mut self) -> bool {
        !std::mem::replace(&mut self.epsilon, true)
    }

    /// Whether ε is derivable
    pub fn epsilon(&self) -> bool {
        self.epsilon
    }

    /// Whether the terminal is a member
    pub fn contains(&self, terminal: TermId) -> bool {
        self.terminals.contains(&terminal)
    }

    /// The terminal members in ascending id order
    pub fn terminals(&self) -> impl Iterator<Item = TermId> + '_ {
        self.terminals.iter().copied()
    }

    /// Number of terminal members, not counting the ε flag
    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    /// Whether there are no terminal members
    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }

    /// Unions the terminal members of `other` into this set, leaving the ε
    /// flag alone. Returns whether the set changed.
    pub fn merge_terminals(&mut self, other: &FirstSet) -> bool {
        let mut changed = false;
        for terminal in other.terminals() {
            changed |= self.insert(terminal);
        }
        changed
    }

    /// Unions `other` into this set, ε flag included. Returns whether the
    /// set changed.
    pub fn merge(&mut self, other: &FirstSet) -> bool {
        let mut changed = self.merge_terminals(other);
        if other.epsilon {
            changed |= self.set_epsilon();
        }
        changed
    }
}

/// FIRST over a symbol sequence, given the FIRST table computed so far.
///
/// Walks left to right: a terminal is added and ends the walk; a
/// nonterminal contributes its members and ends the walk unless it is
/// ε-derivable. If the walk falls off the end (including an empty
/// sequence), the ε flag is set.
pub(super) fn first_of_sequence(symbols: &[Symbol], table: &[FirstSet]) -> FirstSet {
    let mut result = FirstSet::default();

    for symbol in symbols {
        match symbol {
            Symbol::Terminal(t) => {
                result.insert(*t);
                return result;
            }
            Symbol::Nonterminal(n) => {
                let first = &table[*n];
                result.merge_terminals(first);
                if !first.epsilon() {
                    return result;
                }
            }
        }
    }

    result.set_epsilon();
    result
}
