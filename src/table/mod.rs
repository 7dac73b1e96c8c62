//! ACTION/GOTO table generation over the canonical LR(1) item-set
//! collection.

use std::io::{self, Write};

use log::debug;

use crate::grammar::{Grammar, RuleId, Symbol, EOF};

pub mod conflict;
pub mod item;
pub mod printing;

use conflict::{Conflict, ConflictKind};
use item::{ItemSet, LrItem};

/// Index of a state in the canonical collection
pub type StateId = usize;

/// One cell of the ACTION table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LrAction {
    /// No action; the input is rejected here
    #[default]
    Error,
    /// Consume the terminal and enter the state
    Shift(StateId),
    /// Replace the rule's rhs on the stacks by its lhs
    Reduce(RuleId),
    /// The augmented start rule is complete
    Accept,
}

impl LrAction {
    /// The bare cell syntax used in the CSV dump.
    fn csv_cell(&self) -> String {
        match self {
            LrAction::Error => "E".to_string(),
            LrAction::Shift(state) => format!("S{}", state),
            LrAction::Reduce(rule) => format!("R{}", rule),
            LrAction::Accept => "A".to_string(),
        }
    }
}

/// The generated automaton: one ACTION row per state indexed by terminal id
/// and one GOTO row per state indexed by nonterminal id (0 meaning "none").
#[derive(Debug, Clone, Default)]
pub struct LrTable {
    /// `actions[state][terminal]`
    pub actions: Vec<Vec<LrAction>>,
    /// `goto[state][nonterminal]`
    pub goto: Vec<Vec<StateId>>,
}

impl LrTable {
    /// Number of states in the table
    pub fn states(&self) -> usize {
        self.actions.len()
    }

    /// Appends fresh all-Error / all-zero rows for one new state.
    fn push_state(&mut self, terminals: usize, nonterminals: usize) {
        self.actions.push(vec![LrAction::default(); terminals]);
        self.goto.push(vec![0; nonterminals]);
    }

    /// Writes the table as CSV: a header row naming the terminal columns,
    /// then one row per state holding the action cells followed by the goto
    /// cells. Every cell is double-quoted and comma-terminated.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors of the underlying writer.
    pub fn write_csv<W: Write>(&self, writer: &mut W, grammar: &Grammar) -> io::Result<()> {
        write!(writer, "State,")?;
        for terminal in grammar.terminals() {
            write!(writer, "\"{}\", ", terminal)?;
        }
        writeln!(writer)?;

        for (state, actions) in self.actions.iter().enumerate() {
            write!(writer, "{}, ", state)?;
            for action in actions {
                write!(writer, "\"{}\", ", action.csv_cell())?;
            }
            for &target in &self.goto[state] {
                if target == 0 {
                    write!(writer, "\"\", ")?;
                } else {
                    write!(writer, "\"{}\", ", target)?;
                }
            }
            writeln!(writer)?;
        }

        Ok(())
    }
}

/// Everything the generator produces: the table, the canonical item-set
/// collection (indexed by state id), and the conflicts found along the way.
/// Presentation of any of it is the caller's business.
#[derive(Debug, Clone)]
pub struct Generation {
    /// The ACTION/GOTO table
    pub table: LrTable,
    /// The canonical collection, in discovery order
    pub states: Vec<ItemSet>,
    /// Conflicts in the order they were detected; the table keeps the
    /// first-written action in every contested cell
    pub conflicts: Vec<Conflict>,
}

/// Builds the canonical LR(1) collection and the ACTION/GOTO tables.
///
/// States are processed in discovery order while the collection grows.
/// Within a state, reductions are recorded first, then nonterminal
/// successors in id order, then terminal successors in id order; this makes
/// the output deterministic for a given grammar.
pub fn generate(grammar: &Grammar) -> Generation {
    debug_assert!(!grammar.rules().is_empty(), "grammar has no augmentation rule");

    let terminals = grammar.terminals().len();
    let nonterminals = grammar.nonterminals().len();

    let mut initial = ItemSet::seeded(LrItem {
        rule: 0,
        dot: 0,
        lookahead: EOF,
    });
    initial.close(grammar);

    let mut states = vec![initial];
    // entry i holds (predecessor state, symbol consumed entering state i);
    // entry 0 is never read
    let mut backtrack: Vec<(StateId, Symbol)> = vec![(0, Symbol::Nonterminal(0))];
    let mut table = LrTable::default();
    let mut conflicts = Vec::new();

    let mut state = 0;
    while state < states.len() {
        table.push_state(terminals, nonterminals);
        // the collection may grow while this state is processed
        let set = states[state].clone();
        debug!("I{}: {} items", state, set.len());

        // reductions for every dot-past-end item
        for item in set.iter() {
            if item.next_symbol(grammar).is_some() {
                continue;
            }
            match table.actions[state][item.lookahead] {
                LrAction::Error => {
                    table.actions[state][item.lookahead] = if item.rule == 0
                        && item.lookahead == EOF
                    {
                        LrAction::Accept
                    } else {
                        LrAction::Reduce(item.rule)
                    };
                }
                LrAction::Shift(_) => conflicts.push(Conflict::new(
                    ConflictKind::ShiftReduce,
                    state,
                    item.lookahead,
                    &backtrack,
                )),
                LrAction::Reduce(_) => conflicts.push(Conflict::new(
                    ConflictKind::ReduceReduce,
                    state,
                    item.lookahead,
                    &backtrack,
                )),
                LrAction::Accept => {}
            }
        }

        // nonterminal successors
        for nt in 1..nonterminals {
            let successor = set.successor(grammar, Symbol::Nonterminal(nt));
            if successor.is_empty() {
                continue;
            }
            let target = intern(&mut states, &mut backtrack, successor, state, Symbol::Nonterminal(nt));
            table.goto[state][nt] = target;
        }

        // terminal successors
        for terminal in 1..terminals {
            let successor = set.successor(grammar, Symbol::Terminal(terminal));
            if successor.is_empty() {
                continue;
            }
            let target = intern(&mut states, &mut backtrack, successor, state, Symbol::Terminal(terminal));
            match table.actions[state][terminal] {
                LrAction::Error => table.actions[state][terminal] = LrAction::Shift(target),
                // an earlier reduce keeps the cell; the successor state
                // still exists and will be explored
                LrAction::Reduce(_) => conflicts.push(Conflict::new(
                    ConflictKind::ShiftReduce,
                    state,
                    terminal,
                    &backtrack,
                )),
                LrAction::Shift(_) | LrAction::Accept => {}
            }
        }

        state += 1;
    }

    Generation {
        table,
        states,
        conflicts,
    }
}

/// Finds an existing state set-equal to `candidate` or appends it as a new
/// state, recording how it was entered. Returns the state id either way.
fn intern(
    states: &mut Vec<ItemSet>,
    backtrack: &mut Vec<(StateId, Symbol)>,
    candidate: ItemSet,
    from: StateId,
    via: Symbol,
) -> StateId {
    match states.iter().position(|existing| existing == &candidate) {
        Some(existing) => existing,
        None => {
            states.push(candidate);
            backtrack.push((from, via));
            states.len() - 1
        }
    }
}
