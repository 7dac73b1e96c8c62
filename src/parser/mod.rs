//! Table-driven LR(1) parse driver.
//!
//! The driver owns nothing but its two stacks and an input cursor; the
//! grammar and table are shared read-only, so any number of drivers can run
//! over the same generated automaton.

use colored::Colorize;

use crate::grammar::{printing::colored_symbol, Grammar, Symbol, TermId, EOF};
use crate::table::{LrAction, LrTable, StateId};

pub mod error;

use error::{Rejection, TokenizeError};

/// Turns a line of space-separated terminal names into terminal ids and
/// appends the `$` end marker.
///
/// # Errors
///
/// Fails on the first name that is not a terminal of the grammar.
pub fn tokenize(input: &str, grammar: &Grammar) -> Result<Vec<TermId>, TokenizeError> {
    let mut terminals = Vec::new();
    for name in input.split_whitespace() {
        match grammar.terminal_id(name) {
            Some(id) => terminals.push(id),
            None => return Err(TokenizeError::UnknownTerminal(name.to_string())),
        }
    }
    terminals.push(EOF);
    Ok(terminals)
}

/// Executes a generated ACTION/GOTO table over a terminal-id input.
pub struct Driver<'a> {
    /// The grammar the table was generated from
    grammar: &'a Grammar,
    /// The generated automaton
    table: &'a LrTable,
    /// Column width of the step trace, or [None] to stay silent
    trace: Option<usize>,
}

impl<'a> Driver<'a> {
    /// Constructs a silent driver.
    pub fn new(grammar: &'a Grammar, table: &'a LrTable) -> Self {
        Self {
            grammar,
            table,
            trace: None,
        }
    }

    /// Enables the step trace with the given column width.
    pub fn with_trace(mut self, col_width: usize) -> Self {
        self.trace = Some(col_width);
        self
    }

    /// Runs the automaton over `input`, which must end with the `$` marker
    /// (see [tokenize]). Returns the number of executed actions on accept,
    /// or a [Rejection] naming the offending terminal and the terminals the
    /// stopping state would have accepted.
    ///
    /// # Errors
    ///
    /// A [Rejection] is a normal outcome of parsing, not a process failure.
    #[allow(clippy::missing_panics_doc)] // the state stack is seeded with 0 and reduces pop at most the pushed suffix
    pub fn parse(&self, input: &[TermId]) -> Result<usize, Rejection> {
        let mut state_stack: Vec<StateId> = vec![0];
        let mut symbol_stack: Vec<Symbol> = Vec::new();
        let mut cursor = 0;
        let mut steps = 0;

        if let Some(width) = self.trace {
            println!(
                "{:>width$}{:>width$}{:>width$}{:>width$}",
                "Stack", "Current symbols", "Remaining input", "Next Action",
            );
        }

        loop {
            if let Some(width) = self.trace {
                self.trace_step(width, &state_stack, &symbol_stack, input, cursor);
            }

            let state = *state_stack.last().unwrap();
            // the cursor cannot run past the $ marker: $ is never shifted
            let lookahead = input[cursor];

            match self.table.actions[state][lookahead] {
                LrAction::Shift(target) => {
                    if self.trace.is_some() {
                        println!("{}", format!("Shifting to {}", target).yellow());
                    }
                    state_stack.push(target);
                    symbol_stack.push(Symbol::Terminal(lookahead));
                    cursor += 1;
                }
                LrAction::Reduce(rule) => {
                    if self.trace.is_some() {
                        println!("{}", format!("Reducing by {}", rule).cyan());
                    }
                    let rule = self.grammar.rule(rule);
                    for _ in 0..rule.rhs.len() {
                        state_stack.pop();
                        symbol_stack.pop();
                    }
                    symbol_stack.push(Symbol::Nonterminal(rule.lhs));
                    let uncovered = *state_stack.last().unwrap();
                    state_stack.push(self.table.goto[uncovered][rule.lhs]);
                }
                LrAction::Accept => {
                    if self.trace.is_some() {
                        println!("{}", "Input accepted!".green());
                    }
                    return Ok(steps + 1);
                }
                LrAction::Error => {
                    let expected = (0..self.grammar.terminals().len())
                        .filter(|&terminal| {
                            self.table.actions[state][terminal] != LrAction::Error
                        })
                        .collect();
                    return Err(Rejection {
                        found: lookahead,
                        expected,
                    });
                }
            }

            steps += 1;
        }
    }

    /// Prints the stacks and the remaining input for one step, one absolute
    /// column per field.
    fn trace_step(
        &self,
        width: usize,
        state_stack: &[StateId],
        symbol_stack: &[Symbol],
        input: &[TermId],
        cursor: usize,
    ) {
        let mut column = 0;

        for state in state_stack {
            print!("{} ", state);
        }
        column += width;
        print!("\x1b[{}G", column);

        for &symbol in symbol_stack {
            print!("{} ", colored_symbol(symbol, self.grammar));
        }
        column += width;
        print!("\x1b[{}G", column);

        for &terminal in &input[cursor..] {
            print!("{} ", self.grammar.terminals()[terminal]);
        }
        column += width;
        print!("\x1b[{}G", column);
    }
}
