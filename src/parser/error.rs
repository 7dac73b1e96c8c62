//! Errors produced while tokenizing input and driving the automaton.

use std::fmt::Display;

use colored::Colorize;

use crate::grammar::{Grammar, TermId};

/// Types of errors that can happen while turning an input line into
/// terminal ids. These are setup errors and abort the run.
#[derive(Debug)]
pub enum TokenizeError {
    /// A name in the input is not a terminal of the grammar
    UnknownTerminal(String),
}

impl Display for TokenizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenizeError::UnknownTerminal(name) => {
                write!(f, "unknown terminal in input: {}", name)
            }
        }
    }
}

/// A parse-time rejection: the terminal found and every terminal the
/// current state would have accepted. The driver returns this normally; it
/// is not a process failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// The terminal the driver stopped on
    pub found: TermId,
    /// Terminals with a non-Error action in the stopping state, in id order
    pub expected: Vec<TermId>,
}

impl Rejection {
    /// Renders the rejection with the grammar's terminal names.
    pub fn describe(&self, grammar: &Grammar) -> String {
        let mut out = format!(
            "{} {} {}",
            "Error: Found terminal".red(),
            grammar.terminals()[self.found].magenta(),
            "expected one of".red()
        );
        for &terminal in &self.expected {
            out += &format!(" {}", grammar.terminals()[terminal].magenta());
        }
        out
    }
}
