//! Errors that can occur while loading a grammar.

use std::{fmt::Display, io};

/// Types of errors that can happen while loading a grammar. All of these are
/// fatal; recoverable problems in the grammar text are warned about and
/// skipped instead.
#[derive(Debug)]
pub enum Error {
    /// The source ended before both header lines were read
    MissingHeader,
    /// The nonterminal line declares no symbols, so there is nothing to
    /// augment
    NoStartSymbol,
    /// Errors occurring because of I/O
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Error::MissingHeader => "missing terminal or nonterminal header line",
            Error::NoStartSymbol => "grammar declares no nonterminals",
            Error::Io(e) => return write!(f, "i/o error occurred ({:?})", e),
        };

        write!(f, "{}", str)
    }
}
