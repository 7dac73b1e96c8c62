//! Context-free grammar model with dense symbol ids.
//!
//! Terminal id 0 is reserved for the end-of-input marker `$` and nonterminal
//! id 0 for the augmented start symbol `S'`; both are registered before any
//! user symbol. Rule 0 is always the augmentation `S' → <start symbol>`.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::warn;

pub mod error;
pub mod first;
pub mod printing;

use error::Error;
use first::{first_of_sequence, FirstSet};

/// Dense id of a terminal symbol
pub type TermId = usize;
/// Dense id of a nonterminal symbol
pub type NtId = usize;
/// Index of a rule, in insertion order
pub type RuleId = usize;

/// Terminal id of the end-of-input marker `$`
pub const EOF: TermId = 0;
/// Nonterminal id of the augmented start symbol `S'`
pub const AUGMENTED: NtId = 0;

/// A single grammar symbol, which is either terminal or nonterminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol, referenced by terminal id
    Terminal(TermId),
    /// A nonterminal symbol, referenced by nonterminal id
    Nonterminal(NtId),
}

/// A production rule in the form `lhs → rhs`. An empty rhs denotes ε.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The nonterminal being produced
    pub lhs: NtId,
    /// The sequence of symbols it expands to
    pub rhs: Vec<Symbol>,
}

/// A context-free grammar with cached FIRST sets.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// Terminal names, indexed by terminal id
    terminals: Vec<String>,
    /// Nonterminal names, indexed by nonterminal id
    nonterminals: Vec<String>,
    /// Rules in insertion order; rule 0 is the augmentation
    rules: Vec<Rule>,
    /// Reverse lookup from terminal name to id
    terminal_ids: HashMap<String, TermId>,
    /// Reverse lookup from nonterminal name to id
    nonterminal_ids: HashMap<String, NtId>,
    /// FIRST set of each nonterminal, filled by [Self::compute_first]
    first: Vec<FirstSet>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    /// Constructs an empty grammar with the reserved `$` and `S'` symbols
    /// already registered.
    pub fn new() -> Self {
        let mut grammar = Self {
            terminals: Vec::new(),
            nonterminals: Vec::new(),
            rules: Vec::new(),
            terminal_ids: HashMap::new(),
            nonterminal_ids: HashMap::new(),
            first: Vec::new(),
        };
        grammar.add_terminal("$");
        grammar.add_nonterminal("S'");
        grammar
    }

    /// Loads a grammar from a file, see [Self::from_reader] for the format.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be opened or read, or if the grammar header
    /// is incomplete.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let file = BufReader::new(File::open(path)?);
        Self::from_reader(file)
    }

    /// Parses a grammar from a line-oriented text source.
    ///
    /// # Format
    ///
    /// - Line 1: terminal names separated by spaces (ids 1..)
    /// - Line 2: nonterminal names separated by spaces (ids 1..); the first
    ///   one is the start symbol
    /// - Remaining nonempty lines: one rule each, `LHS RHS₁ RHS₂ … RHSₙ`;
    ///   an LHS on its own denotes ε
    ///
    /// Malformed symbols are warned about and skipped; an unknown LHS
    /// discards its whole rule. FIRST sets are computed before returning.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, a missing header line, or a grammar that
    /// declares no nonterminal (augmentation would be impossible).
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut grammar = Self::new();
        let mut lines = reader.lines();

        let terminals_line = match lines.next() {
            Some(line) => line?,
            None => return Err(Error::MissingHeader),
        };
        for name in terminals_line.split_whitespace() {
            grammar.add_terminal(name);
        }

        let nonterminals_line = match lines.next() {
            Some(line) => line?,
            None => return Err(Error::MissingHeader),
        };
        for name in nonterminals_line.split_whitespace() {
            grammar.add_nonterminal(name);
        }

        if grammar.nonterminals.len() < 2 {
            return Err(Error::NoStartSymbol);
        }

        // rule 0: S' → <first user nonterminal>
        grammar.add_rule(AUGMENTED, vec![Symbol::Nonterminal(1)]);

        for line in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            grammar.parse_rule(&line);
        }

        grammar.compute_first();
        Ok(grammar)
    }

    /// Registers a terminal, ignoring duplicates with a warning.
    pub fn add_terminal(&mut self, name: &str) {
        if self.terminal_ids.contains_key(name) {
            warn!("duplicate terminal '{name}' ignored");
            return;
        }
        self.terminal_ids.insert(name.to_string(), self.terminals.len());
        self.terminals.push(name.to_string());
    }

    /// Registers a nonterminal, ignoring duplicates and names already taken
    /// by a terminal with a warning.
    pub fn add_nonterminal(&mut self, name: &str) {
        if self.terminal_ids.contains_key(name) {
            warn!("nonterminal '{name}' collides with a terminal of the same name, ignored");
            return;
        }
        if self.nonterminal_ids.contains_key(name) {
            warn!("duplicate nonterminal '{name}' ignored");
            return;
        }
        self.nonterminal_ids
            .insert(name.to_string(), self.nonterminals.len());
        self.nonterminals.push(name.to_string());
    }

    /// Appends a rule. Rules are numbered by insertion order.
    pub fn add_rule(&mut self, lhs: NtId, rhs: Vec<Symbol>) {
        self.rules.push(Rule { lhs, rhs });
    }

    /// Parses one `LHS RHS…` line, warning about and skipping anything
    /// unknown.
    fn parse_rule(&mut self, line: &str) {
        let mut names = line.split_whitespace();

        // the leading name must resolve to a user nonterminal
        let Some(lhs_name) = names.next() else {
            return;
        };
        let lhs = match self.nonterminal_ids.get(lhs_name) {
            Some(&id) if id != AUGMENTED => id,
            Some(_) => {
                warn!("the augmented start symbol cannot be produced, ignoring rule '{line}'");
                return;
            }
            None => {
                warn!("unknown nonterminal '{lhs_name}', ignoring rule '{line}'");
                return;
            }
        };

        // terminals take priority over nonterminals on the rhs
        let mut rhs = Vec::new();
        for name in names {
            if let Some(&id) = self.terminal_ids.get(name) {
                rhs.push(Symbol::Terminal(id));
            } else if let Some(&id) = self.nonterminal_ids.get(name) {
                rhs.push(Symbol::Nonterminal(id));
            } else {
                warn!("unknown symbol '{name}', ignoring");
            }
        }

        self.add_rule(lhs, rhs);
    }

    /// Computes the FIRST set of every nonterminal by iterating the
    /// per-rule contribution until the table is stable. Recomputing an
    /// already-computed table changes nothing.
    pub fn compute_first(&mut self) {
        let mut first = vec![FirstSet::default(); self.nonterminals.len()];

        loop {
            let mut changed = false;
            for rule in &self.rules {
                let contribution = first_of_sequence(&rule.rhs, &first);
                changed |= first[rule.lhs].merge(&contribution);
            }
            if !changed {
                break;
            }
        }

        self.first = first;
    }

    /// The cached FIRST set of a nonterminal.
    pub fn first(&self, nt: NtId) -> &FirstSet {
        &self.first[nt]
    }

    /// FIRST over an arbitrary symbol sequence, using the cached table.
    /// The ε flag is set iff every symbol in the sequence is ε-derivable.
    pub fn first_of(&self, symbols: &[Symbol]) -> FirstSet {
        first_of_sequence(symbols, &self.first)
    }

    /// Terminal names, indexed by id
    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    /// Nonterminal names, indexed by id
    pub fn nonterminals(&self) -> &[String] {
        &self.nonterminals
    }

    /// All rules in insertion order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// A single rule by id
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id]
    }

    /// Looks up a terminal id by name
    pub fn terminal_id(&self, name: &str) -> Option<TermId> {
        self.terminal_ids.get(name).copied()
    }

    /// Looks up a nonterminal id by name
    pub fn nonterminal_id(&self, name: &str) -> Option<NtId> {
        self.nonterminal_ids.get(name).copied()
    }
}
