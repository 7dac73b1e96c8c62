//! Console display of item sets, the ACTION/GOTO table, and conflicts.

use colored::Colorize;

use crate::grammar::{printing::colored_symbol, Grammar};

use super::{
    conflict::{Conflict, ConflictKind},
    item::{ItemSet, LrItem},
    LrAction, LrTable,
};

/// Prints one item as `A → α • β, lookahead`.
pub fn print_item(item: &LrItem, grammar: &Grammar) {
    let rule = grammar.rule(item.rule);

    print!("{} → ", grammar.nonterminals()[rule.lhs]);
    for (position, &symbol) in rule.rhs.iter().enumerate() {
        if position == item.dot {
            print!("• ");
        }
        print!("{} ", colored_symbol(symbol, grammar));
    }
    if item.dot == rule.rhs.len() {
        print!("• ");
    }
    println!(", {}", grammar.terminals()[item.lookahead]);
}

/// Prints the whole canonical collection, one `I<n>:` block per state.
pub fn print_states(states: &[ItemSet], grammar: &Grammar) {
    for (id, state) in states.iter().enumerate() {
        println!("I{}:", id);
        for item in state.iter() {
            print_item(item, grammar);
        }
    }
}

/// Prints the table with one row per state: action cells for every
/// terminal, then goto cells for every user nonterminal.
pub fn print_table(table: &LrTable, grammar: &Grammar) {
    print!("   ");
    for terminal in grammar.terminals() {
        print!(" │ {:>3}", terminal.chars().take(3).collect::<String>());
    }
    for nonterminal in &grammar.nonterminals()[1..] {
        print!(" │ {:>2}", nonterminal.chars().take(2).collect::<String>());
    }
    println!();

    for (state, actions) in table.actions.iter().enumerate() {
        print!("{:>3}", state);
        for action in actions {
            match action {
                LrAction::Error => print!(" │ {}  ", "E".red()),
                LrAction::Shift(target) => print!(" │ {}", format!("S{:<2}", target).yellow()),
                LrAction::Reduce(rule) => print!(" │ {}", format!("R{:<2}", rule).cyan()),
                LrAction::Accept => print!(" │ {}  ", "A".green()),
            }
        }
        for &target in &table.goto[state][1..] {
            if target == 0 {
                print!(" │   ");
            } else {
                print!(" │ {:>2}", target);
            }
        }
        println!();
    }
}

/// Prints a conflict record: a red header naming the kind and the terminal,
/// then the witness path back toward state 0.
pub fn print_conflict(conflict: &Conflict, grammar: &Grammar) {
    let kind = match conflict.kind {
        ConflictKind::ShiftReduce => "Shift-Reduce",
        ConflictKind::ReduceReduce => "Reduce-Reduce",
    };
    print!(
        "{}\n{}",
        format!("{} conflict after reading (RTL):", kind).red(),
        grammar.terminals()[conflict.terminal].magenta()
    );

    for &(state, symbol) in &conflict.witness {
        print!(" ← {} ← {}", state, colored_symbol(symbol, grammar));
    }
    println!();
}
