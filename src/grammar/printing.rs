//! Console display of a grammar: terminals, nonterminals with their FIRST
//! sets, and rules.

use colored::{ColoredString, Colorize};

use super::{Grammar, Symbol};

/// Colors a symbol name the way all displays do: terminals magenta,
/// nonterminals cyan.
pub fn colored_symbol(symbol: Symbol, grammar: &Grammar) -> ColoredString {
    match symbol {
        Symbol::Terminal(t) => grammar.terminals()[t].magenta(),
        Symbol::Nonterminal(n) => grammar.nonterminals()[n].cyan(),
    }
}

/// Prints the numbered terminal list, the numbered nonterminal list with
/// FIRST sets, and the numbered rule list.
pub fn print_grammar(grammar: &Grammar) {
    println!("Terminals");
    println!("═════════");
    for (id, name) in grammar.terminals().iter().enumerate() {
        println!("{:>3}│{}", id, name);
    }
    println!();

    println!("Non-Terminals (First)");
    println!("═════════════════════");
    for (id, name) in grammar.nonterminals().iter().enumerate() {
        print!("{:>3}│{}\t\t", id, name);
        let first = grammar.first(id);
        if first.epsilon() {
            print!("ε ");
        }
        for terminal in first.terminals() {
            print!("{} ", grammar.terminals()[terminal]);
        }
        println!();
    }
    println!();

    let lhs_width = grammar
        .rules()
        .iter()
        .map(|rule| grammar.nonterminals()[rule.lhs].chars().count())
        .max()
        .unwrap_or(0);

    println!("Rules");
    println!("═════");
    for (id, rule) in grammar.rules().iter().enumerate() {
        print!(
            "{:>3}│ {:>width$} → ",
            id,
            grammar.nonterminals()[rule.lhs],
            width = lhs_width
        );
        for &symbol in &rule.rhs {
            print!("{} ", colored_symbol(symbol, grammar));
        }
        println!();
    }
    println!();
}
