use log::debug;

use crate::grammar::{Grammar, Symbol, EOF};
use crate::table::{conflict::ConflictKind, generate, LrAction};

/// Left-recursive arithmetic expression grammar
const ARITHMETIC: &str = "id + * ( )\nE T F\nE E + T\nE T\nT T * F\nT F\nF ( E )\nF id\n";

/// The dangling-else grammar: `S → i S t S | i S t S e S | a`
const DANGLING_ELSE: &str = "i t e a b\nS\nS i S t S\nS i S t S e S\nS a\n";

#[test]
fn every_cell_is_in_range() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(ARITHMETIC.as_bytes()).unwrap();
    let generation = generate(&grammar);
    debug!("{} states", generation.states.len());

    let states = generation.table.states();
    assert_eq!(generation.table.actions.len(), states);
    assert_eq!(generation.table.goto.len(), states);
    assert_eq!(generation.states.len(), states);

    let mut accepts = 0;
    for (state, actions) in generation.table.actions.iter().enumerate() {
        assert_eq!(actions.len(), grammar.terminals().len());
        for (terminal, action) in actions.iter().enumerate() {
            match action {
                LrAction::Error => {}
                LrAction::Shift(target) => assert!(*target < states),
                LrAction::Reduce(rule) => assert!(*rule < grammar.rules().len()),
                LrAction::Accept => {
                    accepts += 1;
                    assert_eq!(terminal, EOF, "accept off the $ column");
                }
            }
        }

        let goto = &generation.table.goto[state];
        assert_eq!(goto.len(), grammar.nonterminals().len());
        assert_eq!(goto[0], 0, "S' never appears on a rhs");
        for &target in goto {
            assert!(target < states);
        }
    }
    assert_eq!(accepts, 1, "accept must appear exactly once");
}

#[test]
fn table_matches_recomputed_successors() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(ARITHMETIC.as_bytes()).unwrap();
    let generation = generate(&grammar);
    assert!(generation.conflicts.is_empty());

    for (state, set) in generation.states.iter().enumerate() {
        for nt in 1..grammar.nonterminals().len() {
            let successor = set.successor(&grammar, Symbol::Nonterminal(nt));
            let target = generation.table.goto[state][nt];
            if successor.is_empty() {
                assert_eq!(target, 0);
            } else {
                assert_eq!(&successor, &generation.states[target]);
            }
        }

        for terminal in 1..grammar.terminals().len() {
            let successor = set.successor(&grammar, Symbol::Terminal(terminal));
            match generation.table.actions[state][terminal] {
                LrAction::Shift(target) => {
                    assert_eq!(&successor, &generation.states[target]);
                }
                LrAction::Error | LrAction::Reduce(_) => assert!(successor.is_empty()),
                LrAction::Accept => unreachable!("accept on a non-$ terminal"),
            }
        }
    }
}

#[test]
fn single_rule_grammar() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader("a\nS\nS a\n".as_bytes()).unwrap();
    let generation = generate(&grammar);

    // start state, after S, after a
    assert_eq!(generation.states.len(), 3);
    assert!(generation.conflicts.is_empty());

    assert_eq!(generation.table.actions[0][1], LrAction::Shift(2));
    assert_eq!(generation.table.goto[0][1], 1);
    assert_eq!(generation.table.actions[1][EOF], LrAction::Accept);
    assert_eq!(generation.table.actions[2][EOF], LrAction::Reduce(1));
}

#[test]
fn dangling_else_reports_shift_reduce() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(DANGLING_ELSE.as_bytes()).unwrap();
    let generation = generate(&grammar);

    let e = grammar.terminal_id("e").unwrap();
    let conflict = generation
        .conflicts
        .iter()
        .find(|conflict| conflict.kind == ConflictKind::ShiftReduce && conflict.terminal == e)
        .expect("no shift-reduce conflict on 'e'");

    // the reduce recorded first stays in the table
    assert!(matches!(
        generation.table.actions[conflict.state][conflict.terminal],
        LrAction::Reduce(_)
    ));

    // the witness walks from the conflict state back toward state 0
    assert!(!conflict.witness.is_empty());
    assert_eq!(conflict.witness[0].0, conflict.state);
}

#[test]
fn conflicted_tables_are_still_filled() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(DANGLING_ELSE.as_bytes()).unwrap();
    let generation = generate(&grammar);

    // rows exist for every discovered state, conflicts notwithstanding
    assert_eq!(generation.table.actions.len(), generation.states.len());
    assert!(generation
        .table
        .actions
        .iter()
        .flatten()
        .any(|action| matches!(action, LrAction::Accept)));
}
