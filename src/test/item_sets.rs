use crate::grammar::{Grammar, Symbol, EOF};
use crate::table::item::{ItemSet, LrItem};

/// Left-recursive arithmetic expression grammar; rules are numbered
/// 0: S'→E, 1: E→E+T, 2: E→T, 3: T→T*F, 4: T→F, 5: F→(E), 6: F→id
const ARITHMETIC: &str = "id + * ( )\nE T F\nE E + T\nE T\nT T * F\nT F\nF ( E )\nF id\n";

/// The closed initial state of the arithmetic grammar
fn initial_state(grammar: &Grammar) -> ItemSet {
    let mut state = ItemSet::seeded(LrItem {
        rule: 0,
        dot: 0,
        lookahead: EOF,
    });
    state.close(grammar);
    state
}

#[test]
fn closure_saturates_lookaheads() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(ARITHMETIC.as_bytes()).unwrap();
    let state = initial_state(&grammar);

    // E items under { $, + }, T items under { $, +, * }, F items likewise:
    // 1 + 2·2 + 2·3 + 2·3 items in total
    assert_eq!(state.len(), 17);

    // spot checks: [E → · E + T, +] and [F → · id, *]
    assert!(state.iter().any(|&item| item
        == LrItem {
            rule: 1,
            dot: 0,
            lookahead: 2,
        }));
    assert!(state.iter().any(|&item| item
        == LrItem {
            rule: 6,
            dot: 0,
            lookahead: 3,
        }));
}

#[test]
fn closure_is_idempotent() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(ARITHMETIC.as_bytes()).unwrap();
    let state = initial_state(&grammar);

    let mut again = state.clone();
    again.close(&grammar);

    assert_eq!(state, again);
}

#[test]
fn equality_ignores_insertion_order() {
    env_logger::try_init().ok();

    let items = [
        LrItem {
            rule: 1,
            dot: 0,
            lookahead: 0,
        },
        LrItem {
            rule: 2,
            dot: 1,
            lookahead: 2,
        },
        LrItem {
            rule: 6,
            dot: 0,
            lookahead: 3,
        },
    ];

    let mut forward = ItemSet::default();
    let mut backward = ItemSet::default();
    for item in items {
        forward.insert(item);
    }
    for item in items.into_iter().rev() {
        backward.insert(item);
    }

    assert_eq!(forward, backward);
}

#[test]
fn insert_rejects_duplicates() {
    env_logger::try_init().ok();

    let item = LrItem {
        rule: 0,
        dot: 0,
        lookahead: 0,
    };
    let mut set = ItemSet::default();

    assert!(set.insert(item));
    assert!(!set.insert(item));
    assert_eq!(set.len(), 1);
}

#[test]
fn successor_advances_every_matching_item() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(ARITHMETIC.as_bytes()).unwrap();
    let state = initial_state(&grammar);

    for symbol in [
        Symbol::Nonterminal(1),
        Symbol::Nonterminal(2),
        Symbol::Nonterminal(3),
        Symbol::Terminal(1),
        Symbol::Terminal(4),
    ] {
        let successor = state.successor(&grammar, symbol);
        for item in state.iter() {
            if item.next_symbol(&grammar) == Some(symbol) {
                let advanced = item.advanced();
                assert!(
                    successor.iter().any(|&moved| moved == advanced),
                    "{:?} missing from successor over {:?}",
                    advanced,
                    symbol
                );
            }
        }
        assert!(!successor.is_empty());
    }
}

#[test]
fn successor_is_empty_without_matching_items() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(ARITHMETIC.as_bytes()).unwrap();
    let state = initial_state(&grammar);

    // nothing in the initial state has `)` or `+` after the dot
    assert!(state.successor(&grammar, Symbol::Terminal(5)).is_empty());
    assert!(state.successor(&grammar, Symbol::Terminal(2)).is_empty());
}

#[test]
fn next_symbol_is_none_past_the_end() {
    env_logger::try_init().ok();

    let grammar = Grammar::from_reader(ARITHMETIC.as_bytes()).unwrap();

    // [F → id ·, $]
    let item = LrItem {
        rule: 6,
        dot: 1,
        lookahead: EOF,
    };
    assert_eq!(item.next_symbol(&grammar), None);

    // [F → · id, $]
    let item = LrItem {
        rule: 6,
        dot: 0,
        lookahead: EOF,
    };
    assert_eq!(item.next_symbol(&grammar), Some(Symbol::Terminal(1)));
}
