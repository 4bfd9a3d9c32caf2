//! Tests for FIRST/FOLLOW computation against a left-recursive grammar.

use gramparse::first_follow::{compute_first_sets, compute_follow_sets};
use gramparse::grammar::Grammar;
use gramparse::Symbol;

fn nt(name: &str) -> Symbol {
    Symbol::Nonterminal(name.to_string())
}
fn t(name: &str) -> Symbol {
    Symbol::Terminal(name.to_string())
}

/// S -> S + T | T
/// T -> T * F | F
/// F -> ( S ) | i
fn expr_grammar() -> Grammar<()> {
    let mut g = Grammar::new(["+", "*", "(", ")", "i"]).unwrap();
    g.add_production("S", vec![nt("S"), t("+"), nt("T")], None)
        .unwrap();
    g.add_production("S", vec![nt("T")], None).unwrap();
    g.add_production("T", vec![nt("T"), t("*"), nt("F")], None)
        .unwrap();
    g.add_production("T", vec![nt("F")], None).unwrap();
    g.add_production("F", vec![t("("), nt("S"), t(")")], None)
        .unwrap();
    g.add_production("F", vec![t("i")], None).unwrap();
    g.set_start(None).unwrap();
    g
}

#[test]
fn first_of_each_nonterminal_is_the_leaf_terminals() {
    let g = expr_grammar();
    let first = compute_first_sets(&g);
    for nonterminal in ["S", "T", "F"] {
        let set = first.get(&nt(nonterminal)).unwrap();
        assert!(set.contains(&t("(")));
        assert!(set.contains(&t("i")));
        assert!(!set.contains(&Symbol::Epsilon));
    }
}

#[test]
fn follow_sets_match_the_textbook_result() {
    let g = expr_grammar();
    let first = compute_first_sets(&g);
    let follow = compute_follow_sets(&g, &first);

    let follow_s = follow.get(&nt("S")).unwrap();
    assert!(follow_s.contains(&Symbol::EndMarker));
    assert!(follow_s.contains(&t(")")));
    assert!(follow_s.contains(&t("+")));

    let follow_t = follow.get(&nt("T")).unwrap();
    assert!(follow_t.contains(&t("+")));
    assert!(follow_t.contains(&t("*")));
    assert!(follow_t.contains(&Symbol::EndMarker));

    let follow_f = follow.get(&nt("F")).unwrap();
    assert!(follow_f.contains(&t("*")));
    assert!(!follow_f.contains(&t("i")));
}

#[test]
fn recomputing_first_sets_is_idempotent() {
    let g = expr_grammar();
    let first_a = compute_first_sets(&g);
    let first_b = compute_first_sets(&g);
    assert_eq!(first_a, first_b);
}
