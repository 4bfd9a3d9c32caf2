//! Tests for grammar construction and validation.

use gramparse::grammar::Grammar;
use gramparse::{GrammarError, Symbol};

fn nt(name: &str) -> Symbol {
    Symbol::Nonterminal(name.to_string())
}
fn t(name: &str) -> Symbol {
    Symbol::Terminal(name.to_string())
}

#[test]
fn add_production_and_set_start() {
    let mut g: Grammar<()> = Grammar::new(["a"]).unwrap();
    g.add_production("S", vec![nt("A")], None).unwrap();
    g.add_production("A", vec![t("a")], None).unwrap();
    g.set_start(None).unwrap();

    assert_eq!(g.start_symbol(), Some("S"));
    assert_eq!(g.productions().len(), 2);
    assert!(g.is_nonterminal("A"));
    assert!(g.is_terminal("a"));
}

#[test]
fn reserved_name_is_illegal() {
    let mut g: Grammar<()> = Grammar::new(["a"]).unwrap();
    let err = g.add_production("$end", vec![t("a")], None).unwrap_err();
    assert!(matches!(err, GrammarError::IllegalSymbol(_)));
}

#[test]
fn terminal_name_as_production_name_is_illegal() {
    let mut g: Grammar<()> = Grammar::new(["a"]).unwrap();
    let err = g.add_production("a", vec![], None).unwrap_err();
    assert!(matches!(err, GrammarError::IllegalSymbol(_)));
}

#[test]
fn set_start_rejects_unknown_nonterminal() {
    let mut g: Grammar<()> = Grammar::new(["a"]).unwrap();
    g.add_production("S", vec![t("a")], None).unwrap();
    let err = g.set_start(Some("Q")).unwrap_err();
    assert!(matches!(err, GrammarError::IllegalStart(_)));
}

#[test]
fn undefined_nonterminal_is_detected_at_set_start() {
    let mut g: Grammar<()> = Grammar::new(["a"]).unwrap();
    g.add_production("S", vec![nt("Ghost"), t("a")], None)
        .unwrap();
    let err = g.set_start(None).unwrap_err();
    assert!(matches!(err, GrammarError::UndefinedNonterminal(_)));
}

#[test]
fn duplicate_productions_are_allowed() {
    let mut g: Grammar<()> = Grammar::new(["a"]).unwrap();
    g.add_production("A", vec![t("a")], None).unwrap();
    g.add_production("A", vec![t("a")], None).unwrap();
    g.set_start(Some("A")).unwrap();
    assert_eq!(g.productions().len(), 2);
}

#[test]
fn synthetic_start_production_wraps_the_start_symbol() {
    let mut g: Grammar<()> = Grammar::new(["a"]).unwrap();
    g.add_production("S", vec![t("a")], None).unwrap();
    g.set_start(None).unwrap();
    assert_eq!(g.production(0).rhs, vec![nt("S")]);
}
