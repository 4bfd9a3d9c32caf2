//! Tests for the Symbol type's public surface.

use gramparse::Symbol;

#[test]
fn terminal_and_nonterminal_are_distinct() {
    let term = Symbol::Terminal("id".to_string());
    let nonterm = Symbol::Nonterminal("id".to_string());
    assert_ne!(term, nonterm);
    assert!(term.is_terminal());
    assert!(nonterm.is_nonterminal());
}

#[test]
fn epsilon_and_end_marker_display() {
    assert_eq!(Symbol::Epsilon.to_string(), "<empty>");
    assert_eq!(Symbol::EndMarker.to_string(), "$end");
    assert!(Symbol::Epsilon.is_epsilon());
    assert!(Symbol::EndMarker.is_end_marker());
}

#[test]
fn name_is_none_for_sentinels() {
    assert_eq!(Symbol::Epsilon.name(), None);
    assert_eq!(Symbol::EndMarker.name(), None);
    assert_eq!(Symbol::Terminal("x".into()).name(), Some("x"));
}
