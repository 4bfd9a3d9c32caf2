//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! Implements the classic fixed-point algorithms from Aho et al.,
//! "Compilers: Principles, Techniques, and Tools" (2nd Edition), section 4.4.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use indexmap::{IndexMap, IndexSet};

/// Maps each symbol to its FIRST set.
pub type FirstSets = IndexMap<Symbol, IndexSet<Symbol>>;
/// Maps each nonterminal to its FOLLOW set.
pub type FollowSets = IndexMap<Symbol, IndexSet<Symbol>>;

/// Computes the FIRST sets for every terminal and nonterminal in `grammar`.
///
/// Terminals and the two sentinels seed their own singleton sets; every
/// nonterminal starts empty and grows by fixed-point iteration over all
/// productions (including the synthetic `S' -> start` production) until a
/// pass adds nothing new.
pub fn compute_first_sets<V>(grammar: &Grammar<V>) -> FirstSets {
    let mut first_sets: FirstSets = IndexMap::new();

    for terminal in grammar.terminals() {
        let sym = Symbol::Terminal(terminal.clone());
        first_sets.insert(sym.clone(), IndexSet::from([sym]));
    }
    first_sets.insert(Symbol::Epsilon, IndexSet::from([Symbol::Epsilon]));
    first_sets.insert(Symbol::EndMarker, IndexSet::from([Symbol::EndMarker]));
    for name in grammar.nonterminals() {
        first_sets.insert(Symbol::Nonterminal(name.to_string()), IndexSet::new());
    }

    let mut changed = true;
    while changed {
        changed = false;

        for index in 0..=grammar.productions().len() {
            let production = grammar.production(index);
            let lhs = Symbol::Nonterminal(production.name.clone());
            let current_len = first_sets.get(&lhs).map(|s| s.len()).unwrap_or(0);

            let rhs_first = first_of_sequence(&first_sets, &production.rhs);
            let entry = first_sets.entry(lhs).or_default();
            for sym in rhs_first {
                entry.insert(sym);
            }
            if entry.len() != current_len {
                changed = true;
            }
        }
    }

    first_sets
}

/// Computes FIRST(symbols): the set of terminals (and possibly epsilon) that
/// can begin a string derived from the sequence.
pub fn first_of_sequence(first_sets: &FirstSets, symbols: &[Symbol]) -> IndexSet<Symbol> {
    let mut result = IndexSet::new();
    let mut has_epsilon = true;

    for symbol in symbols {
        if !has_epsilon {
            break;
        }

        let first_sym = first_sets.get(symbol).cloned().unwrap_or_default();
        for sym in &first_sym {
            if !sym.is_epsilon() {
                result.insert(sym.clone());
            }
        }
        has_epsilon = first_sym.contains(&Symbol::Epsilon);
    }

    if has_epsilon {
        result.insert(Symbol::Epsilon);
    }

    result
}

/// Computes the FOLLOW sets for every nonterminal in `grammar`.
///
/// FOLLOW(start) always contains `$end`. For each production `A -> alpha B
/// beta`, FIRST(beta) minus epsilon flows into FOLLOW(B); if beta is empty
/// or nullable, FOLLOW(A) flows into FOLLOW(B) too.
pub fn compute_follow_sets<V>(grammar: &Grammar<V>, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = IndexMap::new();
    for name in grammar.nonterminals() {
        follow_sets.insert(Symbol::Nonterminal(name.to_string()), IndexSet::new());
    }

    if let Some(start) = grammar.start_symbol() {
        follow_sets
            .entry(Symbol::Nonterminal(start.to_string()))
            .or_default()
            .insert(Symbol::EndMarker);
    }

    let mut changed = true;
    while changed {
        changed = false;

        for index in 0..=grammar.productions().len() {
            let production = grammar.production(index);
            let lhs = Symbol::Nonterminal(production.name.clone());
            let rhs = &production.rhs;

            for (i, symbol) in rhs.iter().enumerate() {
                if !symbol.is_nonterminal() {
                    continue;
                }

                let current_len = follow_sets.get(symbol).map(|s| s.len()).unwrap_or(0);
                let beta = &rhs[i + 1..];
                let first_beta = first_of_sequence(first_sets, beta);

                let mut additions: Vec<Symbol> = first_beta
                    .iter()
                    .filter(|s| !s.is_epsilon())
                    .cloned()
                    .collect();

                if beta.is_empty() || first_beta.contains(&Symbol::Epsilon) {
                    if let Some(follow_lhs) = follow_sets.get(&lhs) {
                        additions.extend(follow_lhs.iter().cloned());
                    }
                }

                let entry = follow_sets.entry(symbol.clone()).or_default();
                for sym in additions {
                    entry.insert(sym);
                }
                if entry.len() != current_len {
                    changed = true;
                }
            }
        }
    }

    follow_sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::Grammar;
    use crate::symbol::Symbol;

    fn nt(name: &str) -> Symbol {
        Symbol::Nonterminal(name.to_string())
    }
    fn t(name: &str) -> Symbol {
        Symbol::Terminal(name.to_string())
    }

    /// E -> T E'
    /// E' -> + T E' | <empty>
    /// T -> id
    fn expr_grammar() -> Grammar<()> {
        let mut g = Grammar::new(["+", "id"]).unwrap();
        g.add_production("E", vec![nt("T"), nt("E'")], None).unwrap();
        g.add_production("E'", vec![t("+"), nt("T"), nt("E'")], None)
            .unwrap();
        g.add_production("E'", vec![], None).unwrap();
        g.add_production("T", vec![t("id")], None).unwrap();
        g.set_start(Some("E")).unwrap();
        g
    }

    #[test]
    fn first_of_nullable_nonterminal_includes_epsilon() {
        let g = expr_grammar();
        let first = compute_first_sets(&g);
        let first_eprime = first.get(&nt("E'")).unwrap();
        assert!(first_eprime.contains(&t("+")));
        assert!(first_eprime.contains(&Symbol::Epsilon));
    }

    #[test]
    fn follow_of_start_contains_end_marker() {
        let g = expr_grammar();
        let first = compute_first_sets(&g);
        let follow = compute_follow_sets(&g, &first);
        assert!(follow.get(&nt("E")).unwrap().contains(&Symbol::EndMarker));
        assert!(follow.get(&nt("E'")).unwrap().contains(&Symbol::EndMarker));
        assert!(follow.get(&nt("T")).unwrap().contains(&t("+")));
    }
}
