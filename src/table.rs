//! ACTION/GOTO table construction for SLR(1) and canonical LR(1) parsers.

use crate::error::{GrammarError, Result};
use crate::first_follow::{compute_first_sets, compute_follow_sets, FollowSets};
use crate::grammar::Grammar;
use crate::lr0;
use crate::lr1;
use crate::symbol::Symbol;
use std::collections::HashMap;

/// A parser action, shared by the SLR(1) and CLR(1) tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionEntry {
    Shift(usize),
    Reduce(usize),
    Accept,
}

/// A built ACTION/GOTO table, ready for the shift/reduce driver.
pub struct Table {
    pub action: HashMap<(usize, Symbol), ActionEntry>,
    pub goto: HashMap<(usize, Symbol), usize>,
    pub state_count: usize,
}

impl Table {
    pub fn action(&self, state: usize, symbol: &Symbol) -> Option<&ActionEntry> {
        self.action.get(&(state, symbol.clone()))
    }

    pub fn goto(&self, state: usize, symbol: &Symbol) -> Option<usize> {
        self.goto.get(&(state, symbol.clone())).copied()
    }
}

/// Builds an SLR(1) table: an LR(0) automaton with reduce actions placed on
/// `FOLLOW(lhs)` rather than a per-item lookahead.
pub fn build_slr_table<V>(grammar: &Grammar<V>) -> Result<Table> {
    let first_sets = compute_first_sets(grammar);
    let follow_sets = compute_follow_sets(grammar, &first_sets);
    let automaton = lr0::build_automaton(grammar);
    build_table_from_lr0(grammar, &automaton, &follow_sets)
}

fn build_table_from_lr0<V>(
    grammar: &Grammar<V>,
    automaton: &lr0::Automaton,
    follow_sets: &FollowSets,
) -> Result<Table> {
    let mut action = HashMap::new();
    let mut goto = HashMap::new();

    for (state_id, state) in automaton.states.iter().enumerate() {
        for item in state {
            if !item.is_reduce(grammar) {
                if let Some(symbol) = item.symbol_after_dot(grammar) {
                    if symbol.is_terminal() || symbol.is_end_marker() {
                        if let Some(&next) = automaton.transitions.get(&(state_id, symbol.clone()))
                        {
                            insert_shift(&mut action, state_id, symbol.clone(), next)?;
                        }
                    }
                }
                continue;
            }

            if item.prod == 0 {
                action.insert((state_id, Symbol::EndMarker), ActionEntry::Accept);
                continue;
            }

            let production = grammar.production(item.prod);
            let lhs = Symbol::Nonterminal(production.name.clone());
            let follow = follow_sets.get(&lhs).cloned().unwrap_or_default();
            for symbol in follow {
                insert_reduce(grammar, &mut action, state_id, symbol, item.prod)?;
            }
        }

        for ((src, symbol), &next) in &automaton.transitions {
            if *src == state_id && symbol.is_nonterminal() {
                goto.insert((state_id, symbol.clone()), next);
            }
        }
    }

    Ok(Table {
        action,
        goto,
        state_count: automaton.states.len(),
    })
}

/// Builds a canonical LR(1) (CLR(1)) table: reduce actions are placed using
/// each item's own lookahead set rather than the coarser `FOLLOW(lhs)`.
pub fn build_clr_table<V>(grammar: &Grammar<V>) -> Result<Table> {
    let first_sets = compute_first_sets(grammar);
    let automaton = lr1::build_automaton(grammar, &first_sets);

    let mut action = HashMap::new();
    let mut goto = HashMap::new();

    for (state_id, state) in automaton.states.iter().enumerate() {
        for item in state {
            if !item.is_reduce(grammar) {
                if let Some(symbol) = item.symbol_after_dot(grammar) {
                    if symbol.is_terminal() || symbol.is_end_marker() {
                        if let Some(&next) = automaton.transitions.get(&(state_id, symbol.clone()))
                        {
                            insert_shift(&mut action, state_id, symbol.clone(), next)?;
                        }
                    }
                }
                continue;
            }

            if item.prod == 0 {
                action.insert((state_id, Symbol::EndMarker), ActionEntry::Accept);
                continue;
            }

            insert_reduce(grammar, &mut action, state_id, item.lookahead.clone(), item.prod)?;
        }

        for ((src, symbol), &next) in &automaton.transitions {
            if *src == state_id && symbol.is_nonterminal() {
                goto.insert((state_id, symbol.clone()), next);
            }
        }
    }

    Ok(Table {
        action,
        goto,
        state_count: automaton.states.len(),
    })
}

fn insert_shift(
    action: &mut HashMap<(usize, Symbol), ActionEntry>,
    state: usize,
    symbol: Symbol,
    next: usize,
) -> Result<()> {
    let key = (state, symbol.clone());
    if action.contains_key(&key) {
        return Err(GrammarError::ShiftReduceConflict {
            state,
            symbol: symbol.to_string(),
        });
    }
    action.insert(key, ActionEntry::Shift(next));
    Ok(())
}

fn insert_reduce<V>(
    grammar: &Grammar<V>,
    action: &mut HashMap<(usize, Symbol), ActionEntry>,
    state: usize,
    symbol: Symbol,
    prod: usize,
) -> Result<()> {
    let key = (state, symbol.clone());
    match action.get(&key) {
        None => {
            action.insert(key, ActionEntry::Reduce(prod));
            Ok(())
        }
        Some(ActionEntry::Shift(_)) => Err(GrammarError::ShiftReduceConflict {
            state,
            symbol: symbol.to_string(),
        }),
        Some(ActionEntry::Reduce(other)) => {
            if *other == prod {
                Ok(())
            } else {
                Err(GrammarError::ReduceReduceConflict {
                    state,
                    symbol: symbol.to_string(),
                    prod1: grammar.production(*other).to_string(),
                    prod2: grammar.production(prod).to_string(),
                })
            }
        }
        Some(ActionEntry::Accept) => Ok(()),
    }
}
