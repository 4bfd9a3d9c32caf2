//! Canonical LR(1) item sets and automaton construction.
//!
//! This is deliberately the *canonical* construction — each item carries its
//! own lookahead set and states are never merged by core the way an LALR(1)
//! construction would merge them. That keeps behavior distinguishable from
//! SLR(1) on grammars where FOLLOW-based lookahead is too coarse.

use crate::first_follow::{first_of_sequence, FirstSets};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// An LR(1) item: an LR(0) core (`prod`, `dot`) plus a single lookahead
/// terminal. Two items with the same core but different lookahead are
/// distinct items; a state's full lookahead set for a core is the union of
/// lookaheads over matching items.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub prod: usize,
    pub dot: usize,
    pub lookahead: Symbol,
}

impl Item {
    pub fn new(prod: usize, dot: usize, lookahead: Symbol) -> Self {
        Self {
            prod,
            dot,
            lookahead,
        }
    }

    pub fn is_reduce<V>(&self, grammar: &Grammar<V>) -> bool {
        self.dot >= grammar.production(self.prod).rhs.len()
    }

    pub fn symbol_after_dot<'g, V>(&self, grammar: &'g Grammar<V>) -> Option<&'g Symbol> {
        grammar.production(self.prod).symbol_at(self.dot)
    }

    pub fn advance(&self) -> Self {
        Self::new(self.prod, self.dot + 1, self.lookahead.clone())
    }
}

/// A state of the LR(1) automaton.
pub type State = BTreeSet<Item>;

pub struct Automaton {
    pub states: Vec<State>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Closure of a seed LR(1) item set.
///
/// For `[A -> alpha . B beta, L]` with B a nonterminal, and for every
/// lookahead `l` in `FIRST(beta L)`, add `[B -> . gamma, l]` for every
/// production of B.
pub fn closure<V>(grammar: &Grammar<V>, first_sets: &FirstSets, items: State) -> State {
    let mut result = items;
    let mut changed = true;

    while changed {
        changed = false;
        let current: Vec<Item> = result.iter().cloned().collect();

        for item in current {
            let production = grammar.production(item.prod);
            let Some(Symbol::Nonterminal(name)) = item.symbol_after_dot(grammar) else {
                continue;
            };
            let name = name.clone();

            let beta = &production.rhs[item.dot + 1..];
            let mut lookahead_seq: Vec<Symbol> = beta.to_vec();
            lookahead_seq.push(item.lookahead.clone());
            let first_beta_l = first_of_sequence(first_sets, &lookahead_seq);

            for sub in grammar.productions_of(&name) {
                for lookahead in &first_beta_l {
                    if lookahead.is_epsilon() {
                        continue;
                    }
                    let new_item = Item::new(sub.index, 0, lookahead.clone());
                    if result.insert(new_item) {
                        changed = true;
                    }
                }
            }
        }
    }

    result
}

/// goto(state, symbol): advance every item whose post-dot symbol is
/// `symbol`, preserving lookahead, then close.
pub fn goto<V>(
    grammar: &Grammar<V>,
    first_sets: &FirstSets,
    state: &State,
    symbol: &Symbol,
) -> State {
    let mut moved = State::new();
    for item in state {
        if item.symbol_after_dot(grammar) == Some(symbol) {
            moved.insert(item.advance());
        }
    }
    closure(grammar, first_sets, moved)
}

/// Builds the canonical collection of LR(1) states starting from the closure
/// of `[S' -> . start, $end]`.
pub fn build_automaton<V>(grammar: &Grammar<V>, first_sets: &FirstSets) -> Automaton {
    let seed = Item::new(0, 0, Symbol::EndMarker);
    let initial = closure(grammar, first_sets, State::from([seed]));

    let mut states = vec![initial];
    let mut index_of: HashMap<State, usize> = HashMap::new();
    index_of.insert(states[0].clone(), 0);
    let mut transitions = HashMap::new();
    let mut worklist: VecDeque<usize> = VecDeque::from([0]);

    while let Some(state_id) = worklist.pop_front() {
        let mut symbols: IndexSet<Symbol> = IndexSet::new();
        for item in &states[state_id] {
            if let Some(sym) = item.symbol_after_dot(grammar) {
                symbols.insert(sym.clone());
            }
        }

        for symbol in symbols {
            let next = goto(grammar, first_sets, &states[state_id], &symbol);
            if next.is_empty() {
                continue;
            }
            let next_id = if let Some(&id) = index_of.get(&next) {
                id
            } else {
                let id = states.len();
                index_of.insert(next.clone(), id);
                states.push(next);
                worklist.push_back(id);
                id
            };
            transitions.insert((state_id, symbol), next_id);
        }
    }

    Automaton { states, transitions }
}
