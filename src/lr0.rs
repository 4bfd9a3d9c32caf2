//! LR(0) item sets and the canonical LR(0) automaton.
//!
//! States are represented as `BTreeSet<Item>` rather than `HashSet` so two
//! states compare equal by value regardless of insertion order — dedup during
//! canonical-collection construction relies on that, and a `HashSet` would
//! make the resulting state numbering depend on hash iteration order.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// An LR(0) item: production `prod` (by index into the grammar, 0 = the
/// synthetic start production) with the dot at `dot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub prod: usize,
    pub dot: usize,
}

impl Item {
    pub fn new(prod: usize, dot: usize) -> Self {
        Self { prod, dot }
    }

    pub fn is_reduce<V>(&self, grammar: &Grammar<V>) -> bool {
        self.dot >= grammar.production(self.prod).rhs.len()
    }

    pub fn symbol_after_dot<'g, V>(&self, grammar: &'g Grammar<V>) -> Option<&'g Symbol> {
        grammar.production(self.prod).symbol_at(self.dot)
    }

    pub fn advance(&self) -> Self {
        Self::new(self.prod, self.dot + 1)
    }
}

/// A state of the LR(0) automaton: a value-equal, dedup-friendly item set.
pub type State = BTreeSet<Item>;

/// The canonical LR(0) collection: states plus the `(state, symbol) -> state`
/// transition function (the shift/goto edges of the automaton).
pub struct Automaton {
    pub states: Vec<State>,
    pub transitions: HashMap<(usize, Symbol), usize>,
}

/// Closure of a seed item set: for every item `[A -> alpha . B beta]` with B
/// a nonterminal, add `[B -> . gamma]` for every production of B.
pub fn closure<V>(grammar: &Grammar<V>, items: State) -> State {
    let mut result = items;
    let mut changed = true;

    while changed {
        changed = false;
        let current: Vec<Item> = result.iter().copied().collect();

        for item in current {
            if let Some(Symbol::Nonterminal(name)) = item.symbol_after_dot(grammar) {
                for prod in grammar.productions_of(name) {
                    let new_item = Item::new(prod.index, 0);
                    if result.insert(new_item) {
                        changed = true;
                    }
                }
            }
        }
    }

    result
}

/// goto(state, symbol): advance every item whose post-dot symbol is `symbol`,
/// then close.
pub fn goto<V>(grammar: &Grammar<V>, state: &State, symbol: &Symbol) -> State {
    let mut moved = State::new();
    for item in state {
        if item.symbol_after_dot(grammar) == Some(symbol) {
            moved.insert(item.advance());
        }
    }
    closure(grammar, moved)
}

/// Builds the canonical collection of LR(0) states starting from the closure
/// of `[S' -> . start]`.
pub fn build_automaton<V>(grammar: &Grammar<V>) -> Automaton {
    let initial = closure(grammar, State::from([Item::new(0, 0)]));

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
            let next = goto(grammar, &states[state_id], &symbol);
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
