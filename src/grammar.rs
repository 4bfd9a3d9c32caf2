//! Grammar module for context-free grammars.
//!
//! This module provides the data structures for productions and their
//! attached semantic actions, and the [`Grammar`] type that owns them.

use crate::error::{GrammarError, Result};
use crate::symbol::{is_reserved, Symbol};
use crate::token::{Attrs, Token};
use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::rc::Rc;

/// LR semantic action: `(lhs, args_or_none, remaining_stack) -> ()`, setting `lhs.value`.
pub type LrAction<V> = Rc<dyn Fn(&mut Token<V>, Option<&[Token<V>]>, &[Token<V>])>;

/// One LL(1) attribute hook: `(new_attrs, old_attrs) -> ()`.
pub type LlHook<V> = Rc<dyn Fn(&mut Attrs<V>, &mut Attrs<V>)>;

/// A production's attached semantic action: either the shift/reduce ABI or
/// the LL(1) per-position hook list, matching the two driver ABIs in the
/// specification. A production normally carries at most one of these,
/// depending on which driver the caller intends to use.
#[derive(Clone)]
pub enum Action<V> {
    Lr(LrAction<V>),
    Ll(Vec<LlHook<V>>),
}

impl<V> Action<V> {
    pub fn lr(f: impl Fn(&mut Token<V>, Option<&[Token<V>]>, &[Token<V>]) + 'static) -> Self {
        Action::Lr(Rc::new(f))
    }

    pub fn ll(hooks: Vec<LlHook<V>>) -> Self {
        Action::Ll(hooks)
    }

    pub fn as_lr(&self) -> Option<&LrAction<V>> {
        match self {
            Action::Lr(f) => Some(f),
            Action::Ll(_) => None,
        }
    }

    pub fn as_ll(&self) -> Option<&[LlHook<V>]> {
        match self {
            Action::Ll(hooks) => Some(hooks),
            Action::Lr(_) => None,
        }
    }
}

/// A production rule in a context-free grammar: `name -> rhs`.
///
/// Production 0 is always the synthetic `S' -> S` installed by
/// [`Grammar::set_start`]; user productions start at index 1.
pub struct Production<V> {
    pub index: usize,
    pub name: String,
    pub rhs: Vec<Symbol>,
    pub action: Option<Action<V>>,
}

impl<V> Production<V> {
    fn new(index: usize, name: String, rhs: Vec<Symbol>, action: Option<Action<V>>) -> Self {
        Self {
            index,
            name,
            rhs,
            action,
        }
    }

    /// The symbol at `dot`, or `None` if the dot is at (or past) the end.
    pub fn symbol_at(&self, dot: usize) -> Option<&Symbol> {
        self.rhs.get(dot)
    }

    /// The production's LL(1) hooks, tolerating the `|rhs| = 0` single-hook case.
    pub fn ll_hooks(&self) -> &[LlHook<V>] {
        self.action.as_ref().and_then(Action::as_ll).unwrap_or(&[])
    }
}

impl<V> fmt::Display for Production<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.name, crate::symbol::symbols_to_string(&self.rhs))
    }
}

/// A context-free grammar: terminals, productions, and the start symbol.
pub struct Grammar<V> {
    terminals: IndexSet<String>,
    productions: Vec<Production<V>>,
    /// Maps a nonterminal name to the indices of its productions, in
    /// declaration order.
    production_index: IndexMap<String, Vec<usize>>,
    start: Option<String>,
    /// The synthetic `S' -> start` production, installed by `set_start`.
    start_production: Option<Production<V>>,
}

impl<V> Grammar<V> {
    /// Creates a grammar with the given terminal set.
    pub fn new<I, S>(terminals: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for t in terminals {
            let t = t.into();
            if t.is_empty() || is_reserved(&t) {
                return Err(GrammarError::IllegalSymbol(t));
            }
            set.insert(t);
        }
        Ok(Self {
            terminals: set,
            productions: Vec::new(),
            production_index: IndexMap::new(),
            start: None,
            start_production: None,
        })
    }

    /// Appends a production `name -> rhs`, with an optional semantic action.
    ///
    /// No uniqueness check on `(name, rhs)` pairs: duplicate productions are
    /// allowed (they are merely wasteful, not illegal — see the grammar in
    /// testable-property scenario 6).
    pub fn add_production(
        &mut self,
        name: impl Into<String>,
        rhs: Vec<Symbol>,
        action: Option<Action<V>>,
    ) -> Result<usize> {
        let name = name.into();
        if name.is_empty() || is_reserved(&name) || self.terminals.contains(&name) {
            return Err(GrammarError::IllegalSymbol(name));
        }
        for sym in &rhs {
            if let Some(s) = sym.name() {
                if is_reserved(s) {
                    return Err(GrammarError::IllegalSymbol(s.to_string()));
                }
            }
        }

        let index = self.productions.len() + 1; // slot 0 is reserved for S'
        self.production_index
            .entry(name.clone())
            .or_default()
            .push(index);
        self.productions
            .push(Production::new(index, name, rhs, action));
        Ok(index)
    }

    /// Nominates the start symbol and installs the synthetic production 0
    /// (`S' -> start`). Defaults to the name of the first user production.
    pub fn set_start(&mut self, start: Option<&str>) -> Result<()> {
        let start = match start {
            Some(s) => s.to_string(),
            None => self
                .productions
                .first()
                .map(|p| p.name.clone())
                .ok_or_else(|| GrammarError::IllegalStart(String::new()))?,
        };
        if !self.production_index.contains_key(&start) {
            return Err(GrammarError::IllegalStart(start));
        }
        self.start_production = Some(Production::new(
            0,
            crate::symbol::START_NAME.to_string(),
            vec![Symbol::Nonterminal(start.clone())],
            None,
        ));
        self.start = Some(start);
        self.validate_defined()?;
        Ok(())
    }

    /// Eagerly checks that every nonterminal appearing on some rhs is
    /// defined by at least one production.
    fn validate_defined(&self) -> Result<()> {
        for prod in &self.productions {
            for sym in &prod.rhs {
                if let Symbol::Nonterminal(name) = sym {
                    if !self.production_index.contains_key(name) {
                        return Err(GrammarError::UndefinedNonterminal(name.clone()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Idempotent validation entry point: construction errors are already
    /// eager, so this simply re-validates.
    pub fn build_items(&self) -> Result<()> {
        self.validate_defined()
    }

    /// All productions for a given nonterminal, in declaration order.
    pub fn productions_of(&self, name: &str) -> impl Iterator<Item = &Production<V>> {
        self.production_index
            .get(name)
            .into_iter()
            .flat_map(move |idxs| idxs.iter().map(move |&i| self.production(i)))
    }

    /// All productions, in declaration order. Does not include the
    /// synthetic production 0 (look that up via [`Grammar::production`]).
    pub fn productions(&self) -> &[Production<V>] {
        &self.productions
    }

    /// Looks up a production by its 1-based index, or the synthetic
    /// start production for index 0.
    pub fn production(&self, index: usize) -> &Production<V> {
        if index == 0 {
            self.start_production.as_ref().expect("set_start not called")
        } else {
            &self.productions[index - 1]
        }
    }

    pub fn terminals(&self) -> &IndexSet<String> {
        &self.terminals
    }

    /// All nonterminal names, in first-seen order.
    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.production_index.keys().map(|s| s.as_str())
    }

    pub fn start_symbol(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.production_index.contains_key(name)
    }
}

impl<V> fmt::Display for Grammar<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prod in &self.productions {
            writeln!(f, "{}", prod)?;
        }
        Ok(())
    }
}
