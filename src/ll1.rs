//! LL(1) predictive parser with attribute-grammar hooks.
//!
//! Builds `M[nonterminal, terminal]` from FIRST/FOLLOW exactly as the
//! textbook algorithm does, then drives a recursive-descent expansion that
//! threads an inherited/synthesized attribute dictionary through each
//! production's hooks, mirroring how the attribute-grammar examples this was
//! distilled from pass a pair of shared dicts down and back up the parse
//! tree.

use crate::error::{GrammarError, Result};
use crate::first_follow::{first_of_sequence, FirstSets, FollowSets};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use crate::token::{Attrs, Token};
use std::cell::Cell;
use std::collections::HashMap;

/// LL(1) predictive parser, holding `M[nonterminal, terminal] -> production`.
pub struct LLParser<'g, V> {
    grammar: &'g Grammar<V>,
    table: HashMap<(String, Symbol), usize>,
}

impl<'g, V: Clone> LLParser<'g, V> {
    /// Builds the LL(1) table for `grammar`. Returns
    /// [`GrammarError::LL1Conflict`] the first time a cell would need two
    /// different productions.
    pub fn build(
        grammar: &'g Grammar<V>,
        first_sets: &FirstSets,
        follow_sets: &FollowSets,
    ) -> Result<Self> {
        let mut table: HashMap<(String, Symbol), usize> = HashMap::new();

        for production in grammar.productions() {
            let lhs = production.name.clone();
            let first_alpha = first_of_sequence(first_sets, &production.rhs);

            for symbol in &first_alpha {
                if symbol.is_epsilon() {
                    continue;
                }
                insert_cell(&mut table, grammar, &lhs, symbol.clone(), production.index)?;
            }

            if first_alpha.contains(&Symbol::Epsilon) {
                let follow_lhs = follow_sets
                    .get(&Symbol::Nonterminal(lhs.clone()))
                    .cloned()
                    .unwrap_or_default();
                for symbol in follow_lhs {
                    insert_cell(&mut table, grammar, &lhs, symbol, production.index)?;
                }
            }
        }

        Ok(Self { grammar, table })
    }

    /// Parses `tokens` from the grammar's start symbol, returning the
    /// synthesized attributes accumulated by the top-level production's
    /// hooks. A trailing token named [`crate::symbol::END_NAME`] is
    /// optional: the driver recognizes it as the end-of-input lookahead
    /// without ever shifting it, matching the shift/reduce driver's input
    /// convention; omitting it and relying on stream exhaustion works too.
    pub fn parse(&self, tokens: &[Token<V>]) -> Result<Attrs<V>> {
        let start = self
            .grammar
            .start_symbol()
            .ok_or_else(|| GrammarError::ParseError("grammar has no start symbol".into()))?;
        let pos = Cell::new(0);
        let mut old = Attrs::new();
        let attrs = self.predict(&Symbol::Nonterminal(start.to_string()), tokens, &pos, &mut old)?;

        let consumed_len = match tokens.last() {
            Some(tok) if tok.name == crate::symbol::END_NAME => tokens.len() - 1,
            _ => tokens.len(),
        };
        if pos.get() != consumed_len {
            return Err(GrammarError::ParseError(format!(
                "unconsumed input starting at token {}",
                pos.get()
            )));
        }
        Ok(attrs)
    }

    /// Convenience accept/reject parse, ignoring attribute values — matches
    /// the boolean-acceptance ergonomics of a plain recognizer.
    pub fn accepts(&self, tokens: &[Token<V>]) -> bool {
        self.parse(tokens).is_ok()
    }

    fn current_symbol(&self, tokens: &[Token<V>], pos: &Cell<usize>) -> Symbol {
        match tokens.get(pos.get()) {
            Some(tok) if tok.name == crate::symbol::END_NAME => Symbol::EndMarker,
            Some(tok) => Symbol::Terminal(tok.name.clone()),
            None => Symbol::EndMarker,
        }
    }

    /// Predicts and expands the production for nonterminal `sym` given the
    /// current lookahead, returning its synthesized attributes.
    fn predict(
        &self,
        sym: &Symbol,
        tokens: &[Token<V>],
        pos: &Cell<usize>,
        old: &mut Attrs<V>,
    ) -> Result<Attrs<V>> {
        let Symbol::Nonterminal(name) = sym else {
            panic!("predict called on non-nonterminal symbol");
        };
        let lookahead = self.current_symbol(tokens, pos);
        let prod_index = *self
            .table
            .get(&(name.clone(), lookahead.clone()))
            .ok_or_else(|| {
                GrammarError::ParseError(format!(
                    "no production for M[{name}, {lookahead}] at token {}",
                    pos.get()
                ))
            })?;
        self.expand(prod_index, tokens, pos, old)
    }

    /// Expands one production, running its hooks in order and recursing
    /// into each rhs nonterminal. Terminal matches store the matched
    /// token's value (if any) under `"<terminal>.val"`.
    fn expand(
        &self,
        prod_index: usize,
        tokens: &[Token<V>],
        pos: &Cell<usize>,
        old: &mut Attrs<V>,
    ) -> Result<Attrs<V>> {
        let production = self.grammar.production(prod_index);
        let hooks = production.ll_hooks();
        let mut new: Attrs<V> = Attrs::new();

        for (i, symbol) in production.rhs.iter().enumerate() {
            if let Some(hook) = hooks.get(i) {
                hook(&mut new, old);
            }

            match symbol {
                Symbol::Terminal(name) => {
                    let tok = tokens.get(pos.get()).ok_or_else(|| {
                        GrammarError::ParseError(format!("unexpected end of input, expected {name}"))
                    })?;
                    if tok.name != *name {
                        return Err(GrammarError::ParseError(format!(
                            "expected terminal {name}, found {}",
                            tok.name
                        )));
                    }
                    if let Some(value) = tok.value.clone() {
                        new.insert(format!("{name}.val"), value);
                    }
                    pos.set(pos.get() + 1);
                }
                Symbol::Nonterminal(_) => {
                    let child = self.predict(symbol, tokens, pos, &mut new)?;
                    new.extend(child);
                }
                Symbol::Epsilon | Symbol::EndMarker => {}
            }
        }

        if let Some(hook) = hooks.get(production.rhs.len()) {
            hook(&mut new, old);
        }

        Ok(new)
    }

    pub fn table(&self) -> &HashMap<(String, Symbol), usize> {
        &self.table
    }
}

fn insert_cell<V>(
    table: &mut HashMap<(String, Symbol), usize>,
    grammar: &Grammar<V>,
    lhs: &str,
    symbol: Symbol,
    prod_index: usize,
) -> Result<()> {
    let key = (lhs.to_string(), symbol.clone());
    if let Some(&existing) = table.get(&key) {
        if existing != prod_index {
            return Err(GrammarError::LL1Conflict {
                nonterminal: lhs.to_string(),
                terminal: symbol.to_string(),
                prod1: grammar.production(existing).to_string(),
                prod2: grammar.production(prod_index).to_string(),
            });
        }
        return Ok(());
    }
    table.insert(key, prod_index);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_follow::{compute_first_sets, compute_follow_sets};
    use crate::grammar::Grammar;

    fn nt(name: &str) -> Symbol {
        Symbol::Nonterminal(name.to_string())
    }
    fn t(name: &str) -> Symbol {
        Symbol::Terminal(name.to_string())
    }

    /// S -> A B
    /// A -> a A | d
    /// B -> b B c | e
    fn sample_grammar() -> Grammar<()> {
        let mut g = Grammar::new(["a", "b", "c", "d", "e"]).unwrap();
        g.add_production("S", vec![nt("A"), nt("B")], None).unwrap();
        g.add_production("A", vec![t("a"), nt("A")], None).unwrap();
        g.add_production("A", vec![t("d")], None).unwrap();
        g.add_production("B", vec![t("b"), nt("B"), t("c")], None)
            .unwrap();
        g.add_production("B", vec![t("e")], None).unwrap();
        g.set_start(Some("S")).unwrap();
        g
    }

    fn tokens(names: &[&str]) -> Vec<Token<()>> {
        names.iter().map(|n| Token::without_value(*n)).collect()
    }

    #[test]
    fn accepts_simple_string() {
        let g = sample_grammar();
        let first = compute_first_sets(&g);
        let follow = compute_follow_sets(&g, &first);
        let parser = LLParser::build(&g, &first, &follow).unwrap();

        assert!(parser.accepts(&tokens(&["d", "e"])));
        assert!(parser.accepts(&tokens(&["a", "d", "b", "e", "c"])));
        assert!(!parser.accepts(&tokens(&["a"])));
    }

    #[test]
    fn trailing_end_token_is_recognized_as_the_end_marker() {
        let g = sample_grammar();
        let first = compute_first_sets(&g);
        let follow = compute_follow_sets(&g, &first);
        let parser = LLParser::build(&g, &first, &follow).unwrap();

        let mut input = tokens(&["d", "e"]);
        input.push(Token::end());
        assert!(parser.parse(&input).is_ok());

        let mut short_input = tokens(&["a"]);
        short_input.push(Token::end());
        assert!(parser.parse(&short_input).is_err());
    }
}
