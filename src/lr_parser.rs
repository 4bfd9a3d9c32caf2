//! Shift/reduce driver executing the semantic actions attached to
//! productions, against either an SLR(1) or a CLR(1) table.

use crate::error::{GrammarError, Result};
use crate::grammar::Grammar;
use crate::symbol::Symbol;
use crate::table::{ActionEntry, Table};
use crate::token::Token;

/// Drives a shift/reduce parse over `tokens`, calling each reduced
/// production's LR action (if any) with the reduced-to token, the matched
/// rhs tokens (`None` for an epsilon production), and the symbol stack below
/// it, then pushing the result.
///
/// `tokens` must not include the end-of-input token; it is appended
/// automatically.
pub struct LrParser<'g, V> {
    grammar: &'g Grammar<V>,
    table: &'g Table,
}

impl<'g, V: Clone> LrParser<'g, V> {
    pub fn new(grammar: &'g Grammar<V>, table: &'g Table) -> Self {
        Self { grammar, table }
    }

    /// Runs the driver and returns the final value attached to the accepted
    /// start symbol, if any.
    pub fn parse(&self, mut tokens: Vec<Token<V>>) -> Result<Option<V>> {
        tokens.push(Token::end());

        let mut states: Vec<usize> = vec![0];
        let mut symbols: Vec<Token<V>> = vec![Token::end()];
        let mut pos = 0;

        loop {
            let state = *states.last().expect("state stack never empties");
            let current = &tokens[pos];
            let lookahead = self.token_symbol(current);

            match self.table.action(state, &lookahead) {
                Some(ActionEntry::Accept) => {
                    return Ok(symbols.pop().and_then(|t| t.value));
                }
                Some(ActionEntry::Shift(next)) => {
                    states.push(*next);
                    symbols.push(current.clone());
                    pos += 1;
                }
                Some(&ActionEntry::Reduce(prod_index)) => {
                    self.reduce(prod_index, &mut states, &mut symbols)?;
                }
                None => {
                    return Err(GrammarError::ParseError(format!(
                        "no action for state {state} on {lookahead}"
                    )));
                }
            }
        }
    }

    fn token_symbol(&self, token: &Token<V>) -> Symbol {
        if token.name == crate::symbol::END_NAME {
            Symbol::EndMarker
        } else {
            Symbol::Terminal(token.name.clone())
        }
    }

    fn reduce(
        &self,
        prod_index: usize,
        states: &mut Vec<usize>,
        symbols: &mut Vec<Token<V>>,
    ) -> Result<()> {
        let production = self.grammar.production(prod_index);
        let rhs_len = production.rhs.len();

        let args: Vec<Token<V>> = symbols.split_off(symbols.len() - rhs_len);
        states.truncate(states.len() - rhs_len);

        let mut lhs = Token::without_value(production.name.clone());
        if let Some(action) = production.action.as_ref().and_then(|a| a.as_lr()) {
            let arg_slice = if rhs_len == 0 { None } else { Some(args.as_slice()) };
            action(&mut lhs, arg_slice, symbols.as_slice());
        }

        let state_after_pop = *states.last().expect("state stack never empties");
        let goto_symbol = Symbol::Nonterminal(production.name.clone());
        let next = self
            .table
            .goto(state_after_pop, &goto_symbol)
            .ok_or_else(|| {
                GrammarError::ParseError(format!(
                    "no goto from state {state_after_pop} on {goto_symbol}"
                ))
            })?;

        states.push(next);
        symbols.push(lhs);
        Ok(())
    }
}
